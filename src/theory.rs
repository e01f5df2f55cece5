//! Theory
//!
//! The small slice of music theory the fretting search consumes: pitches,
//! pitch classes, intervals and chords built from interval tables.

use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Semitones in one octave.
pub const SEMITONES: i32 = 12;

/// Octave used when a chord symbol is parsed without an explicit root pitch.
const CHORD_SYMBOL_OCTAVE: i32 = 3;

/// Errors raised while parsing note, pitch or chord names.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TheoryError {
    /// The text does not start with a note letter `A`..`G`.
    #[error("unknown note name `{0}`")]
    UnknownNote(String),

    /// The octave following a note name is not an integer.
    #[error("invalid octave in pitch `{0}`")]
    InvalidOctave(String),

    /// The chord quality suffix is not one of the supported symbols.
    #[error("unknown chord quality `{0}`")]
    UnknownQuality(String),
}

/// Twelve chromatic pitch classes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NoteName {
    /// C
    C,
    /// C sharp / D flat
    Cs,
    /// D
    D,
    /// D sharp / E flat
    Ds,
    /// E
    E,
    /// F
    F,
    /// F sharp / G flat
    Fs,
    /// G
    G,
    /// G sharp / A flat
    Gs,
    /// A
    A,
    /// A sharp / B flat
    As,
    /// B
    B,
}

impl NoteName {
    /// All pitch classes in chromatic order starting at C.
    pub const ALL: [NoteName; 12] = [
        NoteName::C,
        NoteName::Cs,
        NoteName::D,
        NoteName::Ds,
        NoteName::E,
        NoteName::F,
        NoteName::Fs,
        NoteName::G,
        NoteName::Gs,
        NoteName::A,
        NoteName::As,
        NoteName::B,
    ];

    /// Note name for a pitch class; any integer is reduced modulo 12.
    pub const fn from_idx(idx: i32) -> NoteName {
        NoteName::ALL[idx.rem_euclid(SEMITONES) as usize]
    }

    /// Pitch class index, C = 0.
    pub const fn index(self) -> i32 {
        self as i32
    }

    /// Sharp spelling of the note.
    pub const fn name(self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::Cs => "C#",
            NoteName::D => "D",
            NoteName::Ds => "D#",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::Fs => "F#",
            NoteName::G => "G",
            NoteName::Gs => "G#",
            NoteName::A => "A",
            NoteName::As => "A#",
            NoteName::B => "B",
        }
    }
}

impl Display for NoteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoteName {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_note_name(s)? {
            (offset, "") => Ok(NoteName::from_idx(offset)),
            _ => Err(TheoryError::UnknownNote(s.to_string())),
        }
    }
}

/// Split a leading note name (`C`, `F#`, `Bb`) off `s`, returning its
/// semitone offset from C in the same octave (`Cb` is -1, `B#` is 12) and the
/// rest.
fn split_note_name(s: &str) -> Result<(i32, &str), TheoryError> {
    let mut chars = s.chars();
    let natural = match chars.next() {
        Some('C') => 0,
        Some('D') => 2,
        Some('E') => 4,
        Some('F') => 5,
        Some('G') => 7,
        Some('A') => 9,
        Some('B') => 11,
        _ => return Err(TheoryError::UnknownNote(s.to_string())),
    };
    let rest = chars.as_str();
    let (accidental, rest) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        _ => (0, rest),
    };
    Ok((natural + accidental, rest))
}

/// An absolute pitch in semitones, numbered like MIDI notes (C4 = 60).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pitch {
    semitones: i32,
}

impl Pitch {
    /// Pitch at an absolute semitone number.
    pub const fn new(semitones: i32) -> Self {
        Pitch { semitones }
    }

    /// Pitch of `note` in scientific-pitch `octave` (C4 = 60).
    pub const fn from_note(note: NoteName, octave: i32) -> Self {
        Pitch::new((octave + 1) * SEMITONES + note.index())
    }

    /// Absolute semitone number.
    pub const fn semitones(self) -> i32 {
        self.semitones
    }

    /// Pitch class in `0..12`.
    pub const fn pitch_class(self) -> i32 {
        self.semitones.rem_euclid(SEMITONES)
    }

    /// Note name of the pitch class.
    pub const fn note_name(self) -> NoteName {
        NoteName::from_idx(self.semitones)
    }

    /// Scientific-pitch octave number.
    pub const fn octave(self) -> i32 {
        self.semitones.div_euclid(SEMITONES) - 1
    }

    /// This pitch raised by `semitones` (lowered when negative).
    pub const fn transpose(self, semitones: i32) -> Self {
        Pitch::new(self.semitones + semitones)
    }
}

impl Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.note_name(), self.octave())
    }
}

impl FromStr for Pitch {
    type Err = TheoryError;

    /// Parses scientific pitch notation such as `E2`, `C#4` or `Bb-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (offset, octave) = split_note_name(s.trim())?;
        let octave = octave
            .parse::<i32>()
            .map_err(|_| TheoryError::InvalidOctave(s.to_string()))?;
        Ok(Pitch::new((octave + 1) * SEMITONES + offset))
    }
}

/// A chord degree measured from the root: its size in semitones and its
/// conventional scale-degree number (1, 3, 5, 7, 9, …).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    semitones: i32,
    number: u8,
}

/// Canonical simple intervals indexed by semitone count.
const SIMPLE_INTERVALS: [Interval; 12] = [
    Interval::UNISON,
    Interval::MINOR_SECOND,
    Interval::MAJOR_SECOND,
    Interval::MINOR_THIRD,
    Interval::MAJOR_THIRD,
    Interval::PERFECT_FOURTH,
    Interval::DIMINISHED_FIFTH,
    Interval::PERFECT_FIFTH,
    Interval::MINOR_SIXTH,
    Interval::MAJOR_SIXTH,
    Interval::MINOR_SEVENTH,
    Interval::MAJOR_SEVENTH,
];

/// Semitones of the major or perfect interval for each simple degree.
const MAJOR_SCALE: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

impl Interval {
    /// P1
    pub const UNISON: Interval = Interval::new(0, 1);
    /// m2
    pub const MINOR_SECOND: Interval = Interval::new(1, 2);
    /// M2
    pub const MAJOR_SECOND: Interval = Interval::new(2, 2);
    /// m3
    pub const MINOR_THIRD: Interval = Interval::new(3, 3);
    /// M3
    pub const MAJOR_THIRD: Interval = Interval::new(4, 3);
    /// P4
    pub const PERFECT_FOURTH: Interval = Interval::new(5, 4);
    /// d5
    pub const DIMINISHED_FIFTH: Interval = Interval::new(6, 5);
    /// P5
    pub const PERFECT_FIFTH: Interval = Interval::new(7, 5);
    /// A5
    pub const AUGMENTED_FIFTH: Interval = Interval::new(8, 5);
    /// m6
    pub const MINOR_SIXTH: Interval = Interval::new(8, 6);
    /// M6
    pub const MAJOR_SIXTH: Interval = Interval::new(9, 6);
    /// m7
    pub const MINOR_SEVENTH: Interval = Interval::new(10, 7);
    /// M7
    pub const MAJOR_SEVENTH: Interval = Interval::new(11, 7);
    /// M9
    pub const MAJOR_NINTH: Interval = Interval::new(14, 9);

    /// Interval of `semitones` spelled as scale degree `number`.
    pub const fn new(semitones: i32, number: u8) -> Self {
        Interval { semitones, number }
    }

    /// Canonical simple interval for a semitone count, reduced modulo 12:
    /// P1 m2 M2 m3 M3 P4 d5 P5 m6 M6 m7 M7.
    pub const fn from_semitones(semitones: i32) -> Self {
        SIMPLE_INTERVALS[semitones.rem_euclid(SEMITONES) as usize]
    }

    /// Size in semitones.
    pub const fn semitones(self) -> i32 {
        self.semitones
    }

    /// Scale-degree number.
    pub const fn number(self) -> u8 {
        self.number
    }

    /// Short name such as `P5`, `m3` or `M9`.
    pub fn name(self) -> String {
        if self.number == 0 {
            return format!("?{}", self.semitones);
        }
        let degree = (self.number as usize - 1) % 7;
        let octaves = (self.number as i32 - 1) / 7;
        let diff = self.semitones - MAJOR_SCALE[degree] - octaves * SEMITONES;
        let perfect = matches!(degree, 0 | 3 | 4);
        let quality = match (perfect, diff) {
            (true, 0) => "P".to_string(),
            (false, 0) => "M".to_string(),
            (false, -1) => "m".to_string(),
            (true, d) if d < 0 => "d".repeat(d.unsigned_abs() as usize),
            (false, d) if d < 0 => "d".repeat(d.unsigned_abs() as usize - 1),
            (_, d) => "A".repeat(d as usize),
        };
        format!("{quality}{}", self.number)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Number of chord qualities
const NUM_CHORD_KINDS: usize = 13;

/// Supported chord qualities
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChordKind {
    /// Major chord (e.g., C-E-G)
    Major,
    /// Minor chord (e.g., C-Eb-G)
    Minor,
    /// Power chord (e.g., C-G)
    PowerFifth,
    /// Dominant seventh chord (e.g., C-E-G-Bb)
    DominantSeventh,
    /// Major seventh chord (e.g., C-E-G-B)
    MajorSeventh,
    /// Minor seventh chord (e.g., C-Eb-G-Bb)
    MinorSeventh,
    /// Diminished chord (e.g., C-Eb-Gb)
    Diminished,
    /// Augmented chord (e.g., C-E-G#)
    Augmented,
    /// Suspended second chord (e.g., C-D-G)
    SuspendedSecond,
    /// Suspended fourth chord (e.g., C-F-G)
    SuspendedFourth,
    /// Dominant ninth chord (e.g., C-E-G-Bb-D)
    DominantNinth,
    /// Major ninth chord (e.g., C-E-G-B-D)
    MajorNinth,
    /// Minor ninth chord (e.g., C-Eb-G-Bb-D)
    MinorNinth,
}

impl ChordKind {
    /// Every supported quality.
    pub const ALL: [ChordKind; NUM_CHORD_KINDS] = [
        ChordKind::Major,
        ChordKind::Minor,
        ChordKind::PowerFifth,
        ChordKind::DominantSeventh,
        ChordKind::MajorSeventh,
        ChordKind::MinorSeventh,
        ChordKind::Diminished,
        ChordKind::Augmented,
        ChordKind::SuspendedSecond,
        ChordKind::SuspendedFourth,
        ChordKind::DominantNinth,
        ChordKind::MajorNinth,
        ChordKind::MinorNinth,
    ];

    /// Degrees of the chord, root first.
    pub fn intervals(self) -> &'static [Interval] {
        use Interval as I;
        match self {
            ChordKind::Major => &[I::UNISON, I::MAJOR_THIRD, I::PERFECT_FIFTH],
            ChordKind::Minor => &[I::UNISON, I::MINOR_THIRD, I::PERFECT_FIFTH],
            ChordKind::PowerFifth => &[I::UNISON, I::PERFECT_FIFTH],
            ChordKind::DominantSeventh => &[
                I::UNISON,
                I::MAJOR_THIRD,
                I::PERFECT_FIFTH,
                I::MINOR_SEVENTH,
            ],
            ChordKind::MajorSeventh => &[
                I::UNISON,
                I::MAJOR_THIRD,
                I::PERFECT_FIFTH,
                I::MAJOR_SEVENTH,
            ],
            ChordKind::MinorSeventh => &[
                I::UNISON,
                I::MINOR_THIRD,
                I::PERFECT_FIFTH,
                I::MINOR_SEVENTH,
            ],
            ChordKind::Diminished => &[I::UNISON, I::MINOR_THIRD, I::DIMINISHED_FIFTH],
            ChordKind::Augmented => &[I::UNISON, I::MAJOR_THIRD, I::AUGMENTED_FIFTH],
            ChordKind::SuspendedSecond => &[I::UNISON, I::MAJOR_SECOND, I::PERFECT_FIFTH],
            ChordKind::SuspendedFourth => &[I::UNISON, I::PERFECT_FOURTH, I::PERFECT_FIFTH],
            ChordKind::DominantNinth => &[
                I::UNISON,
                I::MAJOR_THIRD,
                I::PERFECT_FIFTH,
                I::MINOR_SEVENTH,
                I::MAJOR_NINTH,
            ],
            ChordKind::MajorNinth => &[
                I::UNISON,
                I::MAJOR_THIRD,
                I::PERFECT_FIFTH,
                I::MAJOR_SEVENTH,
                I::MAJOR_NINTH,
            ],
            ChordKind::MinorNinth => &[
                I::UNISON,
                I::MINOR_THIRD,
                I::PERFECT_FIFTH,
                I::MINOR_SEVENTH,
                I::MAJOR_NINTH,
            ],
        }
    }

    /// Suffix used in chord symbols (`""` for major, `"m7"`, `"sus4"`, …).
    pub const fn symbol(self) -> &'static str {
        match self {
            ChordKind::Major => "",
            ChordKind::Minor => "m",
            ChordKind::PowerFifth => "5",
            ChordKind::DominantSeventh => "7",
            ChordKind::MajorSeventh => "maj7",
            ChordKind::MinorSeventh => "m7",
            ChordKind::Diminished => "dim",
            ChordKind::Augmented => "aug",
            ChordKind::SuspendedSecond => "sus2",
            ChordKind::SuspendedFourth => "sus4",
            ChordKind::DominantNinth => "9",
            ChordKind::MajorNinth => "maj9",
            ChordKind::MinorNinth => "m9",
        }
    }

    /// Look up a quality by chord-symbol suffix, accepting common aliases.
    pub fn from_symbol(symbol: &str) -> Option<ChordKind> {
        let kind = match symbol {
            "" | "maj" | "M" => ChordKind::Major,
            "m" | "min" | "-" => ChordKind::Minor,
            "5" => ChordKind::PowerFifth,
            "7" => ChordKind::DominantSeventh,
            "maj7" | "M7" => ChordKind::MajorSeventh,
            "m7" | "min7" | "-7" => ChordKind::MinorSeventh,
            "dim" | "°" => ChordKind::Diminished,
            "aug" | "+" => ChordKind::Augmented,
            "sus2" => ChordKind::SuspendedSecond,
            "sus4" | "sus" => ChordKind::SuspendedFourth,
            "9" => ChordKind::DominantNinth,
            "maj9" | "M9" => ChordKind::MajorNinth,
            "m9" | "min9" => ChordKind::MinorNinth,
            _ => return None,
        };
        Some(kind)
    }
}

impl Display for ChordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A chord: a root pitch and the intervals stacked on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    root: Pitch,
    kind: Option<ChordKind>,
    intervals: Vec<Interval>,
    pitches: Vec<Pitch>,
}

impl Chord {
    /// Chord of the given quality on `root`.
    pub fn new(root: Pitch, kind: ChordKind) -> Self {
        let mut chord = Chord::from_intervals(root, kind.intervals().to_vec());
        chord.kind = Some(kind);
        chord
    }

    /// Chord with an explicit list of degrees, one interval per degree.
    pub fn from_intervals(root: Pitch, intervals: Vec<Interval>) -> Self {
        let pitches = intervals
            .iter()
            .map(|interval| root.transpose(interval.semitones()))
            .collect();
        Chord {
            root,
            kind: None,
            intervals,
            pitches,
        }
    }

    /// Root pitch.
    pub fn root(&self) -> Pitch {
        self.root
    }

    /// Quality, when the chord was built from a known [`ChordKind`].
    pub fn kind(&self) -> Option<ChordKind> {
        self.kind
    }

    /// Degrees from the root; the count is the number of distinct pitch
    /// classes a complete voicing must sound.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Pitches of the chord voiced upward from the root.
    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    /// Whether any chord pitch shares the pitch class of `pitch`.
    pub fn contains_pitch_class(&self, pitch: Pitch) -> bool {
        self.pitches
            .iter()
            .any(|p| p.pitch_class() == pitch.pitch_class())
    }

    /// Chord symbol such as `Am7`, or the root followed by its intervals for
    /// chords built from an explicit interval list.
    pub fn name(&self) -> String {
        match self.kind {
            Some(kind) => format!("{}{}", self.root.note_name(), kind.symbol()),
            None => {
                let degrees: Vec<String> = self.intervals.iter().map(|i| i.name()).collect();
                format!("{}({})", self.root.note_name(), degrees.join(","))
            }
        }
    }
}

impl Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Chord {
    type Err = TheoryError;

    /// Parses a chord symbol such as `C`, `Am7`, `F#dim` or `Bbmaj7`. The
    /// root is voiced in octave 3.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (offset, quality) = split_note_name(s.trim())?;
        let root = NoteName::from_idx(offset);
        let kind = ChordKind::from_symbol(quality)
            .ok_or_else(|| TheoryError::UnknownQuality(quality.to_string()))?;
        Ok(Chord::new(Pitch::from_note(root, CHORD_SYMBOL_OCTAVE), kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_parsing() {
        assert_eq!("C4".parse::<Pitch>().unwrap().semitones(), 60);
        assert_eq!("E2".parse::<Pitch>().unwrap().semitones(), 40);
        assert_eq!("Bb3".parse::<Pitch>().unwrap().semitones(), 58);
        assert_eq!("Cb4".parse::<Pitch>().unwrap().semitones(), 59);
        assert_eq!("B#3".parse::<Pitch>().unwrap().semitones(), 60);
        assert_eq!("Fb2".parse::<Pitch>().unwrap().to_string(), "E2");
        assert_eq!("Cb".parse::<NoteName>().unwrap(), NoteName::B);
        assert_eq!("C#-1".parse::<Pitch>().unwrap().semitones(), 1);
        assert_eq!(
            "H2".parse::<Pitch>(),
            Err(TheoryError::UnknownNote("H2".to_string()))
        );
        assert_eq!(
            "Ex".parse::<Pitch>(),
            Err(TheoryError::InvalidOctave("Ex".to_string()))
        );
    }

    #[test]
    fn test_pitch_display() {
        assert_eq!(Pitch::new(40).to_string(), "E2");
        assert_eq!(Pitch::new(61).to_string(), "C#4");
        assert_eq!(Pitch::new(-1).pitch_class(), 11);
        assert_eq!(Pitch::new(-1).octave(), -2);
    }

    #[test]
    fn test_interval_from_semitones() {
        assert_eq!(Interval::from_semitones(0).number(), 1);
        assert_eq!(Interval::from_semitones(3).number(), 3);
        assert_eq!(Interval::from_semitones(7).number(), 5);
        assert_eq!(Interval::from_semitones(10).number(), 7);
        assert_eq!(Interval::from_semitones(2).number(), 2);
        assert_eq!(Interval::from_semitones(16), Interval::MAJOR_THIRD);
    }

    #[test]
    fn test_interval_names() {
        assert_eq!(Interval::UNISON.name(), "P1");
        assert_eq!(Interval::MINOR_THIRD.name(), "m3");
        assert_eq!(Interval::DIMINISHED_FIFTH.name(), "d5");
        assert_eq!(Interval::AUGMENTED_FIFTH.name(), "A5");
        assert_eq!(Interval::MAJOR_SEVENTH.name(), "M7");
        assert_eq!(Interval::MAJOR_NINTH.name(), "M9");
    }

    #[test]
    fn test_chord_parsing() {
        let c_major: Chord = "C".parse().unwrap();
        let semis: Vec<i32> = c_major.pitches().iter().map(|p| p.semitones()).collect();
        assert_eq!(semis, vec![48, 52, 55]);

        let g7: Chord = "G7".parse().unwrap();
        let semis: Vec<i32> = g7.pitches().iter().map(|p| p.semitones()).collect();
        assert_eq!(semis, vec![55, 59, 62, 65]);

        let b_flat_minor: Chord = "Bbm".parse().unwrap();
        assert_eq!(b_flat_minor.kind(), Some(ChordKind::Minor));
        assert_eq!(b_flat_minor.root().note_name(), NoteName::As);
        assert_eq!(b_flat_minor.to_string(), "A#m");

        assert_eq!(
            "Cwhat".parse::<Chord>(),
            Err(TheoryError::UnknownQuality("what".to_string()))
        );
    }

    #[test]
    fn test_chord_pitch_classes() {
        let d_minor = Chord::new(Pitch::from_note(NoteName::D, 3), ChordKind::Minor);
        assert!(d_minor.contains_pitch_class("F5".parse().unwrap()));
        assert!(d_minor.contains_pitch_class("A0".parse().unwrap()));
        assert!(!d_minor.contains_pitch_class("F#3".parse().unwrap()));
    }

    #[test]
    fn test_every_kind_round_trips_its_symbol() {
        for kind in ChordKind::ALL {
            assert_eq!(ChordKind::from_symbol(kind.symbol()), Some(kind));
            assert_eq!(kind.intervals()[0], Interval::UNISON);
        }
    }
}
