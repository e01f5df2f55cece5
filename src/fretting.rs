//! Fretting
//!
//! One voicing of a chord on an instrument: the fretted position on each
//! sounded string, and the views derived from it.

use crate::{
    instrument::FrettedInstrument,
    theory::{Chord, Interval, Pitch, SEMITONES},
};
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Scale-degree numbers in inversion order: a voicing whose first position
/// sounds degree `INVERSION_DEGREES[i]` has inversion index `i`.
pub const INVERSION_DEGREES: [u8; 5] = [1, 3, 5, 7, 9];

/// Character marking a muted string in a fret string.
const MUTED: char = 'x';

/// Errors when parsing or rendering fret strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrettingError {
    /// The fret string does not have one character per instrument string.
    #[error("fret string `{input}` has {got} characters, expected {expected}")]
    InvalidLength {
        /// The number of strings on the instrument.
        expected: usize,
        /// The number of characters supplied.
        got: usize,
        /// The offending fret string.
        input: String,
    },

    /// A character is neither `x` nor a decimal digit.
    #[error("invalid character `{character}` at index {index} in fret string `{input}`")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Its character index within the input.
        index: usize,
        /// The offending fret string.
        input: String,
    },

    /// A fret of 10 or higher cannot be written as a single character.
    #[error("fret {fret} on string {string_index} has no single-character form")]
    UnsupportedFret {
        /// The string holding the fret.
        string_index: usize,
        /// The fret number.
        fret: u8,
    },
}

/// One fretted note: a string, a fret on it, and the pitch that results.
///
/// Identity is `(string_index, fret_number)`; the pitch is carried along for
/// convenience and does not take part in equality or hashing.
#[derive(Debug, Copy, Clone)]
pub struct FretPosition {
    string_index: usize,
    fret_number: u8,
    semitones: i32,
}

impl FretPosition {
    /// Position with an already known pitch.
    pub const fn new(string_index: usize, fret_number: u8, pitch: Pitch) -> Self {
        FretPosition {
            string_index,
            fret_number,
            semitones: pitch.semitones(),
        }
    }

    /// Position on `instrument`, with the pitch taken from its tuning.
    pub fn on(instrument: &FrettedInstrument, string_index: usize, fret_number: u8) -> Self {
        Self::new(
            string_index,
            fret_number,
            instrument.pitch_at(string_index, fret_number),
        )
    }

    /// String index.
    pub const fn string_index(&self) -> usize {
        self.string_index
    }

    /// Fret number, 0 for the open string.
    pub const fn fret_number(&self) -> u8 {
        self.fret_number
    }

    /// Absolute pitch in semitones.
    pub const fn semitones(&self) -> i32 {
        self.semitones
    }

    /// Sounded pitch.
    pub const fn pitch(&self) -> Pitch {
        Pitch::new(self.semitones)
    }

    /// Whether the string is played open.
    pub const fn is_open(&self) -> bool {
        self.fret_number == 0
    }
}

impl PartialEq for FretPosition {
    fn eq(&self, other: &Self) -> bool {
        self.string_index == other.string_index && self.fret_number == other.fret_number
    }
}

impl Eq for FretPosition {}

impl Hash for FretPosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.string_index.hash(state);
        self.fret_number.hash(state);
    }
}

/// A complete voicing of `chord` on `instrument`.
///
/// Positions are held in descending string-index order, which is the order
/// every derived view iterates in. Strings without a position are muted.
#[derive(Debug, Clone)]
pub struct Fretting<'a> {
    chord: &'a Chord,
    instrument: &'a FrettedInstrument,
    positions: Vec<FretPosition>,
    string_frets: Vec<Option<u8>>,
}

impl<'a> Fretting<'a> {
    /// Voicing from a set of positions.
    ///
    /// # Panics
    /// If two positions share a string, or a position names a string the
    /// instrument does not have.
    pub fn new(
        chord: &'a Chord,
        instrument: &'a FrettedInstrument,
        mut positions: Vec<FretPosition>,
    ) -> Self {
        positions.sort_by(|a, b| b.string_index.cmp(&a.string_index));
        assert!(
            positions
                .windows(2)
                .all(|pair| pair[0].string_index != pair[1].string_index),
            "fretting has more than one position on a string"
        );

        let mut string_frets = vec![None; instrument.string_count()];
        for position in &positions {
            string_frets[position.string_index] = Some(position.fret_number);
        }

        Fretting {
            chord,
            instrument,
            positions,
            string_frets,
        }
    }

    /// Parse a fret string such as `x32010`: one character per string in
    /// ascending string order, `x` for a muted string, otherwise the fret.
    ///
    /// Returns:
    /// - `Err(InvalidLength)` if the length differs from the string count.
    /// - `Err(InvalidCharacter)` for anything other than `x` or `0`..`9`.
    pub fn from_fret_string(
        fret_string: &str,
        chord: &'a Chord,
        instrument: &'a FrettedInstrument,
    ) -> Result<Self, FrettingError> {
        let got = fret_string.chars().count();
        if got != instrument.string_count() {
            return Err(FrettingError::InvalidLength {
                expected: instrument.string_count(),
                got,
                input: fret_string.to_string(),
            });
        }

        let mut positions = Vec::with_capacity(got);
        for (index, (string_index, character)) in
            instrument.string_indices().zip(fret_string.chars()).enumerate()
        {
            if character == MUTED {
                continue;
            }
            let fret = character
                .to_digit(10)
                .ok_or_else(|| FrettingError::InvalidCharacter {
                    character,
                    index,
                    input: fret_string.to_string(),
                })?;
            positions.push(FretPosition::on(instrument, string_index, fret as u8));
        }

        Ok(Fretting::new(chord, instrument, positions))
    }

    /// The chord this voicing sounds.
    pub fn chord(&self) -> &'a Chord {
        self.chord
    }

    /// The instrument this voicing is played on.
    pub fn instrument(&self) -> &'a FrettedInstrument {
        self.instrument
    }

    /// Sounded positions, highest string index first.
    pub fn positions(&self) -> &[FretPosition] {
        &self.positions
    }

    /// Fret on every instrument string in ascending string order, `None`
    /// where the string is muted.
    pub fn string_fret_list(&self) -> &[Option<u8>] {
        &self.string_frets
    }

    /// Compact form with one character per string in ascending string order:
    /// `x` for muted, otherwise the fret digit.
    ///
    /// Returns `Err(UnsupportedFret)` if any fret is 10 or higher.
    pub fn fret_string(&self) -> Result<String, FrettingError> {
        self.string_frets
            .iter()
            .enumerate()
            .map(|(string_index, fret)| match *fret {
                None => Ok(MUTED),
                Some(fret) => char::from_digit(u32::from(fret), 10)
                    .ok_or(FrettingError::UnsupportedFret { string_index, fret }),
            })
            .collect()
    }

    /// Interval from the chord root to each position, reduced to one octave,
    /// in position order.
    pub fn intervals(&self) -> Vec<Interval> {
        let root = self.chord.root().semitones();
        self.positions
            .iter()
            .map(|p| Interval::from_semitones(p.semitones - root))
            .collect()
    }

    /// Inversion of the voicing: the index within [`INVERSION_DEGREES`] of
    /// the degree sounded by the first position (0 = root position).
    ///
    /// `None` when there are no positions or the first degree is not a
    /// chord tone listed in [`INVERSION_DEGREES`] (a suspended second, say).
    pub fn inversion_index(&self) -> Option<usize> {
        let first = self.positions.first()?;
        let interval = Interval::from_semitones(first.semitones - self.chord.root().semitones());
        INVERSION_DEGREES
            .iter()
            .position(|&degree| degree == interval.number())
    }

    /// Number of strings played open.
    pub fn open_string_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_open()).count()
    }

    /// Number of strings sounded (not muted).
    pub fn sounded_string_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of distinct pitch classes sounded.
    pub fn pitch_class_count(&self) -> usize {
        pitch_class_count(&self.positions)
    }
}

/// Number of distinct pitch classes among `positions`.
pub(crate) fn pitch_class_count(positions: &[FretPosition]) -> usize {
    let mut classes = [false; SEMITONES as usize];
    for position in positions {
        classes[position.pitch().pitch_class() as usize] = true;
    }
    classes.iter().filter(|&&sounded| sounded).count()
}
