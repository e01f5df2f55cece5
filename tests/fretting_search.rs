//! Integration tests for fretting search, ranking and fret-string parsing
//! across the preset instruments.

use chord_fretting::{
    best_fretting_for, chord_frets, chord_frettings, sort_frettings, Chord, ChordKind,
    FrettedInstrument, Fretting, FrettingError, FrettingSearch, Interval, NoteName, Pitch,
    INVERSION_DEGREES,
};
use lazy_static::lazy_static;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

lazy_static! {
    static ref INSTRUMENTS: Vec<FrettedInstrument> = vec![
        FrettedInstrument::guitar(),
        FrettedInstrument::ukulele(),
        FrettedInstrument::mandolin(),
        FrettedInstrument::banjo(),
        FrettedInstrument::bass(),
    ];
    static ref CHORDS: Vec<Chord> = NoteName::ALL
        .iter()
        .flat_map(|&root| {
            ChordKind::ALL
                .iter()
                .map(move |&kind| Chord::new(Pitch::from_note(root, 3), kind))
        })
        .collect();
}

/// Four strings a fourth apart starting at pitch 0.
fn fourths() -> FrettedInstrument {
    FrettedInstrument::new(
        "Fourths",
        [0, 5, 10, 15].into_iter().map(Pitch::new).collect(),
    )
    .unwrap()
}

fn major_triad_at_zero() -> Chord {
    Chord::from_intervals(
        Pitch::new(0),
        vec![Interval::UNISON, Interval::MAJOR_THIRD, Interval::PERFECT_FIFTH],
    )
}

fn pitch_classes(fretting: &Fretting<'_>) -> HashSet<i32> {
    fretting
        .positions()
        .iter()
        .map(|p| p.pitch().pitch_class())
        .collect()
}

fn rank_key(fretting: &Fretting<'_>) -> (usize, Reverse<usize>, Reverse<usize>) {
    (
        fretting.inversion_index().unwrap_or(INVERSION_DEGREES.len()),
        Reverse(fretting.sounded_string_count()),
        Reverse(fretting.open_string_count()),
    )
}

/// Every way a single voicing can break the search contract.
fn check_fretting(fretting: &Fretting<'_>, chord: &Chord, instrument: &FrettedInstrument) -> Vec<String> {
    let mut problems = Vec::new();

    if pitch_classes(fretting).len() < chord.intervals().len() {
        problems.push("does not cover the chord".to_string());
    }
    if !fretting
        .positions()
        .iter()
        .all(|p| chord.contains_pitch_class(p.pitch()))
    {
        problems.push("sounds a note outside the chord".to_string());
    }

    let strings: HashSet<usize> = fretting.positions().iter().map(|p| p.string_index()).collect();
    if strings.len() != fretting.positions().len() {
        problems.push("has two positions on one string".to_string());
    }

    match fretting.fret_string() {
        Ok(rendered) => match Fretting::from_fret_string(&rendered, chord, instrument) {
            Ok(parsed) if parsed.positions() == fretting.positions() => {}
            Ok(_) => problems.push(format!("`{rendered}` parses to different positions")),
            Err(e) => problems.push(format!("`{rendered}` does not parse: {e}")),
        },
        Err(e) => problems.push(format!("cannot render: {e}")),
    }

    problems
}

#[test]
fn test_every_preset_and_chord() {
    let failures = Arc::new(Mutex::new(Vec::<String>::new()));
    let searched = Arc::new(Mutex::new(0usize));

    INSTRUMENTS.par_iter().for_each(|instrument| {
        for chord in CHORDS.iter() {
            let frettings = chord_frettings(chord, instrument);
            *searched.lock().unwrap() += frettings.len();

            for fretting in &frettings {
                for problem in check_fretting(fretting, chord, instrument) {
                    failures.lock().unwrap().push(format!(
                        "{} on {}: {:?} {}",
                        chord,
                        instrument.name(),
                        fretting.string_fret_list(),
                        problem
                    ));
                }
            }

            if frettings.windows(2).any(|pair| rank_key(&pair[0]) > rank_key(&pair[1])) {
                failures
                    .lock()
                    .unwrap()
                    .push(format!("{} on {}: ranking out of order", chord, instrument.name()));
            }

            let mut resorted = frettings.clone();
            sort_frettings(&mut resorted);
            let same_order = resorted
                .iter()
                .zip(&frettings)
                .all(|(a, b)| a.positions() == b.positions());
            if !same_order {
                failures
                    .lock()
                    .unwrap()
                    .push(format!("{} on {}: re-ranking changed the order", chord, instrument.name()));
            }
        }
    });

    let failures = Arc::try_unwrap(failures).unwrap().into_inner().unwrap();
    let searched = Arc::try_unwrap(searched).unwrap().into_inner().unwrap();

    assert!(searched > 0);
    if !failures.is_empty() {
        panic!(
            "{} fretting checks failed:\n{}",
            failures.len(),
            failures.join("\n")
        );
    }
}

#[test]
fn test_common_open_shapes_are_found() {
    let guitar = FrettedInstrument::guitar();
    let ukulele = FrettedInstrument::ukulele();
    let cases = [
        (&guitar, "C", "x32010"),
        (&guitar, "G", "320003"),
        (&guitar, "D", "xx0232"),
        (&guitar, "Em", "022000"),
        (&guitar, "Am", "x02210"),
        (&ukulele, "C", "0003"),
        (&ukulele, "F", "2010"),
    ];

    for (instrument, symbol, shape) in cases {
        let chord: Chord = symbol.parse().unwrap();
        let found = chord_frettings(&chord, instrument)
            .iter()
            .any(|f| f.fret_string().unwrap() == shape);
        assert!(found, "{shape} not found for {symbol} on {}", instrument.name());
    }
}

#[test]
fn test_best_guitar_c_prefers_root_on_first_position() {
    let guitar = FrettedInstrument::guitar();
    let chord: Chord = "C".parse().unwrap();
    let best = best_fretting_for(&chord, &guitar).unwrap();

    // The high E string cannot reach a C within four frets, so the best
    // root-position voicing mutes it and keeps both open strings it can.
    assert_eq!(best.fret_string().unwrap(), "03201x");
    assert_eq!(best.inversion_index(), Some(0));
    assert_eq!(best.open_string_count(), 2);
}

#[test]
fn test_fourths_scenario() {
    let instrument = fourths();
    let chord = major_triad_at_zero();

    let candidates = chord_frets(&chord, &instrument);
    assert!(candidates
        .iter()
        .any(|p| p.string_index() == 0 && p.fret_number() == 0 && p.semitones() == 0));

    let frettings = chord_frettings(&chord, &instrument);
    assert!(!frettings.is_empty());

    let first = &frettings[0];
    let expected: HashSet<i32> = [0, 4, 7].into_iter().collect();
    assert_eq!(pitch_classes(first), expected);

    let rendered = first.fret_string().unwrap();
    let parsed = Fretting::from_fret_string(&rendered, &chord, &instrument).unwrap();
    let multiset = |f: &Fretting<'_>| {
        let mut pairs: Vec<(usize, u8)> = f
            .positions()
            .iter()
            .map(|p| (p.string_index(), p.fret_number()))
            .collect();
        pairs.sort_unstable();
        pairs
    };
    assert_eq!(multiset(&parsed), multiset(first));
}

#[test]
fn test_empty_bound_scenario() {
    let instrument = fourths();
    let chord = major_triad_at_zero();
    let search = FrettingSearch::builder().highest_fret(-1).build();

    assert!(search.chord_frets(&chord, &instrument).is_empty());
    assert!(search.chord_frettings(&chord, &instrument).is_empty());
    assert!(search.best_fretting_for(&chord, &instrument).is_none());
}

#[test]
fn test_format_error_scenarios() {
    let guitar = FrettedInstrument::guitar();
    let chord: Chord = "C".parse().unwrap();

    assert!(matches!(
        Fretting::from_fret_string("x3", &chord, &guitar),
        Err(FrettingError::InvalidLength {
            expected: 6,
            got: 2,
            ..
        })
    ));
    assert!(matches!(
        Fretting::from_fret_string("xxg0xx", &chord, &guitar),
        Err(FrettingError::InvalidCharacter { character: 'g', .. })
    ));
}

#[test]
fn test_ninth_chords_need_every_degree() {
    let guitar = FrettedInstrument::guitar();
    let chord: Chord = "G9".parse().unwrap();
    for fretting in chord_frettings(&chord, &guitar) {
        assert!(fretting.sounded_string_count() >= 5);
        assert_eq!(pitch_classes(&fretting).len(), 5);
    }
}
