//! # chord_fretting
//!
//! Find every playable way to finger a chord on a fretted instrument, and
//! rank the voicings from most to least playable.
//!
//! ## Example
//! ```rust
//! use chord_fretting::{Chord, FrettedInstrument, FrettingSearch};
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1) Pick an instrument and a chord
//!     let guitar = FrettedInstrument::guitar();
//!     let chord: Chord = "C".parse()?;
//!
//!     // 2) Build a search bounded at the fifth fret
//!     let search = FrettingSearch::builder()
//!         .highest_fret(5)
//!         .build();
//!
//!     // 3) Voicings come back best first
//!     for fretting in search.chord_frettings(&chord, &guitar).iter().take(3) {
//!         println!("{}", fretting.fret_string()?);
//!     }
//!
//!     // 4) Or parse a known shape
//!     let open_c = chord_fretting::Fretting::from_fret_string("x32010", &chord, &guitar)?;
//!     assert_eq!(open_c.sounded_string_count(), 5);
//!
//!     Ok(())
//! }
//! # run().unwrap();
//! ```
//!
//! Searches log a `debug` summary and a `trace` line per voicing through the
//! [`log`](https://docs.rs/log) facade.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// Voicings and their derived views.
pub use fretting::{FretPosition, Fretting, FrettingError, INVERSION_DEGREES};

/// Instruments and tunings.
pub use instrument::{FrettedInstrument, InstrumentBuilder, InstrumentError};

/// Voicing search and ranking.
pub use search::{
    best_fretting_for, chord_frets, chord_frettings, sort_frettings, FrettingSearch,
    FrettingSearchBuilder, DEFAULT_HIGHEST_FRET,
};

/// Pitches, intervals and chords.
pub use theory::{Chord, ChordKind, Interval, NoteName, Pitch, TheoryError};

/// Fretting module.
pub mod fretting;

/// Fretted instrument module.
pub mod instrument;

/// Fretting search module.
pub mod search;

/// Music theory module.
pub mod theory;
