//! Instrument
//!
//! Fretted instruments described by the open pitch of each string.
//!
//! Strings are numbered from `0` in the order the tuning lists them, which for
//! the presets is the conventional tab order (lowest course first, except for
//! the re-entrant banjo drone and ukulele G string).

use crate::theory::{Pitch, TheoryError};
use std::{fmt::Display, ops::Range};
use thiserror::Error;

/// Errors returned while configuring an instrument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstrumentError {
    /// The instrument description is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// One of the tuning pitches could not be parsed.
    #[error("invalid tuning: {0}")]
    Tuning(#[from] TheoryError),
}

/// Builder for a [`FrettedInstrument`] with a custom tuning.
pub struct InstrumentBuilder {
    name: String,
    tuning: String,
}

impl InstrumentBuilder {
    /// Start with an unnamed instrument in standard guitar tuning.
    pub fn new() -> Self {
        InstrumentBuilder {
            name: "Instrument".to_string(),
            tuning: GUITAR_TUNING.to_string(),
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the open-string pitches as whitespace-separated scientific pitch
    /// names, string 0 first (e.g. `"E2 A2 D3 G3 B3 E4"`).
    pub fn tuning(mut self, tuning: impl Into<String>) -> Self {
        self.tuning = tuning.into();
        self
    }

    /// Finalize and create the instrument.
    pub fn build(self) -> Result<FrettedInstrument, InstrumentError> {
        let string_pitches = self
            .tuning
            .split_whitespace()
            .map(str::parse::<Pitch>)
            .collect::<Result<Vec<_>, _>>()?;
        if string_pitches.is_empty() {
            return Err(InstrumentError::Configuration(
                "tuning must name at least one string".into(),
            ));
        }
        Ok(FrettedInstrument {
            name: self.name,
            string_pitches,
        })
    }
}

impl Default for InstrumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

const GUITAR_TUNING: &str = "E2 A2 D3 G3 B3 E4";

/// A fretted instrument: one open pitch per string, each fret one semitone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrettedInstrument {
    name: String,
    string_pitches: Vec<Pitch>,
}

impl FrettedInstrument {
    /// Start customizing with a builder.
    pub fn builder() -> InstrumentBuilder {
        InstrumentBuilder::new()
    }

    /// Instrument from explicit open-string pitches, string 0 first.
    ///
    /// Returns `Err(InstrumentError::Configuration)` if `string_pitches` is
    /// empty.
    pub fn new(
        name: impl Into<String>,
        string_pitches: Vec<Pitch>,
    ) -> Result<Self, InstrumentError> {
        if string_pitches.is_empty() {
            return Err(InstrumentError::Configuration(
                "an instrument needs at least one string".into(),
            ));
        }
        Ok(FrettedInstrument {
            name: name.into(),
            string_pitches,
        })
    }

    /// Six-string guitar in standard tuning (E2 A2 D3 G3 B3 E4).
    pub fn guitar() -> Self {
        Self::preset("Guitar", &[40, 45, 50, 55, 59, 64])
    }

    /// Soprano ukulele in re-entrant tuning (G4 C4 E4 A4).
    pub fn ukulele() -> Self {
        Self::preset("Ukulele", &[67, 60, 64, 69])
    }

    /// Mandolin, one pitch per course (G3 D4 A4 E5).
    pub fn mandolin() -> Self {
        Self::preset("Mandolin", &[55, 62, 69, 76])
    }

    /// Five-string banjo in open G (G4 D3 G3 B3 D4).
    pub fn banjo() -> Self {
        Self::preset("Banjo", &[67, 50, 55, 59, 62])
    }

    /// Four-string bass guitar (E1 A1 D2 G2).
    pub fn bass() -> Self {
        Self::preset("Bass", &[28, 33, 38, 43])
    }

    fn preset(name: &str, semitones: &[i32]) -> Self {
        FrettedInstrument {
            name: name.to_string(),
            string_pitches: semitones.iter().copied().map(Pitch::new).collect(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of strings.
    pub fn string_count(&self) -> usize {
        self.string_pitches.len()
    }

    /// String indices in ascending order.
    pub fn string_indices(&self) -> Range<usize> {
        0..self.string_pitches.len()
    }

    /// Open pitch of each string, parallel to [`Self::string_indices`].
    pub fn string_pitches(&self) -> &[Pitch] {
        &self.string_pitches
    }

    /// Pitch sounded by stopping `string_index` at `fret_number`.
    ///
    /// # Panics
    /// If `string_index` is not one of [`Self::string_indices`].
    pub fn pitch_at(&self, string_index: usize, fret_number: u8) -> Pitch {
        self.string_pitches[string_index].transpose(i32::from(fret_number))
    }
}

impl Display for FrettedInstrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tuning: Vec<String> = self.string_pitches.iter().map(Pitch::to_string).collect();
        write!(f, "{} ({})", self.name, tuning.join(" "))
    }
}
