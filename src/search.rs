//! Search
//!
//! Enumerates every voicing of a chord within a fret bound and ranks them
//! from most to least playable.
//!
//! The search is exhaustive: every string is either muted or stopped at one
//! of its candidate frets, so the work grows as
//! `(candidates per string + 1) ^ strings`. With the default bound of four
//! frets and six strings that is a few thousand leaves; raising the bound or
//! the string count grows it quickly, and no runtime limit is applied.

use crate::{
    fretting::{pitch_class_count, FretPosition, Fretting, INVERSION_DEGREES},
    instrument::FrettedInstrument,
    theory::Chord,
};
use log::{debug, trace};
use std::cmp::Reverse;

/// Default highest fret searched, inclusive.
pub const DEFAULT_HIGHEST_FRET: i32 = 4;

/// Builder for `FrettingSearch` to customize the fret bound
pub struct FrettingSearchBuilder {
    highest_fret: i32,
}

impl FrettingSearchBuilder {
    /// Create a new builder with default highest fret = 4
    pub fn new() -> Self {
        FrettingSearchBuilder {
            highest_fret: DEFAULT_HIGHEST_FRET,
        }
    }

    /// Set the highest fret considered, inclusive. A negative bound admits
    /// no fret at all.
    pub fn highest_fret(mut self, value: i32) -> Self {
        self.highest_fret = value;
        self
    }

    /// Build the `FrettingSearch`
    pub fn build(self) -> FrettingSearch {
        FrettingSearch::with_highest_fret(self.highest_fret)
    }
}

impl Default for FrettingSearchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fretting generator for a fixed fret bound.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrettingSearch {
    highest_fret: i32,
}

impl FrettingSearch {
    /// Return a builder to customize the fret bound
    pub fn builder() -> FrettingSearchBuilder {
        FrettingSearchBuilder::new()
    }

    /// Create a search with default highest fret = 4
    pub fn new() -> Self {
        Self::with_highest_fret(DEFAULT_HIGHEST_FRET)
    }

    fn with_highest_fret(highest_fret: i32) -> Self {
        FrettingSearch { highest_fret }
    }

    /// Highest fret considered, inclusive.
    pub fn highest_fret(&self) -> i32 {
        self.highest_fret
    }

    /// Frets `0..=highest_fret`, none when the bound is negative.
    fn frets(&self) -> impl Iterator<Item = u8> {
        let count = (i64::from(self.highest_fret) + 1).clamp(0, 256) as usize;
        (0..=u8::MAX).take(count)
    }

    /// Every position within the fret bound whose pitch class is a chord
    /// tone, string by string in ascending order.
    pub fn chord_frets(&self, chord: &Chord, instrument: &FrettedInstrument) -> Vec<FretPosition> {
        instrument
            .string_indices()
            .flat_map(|string_index| {
                self.frets()
                    .map(move |fret| FretPosition::on(instrument, string_index, fret))
            })
            .filter(|position| chord.contains_pitch_class(position.pitch()))
            .collect()
    }

    /// Every voicing that sounds all of the chord's pitch classes, ranked by
    /// [`sort_frettings`].
    pub fn chord_frettings<'a>(
        &self,
        chord: &'a Chord,
        instrument: &'a FrettedInstrument,
    ) -> Vec<Fretting<'a>> {
        let candidates = self.chord_frets(chord, instrument);
        let mut by_string: Vec<Vec<FretPosition>> = vec![Vec::new(); instrument.string_count()];
        for position in &candidates {
            by_string[position.string_index()].push(*position);
        }

        let min_pitch_classes = chord.intervals().len();
        let mut frettings = Vec::new();
        let mut accumulated = Vec::with_capacity(instrument.string_count());
        collect_frettings(
            &by_string,
            min_pitch_classes,
            &mut accumulated,
            &mut |positions: &[FretPosition]| {
                let fretting = Fretting::new(chord, instrument, positions.to_vec());
                trace!("{chord} on {}: accepted {:?}", instrument.name(), fretting.string_fret_list());
                frettings.push(fretting);
            },
        );

        debug!(
            "{chord} on {}: {} candidate positions, {} frettings within fret {}",
            instrument.name(),
            candidates.len(),
            frettings.len(),
            self.highest_fret
        );

        sort_frettings(&mut frettings);
        frettings
    }

    /// The highest-ranked voicing, or `None` when the chord cannot be
    /// played within the fret bound.
    pub fn best_fretting_for<'a>(
        &self,
        chord: &'a Chord,
        instrument: &'a FrettedInstrument,
    ) -> Option<Fretting<'a>> {
        self.chord_frettings(chord, instrument).into_iter().next()
    }
}

impl Default for FrettingSearch {
    fn default() -> Self {
        FrettingSearch::new()
    }
}

/// Backtrack over the strings left in `by_string`: mute the first one, or
/// stop it at each of its candidates, then recurse on the rest. At the end
/// hand every combination that covers enough pitch classes to `accept`.
fn collect_frettings(
    by_string: &[Vec<FretPosition>],
    min_pitch_classes: usize,
    accumulated: &mut Vec<FretPosition>,
    accept: &mut impl FnMut(&[FretPosition]),
) {
    let Some((string_candidates, rest)) = by_string.split_first() else {
        if pitch_class_count(accumulated) >= min_pitch_classes {
            accept(accumulated);
        }
        return;
    };

    collect_frettings(rest, min_pitch_classes, accumulated, accept);
    for &position in string_candidates {
        accumulated.push(position);
        collect_frettings(rest, min_pitch_classes, accumulated, accept);
        accumulated.pop();
    }
}

/// Rank voicings in place, most playable first.
///
/// Three stable sorts run in turn, so the last one is the primary key and
/// earlier ones only break its ties:
/// 1. more open strings first;
/// 2. more sounded strings first;
/// 3. lower inversion first, root position leading.
///
/// A voicing whose first degree is missing from [`INVERSION_DEGREES`] (the
/// second of a sus2 chord, say) has no inversion index. It ranks after every
/// voicing that has one, rather than ahead of root position as a `-1` index
/// would place it.
pub fn sort_frettings(frettings: &mut [Fretting<'_>]) {
    frettings.sort_by_key(|f| Reverse(f.open_string_count()));
    frettings.sort_by_key(|f| Reverse(f.sounded_string_count()));
    frettings.sort_by_key(inversion_rank);
}

fn inversion_rank(fretting: &Fretting<'_>) -> usize {
    fretting.inversion_index().unwrap_or(INVERSION_DEGREES.len())
}

/// Candidate positions up to the default highest fret.
pub fn chord_frets(chord: &Chord, instrument: &FrettedInstrument) -> Vec<FretPosition> {
    FrettingSearch::new().chord_frets(chord, instrument)
}

/// Ranked voicings up to the default highest fret.
pub fn chord_frettings<'a>(chord: &'a Chord, instrument: &'a FrettedInstrument) -> Vec<Fretting<'a>> {
    FrettingSearch::new().chord_frettings(chord, instrument)
}

/// Best voicing up to the default highest fret, if there is one.
pub fn best_fretting_for<'a>(
    chord: &'a Chord,
    instrument: &'a FrettedInstrument,
) -> Option<Fretting<'a>> {
    FrettingSearch::new().best_fretting_for(chord, instrument)
}
