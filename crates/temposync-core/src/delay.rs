//! Delay rows: plain, dotted and triplet timings for each note division.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::convert::{dotted_ms, hz_from_ms, ms_from_bpm, triplet_ms};
use crate::notation::{find_division, NoteDivision, NOTE_DIVISIONS};
use crate::{Hertz, Millis};

/// Which flavour of a note division a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteVariant {
    #[default]
    Normal,
    Dotted,
    Triplet,
}

impl NoteVariant {
    pub const ALL: [NoteVariant; 3] = [NoteVariant::Normal, NoteVariant::Dotted, NoteVariant::Triplet];

    pub fn name(self) -> &'static str {
        match self {
            NoteVariant::Normal => "normal",
            NoteVariant::Dotted => "dotted",
            NoteVariant::Triplet => "triplet",
        }
    }
}

impl fmt::Display for NoteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoteVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteVariant::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown note variant '{s}'"))
    }
}

/// Timings derived from one note division at one tempo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayRow {
    pub id: &'static str,
    pub note_label: String,
    pub notes_ms: Millis,
    pub notes_hz: Hertz,
    pub dotted_ms: Millis,
    pub dotted_hz: Hertz,
    pub triplet_ms: Millis,
    pub triplet_hz: Hertz,
}

impl DelayRow {
    pub fn new(division: &NoteDivision, bpm: f64) -> Self {
        let base = ms_from_bpm(bpm, division.beat_value);
        let dotted = dotted_ms(base);
        let triplet = triplet_ms(base);
        Self {
            id: division.id,
            note_label: division.note_label(),
            notes_ms: base,
            notes_hz: hz_from_ms(base),
            dotted_ms: dotted,
            dotted_hz: hz_from_ms(dotted),
            triplet_ms: triplet,
            triplet_hz: hz_from_ms(triplet),
        }
    }

    pub fn ms(&self, variant: NoteVariant) -> Millis {
        match variant {
            NoteVariant::Normal => self.notes_ms,
            NoteVariant::Dotted => self.dotted_ms,
            NoteVariant::Triplet => self.triplet_ms,
        }
    }

    pub fn hz(&self, variant: NoteVariant) -> Hertz {
        match variant {
            NoteVariant::Normal => self.notes_hz,
            NoteVariant::Dotted => self.dotted_hz,
            NoteVariant::Triplet => self.triplet_hz,
        }
    }
}

/// One row per catalog entry, in catalog order.
pub fn delay_rows(bpm: f64) -> Vec<DelayRow> {
    NOTE_DIVISIONS
        .iter()
        .map(|division| DelayRow::new(division, bpm))
        .collect()
}

/// Rows for the given division ids. Unknown ids are skipped.
pub fn delay_rows_for(ids: &[&str], bpm: f64) -> Vec<DelayRow> {
    ids.iter()
        .filter_map(|id| find_division(id))
        .map(|division| DelayRow::new(division, bpm))
        .collect()
}
