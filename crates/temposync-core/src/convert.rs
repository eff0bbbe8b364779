//! Helpers for converting between tempo, beat values, durations and rates.

use crate::error::BpmInputError;
use crate::{Bpm, Hertz, Millis};

/// Tempo used whenever the raw value is not a finite number.
pub const DEFAULT_BPM: Bpm = 120.0;
/// Slowest tempo the calculator will compute with.
pub const MIN_BPM: Bpm = 1.0;
/// Fastest tempo the calculator will compute with.
pub const MAX_BPM: Bpm = 999.0;

/// A dotted note lasts one and a half times its plain value.
pub const DOTTED_FACTOR: f64 = 1.5;
/// Three triplet notes fill the space of two plain ones.
pub const TRIPLET_FACTOR: f64 = 2.0 / 3.0;

const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_SECOND: f64 = 1_000.0;

/// Clamps a raw tempo into `MIN_BPM..=MAX_BPM`, replacing non-finite input with
/// [`DEFAULT_BPM`].
#[inline]
pub fn normalize_bpm(raw: f64) -> Bpm {
    if !raw.is_finite() {
        return DEFAULT_BPM;
    }
    raw.clamp(MIN_BPM, MAX_BPM)
}

/// Duration of `beat_value` quarter-note beats at `bpm`.
#[inline]
pub fn ms_from_bpm(bpm: f64, beat_value: f64) -> Millis {
    Tempo::new(bpm).beats_to_ms(beat_value)
}

/// Frequency of a cycle lasting `ms`. Returns `0.0` for non-positive durations,
/// which callers must read as "no rate" rather than a real frequency.
#[inline]
pub fn hz_from_ms(ms: Millis) -> Hertz {
    if ms > 0.0 {
        MS_PER_SECOND / ms
    } else {
        0.0
    }
}

/// Dotted length of `base`: one and a half times as long.
#[inline]
pub fn dotted_ms(base: Millis) -> Millis {
    base * DOTTED_FACTOR
}

/// Triplet length of `base`: three in the space of two.
#[inline]
pub fn triplet_ms(base: Millis) -> Millis {
    base * TRIPLET_FACTOR
}

/// Checks whether BPM text typed by the user describes a usable tempo.
///
/// This only decides what the presentation layer shows. Computation always goes
/// through [`normalize_bpm`], which accepts anything.
pub fn parse_bpm_input(text: &str) -> Result<Bpm, BpmInputError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| BpmInputError::NotANumber)?;
    if !value.is_finite() {
        return Err(BpmInputError::NotANumber);
    }
    if !(MIN_BPM..=MAX_BPM).contains(&value) {
        return Err(BpmInputError::OutOfRange(value));
    }
    Ok(value)
}

/// A normalized tempo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    bpm: Bpm,
}

impl Default for Tempo {
    fn default() -> Self {
        Self { bpm: DEFAULT_BPM }
    }
}

impl Tempo {
    /// Creates a tempo from any raw value, see [`normalize_bpm`].
    pub fn new(raw: f64) -> Self {
        Self {
            bpm: normalize_bpm(raw),
        }
    }

    pub fn bpm(&self) -> Bpm {
        self.bpm
    }

    /// Length of one quarter-note beat.
    #[inline]
    pub fn ms_per_beat(&self) -> Millis {
        MS_PER_MINUTE / self.bpm
    }

    /// Converts a duration expressed in quarter-note beats to milliseconds.
    #[inline]
    pub fn beats_to_ms(&self, beats: f64) -> Millis {
        self.ms_per_beat() * beats
    }

    /// Converts milliseconds to quarter-note beats.
    #[inline]
    pub fn ms_to_beats(&self, ms: Millis) -> f64 {
        ms / self.ms_per_beat()
    }
}
