//! Tempo-synced timing calculations for delay, reverb and LFO settings.
//!
//! Everything in this crate is pure and synchronous. The presentation layer
//! feeds it BPM text, time signatures and tap timestamps and renders the rows
//! it gets back.

pub mod config;
pub mod convert;
pub mod delay;
pub mod error;
pub mod format;
pub mod mode;
pub mod notation;
pub mod reverb;
pub mod session;
pub mod signature;
pub mod tap;

pub use config::{CalculatorConfig, TapConfig, MAX_TAP_HISTORY};
pub use convert::{
    hz_from_ms, ms_from_bpm, normalize_bpm, parse_bpm_input, Tempo, DEFAULT_BPM, MAX_BPM, MIN_BPM,
};
pub use delay::{delay_rows, DelayRow, NoteVariant};
pub use error::{BpmInputError, ConfigError, SignatureError};
pub use format::{format_bpm, format_hz, format_ms};
pub use mode::CalculatorMode;
pub use notation::{NoteDivision, NOTE_DIVISIONS};
pub use reverb::{reverb_rows, ReverbPreset, ReverbRow, REVERB_PRESETS};
pub use session::{Calculator, Clipboard, CopyUnit, BPM_PRESETS, COPY_FAILED_MESSAGE};
pub use signature::{
    parse_time_signature, ResolvedSignature, SignaturePreset, SignatureSelection, SignatureSource,
    TimeSignature, SIGNATURE_PRESETS,
};
pub use tap::TapTempo;

/// Tempo in beats per minute.
pub type Bpm = f64;

/// Durations expressed in milliseconds.
pub type Millis = f64;

/// Rates expressed in hertz.
pub type Hertz = f64;
