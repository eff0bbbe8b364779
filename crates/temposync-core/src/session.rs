//! State owned by one interactive calculator session.
//!
//! The presentation layer owns a [`Calculator`], forwards user input to it and
//! re-derives rows whenever something changes. Rows are cheap to compute so
//! nothing is cached. Time is always passed in by the caller.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::CalculatorConfig;
use crate::convert::{normalize_bpm, parse_bpm_input, DEFAULT_BPM};
use crate::delay::{delay_rows_for, DelayRow};
use crate::error::BpmInputError;
use crate::format::{format_bpm, format_hz, format_ms, formula_base};
use crate::mode::CalculatorMode;
use crate::reverb::{reverb_rows, ReverbRow};
use crate::signature::{ResolvedSignature, SignatureSelection};
use crate::tap::TapTempo;
use crate::{Bpm, Millis};

/// Quick-pick tempos offered next to the BPM field.
pub const BPM_PRESETS: [Bpm; 14] = [
    60.0, 66.0, 72.0, 78.0, 84.0, 90.0, 96.0, 100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0,
];

/// Status shown when the clipboard refuses a write.
pub const COPY_FAILED_MESSAGE: &str = "Copy blocked. Please try again.";

/// Destination for copied values. Returns `false` when the write failed.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> bool;
}

/// Unit a copied value is formatted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyUnit {
    Ms,
    Hz,
}

impl CopyUnit {
    pub fn format(self, value: f64) -> String {
        match self {
            CopyUnit::Ms => format_ms(value),
            CopyUnit::Hz => format_hz(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct StatusMessage {
    text: String,
    expires_at: Millis,
}

#[derive(Debug, Clone)]
pub struct Calculator {
    bpm_text: String,
    mode: CalculatorMode,
    signature: SignatureSelection,
    taps: TapTempo,
    status: Option<StatusMessage>,
    status_clear_ms: Millis,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self {
            bpm_text: DEFAULT_BPM.to_string(),
            mode: CalculatorMode::default(),
            signature: SignatureSelection::default(),
            taps: TapTempo::with_config(config.tap.clone()),
            status: None,
            status_clear_ms: config.status_clear_ms,
        }
    }

    pub fn bpm_text(&self) -> &str {
        &self.bpm_text
    }

    pub fn set_bpm_text(&mut self, text: impl Into<String>) {
        self.bpm_text = text.into();
    }

    pub fn apply_bpm_preset(&mut self, bpm: Bpm) {
        self.bpm_text = format_bpm(bpm);
    }

    /// Whether the typed text is a tempo worth showing tables for.
    pub fn bpm_input(&self) -> Result<Bpm, BpmInputError> {
        parse_bpm_input(&self.bpm_text)
    }

    pub fn is_valid_bpm(&self) -> bool {
        self.bpm_input().is_ok()
    }

    /// Tempo used for computation. Unparsable text yields the default.
    pub fn bpm(&self) -> Bpm {
        normalize_bpm(self.bpm_text.trim().parse().unwrap_or(f64::NAN))
    }

    pub fn mode(&self) -> CalculatorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CalculatorMode) {
        self.mode = mode;
    }

    pub fn signature(&self) -> &SignatureSelection {
        &self.signature
    }

    pub fn signature_mut(&mut self) -> &mut SignatureSelection {
        &mut self.signature
    }

    pub fn resolved_signature(&self) -> ResolvedSignature {
        self.signature.resolve()
    }

    /// Empty while the BPM text is invalid.
    pub fn delay_rows(&self) -> Vec<DelayRow> {
        if !self.is_valid_bpm() {
            return Vec::new();
        }
        delay_rows_for(self.mode.note_ids(), self.bpm())
    }

    /// Empty while the BPM text is invalid.
    pub fn reverb_rows(&self) -> Vec<ReverbRow> {
        if !self.is_valid_bpm() {
            return Vec::new();
        }
        reverb_rows(self.bpm(), self.resolved_signature().beats_per_bar)
    }

    pub fn formula_base(&self) -> Option<String> {
        self.is_valid_bpm().then(|| formula_base(self.bpm()))
    }

    pub fn taps(&self) -> &TapTempo {
        &self.taps
    }

    pub fn tap(&mut self, now: Millis) -> Option<Bpm> {
        self.taps.tap(now)
    }

    pub fn tap_estimate(&self) -> Option<Bpm> {
        self.taps.estimate()
    }

    pub fn reset_taps(&mut self) {
        self.taps.reset();
    }

    /// Writes the tap estimate into the BPM field and clears the taps.
    pub fn apply_tap(&mut self) -> Option<Bpm> {
        let bpm = self.taps.apply()?;
        debug!(bpm, "applied tapped tempo");
        self.bpm_text = format_bpm(bpm);
        Some(bpm)
    }

    /// Copies `value` formatted with `unit` and sets a status message that
    /// expires `status_clear_ms` after `now`.
    pub fn copy(
        &mut self,
        clipboard: &mut dyn Clipboard,
        label: &str,
        value: f64,
        unit: CopyUnit,
        now: Millis,
    ) -> bool {
        let text = unit.format(value);
        let copied = clipboard.write_text(&text);
        let message = if copied {
            format!("{label} copied")
        } else {
            warn!(label, "clipboard write failed");
            COPY_FAILED_MESSAGE.to_string()
        };
        self.status = Some(StatusMessage {
            text: message,
            expires_at: now + self.status_clear_ms,
        });
        copied
    }

    /// The status message, if it has not expired at `now`.
    pub fn status(&self, now: Millis) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|status| now < status.expires_at)
            .map(|status| status.text.as_str())
    }

    pub fn clear_expired_status(&mut self, now: Millis) {
        if self.status(now).is_none() {
            self.status = None;
        }
    }
}
