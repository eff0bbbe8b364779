//! Command logic behind the `temposync` subcommands, independent of argument
//! parsing and of the real clipboard.

use std::path::Path;

use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use temposync_core::notation::find_division;
use temposync_core::signature::find_preset;
use temposync_core::{
    Calculator, CalculatorConfig, CalculatorMode, Clipboard, CopyUnit, DelayRow, NoteVariant,
    NOTE_DIVISIONS,
};
use tracing::warn;

use crate::render::TableReport;

/// Tempo and signature text as typed on the command line.
#[derive(Debug, Clone)]
pub struct TempoOptions {
    pub bpm: String,
    /// Preset id (`2/4`, `3/4`, `4/4`, `6/8`) or free-form text such as `7/8`.
    pub signature: String,
}

impl Default for TempoOptions {
    fn default() -> Self {
        Self {
            bpm: "120".to_string(),
            signature: "4/4".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Normal,
    Dotted,
    Triplet,
}

impl From<VariantArg> for NoteVariant {
    fn from(variant: VariantArg) -> Self {
        match variant {
            VariantArg::Normal => NoteVariant::Normal,
            VariantArg::Dotted => NoteVariant::Dotted,
            VariantArg::Triplet => NoteVariant::Triplet,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReverbPart {
    Total,
    PreDelay,
    Decay,
}

impl ReverbPart {
    pub fn label(self) -> &'static str {
        match self {
            ReverbPart::Total => "total",
            ReverbPart::PreDelay => "pre-delay",
            ReverbPart::Decay => "decay",
        }
    }
}

/// What `temposync copy` puts on the clipboard.
#[derive(Debug, Clone, PartialEq)]
pub enum CopyTarget {
    Note {
        id: String,
        variant: VariantArg,
        hz: bool,
    },
    Reverb {
        name: String,
        part: ReverbPart,
    },
}

/// A resolved copy value, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyValue {
    pub label: String,
    pub value: f64,
    pub unit: CopyUnit,
}

/// Reads `--config` when given. Unreadable or invalid files fall back to defaults.
pub fn load_config(path: Option<&Path>) -> CalculatorConfig {
    match path {
        Some(path) => CalculatorConfig::load_or_default(path),
        None => CalculatorConfig::default(),
    }
}

/// Applies `--bpm` and `--signature` to the session.
///
/// Invalid BPM text is an error. A signature that is neither a preset nor a
/// valid free-form value falls back to the current preset with a warning.
pub fn apply_tempo(calc: &mut Calculator, options: &TempoOptions) -> Result<()> {
    calc.set_bpm_text(options.bpm.as_str());
    if let Err(err) = calc.bpm_input() {
        bail!(
            "invalid BPM '{}': {err}. Type a value from 1 to 999 BPM",
            options.bpm
        );
    }

    let signature = calc.signature_mut();
    let text = options.signature.trim();
    if find_preset(text).is_some() {
        signature.clear_custom_text();
        signature.select_preset(text);
        return Ok(());
    }

    signature.set_custom_text(text);
    if signature.is_custom_invalid() {
        warn!(
            text,
            fallback = signature.preset().id,
            "not a valid time signature, using preset"
        );
    }
    Ok(())
}

pub fn table_report(
    calc: &mut Calculator,
    mode: CalculatorMode,
    options: &TempoOptions,
) -> Result<TableReport> {
    apply_tempo(calc, options)?;
    calc.set_mode(mode);

    let signature = calc.resolved_signature();
    Ok(TableReport {
        bpm: calc.bpm(),
        mode,
        mode_name: mode.name(),
        description: mode.description(),
        formula_base: calc.formula_base().unwrap_or_default(),
        signature: signature.label,
        signature_source: signature.source,
        delay: calc.delay_rows(),
        reverb: mode.shows_reverb_table().then(|| calc.reverb_rows()),
    })
}

pub fn resolve_copy(calc: &mut Calculator, target: &CopyTarget) -> Result<CopyValue> {
    match target {
        CopyTarget::Note { id, variant, hz } => {
            let division = find_division(id).ok_or_else(|| unknown_note(id))?;
            let row = DelayRow::new(division, calc.bpm());
            let variant = NoteVariant::from(*variant);
            let (value, unit) = if *hz {
                (row.hz(variant), CopyUnit::Hz)
            } else {
                (row.ms(variant), CopyUnit::Ms)
            };
            Ok(CopyValue {
                label: format!("{} {variant}", row.note_label),
                value,
                unit,
            })
        }
        CopyTarget::Reverb { name, part } => {
            calc.set_mode(CalculatorMode::Reverb);
            let row = calc
                .reverb_rows()
                .into_iter()
                .find(|row| row.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| anyhow!("unknown reverb preset '{name}'"))?;
            let value = match part {
                ReverbPart::Total => row.total_ms,
                ReverbPart::PreDelay => row.pre_delay_ms,
                ReverbPart::Decay => row.decay_ms,
            };
            Ok(CopyValue {
                label: format!("{} {}", row.name, part.label()),
                value,
                unit: CopyUnit::Ms,
            })
        }
    }
}

/// Writes `copy` to `clipboard` and returns the line to print, or the
/// failure status as an error.
pub fn copy_value(
    calc: &mut Calculator,
    clipboard: &mut dyn Clipboard,
    copy: &CopyValue,
) -> Result<String> {
    let copied = calc.copy(clipboard, &copy.label, copy.value, copy.unit, 0.0);
    let status = calc.status(0.0).unwrap_or_default().to_string();
    if copied {
        Ok(format!("{status}: {}", copy.unit.format(copy.value)))
    } else {
        Err(anyhow!(status))
    }
}

fn unknown_note(note: &str) -> anyhow::Error {
    let known: Vec<_> = NOTE_DIVISIONS.iter().map(|division| division.id).collect();
    anyhow!(
        "unknown note value '{note}', expected one of {}",
        known.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use temposync_core::{SignatureSource, COPY_FAILED_MESSAGE};

    use super::*;

    #[derive(Default)]
    struct RecordingClipboard {
        accept: bool,
        written: Vec<String>,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&mut self, text: &str) -> bool {
            if self.accept {
                self.written.push(text.to_string());
            }
            self.accept
        }
    }

    fn options(bpm: &str, signature: &str) -> TempoOptions {
        TempoOptions {
            bpm: bpm.to_string(),
            signature: signature.to_string(),
        }
    }

    #[test]
    fn invalid_bpm_is_rejected() {
        let mut calc = Calculator::new();
        for bpm in ["abc", "0", "1000", ""] {
            let err = apply_tempo(&mut calc, &options(bpm, "4/4")).unwrap_err();
            assert!(err.to_string().contains("invalid BPM"), "{bpm}: {err}");
        }
        assert!(table_report(&mut calc, CalculatorMode::Delay, &options("x", "4/4")).is_err());
    }

    #[test]
    fn signature_accepts_preset_or_free_form() {
        let mut calc = Calculator::new();
        apply_tempo(&mut calc, &options("120", "6/8")).unwrap();
        let resolved = calc.resolved_signature();
        assert_eq!(resolved.source, SignatureSource::Preset);
        assert_eq!(resolved.beats_per_bar, 3.0);

        apply_tempo(&mut calc, &options("120", " 7 / 8 ")).unwrap();
        let resolved = calc.resolved_signature();
        assert_eq!(resolved.source, SignatureSource::Custom);
        assert_eq!(resolved.label, "7/8");
        assert_eq!(resolved.beats_per_bar, 3.5);

        apply_tempo(&mut calc, &options("120", "3/4")).unwrap();
        assert_eq!(calc.signature().custom_text(), "");
        assert_eq!(calc.resolved_signature().source, SignatureSource::Preset);
    }

    #[test]
    fn unusable_signature_falls_back_to_common_time() {
        let mut calc = Calculator::new();
        for text in ["5/5/5", "0/4", "65/4", "waltz"] {
            apply_tempo(&mut calc, &options("120", text)).unwrap();
            let resolved = calc.resolved_signature();
            assert_eq!(resolved.source, SignatureSource::Fallback, "{text}");
            assert_eq!(resolved.label, "4/4");
        }

        let report =
            table_report(&mut calc, CalculatorMode::Reverb, &options("120", "waltz")).unwrap();
        assert_eq!(report.signature_source, SignatureSource::Fallback);
        assert_eq!(report.reverb.unwrap()[0].total_ms, 4000.0);
    }

    #[test]
    fn reverb_table_only_in_reverb_mode() {
        let mut calc = Calculator::new();
        let delay =
            table_report(&mut calc, CalculatorMode::Delay, &TempoOptions::default()).unwrap();
        assert!(delay.reverb.is_none());
        assert_eq!(delay.delay.len(), NOTE_DIVISIONS.len());
        assert_eq!(delay.formula_base, "1/4 = 500.00 ms");

        let reverb =
            table_report(&mut calc, CalculatorMode::Reverb, &options("128", "4/4")).unwrap();
        assert_eq!(reverb.reverb.unwrap()[0].total_ms, 3750.0);
    }

    #[test]
    fn note_copy_targets() {
        let mut calc = Calculator::new();
        apply_tempo(&mut calc, &TempoOptions::default()).unwrap();

        let dotted_eighth = resolve_copy(
            &mut calc,
            &CopyTarget::Note {
                id: "1/8".to_string(),
                variant: VariantArg::Dotted,
                hz: false,
            },
        )
        .unwrap();
        assert_eq!(dotted_eighth.label, "1/8 (1/2 Beat) dotted");
        assert_eq!(dotted_eighth.value, 375.0);
        assert_eq!(dotted_eighth.unit, CopyUnit::Ms);

        let quarter_hz = resolve_copy(
            &mut calc,
            &CopyTarget::Note {
                id: "1/4".to_string(),
                variant: VariantArg::Normal,
                hz: true,
            },
        )
        .unwrap();
        assert_eq!(quarter_hz.value, 2.0);
        assert_eq!(quarter_hz.unit, CopyUnit::Hz);
    }

    #[test]
    fn unknown_note_and_reverb_are_errors() {
        let mut calc = Calculator::new();
        let err = resolve_copy(
            &mut calc,
            &CopyTarget::Note {
                id: "1/3".to_string(),
                variant: VariantArg::Normal,
                hz: false,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown note value '1/3'"));

        let err = resolve_copy(
            &mut calc,
            &CopyTarget::Reverb {
                name: "Cathedral".to_string(),
                part: ReverbPart::Total,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("Cathedral"));
    }

    #[test]
    fn reverb_copy_uses_rounded_display() {
        let mut calc = Calculator::new();
        apply_tempo(&mut calc, &TempoOptions::default()).unwrap();
        let copy = resolve_copy(
            &mut calc,
            &CopyTarget::Reverb {
                name: "small room".to_string(),
                part: ReverbPart::PreDelay,
            },
        )
        .unwrap();
        assert_eq!(copy.label, "Small Room pre-delay");

        let mut clipboard = RecordingClipboard {
            accept: true,
            ..Default::default()
        };
        let line = copy_value(&mut calc, &mut clipboard, &copy).unwrap();
        assert_eq!(clipboard.written, ["15.63 ms"]);
        assert_eq!(line, "Small Room pre-delay copied: 15.63 ms");
    }

    #[test]
    fn blocked_clipboard_reports_failure() {
        let mut calc = Calculator::new();
        let copy = CopyValue {
            label: "1/4 (1 Beat) normal".to_string(),
            value: 500.0,
            unit: CopyUnit::Ms,
        };
        let mut clipboard = RecordingClipboard::default();
        let err = copy_value(&mut calc, &mut clipboard, &copy).unwrap_err();
        assert_eq!(err.to_string(), COPY_FAILED_MESSAGE);
        assert!(clipboard.written.is_empty());
    }

    #[test]
    fn broken_config_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tap": {{ "max_taps": 18446744073709551615 }} }}"#).unwrap();
        assert_eq!(load_config(Some(file.path())), CalculatorConfig::default());

        let missing = file.path().with_extension("missing");
        assert_eq!(load_config(Some(missing.as_path())), CalculatorConfig::default());
        assert_eq!(load_config(None), CalculatorConfig::default());
    }
}
