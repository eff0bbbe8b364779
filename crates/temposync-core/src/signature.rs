//! Time signatures normalized to quarter-note beats per bar.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::SignatureError;

const MIN_PART: u32 = 1;
const MAX_PART: u32 = 64;

static SIGNATURE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,3})/([0-9]{1,3})$").expect("valid signature pattern"));

/// A time signature whose bar length is known in quarter-note beats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSignature {
    numerator: u32,
    denominator: u32,
    beats_per_bar: f64,
}

impl TimeSignature {
    /// Both parts must lie in `1..=64`.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, SignatureError> {
        let in_range = |part: u32| (MIN_PART..=MAX_PART).contains(&part);
        if !in_range(numerator) || !in_range(denominator) {
            return Err(SignatureError::OutOfRange {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
            beats_per_bar: numerator as f64 * (4.0 / denominator as f64),
        })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Bar length in quarter-note beats, e.g. 3.5 for 7/8.
    pub fn beats_per_bar(&self) -> f64 {
        self.beats_per_bar
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
            beats_per_bar: 4.0,
        }
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for TimeSignature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time_signature(s)
    }
}

/// Parses free-form `N/M` text. Whitespace anywhere in the input is ignored.
pub fn parse_time_signature(text: &str) -> Result<TimeSignature, SignatureError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let captures = SIGNATURE_PATTERN
        .captures(&compact)
        .ok_or(SignatureError::Malformed)?;
    let numerator = captures[1]
        .parse()
        .map_err(|_| SignatureError::Malformed)?;
    let denominator = captures[2]
        .parse()
        .map_err(|_| SignatureError::Malformed)?;
    TimeSignature::new(numerator, denominator)
}

/// One of the selectable signatures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignaturePreset {
    pub id: &'static str,
    pub label: &'static str,
    pub beats_per_bar: f64,
}

pub const SIGNATURE_PRESETS: [SignaturePreset; 4] = [
    SignaturePreset {
        id: "2/4",
        label: "2/4",
        beats_per_bar: 2.0,
    },
    SignaturePreset {
        id: "3/4",
        label: "3/4",
        beats_per_bar: 3.0,
    },
    SignaturePreset {
        id: "4/4",
        label: "4/4",
        beats_per_bar: 4.0,
    },
    SignaturePreset {
        id: "6/8",
        label: "6/8",
        beats_per_bar: 3.0,
    },
];

pub const DEFAULT_SIGNATURE_ID: &str = "4/4";

pub fn find_preset(id: &str) -> Option<&'static SignaturePreset> {
    SIGNATURE_PRESETS.iter().find(|preset| preset.id == id)
}

fn default_preset() -> &'static SignaturePreset {
    &SIGNATURE_PRESETS[2]
}

/// Where a resolved signature came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureSource {
    Preset,
    Custom,
    /// Custom text is present but does not parse; the preset is used instead.
    Fallback,
}

/// The signature computations should run against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSignature {
    pub label: String,
    pub beats_per_bar: f64,
    pub source: SignatureSource,
}

/// Preset choice plus optional free-form text typed by the user.
#[derive(Debug, Clone)]
pub struct SignatureSelection {
    preset: &'static SignaturePreset,
    custom_text: String,
}

impl Default for SignatureSelection {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            custom_text: String::new(),
        }
    }
}

impl SignatureSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(&self) -> &'static SignaturePreset {
        self.preset
    }

    /// Switches to the preset with the given id. Unknown ids leave the
    /// selection untouched and return `false`.
    pub fn select_preset(&mut self, id: &str) -> bool {
        match find_preset(id) {
            Some(preset) => {
                self.preset = preset;
                true
            }
            None => false,
        }
    }

    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    pub fn set_custom_text(&mut self, text: impl Into<String>) {
        self.custom_text = text.into();
    }

    pub fn clear_custom_text(&mut self) {
        self.custom_text.clear();
    }

    /// True while custom text is present but not a valid signature.
    pub fn is_custom_invalid(&self) -> bool {
        !self.custom_text.trim().is_empty() && parse_time_signature(&self.custom_text).is_err()
    }

    /// Valid custom text wins over the preset. Invalid custom text falls back
    /// to the preset so nothing is ever computed against it.
    pub fn resolve(&self) -> ResolvedSignature {
        if self.custom_text.trim().is_empty() {
            return self.preset_resolution(SignatureSource::Preset);
        }
        match parse_time_signature(&self.custom_text) {
            Ok(signature) => ResolvedSignature {
                label: signature.label(),
                beats_per_bar: signature.beats_per_bar(),
                source: SignatureSource::Custom,
            },
            Err(err) => {
                debug!(text = %self.custom_text, %err, preset = self.preset.id, "falling back to preset signature");
                self.preset_resolution(SignatureSource::Fallback)
            }
        }
    }

    fn preset_resolution(&self, source: SignatureSource) -> ResolvedSignature {
        ResolvedSignature {
            label: self.preset.label.to_string(),
            beats_per_bar: self.preset.beats_per_bar,
            source,
        }
    }
}
