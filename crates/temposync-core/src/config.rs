//! Tunable thresholds for tap detection and status messages.
//!
//! Configuration is only ever read. Nothing the user does is written back.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::Millis;

/// Largest accepted [`TapConfig::max_taps`].
pub const MAX_TAP_HISTORY: usize = 1024;

/// Tap-tempo thresholds, all in milliseconds unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    /// A gap longer than this starts a new tapping session.
    pub session_timeout_ms: Millis,
    /// Taps older than this, relative to the newest, are dropped.
    pub window_ms: Millis,
    /// Upper bound on retained taps.
    pub max_taps: usize,
    /// Shortest interval accepted as a beat (double clicks are shorter).
    pub min_interval_ms: Millis,
    /// Longest interval accepted as a beat.
    pub max_interval_ms: Millis,
    /// Number of most recent accepted intervals averaged into the estimate.
    pub average_count: usize,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            session_timeout_ms: 3500.0,
            window_ms: 12_000.0,
            max_taps: 12,
            min_interval_ms: 120.0,
            max_interval_ms: 3000.0,
            average_count: 6,
        }
    }
}

impl TapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(self.session_timeout_ms) {
            return Err(ConfigError::Invalid("session_timeout_ms must be positive"));
        }
        if !positive(self.window_ms) {
            return Err(ConfigError::Invalid("window_ms must be positive"));
        }
        if self.max_taps < 2 {
            return Err(ConfigError::Invalid("max_taps must be at least 2"));
        }
        if self.max_taps > MAX_TAP_HISTORY {
            return Err(ConfigError::Invalid("max_taps must be at most 1024"));
        }
        if self.average_count == 0 {
            return Err(ConfigError::Invalid("average_count must be at least 1"));
        }
        if !positive(self.min_interval_ms) || !positive(self.max_interval_ms) {
            return Err(ConfigError::Invalid("interval bounds must be positive"));
        }
        if self.min_interval_ms >= self.max_interval_ms {
            return Err(ConfigError::Invalid(
                "min_interval_ms must be below max_interval_ms",
            ));
        }
        Ok(())
    }
}

/// Settings for a [`Calculator`](crate::Calculator) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub tap: TapConfig,
    /// How long a copy status message stays visible.
    pub status_clear_ms: Millis,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            tap: TapConfig::default(),
            status_clear_ms: 1300.0,
        }
    }
}

impl CalculatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tap.validate()?;
        if !(self.status_clear_ms.is_finite() && self.status_clear_ms >= 0.0) {
            return Err(ConfigError::Invalid("status_clear_ms must not be negative"));
        }
        Ok(())
    }

    /// Parses and validates a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Like [`CalculatorConfig::load`] but returns defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(%err, path = %path.display(), "using default calculator config");
                Self::default()
            }
        }
    }
}
