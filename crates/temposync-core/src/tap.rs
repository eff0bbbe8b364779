//! Tap-based tempo estimation.

use tracing::{debug, trace};

use crate::config::TapConfig;
use crate::convert::normalize_bpm;
use crate::{Bpm, Millis};

const MS_PER_MINUTE: f64 = 60_000.0;

/// Collects tap timestamps (monotonic milliseconds) and estimates a tempo.
///
/// ```
/// use temposync_core::TapTempo;
///
/// let mut tapper = TapTempo::new();
/// for now in [0.0, 500.0, 1000.0, 1500.0] {
///     tapper.tap(now);
/// }
/// let bpm = tapper.estimate().unwrap();
/// assert!((bpm - 120.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TapTempo {
    config: TapConfig,
    taps: Vec<Millis>,
}

impl TapTempo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TapConfig) -> Self {
        Self {
            config,
            taps: Vec::new(),
        }
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    /// Retained timestamps, oldest first.
    pub fn taps(&self) -> &[Millis] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Registers a tap at `now` and returns the updated estimate.
    pub fn tap(&mut self, now: Millis) -> Option<Bpm> {
        if let Some(&last) = self.taps.last() {
            if now - last > self.config.session_timeout_ms {
                debug!(gap_ms = now - last, "tap session timed out, starting over");
                self.taps.clear();
                self.taps.push(now);
                return None;
            }
        }

        self.taps.push(now);
        let window = self.config.window_ms;
        let before = self.taps.len();
        self.taps.retain(|&tap| now - tap <= window);
        if self.taps.len() > self.config.max_taps {
            let excess = self.taps.len() - self.config.max_taps;
            self.taps.drain(..excess);
        }
        if self.taps.len() != before {
            trace!(dropped = before - self.taps.len(), "trimmed tap history");
        }

        self.estimate()
    }

    /// Current estimate, or `None` when no plausible interval has been tapped.
    pub fn estimate(&self) -> Option<Bpm> {
        estimate_bpm(&self.taps, &self.config)
    }

    /// Takes the current estimate and clears the session. Does nothing when no
    /// estimate is available.
    pub fn apply(&mut self) -> Option<Bpm> {
        let bpm = self.estimate()?;
        self.reset();
        Some(bpm)
    }

    pub fn reset(&mut self) {
        self.taps.clear();
    }
}

/// Averages the most recent plausible intervals between `taps`.
pub fn estimate_bpm(taps: &[Millis], config: &TapConfig) -> Option<Bpm> {
    let range = config.min_interval_ms..=config.max_interval_ms;
    let intervals: Vec<Millis> = taps
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .filter(|interval| {
            let keep = range.contains(interval);
            if !keep {
                trace!(interval_ms = *interval, "rejected tap interval");
            }
            keep
        })
        .collect();

    if intervals.is_empty() {
        return None;
    }

    let recent = &intervals[intervals.len().saturating_sub(config.average_count)..];
    let average = recent.iter().sum::<f64>() / recent.len() as f64;
    Some(normalize_bpm(MS_PER_MINUTE / average))
}
