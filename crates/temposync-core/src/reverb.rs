//! Reverb size presets scaled to the active time signature.

use serde::Serialize;

use crate::convert::ms_from_bpm;
use crate::Millis;

/// A named reverb size. `total_beats` is measured at 4/4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReverbPreset {
    pub name: &'static str,
    pub total_label: &'static str,
    pub total_beats: f64,
    pub pre_delay_label: &'static str,
    pub pre_delay_beat_value: f64,
}

/// Largest to smallest. Row order is part of the rendered output.
pub const REVERB_PRESETS: [ReverbPreset; 4] = [
    ReverbPreset {
        name: "Hall",
        total_label: "2 Bars",
        total_beats: 8.0,
        pre_delay_label: "1/32",
        pre_delay_beat_value: 0.125,
    },
    ReverbPreset {
        name: "Large Room",
        total_label: "1 Bar",
        total_beats: 4.0,
        pre_delay_label: "1/64",
        pre_delay_beat_value: 0.0625,
    },
    ReverbPreset {
        name: "Small Room",
        total_label: "1/2 Note",
        total_beats: 2.0,
        pre_delay_label: "1/128",
        pre_delay_beat_value: 0.03125,
    },
    ReverbPreset {
        name: "Tight Ambience",
        total_label: "1/4 Note",
        total_beats: 1.0,
        pre_delay_label: "1/256",
        pre_delay_beat_value: 0.015625,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReverbRow {
    pub name: &'static str,
    pub total_label: &'static str,
    pub pre_delay_label: &'static str,
    pub total_ms: Millis,
    pub pre_delay_ms: Millis,
    /// `total_ms - pre_delay_ms`, unclamped. Negative when the pre-delay
    /// outlasts the scaled total.
    pub decay_ms: Millis,
}

impl ReverbRow {
    pub fn has_negative_decay(&self) -> bool {
        self.decay_ms < 0.0
    }

    /// Decay floored at zero, for callers that want a displayable duration.
    pub fn clamped_decay_ms(&self) -> Millis {
        self.decay_ms.max(0.0)
    }
}

/// Ratio applied to preset totals. Bars shorter than one beat count as one.
#[inline]
pub fn signature_scale(beats_per_bar: f64) -> f64 {
    beats_per_bar.max(1.0) / 4.0
}

/// Rows for the built-in presets, in catalog order.
pub fn reverb_rows(bpm: f64, beats_per_bar: f64) -> Vec<ReverbRow> {
    reverb_rows_for(&REVERB_PRESETS, bpm, beats_per_bar)
}

/// Scales each preset's total by the signature. Pre-delay stays anchored to
/// its note value regardless of bar length.
pub fn reverb_rows_for(presets: &[ReverbPreset], bpm: f64, beats_per_bar: f64) -> Vec<ReverbRow> {
    let scale = signature_scale(beats_per_bar);
    presets
        .iter()
        .map(|preset| {
            let total_ms = ms_from_bpm(bpm, preset.total_beats * scale);
            let pre_delay_ms = ms_from_bpm(bpm, preset.pre_delay_beat_value);
            ReverbRow {
                name: preset.name,
                total_label: preset.total_label,
                pre_delay_label: preset.pre_delay_label,
                total_ms,
                pre_delay_ms,
                decay_ms: total_ms - pre_delay_ms,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_time_is_unscaled() {
        assert_eq!(signature_scale(4.0), 1.0);
        let rows = reverb_rows(128.0, 4.0);
        let hall = &rows[0];
        assert_eq!(hall.name, "Hall");
        assert_eq!(hall.total_ms, ms_from_bpm(128.0, 8.0));
        assert_eq!(hall.pre_delay_ms, ms_from_bpm(128.0, 0.125));
    }

    #[test]
    fn catalog_order_is_preserved() {
        let names: Vec<_> = reverb_rows(120.0, 3.0).iter().map(|r| r.name).collect();
        assert_eq!(names, ["Hall", "Large Room", "Small Room", "Tight Ambience"]);
    }

    #[test]
    fn totals_scale_with_bar_length_but_pre_delay_does_not() {
        let waltz = reverb_rows(120.0, 3.0);
        let common = reverb_rows(120.0, 4.0);
        for (w, c) in waltz.iter().zip(&common) {
            assert!((w.total_ms - c.total_ms * 0.75).abs() < 1e-9);
            assert_eq!(w.pre_delay_ms, c.pre_delay_ms);
        }
    }

    #[test]
    fn decay_is_exact_difference() {
        for bpm in [1.0, 72.0, 128.0, 999.0] {
            for bar in [0.0625, 1.0, 2.0, 3.5, 4.0, 64.0] {
                for row in reverb_rows(bpm, bar) {
                    assert_eq!(row.decay_ms, row.total_ms - row.pre_delay_ms);
                }
            }
        }
    }

    #[test]
    fn tiny_bars_are_floored_to_one_beat() {
        assert_eq!(signature_scale(0.0625), 0.25);
        assert_eq!(signature_scale(f64::NAN), 0.25);
        assert!(reverb_rows(999.0, 0.0625)
            .iter()
            .all(|row| !row.has_negative_decay()));
    }

    #[test]
    fn negative_decay_is_kept_unclamped() {
        let odd = [ReverbPreset {
            name: "Inverted",
            total_label: "1/16 Note",
            total_beats: 0.25,
            pre_delay_label: "1/2",
            pre_delay_beat_value: 0.5,
        }];
        let rows = reverb_rows_for(&odd, 120.0, 4.0);
        let row = &rows[0];
        assert_eq!(row.total_ms, 125.0);
        assert_eq!(row.pre_delay_ms, 250.0);
        assert_eq!(row.decay_ms, -125.0);
        assert!(row.has_negative_decay());
        assert_eq!(row.clamped_decay_ms(), 0.0);
    }
}
