//! Display formatting. Formatted strings never feed back into computation.

use crate::convert::Tempo;
use crate::{Bpm, Hertz, Millis};

/// Rounds to `decimals` places with ties away from zero.
///
/// `format!("{:.2}")` alone rounds exact binary ties to even, so `15.625` would
/// print as `15.62`.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn format_ms(ms: Millis) -> String {
    format!("{:.2} ms", round_to(ms, 2))
}

pub fn format_hz(hz: Hertz) -> String {
    format!("{:.2} Hz", round_to(hz, 2))
}

/// BPM as written back into the tempo field, e.g. `"128.0"`.
pub fn format_bpm(bpm: Bpm) -> String {
    format!("{:.1}", round_to(bpm, 1))
}

/// Quarter-note length summary, e.g. `"1/4 = 500.00 ms"`.
pub fn formula_base(bpm: Bpm) -> String {
    format!("1/4 = {}", format_ms(Tempo::new(bpm).ms_per_beat()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_decimal_units() {
        assert_eq!(format_ms(500.0), "500.00 ms");
        assert_eq!(format_ms(1000.0 / 3.0), "333.33 ms");
        assert_eq!(format_hz(2.0), "2.00 Hz");
        assert_eq!(format_hz(0.0), "0.00 Hz");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(format_ms(15.625), "15.63 ms");
        assert_eq!(format_ms(0.125), "0.13 ms");
        assert_eq!(format_ms(0.375), "0.38 ms");
        assert_eq!(format_hz(2.125), "2.13 Hz");
        assert_eq!(format_bpm(127.25), "127.3");
    }

    #[test]
    fn small_room_pre_delay_at_default_tempo() {
        let rows = crate::reverb::reverb_rows(120.0, 4.0);
        let small_room = &rows[2];
        assert_eq!(small_room.pre_delay_ms, 15.625);
        assert_eq!(format_ms(small_room.pre_delay_ms), "15.63 ms");
    }

    #[test]
    fn bpm_and_formula() {
        assert_eq!(format_bpm(120.0), "120.0");
        assert_eq!(format_bpm(127.96), "128.0");
        assert_eq!(formula_base(120.0), "1/4 = 500.00 ms");
        assert_eq!(formula_base(128.0), "1/4 = 468.75 ms");
    }
}
