use temposync_core::reverb::signature_scale;
use temposync_core::{
    format_ms, ms_from_bpm, parse_time_signature, reverb_rows, SIGNATURE_PRESETS,
};

#[test]
fn hall_at_128_in_common_time_is_unscaled() {
    let four_four = SIGNATURE_PRESETS.iter().find(|p| p.id == "4/4").unwrap();
    assert_eq!(signature_scale(four_four.beats_per_bar), 1.0);

    let rows = reverb_rows(128.0, four_four.beats_per_bar);
    assert_eq!(rows[0].name, "Hall");
    assert_eq!(rows[0].total_ms, ms_from_bpm(128.0, 8.0));
    assert_eq!(rows[0].total_ms, 3750.0);
}

#[test]
fn decay_is_exact_for_every_signature() {
    let mut bars: Vec<f64> = SIGNATURE_PRESETS.iter().map(|p| p.beats_per_bar).collect();
    for numerator in 1..=64 {
        for denominator in [1, 2, 4, 8, 16, 32, 64] {
            let text = format!("{numerator}/{denominator}");
            bars.push(parse_time_signature(&text).unwrap().beats_per_bar());
        }
    }

    for bpm in [1.0, 60.0, 120.0, 174.0, 999.0] {
        for &bar in &bars {
            for row in reverb_rows(bpm, bar) {
                assert_eq!(row.decay_ms, row.total_ms - row.pre_delay_ms);
                assert!(!row.has_negative_decay(), "{} at {bar}", row.name);
            }
        }
    }
}

#[test]
fn seven_eight_shortens_bar_relative_totals() {
    let seven_eight = parse_time_signature("7/8").unwrap();
    assert_eq!(seven_eight.beats_per_bar(), 3.5);

    let rows = reverb_rows(120.0, seven_eight.beats_per_bar());
    let totals: Vec<_> = rows.iter().map(|row| row.total_ms).collect();
    assert_eq!(totals, [3500.0, 1750.0, 875.0, 437.5]);
    let pre_delays: Vec<_> = rows.iter().map(|row| row.pre_delay_ms).collect();
    assert_eq!(pre_delays, [62.5, 31.25, 15.625, 7.8125]);
}

#[test]
fn default_tempo_displays_small_room_pre_delay_rounded_up() {
    let rows = reverb_rows(120.0, 4.0);
    let displayed: Vec<_> = rows.iter().map(|row| format_ms(row.pre_delay_ms)).collect();
    assert_eq!(displayed, ["62.50 ms", "31.25 ms", "15.63 ms", "7.81 ms"]);
}
