#![no_main]

use libfuzzer_sys::fuzz_target;
use temposync_core::{delay_rows, normalize_bpm, parse_bpm_input, MAX_BPM, MIN_BPM};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(bpm) = parse_bpm_input(text) {
        assert!((MIN_BPM..=MAX_BPM).contains(&bpm));
        assert_eq!(normalize_bpm(bpm), bpm);
        for row in delay_rows(bpm) {
            assert!(row.notes_ms.is_finite() && row.notes_ms > 0.0);
        }
    }
});
