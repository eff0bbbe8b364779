#![no_main]

use libfuzzer_sys::fuzz_target;
use temposync_core::{parse_time_signature, reverb_rows};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(signature) = parse_time_signature(text) {
        assert!((1..=64).contains(&signature.numerator()));
        assert!((1..=64).contains(&signature.denominator()));
        assert!(signature.beats_per_bar() > 0.0);
        for row in reverb_rows(120.0, signature.beats_per_bar()) {
            assert_eq!(row.decay_ms, row.total_ms - row.pre_delay_ms);
        }
    }
});
