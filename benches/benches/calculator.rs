use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use temposync_core::{delay_rows, parse_time_signature, reverb_rows, TapTempo};

fn rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("rows");

    group.bench_function("delay_rows_sweep", |b| {
        b.iter(|| {
            for bpm in (1..=999).step_by(37) {
                black_box(delay_rows(black_box(bpm as f64)));
            }
        });
    });

    group.bench_function("reverb_rows_custom_signature", |b| {
        b.iter(|| {
            let signature = parse_time_signature(black_box("7/8")).expect("signature");
            black_box(reverb_rows(black_box(128.0), signature.beats_per_bar()));
        });
    });

    group.finish();
}

fn tapping(c: &mut Criterion) {
    c.bench_function("tap_session_32_taps", |b| {
        b.iter(|| {
            let mut tapper = TapTempo::new();
            let mut estimate = None;
            for tap in 0..32 {
                estimate = tapper.tap(black_box(tap as f64 * 468.75));
            }
            black_box(estimate)
        });
    });
}

criterion_group!(benches, rows, tapping);
criterion_main!(benches);
