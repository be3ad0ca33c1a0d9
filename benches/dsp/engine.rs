//! Benchmarks for the audio-side engine: drain the queue, then render.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pmsynth::synth::{pm_channel, OscillatorControl, PmOscillator, PmParams};

use crate::BLOCK_SIZES;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/engine");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Empty queue: the common case between control updates
        let osc = PmOscillator::new(44_100.0, PmParams::default()).unwrap();
        let (_handle, mut engine) = pm_channel(osc, 64);
        group.bench_with_input(BenchmarkId::new("idle_queue", size), &size, |b, _| {
            b.iter(|| {
                engine.render_block(black_box(&mut buffer));
            })
        });

        // One control update's worth of messages before every block
        let osc = PmOscillator::new(44_100.0, PmParams::default()).unwrap();
        let (mut handle, mut engine) = pm_channel(osc, 64);
        group.bench_with_input(BenchmarkId::new("with_update", size), &size, |b, _| {
            b.iter(|| {
                let _ = handle.lerp_carrier_frequency_to(black_box(880.0), 0.1);
                let _ = handle.track_modulator(0.1);
                let _ = handle.lerp_modulation_index_to(black_box(2.75), 0.1);
                engine.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
