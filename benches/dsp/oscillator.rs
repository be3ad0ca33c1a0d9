//! Benchmarks for phase-modulation sample generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pmsynth::synth::{PmOscillator, PmParams};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Plain sine: index 0 still pays for the cos() of the modulator
        let mut osc = PmOscillator::new(44_100.0, PmParams::new(440.0, 1.0, 0.0, 0.2)).unwrap();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                osc.fill_samples(black_box(&mut buffer));
            })
        });

        // Default drone
        let mut osc = PmOscillator::new(44_100.0, PmParams::default()).unwrap();
        group.bench_with_input(BenchmarkId::new("drone", size), &size, |b, _| {
            b.iter(|| {
                osc.fill_samples(black_box(&mut buffer));
            })
        });

        // Bright: large index, inharmonic ratio
        let mut osc = PmOscillator::new(44_100.0, PmParams::new(1975.5, 1.41, 5.0, 0.2)).unwrap();
        group.bench_with_input(BenchmarkId::new("bright", size), &size, |b, _| {
            b.iter(|| {
                osc.fill_samples(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
