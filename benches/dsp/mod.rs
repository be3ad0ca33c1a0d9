//! Benchmarks for audio-thread rendering.

mod engine;
mod oscillator;

pub use engine::bench_engine;
pub use oscillator::bench_oscillator;
