//! Low-level DSP primitives used by the phase-modulation oscillator.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! call from inside the audio callback. They stay focused on the signal math so
//! the `synth` layer can add parameter handling and thread plumbing on top.

/// Single-step linear interpolation toward a target.
pub mod lerp;
/// Phase accumulators with wraparound into one turn.
pub mod phase;
/// The phase-modulation waveform formula.
pub mod pm;

pub use phase::PhaseAccumulator;
