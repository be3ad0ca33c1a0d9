use std::f64::consts::TAU;

/*
Phase Accumulation
==================

An oscillator remembers where it is in its cycle as an angle, the phase, and
advances it by a fixed step every sample:

    increment = 2π × frequency / sample_rate
    phase     = phase + increment

At 440 Hz and 44.1 kHz the increment is 0.0627 radians, so one cycle takes
~100.2 samples. Changing the frequency only changes the step; the phase itself
carries on from wherever it was, so the waveform never jumps.

Why not compute sin(2π f n / sr) from the sample index? Because then a
frequency change mid-stream teleports the phase to a different point on the
cycle and the output clicks. Accumulating the phase is what lets the
frequency glide continuously.


Wraparound
----------

Left alone the phase grows forever and eventually loses precision: a phase of
10^7 radians in f32 has a resolution coarser than the increment itself. So we
fold it back into one turn after every step:

    if phase >= 2π  { phase -= 2π }
    if phase <  0   { phase += 2π }

One correction per sample is enough as long as |increment| < 2π, i.e. the
frequency is below the sample rate. Negative increments (a frequency lerped
below zero) run the cycle backwards and wrap from below.

If an increment ever exceeds a turn the single correction is not enough, so we
fall back to rem_euclid. That path costs a division but keeps the invariant
`0 <= phase < 2π` unconditional.


Precision
---------

Accumulators are f64. Single precision works for short notes, but a drone that
runs for hours accumulates rounding error in the increment that f64 pushes far
below audibility. Output samples are still f32.
*/

/// Per-sample phase step for `frequency` at `sample_rate`.
#[inline]
pub fn phase_increment(frequency: f64, sample_rate: f64) -> f64 {
    TAU * frequency / sample_rate
}

/// Fold `phase` into `[0, 2π)`.
///
/// Adds or subtracts one turn, then falls back to `rem_euclid` if the value is
/// still out of range. A non-finite phase is returned unchanged; callers own
/// the degeneracy policy.
#[inline]
pub fn wrap_phase(mut phase: f64) -> f64 {
    if phase >= TAU {
        phase -= TAU;
    } else if phase < 0.0 {
        phase += TAU;
    }

    if (0.0..TAU).contains(&phase) || !phase.is_finite() {
        return phase;
    }

    let wrapped = phase.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// A running phase in radians, advanced by a fixed increment per sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseAccumulator {
    phase: f64,
    increment: f64,
}

impl PhaseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase in radians, always in `[0, 2π)` when finite.
    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    #[inline]
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Recompute the step from a frequency.
    #[inline]
    pub fn set_frequency(&mut self, frequency: f64, sample_rate: f64) {
        self.increment = phase_increment(frequency, sample_rate);
    }

    /// Advance one sample and wrap.
    #[inline]
    pub fn advance(&mut self) {
        self.phase = wrap_phase(self.phase + self.increment);
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
