/*
Phase Modulation
================

Two sine oscillators, one audible. The modulator does not reach the output
directly; it nudges the carrier's phase back and forth:

    out = amplitude × sin(carrier_phase + index × cos(modulator_phase))

With index = 0 this is a plain sine at the carrier frequency. As the index
grows, energy spreads into sidebands at

    carrier ± k × modulator      (k = 1, 2, 3, ...)

so the tone gets brighter without any filter involved. This is the same
family as the "FM" in classic FM synths; they almost all implement it as
phase modulation because the pitch stays put when the index changes.


Vocabulary
----------

  carrier       The oscillator you hear. Its frequency sets the pitch.

  modulator     The oscillator that perturbs the carrier phase.

  ratio         modulator frequency / carrier frequency.
                Integer ratios (1, 2, 3) give harmonic, pitched tones.
                Non-integer ratios (1.41, 0.73) give clangorous, bell-like tones.

  index         How far (in radians) the modulator pushes the carrier phase.
                0 = pure sine, ~1 = warm, 5+ = buzzy and metallic.


Periodicity
-----------

The combined waveform repeats when both oscillators are back where they
started. For carrier 440 Hz, ratio 0.5 (modulator 220 Hz) that is every
1/220 s, two carrier cycles. For ratio 1 it repeats with the carrier.


Amplitude
---------

sin() is bounded by ±1 no matter what the argument is, so the output is bounded
by ±amplitude regardless of index. Amplitude is not clamped; 0.2 leaves
headroom below full scale.
*/

/// One phase-modulated sample.
///
/// Phases are in radians. Evaluated in f64 so the carrier phase plus a large
/// index keeps its precision; the result is narrowed for output.
#[inline]
pub fn pm_sample(carrier_phase: f64, modulator_phase: f64, index: f64, amplitude: f64) -> f32 {
    (amplitude * (carrier_phase + index * modulator_phase.cos()).sin()) as f32
}
