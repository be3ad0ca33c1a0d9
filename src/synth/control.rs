use crate::{error::Result, synth::params::PmParams};

/// The mutation surface of a phase-modulation oscillator.
///
/// Implemented by the oscillator itself (single-threaded use, tests) and by
/// `PmHandle`, which forwards every call to the audio thread through a
/// lock-free queue. The mapper only ever talks to this trait.
pub trait OscillatorControl {
    /// Fail with `QueueFull` unless the next `messages` calls are certain to
    /// be accepted. Lets a caller send a group of changes all or nothing.
    ///
    /// Direct implementations never run out of room.
    fn reserve(&self, _messages: usize) -> Result<()> {
        Ok(())
    }

    /// Replace every parameter at once and recompute both phase increments.
    fn configure(&mut self, params: PmParams) -> Result<()>;

    /// `carrier += (target - carrier) * fraction`, then recompute the carrier
    /// increment.
    fn lerp_carrier_frequency_to(&mut self, target: f32, fraction: f32) -> Result<()>;

    /// Lerp the modulator frequency directly, recomputing its increment.
    fn lerp_modulation_frequency_to(&mut self, target: f32, fraction: f32) -> Result<()>;

    fn lerp_modulation_ratio_to(&mut self, target: f32, fraction: f32) -> Result<()>;

    fn lerp_modulation_index_to(&mut self, target: f32, fraction: f32) -> Result<()>;

    fn lerp_amplitude_to(&mut self, target: f32, fraction: f32) -> Result<()>;

    /// Lerp the modulator frequency toward `carrier * ratio`, using whatever
    /// the live carrier and ratio are when the request is applied.
    fn track_modulator(&mut self, fraction: f32) -> Result<()>;
}

impl<C: OscillatorControl + ?Sized> OscillatorControl for &mut C {
    fn reserve(&self, messages: usize) -> Result<()> {
        (**self).reserve(messages)
    }

    fn configure(&mut self, params: PmParams) -> Result<()> {
        (**self).configure(params)
    }

    fn lerp_carrier_frequency_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        (**self).lerp_carrier_frequency_to(target, fraction)
    }

    fn lerp_modulation_frequency_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        (**self).lerp_modulation_frequency_to(target, fraction)
    }

    fn lerp_modulation_ratio_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        (**self).lerp_modulation_ratio_to(target, fraction)
    }

    fn lerp_modulation_index_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        (**self).lerp_modulation_index_to(target, fraction)
    }

    fn lerp_amplitude_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        (**self).lerp_amplitude_to(target, fraction)
    }

    fn track_modulator(&mut self, fraction: f32) -> Result<()> {
        (**self).track_modulator(fraction)
    }
}
