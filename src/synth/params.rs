#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthError};

/// The full set of tunable oscillator parameters.
///
/// Applied as one unit by `configure`, so the audio thread either sees all of
/// these or none of them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PmParams {
    /// Carrier frequency in Hz.
    pub carrier_frequency: f32,
    /// Modulator frequency as a fraction of the carrier frequency.
    pub modulation_ratio: f32,
    /// Peak phase deviation in radians.
    pub modulation_index: f32,
    /// Output gain. Not clamped.
    pub amplitude: f32,
}

impl PmParams {
    pub fn new(
        carrier_frequency: f32,
        modulation_ratio: f32,
        modulation_index: f32,
        amplitude: f32,
    ) -> Self {
        Self {
            carrier_frequency,
            modulation_ratio,
            modulation_index,
            amplitude,
        }
    }

    /// Modulator frequency implied by the carrier and ratio.
    pub fn modulation_frequency(&self) -> f32 {
        self.carrier_frequency * self.modulation_ratio
    }

    /// Reject anything that would put a NaN, infinity or zero-frequency
    /// increment into the audio thread.
    pub fn validate(&self) -> Result<()> {
        validate_carrier_frequency(self.carrier_frequency)?;
        validate_non_negative("modulation_ratio", self.modulation_ratio)?;
        validate_non_negative("modulation_index", self.modulation_index)?;
        validate_non_negative("amplitude", self.amplitude)?;
        Ok(())
    }
}

impl Default for PmParams {
    /// A4 drone: 440 Hz carrier, modulator an octave below, gentle index.
    fn default() -> Self {
        Self::new(440.0, 0.5, 0.5, 0.2)
    }
}

pub(crate) fn validate_carrier_frequency(frequency: f32) -> Result<()> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(SynthError::invalid("carrier_frequency", frequency));
    }
    Ok(())
}

pub(crate) fn validate_non_negative(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SynthError::invalid(name, value));
    }
    Ok(())
}

pub(crate) fn validate_finite(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(SynthError::invalid(name, value));
    }
    Ok(())
}

pub(crate) fn validate_fraction(fraction: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(SynthError::invalid("fraction", fraction));
    }
    Ok(())
}
