#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::{
    error::Result,
    synth::params::{
        validate_carrier_frequency, validate_finite, validate_fraction, validate_non_negative,
        PmParams,
    },
};

/// A parameter change travelling from the control thread to the audio thread.
///
/// Each message is applied whole between two sample blocks, so a `Configure`
/// can never be observed half-written.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamMessage {
    Configure(PmParams),
    LerpCarrierFrequency { target: f32, fraction: f32 },
    LerpModulationFrequency { target: f32, fraction: f32 },
    LerpModulationRatio { target: f32, fraction: f32 },
    LerpModulationIndex { target: f32, fraction: f32 },
    LerpAmplitude { target: f32, fraction: f32 },
    TrackModulator { fraction: f32 },
}

impl ParamMessage {
    /// Check the message on the sending side, before it can reach the audio
    /// thread.
    pub fn validate(&self) -> Result<()> {
        match *self {
            ParamMessage::Configure(params) => params.validate(),
            ParamMessage::LerpCarrierFrequency { target, fraction } => {
                validate_carrier_frequency(target)?;
                validate_fraction(fraction)
            }
            ParamMessage::LerpModulationFrequency { target, fraction } => {
                validate_finite("modulation_frequency", target)?;
                validate_fraction(fraction)
            }
            ParamMessage::LerpModulationRatio { target, fraction } => {
                validate_non_negative("modulation_ratio", target)?;
                validate_fraction(fraction)
            }
            ParamMessage::LerpModulationIndex { target, fraction } => {
                validate_non_negative("modulation_index", target)?;
                validate_fraction(fraction)
            }
            ParamMessage::LerpAmplitude { target, fraction } => {
                validate_non_negative("amplitude", target)?;
                validate_fraction(fraction)
            }
            ParamMessage::TrackModulator { fraction } => validate_fraction(fraction),
        }
    }
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ParamMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ParamMessage> {
    fn pop(&mut self) -> Option<ParamMessage> {
        Consumer::pop(self).ok()
    }
}
