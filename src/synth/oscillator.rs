use crate::{
    dsp::{lerp::lerp, phase::PhaseAccumulator, pm::pm_sample},
    error::{Result, SynthError},
    synth::{
        control::OscillatorControl,
        message::{MessageReceiver, ParamMessage},
        params::PmParams,
    },
    EngineConfig,
};

/*
The PM Oscillator
=================

One carrier, one modulator, five live parameters:

    carrier_frequency     Hz, sets the pitch
    modulation_frequency  Hz, normally carrier × ratio
    modulation_ratio      target relationship between the two
    modulation_index      radians of phase deviation
    amplitude             output gain

The modulator frequency is stored separately from the ratio on purpose. The
control side glides the carrier toward a new note and then asks the modulator
to follow (`track_modulator`), so during a glide the two drift apart slightly
and converge again. That lag is part of the sound.

A ratio change is different: the ratio only exists to define the modulator, so
a ratio lerp sets the modulator to carrier × ratio right away.


Increments
----------

Both increments are recomputed the moment their frequency (or, for the
modulator, the ratio) changes:

    carrier_increment    = 2π × carrier_frequency    / sample_rate
    modulation_increment = 2π × modulation_frequency / sample_rate

so the very next sample already runs at the new rate. Nothing else mutates
the increments.


Degeneracy Guard
----------------

Control values are validated before they get here, but a long chain of lerps
toward extreme targets can still overflow. Rather than let a NaN reach the
DAC (silent at best, a full-scale burst at worst) the oscillator:

  - refuses a lerp whose result is not finite (the value holds, and a direct
    caller gets NumericDegeneracy back)
  - resets a phase that went non-finite to 0
  - writes 0.0 for a sample that came out non-finite

Each of these bumps a counter the control side can read. Nothing is logged
from here; this code runs inside the audio callback.
*/

/// Live values of the oscillator, copied out for display and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OscillatorSnapshot {
    pub carrier_frequency: f32,
    pub modulation_frequency: f32,
    pub modulation_ratio: f32,
    pub modulation_index: f32,
    pub amplitude: f32,
    pub carrier_phase: f64,
    pub modulation_phase: f64,
    pub degeneracies: u64,
}

/// A two-operator phase-modulation oscillator.
///
/// Owns all phase and parameter state. Call `fill_samples` from the audio
/// callback; mutate either directly (single thread) or through a `PmHandle`.
#[derive(Debug, Clone)]
pub struct PmOscillator {
    sample_rate: f64,

    carrier: PhaseAccumulator,
    modulator: PhaseAccumulator,

    carrier_frequency: f32,
    modulation_frequency: f32,
    modulation_ratio: f32,
    modulation_index: f32,
    amplitude: f32,

    degeneracies: u64,
}

impl PmOscillator {
    pub fn new(sample_rate: f32, params: PmParams) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SynthError::invalid("sample_rate", sample_rate));
        }
        params.validate()?;

        let mut osc = Self {
            sample_rate: sample_rate as f64,
            carrier: PhaseAccumulator::new(),
            modulator: PhaseAccumulator::new(),
            carrier_frequency: 0.0,
            modulation_frequency: 0.0,
            modulation_ratio: 0.0,
            modulation_index: 0.0,
            amplitude: 0.0,
            degeneracies: 0,
        };
        osc.apply_configure(params);
        Ok(osc)
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Self::new(config.sample_rate, config.initial)
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate as f32
    }

    pub fn carrier_frequency(&self) -> f32 {
        self.carrier_frequency
    }

    pub fn modulation_frequency(&self) -> f32 {
        self.modulation_frequency
    }

    pub fn modulation_ratio(&self) -> f32 {
        self.modulation_ratio
    }

    pub fn modulation_index(&self) -> f32 {
        self.modulation_index
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn carrier_phase(&self) -> f64 {
        self.carrier.phase()
    }

    pub fn modulation_phase(&self) -> f64 {
        self.modulator.phase()
    }

    pub fn carrier_increment(&self) -> f64 {
        self.carrier.increment()
    }

    pub fn modulation_increment(&self) -> f64 {
        self.modulator.increment()
    }

    /// How many times the degeneracy guard has fired.
    pub fn degeneracy_count(&self) -> u64 {
        self.degeneracies
    }

    pub fn snapshot(&self) -> OscillatorSnapshot {
        OscillatorSnapshot {
            carrier_frequency: self.carrier_frequency,
            modulation_frequency: self.modulation_frequency,
            modulation_ratio: self.modulation_ratio,
            modulation_index: self.modulation_index,
            amplitude: self.amplitude,
            carrier_phase: self.carrier.phase(),
            modulation_phase: self.modulator.phase(),
            degeneracies: self.degeneracies,
        }
    }

    /// Fill `out` with phase-modulated samples. Returns the number written,
    /// which is always `out.len()`.
    ///
    /// Realtime-safe: no allocation, no locks, no I/O.
    pub fn fill_samples(&mut self, out: &mut [f32]) -> usize {
        let index = self.modulation_index as f64;
        let amplitude = self.amplitude as f64;

        for sample in out.iter_mut() {
            let mut value =
                pm_sample(self.carrier.phase(), self.modulator.phase(), index, amplitude);
            if !value.is_finite() {
                value = 0.0;
                self.degeneracies += 1;
            }
            *sample = value;

            self.carrier.advance();
            self.modulator.advance();

            if !self.carrier.phase().is_finite() {
                self.carrier.reset();
                self.degeneracies += 1;
            }
            if !self.modulator.phase().is_finite() {
                self.modulator.reset();
                self.degeneracies += 1;
            }
        }

        out.len()
    }

    /// Apply every pending message from `rx`. Returns how many were applied.
    pub fn drain<R: MessageReceiver>(&mut self, rx: &mut R) -> usize {
        let mut applied = 0;
        while let Some(msg) = rx.pop() {
            // refusals are already counted by the guard
            let _ = self.apply(msg);
            applied += 1;
        }
        applied
    }

    /// Apply one already-validated message.
    ///
    /// Fails with `NumericDegeneracy` when the guard refuses the result; the
    /// live value is left as it was.
    pub fn apply(&mut self, msg: ParamMessage) -> Result<()> {
        match msg {
            ParamMessage::Configure(params) => self.apply_configure(params),
            ParamMessage::LerpCarrierFrequency { target, fraction } => {
                self.carrier_frequency = self.guarded_lerp(
                    "carrier_frequency",
                    self.carrier_frequency,
                    target,
                    fraction,
                )?;
                self.update_carrier_increment();
            }
            ParamMessage::LerpModulationFrequency { target, fraction } => {
                self.modulation_frequency = self.guarded_lerp(
                    "modulation_frequency",
                    self.modulation_frequency,
                    target,
                    fraction,
                )?;
                self.update_modulation_increment();
            }
            ParamMessage::LerpModulationRatio { target, fraction } => {
                let current = self.modulation_ratio;
                let ratio = self.guarded_lerp("modulation_ratio", current, target, fraction)?;
                if ratio != self.modulation_ratio {
                    self.modulation_ratio = ratio;
                    // the modulator follows the new ratio on the very next sample
                    let target = self.carrier_frequency * ratio;
                    self.modulation_frequency = self.guarded_lerp(
                        "modulation_frequency",
                        self.modulation_frequency,
                        target,
                        1.0,
                    )?;
                    self.update_modulation_increment();
                }
            }
            ParamMessage::LerpModulationIndex { target, fraction } => {
                let current = self.modulation_index;
                self.modulation_index =
                    self.guarded_lerp("modulation_index", current, target, fraction)?;
            }
            ParamMessage::LerpAmplitude { target, fraction } => {
                self.amplitude = self.guarded_lerp("amplitude", self.amplitude, target, fraction)?;
            }
            ParamMessage::TrackModulator { fraction } => {
                let target = self.carrier_frequency * self.modulation_ratio;
                self.modulation_frequency = self.guarded_lerp(
                    "modulation_frequency",
                    self.modulation_frequency,
                    target,
                    fraction,
                )?;
                self.update_modulation_increment();
            }
        }
        Ok(())
    }

    fn apply_configure(&mut self, params: PmParams) {
        self.carrier_frequency = params.carrier_frequency;
        self.modulation_ratio = params.modulation_ratio;
        self.modulation_index = params.modulation_index;
        self.amplitude = params.amplitude;
        self.modulation_frequency = params.modulation_frequency();

        self.update_carrier_increment();
        self.update_modulation_increment();
    }

    fn guarded_lerp(
        &mut self,
        name: &'static str,
        current: f32,
        target: f32,
        fraction: f32,
    ) -> Result<f32> {
        let value = lerp(current, target, fraction);
        if value.is_finite() {
            Ok(value)
        } else {
            self.degeneracies += 1;
            Err(SynthError::NumericDegeneracy { name })
        }
    }

    #[inline]
    fn update_carrier_increment(&mut self) {
        self.carrier
            .set_frequency(self.carrier_frequency as f64, self.sample_rate);
    }

    #[inline]
    fn update_modulation_increment(&mut self) {
        self.modulator
            .set_frequency(self.modulation_frequency as f64, self.sample_rate);
    }

    fn submit(&mut self, msg: ParamMessage) -> Result<()> {
        msg.validate()?;
        self.apply(msg)
    }
}

impl OscillatorControl for PmOscillator {
    fn configure(&mut self, params: PmParams) -> Result<()> {
        self.submit(ParamMessage::Configure(params))
    }

    fn lerp_carrier_frequency_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        self.submit(ParamMessage::LerpCarrierFrequency { target, fraction })
    }

    fn lerp_modulation_frequency_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        self.submit(ParamMessage::LerpModulationFrequency { target, fraction })
    }

    fn lerp_modulation_ratio_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        self.submit(ParamMessage::LerpModulationRatio { target, fraction })
    }

    fn lerp_modulation_index_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        self.submit(ParamMessage::LerpModulationIndex { target, fraction })
    }

    fn lerp_amplitude_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        self.submit(ParamMessage::LerpAmplitude { target, fraction })
    }

    fn track_modulator(&mut self, fraction: f32) -> Result<()> {
        self.submit(ParamMessage::TrackModulator { fraction })
    }
}
