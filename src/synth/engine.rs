use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    error::{Result, SynthError},
    synth::{
        control::OscillatorControl,
        message::ParamMessage,
        oscillator::{OscillatorSnapshot, PmOscillator},
        params::PmParams,
    },
};

/*
Splitting Control From Audio
============================

The control loop (hand tracking, UI) and the audio callback run on different
threads at very different rates:

    control   ~60 updates/s     may allocate, log, sleep
    audio     ~344 blocks/s     (128 samples at 44.1kHz) must never block

Sharing the oscillator behind a Mutex would let the control thread stall the
callback. Sharing bare fields would let the callback read a carrier frequency
from one update and its increment from another.

Instead the oscillator lives on the audio thread alone. The control side holds
a `PmHandle`, a producer end of a wait-free SPSC ring buffer, and every setter
becomes a small Copy message:

    control thread                         audio thread
    ──────────────                         ────────────
    handle.lerp_carrier_frequency_to()
      validate ──► push ──► [ring] ──► render_block():
                                         drain all messages
                                         fill_samples()

Messages are applied between blocks, never mid-block, so a block is always
generated from one consistent parameter set. Validation happens before the
push, so nothing the audio thread pops can be rejected.

If the ring is full the setter returns QueueFull instead of waiting. For a
control stream that sends a fresh target every frame, dropping one is harmless.
*/

/// Split an oscillator into a control handle and an audio-side engine.
pub fn pm_channel(oscillator: PmOscillator, capacity: usize) -> (PmHandle, PmEngine) {
    let (tx, rx) = RingBuffer::new(capacity.max(1));
    (PmHandle { tx }, PmEngine { oscillator, rx })
}

/// Control-thread end. Implements `OscillatorControl` by queueing messages.
pub struct PmHandle {
    tx: Producer<ParamMessage>,
}

impl PmHandle {
    /// Validate and enqueue. Never blocks.
    pub fn send(&mut self, msg: ParamMessage) -> Result<()> {
        msg.validate()?;
        self.tx.push(msg).map_err(|_| SynthError::QueueFull)
    }

    /// Free slots left in the queue.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }

    /// Whether the audio side has been dropped.
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_abandoned()
    }
}

impl OscillatorControl for PmHandle {
    fn reserve(&self, messages: usize) -> Result<()> {
        if self.tx.slots() < messages {
            return Err(SynthError::QueueFull);
        }
        Ok(())
    }

    fn configure(&mut self, params: PmParams) -> Result<()> {
        self.send(ParamMessage::Configure(params))
    }

    fn lerp_carrier_frequency_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        self.send(ParamMessage::LerpCarrierFrequency { target, fraction })
    }

    fn lerp_modulation_frequency_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        self.send(ParamMessage::LerpModulationFrequency { target, fraction })
    }

    fn lerp_modulation_ratio_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        self.send(ParamMessage::LerpModulationRatio { target, fraction })
    }

    fn lerp_modulation_index_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        self.send(ParamMessage::LerpModulationIndex { target, fraction })
    }

    fn lerp_amplitude_to(&mut self, target: f32, fraction: f32) -> Result<()> {
        self.send(ParamMessage::LerpAmplitude { target, fraction })
    }

    fn track_modulator(&mut self, fraction: f32) -> Result<()> {
        self.send(ParamMessage::TrackModulator { fraction })
    }
}

/// Audio-thread end. Owns the oscillator outright.
pub struct PmEngine {
    oscillator: PmOscillator,
    rx: Consumer<ParamMessage>,
}

impl PmEngine {
    /// Apply pending parameter changes, then fill `out`. Returns `out.len()`.
    pub fn render_block(&mut self, out: &mut [f32]) -> usize {
        self.oscillator.drain(&mut self.rx);
        self.oscillator.fill_samples(out)
    }

    pub fn snapshot(&self) -> OscillatorSnapshot {
        self.oscillator.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(capacity: usize) -> (PmHandle, PmEngine) {
        let osc = PmOscillator::new(44_100.0, PmParams::default()).unwrap();
        pm_channel(osc, capacity)
    }

    #[test]
    fn changes_land_on_next_block() {
        let (mut handle, mut engine) = channel(16);
        handle.lerp_carrier_frequency_to(880.0, 1.0).unwrap();
        handle.track_modulator(1.0).unwrap();

        // not applied yet
        assert_eq!(engine.snapshot().carrier_frequency, 440.0);

        let mut buffer = [0.0f32; 64];
        assert_eq!(engine.render_block(&mut buffer), 64);
        let snap = engine.snapshot();
        assert_eq!(snap.carrier_frequency, 880.0);
        assert_eq!(snap.modulation_frequency, 440.0);
    }

    #[test]
    fn full_queue_reports_error() {
        let (mut handle, _engine) = channel(2);
        handle.lerp_amplitude_to(0.1, 0.5).unwrap();
        handle.lerp_amplitude_to(0.1, 0.5).unwrap();
        assert_eq!(
            handle.lerp_amplitude_to(0.1, 0.5),
            Err(SynthError::QueueFull)
        );
        assert_eq!(handle.slots(), 0);
    }

    #[test]
    fn invalid_values_never_reach_the_queue() {
        let (mut handle, _engine) = channel(4);
        assert!(handle.lerp_carrier_frequency_to(f32::NAN, 0.5).is_err());
        assert!(handle.lerp_modulation_index_to(1.0, 3.0).is_err());
        assert!(handle
            .configure(PmParams::new(0.0, 1.0, 1.0, 0.1))
            .is_err());
        assert_eq!(handle.slots(), 4);
    }

    #[test]
    fn reserve_checks_free_slots() {
        let (mut handle, _engine) = channel(3);
        assert!(handle.reserve(3).is_ok());
        handle.track_modulator(0.5).unwrap();
        handle.track_modulator(0.5).unwrap();
        assert!(handle.reserve(1).is_ok());
        assert_eq!(handle.reserve(2), Err(SynthError::QueueFull));
    }

    #[test]
    fn abandoned_when_engine_dropped() {
        let (handle, engine) = channel(4);
        assert!(!handle.is_abandoned());
        drop(engine);
        assert!(handle.is_abandoned());
    }
}
