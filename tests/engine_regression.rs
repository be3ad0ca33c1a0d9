use std::thread;

use pmsynth::{
    io::{ControlFrame, ControlSource, Hand, SweepSource},
    mapping::ParameterMapper,
    synth::{pm_channel, OscillatorControl, PmOscillator, PmParams},
    EngineConfig, MapperConfig,
};

const SR: f32 = 44_100.0;

fn render_one_second(params: PmParams) -> Vec<f32> {
    let mut osc = PmOscillator::new(SR, params).unwrap();
    let mut buffer = vec![0.0f32; SR as usize];
    assert_eq!(osc.fill_samples(&mut buffer), buffer.len());
    buffer
}

/// Lag in `range` with the highest normalised autocorrelation.
fn best_lag(signal: &[f32], range: std::ops::RangeInclusive<usize>) -> usize {
    let window = &signal[..signal.len() - *range.end()];
    let energy: f64 = window.iter().map(|&s| (s as f64) * (s as f64)).sum();

    range
        .map(|lag| {
            let corr: f64 = window
                .iter()
                .zip(&signal[lag..])
                .map(|(&a, &b)| a as f64 * b as f64)
                .sum();
            (lag, corr / energy)
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(lag, _)| lag)
        .unwrap()
}

#[test]
fn renders_within_amplitude() {
    let samples = render_one_second(PmParams::new(440.0, 0.5, 0.5, 0.2));
    let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    assert!(peak <= 0.2 + 1e-6, "peak {peak}");
    assert!(peak > 0.15, "suspiciously quiet: {peak}");
}

#[test]
fn carrier_period_at_unit_ratio() {
    // ratio 1: the waveform repeats once per carrier cycle, 44100/440 samples
    let samples = render_one_second(PmParams::new(440.0, 1.0, 0.5, 0.2));
    let lag = best_lag(&samples, 80..=130);
    let expected = SR / 440.0;
    assert!(
        (lag as f32 - expected).abs() <= 1.0,
        "lag {lag}, expected {expected}"
    );
}

#[test]
fn half_ratio_repeats_every_two_carrier_cycles() {
    // 440 Hz carrier, 220 Hz modulator: one full pattern per modulator cycle
    let samples = render_one_second(PmParams::new(440.0, 0.5, 0.5, 0.2));
    let lag = best_lag(&samples, 150..=250);
    let expected = 2.0 * SR / 440.0;
    assert!(
        (lag as f32 - expected).abs() <= 1.0,
        "lag {lag}, expected {expected}"
    );
}

#[test]
fn no_discontinuity_while_gliding() {
    let config = EngineConfig::default();
    let osc = PmOscillator::from_config(&config).unwrap();
    let (handle, mut engine) = pm_channel(osc, config.queue_capacity);
    let mut mapper = ParameterMapper::new(handle, &MapperConfig::default()).unwrap();

    // jump the hand from the lowest to the highest note and render between
    // control updates, as the audio callback would
    let frame = ControlFrame::empty().with_hand(Hand::right(0.0, 399.0));
    let mut block = [0.0f32; 256];
    let mut previous = None;
    for _ in 0..120 {
        mapper.on_control_update(&frame).unwrap();
        engine.render_block(&mut block);
        for &s in &block {
            if let Some(p) = previous {
                let step: f32 = s - p;
                // top note is under 2 kHz; the steepest PM slope at this
                // index stays well below half of full scale per sample
                assert!(step.abs() < 0.2, "jump of {step}");
            }
            previous = Some(s);
        }
    }

    let snap = engine.snapshot();
    let top = *mapper.pitches().targets().last().unwrap();
    assert!((snap.carrier_frequency - top).abs() < 1.0);
    assert_eq!(snap.degeneracies, 0);
}

#[test]
fn control_thread_feeds_audio_thread() {
    let osc = PmOscillator::new(SR, PmParams::default()).unwrap();
    let (handle, mut engine) = pm_channel(osc, 4096);

    let control = thread::spawn(move || {
        let mut mapper =
            ParameterMapper::new(handle, &MapperConfig::default().with_interpolation_speed(0.5))
                .unwrap();
        let mut source = SweepSource::new(60);
        for _ in 0..300 {
            let frame = source.poll_frame();
            mapper.on_control_update(&frame).unwrap();
        }
        // park on the top note
        let frame = ControlFrame::empty().with_hand(Hand::right(0.0, 450.0));
        for _ in 0..60 {
            mapper.on_control_update(&frame).unwrap();
        }
        mapper.into_control()
    });

    let handle = control.join().unwrap();

    let mut block = [0.0f32; 128];
    engine.render_block(&mut block);
    assert!(block.iter().all(|s| s.is_finite() && s.abs() <= 0.2 + 1e-6));

    let snap = engine.snapshot();
    assert!(snap.carrier_frequency > 1_900.0, "{snap:?}");
    assert!(
        (snap.modulation_frequency - snap.carrier_frequency * snap.modulation_ratio).abs() < 1.0
    );
    drop(engine);
    assert!(handle.is_abandoned());
}

#[test]
fn configure_through_handle_is_atomic() {
    let osc = PmOscillator::new(SR, PmParams::default()).unwrap();
    let (mut handle, mut engine) = pm_channel(osc, 8);

    let params = PmParams::new(261.63, 2.0, 3.0, 0.1);
    handle.configure(params).unwrap();

    let mut block = [0.0f32; 64];
    engine.render_block(&mut block);
    let snap = engine.snapshot();
    assert_eq!(snap.carrier_frequency, 261.63);
    assert_eq!(snap.modulation_ratio, 2.0);
    assert_eq!(snap.modulation_index, 3.0);
    assert_eq!(snap.amplitude, 0.1);
    assert_eq!(snap.modulation_frequency, params.modulation_frequency());
    assert!(block.iter().all(|s| s.abs() <= 0.1 + 1e-6));
}
