//! Pmsynth - audio setup, control wiring and the main loop

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use rtrb::RingBuffer;
use std::{fs::File, io::stdout, sync::Mutex, time::Duration};

use pmsynth::{
    io::wait_for_connection,
    mapping::ParameterMapper,
    synth::{pm_channel, OscillatorSnapshot, PmOscillator},
    EngineConfig, MapperConfig, MAX_BLOCK_SIZE,
};

use super::pointer::PointerSource;
use super::ui::{UiApp, VIS_BUFFER_SIZE};

/// Send log output to a file; the terminal belongs to the UI.
pub fn init_logging() -> EyreResult<()> {
    let path = std::env::temp_dir().join("pmsynth.log");
    let file =
        File::create(&path).wrap_err_with(|| format!("failed to create {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Main application builder
pub struct Pmsynth {
    engine: EngineConfig,
    mapper: MapperConfig,
    connect_timeout: Duration,
}

impl Pmsynth {
    pub fn new() -> Self {
        Self {
            engine: EngineConfig::default(),
            mapper: MapperConfig::default(),
            connect_timeout: Duration::from_secs(5),
        }
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        // Set up audio
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let engine_config = self.engine.with_sample_rate(sample_rate);
        tracing::info!(
            sample_rate,
            channels,
            device = %device.name().unwrap_or_default(),
            "opening audio output"
        );

        let oscillator =
            PmOscillator::from_config(&engine_config).wrap_err("invalid engine configuration")?;
        let (handle, mut engine) = pm_channel(oscillator, engine_config.queue_capacity);

        // Telemetry back to the UI. Pushes from the callback never block; when
        // the UI falls behind samples are simply dropped.
        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(VIS_BUFFER_SIZE * 8);
        let (mut snapshot_tx, snapshot_rx) = RingBuffer::<OscillatorSnapshot>::new(64);

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames_to_render];
                        engine.render_block(block);

                        // Copy to output (mono to all channels)
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            let start = out_off + i * channels;
                            data[start..start + channels].fill(s);
                            let _ = scope_tx.push(s);
                        }

                        frames_written += frames_to_render;
                    }

                    let _ = snapshot_tx.push(engine.snapshot());
                },
                |err| tracing::error!("audio stream error: {err}"),
                None,
            )
            .wrap_err("failed to build f32 output stream")?;

        stream.play().wrap_err("failed to start audio stream")?;

        // Control side
        let pointer = PointerSource::from_terminal()?;
        wait_for_connection(&pointer, self.connect_timeout, Duration::from_millis(10))
            .wrap_err("control device unavailable")?;

        let mapper = ParameterMapper::new(handle, &self.mapper)
            .wrap_err("invalid mapper configuration")?;
        let initial = engine_config.initial;
        tracing::info!(?initial, "control loop starting");

        let mut terminal = ratatui::init();
        execute!(stdout(), EnableMouseCapture)?;

        let result =
            UiApp::new(scope_rx, snapshot_rx, mapper, pointer, sample_rate).run(&mut terminal);

        execute!(stdout(), DisableMouseCapture)?;
        ratatui::restore();
        drop(stream);

        tracing::info!("shut down");
        result
    }
}

impl Default for Pmsynth {
    fn default() -> Self {
        Self::new()
    }
}
