//! TUI module for pmsynth
//!
//! Runs the control loop: every frame it reads the pointer (or the autoplay
//! sweep), feeds the mapper, and redraws the scope, spectrum and parameters.

mod params;
mod spectrum;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use pmsynth::{
    io::{ControlSource, SweepSource},
    mapping::{ParameterMapper, UpdateOutcome},
    synth::{OscillatorSnapshot, PmHandle},
    SynthError,
};

use super::pointer::PointerSource;

use params::{render_params, AudioStats};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use waveform::render_waveform;

/// Audio visualization buffer size
pub const VIS_BUFFER_SIZE: usize = 1024;

/// Control updates per second (one per drawn frame)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Frames for one pass of the autoplay sweep (~8s)
const SWEEP_PERIOD_FRAMES: u32 = 480;

/// UI application state
pub struct UiApp {
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Ring buffer receiver for oscillator snapshots
    snapshot_rx: Consumer<OscillatorSnapshot>,
    /// Latest snapshot from the audio thread
    snapshot: OscillatorSnapshot,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    mapper: ParameterMapper<PmHandle>,
    pointer: PointerSource,
    sweep: SweepSource,
    autoplay: bool,
    last_outcome: UpdateOutcome,
    dropped_updates: u64,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        audio_rx: Consumer<f32>,
        snapshot_rx: Consumer<OscillatorSnapshot>,
        mapper: ParameterMapper<PmHandle>,
        pointer: PointerSource,
        sample_rate: f32,
    ) -> Self {
        Self {
            audio_rx,
            snapshot_rx,
            snapshot: OscillatorSnapshot::default(),
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            mapper,
            pointer,
            sweep: SweepSource::new(SWEEP_PERIOD_FRAMES),
            autoplay: false,
            last_outcome: UpdateOutcome::default(),
            dropped_updates: 0,
            should_quit: false,
        }
    }

    /// Run the UI and control loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_snapshots();

            self.control_update()?;

            terminal.draw(|frame| self.render(frame))?;

            // Drain input (non-blocking, ~60fps)
            if event::poll(FRAME_INTERVAL)? {
                while event::poll(Duration::ZERO)? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key.code)
                        }
                        Event::Mouse(mouse) => self.pointer.handle_mouse(mouse),
                        Event::Resize(columns, rows) => self.pointer.resize(columns, rows),
                        _ => {}
                    }
                }
            }

            if self.mapper.control().is_abandoned() {
                tracing::error!("audio engine went away");
                self.should_quit = true;
            }
        }

        Ok(())
    }

    /// One control update from whichever source is active
    fn control_update(&mut self) -> EyreResult<()> {
        let frame = if self.autoplay {
            self.sweep.poll_frame()
        } else {
            self.pointer.poll_frame()
        };

        match self.mapper.on_control_update(&frame) {
            Ok(outcome) => {
                if outcome.pitch_bin != self.last_outcome.pitch_bin && outcome.pitch_bin.is_some() {
                    tracing::debug!(bin = ?outcome.pitch_bin, "pitch bin changed");
                }
                self.last_outcome = outcome;
            }
            // The audio thread is behind; the next frame carries a fresh target
            Err(SynthError::QueueFull) => {
                self.dropped_updates += 1;
                tracing::warn!(dropped = self.dropped_updates, "parameter queue full");
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    /// Poll for new audio samples from ring buffer
    fn poll_audio(&mut self) {
        // Read as many samples as available, keeping last VIS_BUFFER_SIZE
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }
        if let Ok(chunk) = self.audio_rx.read_chunk(available) {
            self.audio_buffer.extend(chunk);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
        self.spectrum.update(&self.audio_buffer);
    }

    /// Keep only the latest snapshot
    fn poll_snapshots(&mut self) {
        while let Ok(snapshot) = self.snapshot_rx.pop() {
            self.snapshot = snapshot;
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.autoplay = !self.autoplay;
                tracing::info!(autoplay = self.autoplay, "control source switched");
            }
            KeyCode::Up | KeyCode::Down => {
                let step = if key == KeyCode::Up { 0.05 } else { -0.05 };
                let speed = (self.mapper.interpolation_speed() + step).clamp(0.05, 1.0);
                if let Err(err) = self.mapper.set_interpolation_speed(speed) {
                    tracing::warn!("rejected interpolation speed: {err}");
                }
            }
            _ => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),  // Parameters
                Constraint::Min(6),     // Waveform
                Constraint::Length(10), // Spectrum
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        let source = if self.autoplay {
            "autoplay"
        } else if self.pointer.is_held() {
            "pointer"
        } else {
            "idle"
        };
        render_params(
            frame,
            chunks[0],
            &self.snapshot,
            &self.last_outcome,
            self.mapper.interpolation_speed(),
            source,
            &stats,
        );

        render_waveform(frame, chunks[1], &self.audio_buffer, self.snapshot.amplitude);
        render_spectrum(frame, chunks[2], self.spectrum.data(), self.snapshot.carrier_frequency);

        let help = Paragraph::new(
            " [Drag] Play  [A] Autoplay  [Up/Down] Glide speed  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
