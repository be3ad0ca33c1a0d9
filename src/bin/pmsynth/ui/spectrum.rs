//! Spectrum view
//!
//! Phase modulation puts sidebands at carrier ± k·modulator, evenly spaced,
//! so the axis here is linear and stops well short of Nyquist where the
//! interesting partials live. A vertical marker shows the carrier.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Highest frequency shown, Hz
const DISPLAY_MAX_HZ: f64 = 6_000.0;

/// Floor of the magnitude axis, dB
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (frequency_hz, magnitude_db) for every bin below `DISPLAY_MAX_HZ`
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let buffer_len = buffer_len.max(2);
        let fft = FftPlanner::new().plan_fft_forward(buffer_len);

        // Hann
        let denom = (buffer_len - 1) as f32;
        let window = (0..buffer_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let resolution = sample_rate as f64 / buffer_len as f64;
        let shown = ((DISPLAY_MAX_HZ / resolution) as usize).clamp(1, buffer_len / 2);
        let spectrum = (0..shown).map(|k| (k as f64 * resolution, FLOOR_DB)).collect();

        Self {
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Recompute from a full visualization buffer; partial buffers are skipped.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        // Hann coherent gain is 0.5, so a full-scale sine reads ~0 dB
        let norm = 4.0 / (self.window.len() as f32 * self.window.len() as f32);
        for (k, (_, db)) in self.spectrum.iter_mut().enumerate() {
            let power = (self.scratch[k].norm_sqr() * norm).max(1e-12);
            *db = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)], carrier: f32) {
    let max_freq = spectrum.last().map_or(DISPLAY_MAX_HZ, |(f, _)| *f).max(1.0);

    let block = Block::default()
        .title(format!(" Spectrum  0 - {:.0} Hz ", max_freq))
        .borders(Borders::ALL);

    let marker = [(carrier as f64, FLOOR_DB), (carrier as f64, 0.0)];

    let mut datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum)];
    if (carrier as f64) < max_freq {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&marker),
        );
    }

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
