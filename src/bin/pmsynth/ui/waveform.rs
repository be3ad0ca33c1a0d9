//! Oscilloscope over the most recent output

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render the scope. The vertical range follows the configured amplitude so
/// quiet patches still fill the panel.
pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32], amplitude: f32) {
    let span = if amplitude > 0.0 { amplitude as f64 * 1.1 } else { 1.0 };

    let block = Block::default()
        .title(format!(" Output  ±{:.2} ", span))
        .borders(Borders::ALL);

    let data: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64, sample as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, samples.len().max(1) as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-span, span])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
