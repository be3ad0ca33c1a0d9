//! Parameter bar: live oscillator values, mapper state and output level

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use pmsynth::{dsp::lerp::steps_to_settle, mapping::UpdateOutcome, synth::OscillatorSnapshot};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

fn bin_label(bin: Option<usize>) -> String {
    bin.map_or_else(|| "-".to_string(), |b| b.to_string())
}

pub fn render_params(
    frame: &mut Frame,
    area: Rect,
    snapshot: &OscillatorSnapshot,
    outcome: &UpdateOutcome,
    glide: f32,
    source: &str,
    stats: &AudioStats,
) {
    let block = Block::default().title(" pmsynth ").borders(Borders::ALL);

    let oscillator = Line::from(vec![
        Span::styled(
            format!(" Carrier {:>7.1} Hz  ", snapshot.carrier_frequency),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Mod {:>7.1} Hz  ", snapshot.modulation_frequency),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(
                "Ratio {:.3}  Index {:.3}  Amp {:.2}",
                snapshot.modulation_ratio, snapshot.modulation_index, snapshot.amplitude
            ),
            Style::default().fg(Color::White),
        ),
    ]);

    let source_color = match source {
        "pointer" => Color::Green,
        "autoplay" => Color::Yellow,
        _ => Color::DarkGray,
    };
    let degeneracy_color = if snapshot.degeneracies > 0 {
        Color::Red
    } else {
        Color::DarkGray
    };

    // control updates until a glide is 99% of the way there
    let settle = steps_to_settle(glide, 0.01).map_or_else(|| "-".to_string(), |n| n.to_string());

    let control = Line::from(vec![
        Span::styled(format!(" {:<8}  ", source), Style::default().fg(source_color)),
        Span::styled(
            format!(
                "bins p:{} i:{} r:{}  glide {:.2} ({} steps)  ",
                bin_label(outcome.pitch_bin),
                bin_label(outcome.index_bin),
                bin_label(outcome.ratio_bin),
                glide,
                settle
            ),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}  ", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!("guarded: {}", snapshot.degeneracies),
            Style::default().fg(degeneracy_color),
        ),
    ]);

    let paragraph = Paragraph::new(vec![oscillator, control]).block(block);
    frame.render_widget(paragraph, area);
}
