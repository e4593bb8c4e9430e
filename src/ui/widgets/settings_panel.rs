// src/ui/widgets/settings_panel.rs
//! Operator panel: current tuning values, per-band readout and key help.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::audio::{SpectrumState, visualizer::band_color};
use crate::config::Settings;

/// Render the settings panel.
pub fn render_settings_panel(f: &mut Frame<'_>, area: Rect, settings: &Settings, spectrum: &SpectrumState) {
    let block = Block::default().borders(Borders::ALL).title("3: Settings");
    let paragraph = Paragraph::new(settings_lines(settings, spectrum))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn settings_lines(settings: &Settings, spectrum: &SpectrumState) -> Vec<Line<'static>> {
    let key = |k: &str| Span::styled(format!("{k:>5} "), Style::default().fg(Color::Cyan));
    let label = Style::default().add_modifier(Modifier::BOLD);
    let eq = &settings.equalizer;

    let mut lines = vec![
        Line::from(vec![
            Span::styled("bands      ", label),
            Span::raw(eq.bands.to_string()),
        ]),
        Line::from(vec![
            Span::styled("max units  ", label),
            Span::raw(eq.max_units.to_string()),
        ]),
        Line::from(vec![
            Span::styled("decay      ", label),
            Span::raw(format!("{:.3}", eq.decay)),
        ]),
        Line::from(vec![
            Span::styled("frame rate ", label),
            Span::raw(format!("{} fps", settings.display.frame_rate)),
        ]),
        Line::from(vec![
            Span::styled("track      ", label),
            Span::raw(settings.playback.track.display().to_string()),
        ]),
        Line::raw(""),
    ];

    // One readout row per band: normalized level and the peak it is scaled by.
    let bands = spectrum.band_count();
    for (band, (&level, &peak)) in spectrum
        .normalized()
        .iter()
        .zip(spectrum.peak())
        .enumerate()
    {
        lines.push(Line::from(vec![
            Span::styled(format!("{band:>3} "), Style::default().fg(band_color(band, bands))),
            Span::raw(format!("{level:>5.2}  peak {peak:.4}")),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![key("[ ]"), Span::raw("decay -/+")]));
    lines.push(Line::from(vec![key("- +"), Span::raw("max units -/+")]));
    lines.push(Line::from(vec![key("space"), Span::raw("pause")]));
    lines.push(Line::from(vec![key("r"), Span::raw("restart")]));
    lines.push(Line::from(vec![key("s"), Span::raw("stop")]));
    lines.push(Line::from(vec![key("g"), Span::raw("hide panel")]));
    lines.push(Line::from(vec![key("q"), Span::raw("quit and save")]));
    lines
}
