// src/ui/widgets/player_panel.rs
//! Player information strip: track, transport state and progress.

use std::path::Path;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::audio::{TrackMetadata, metadata::fallback_title};

/// Everything the player strip shows for one frame.
pub struct PlayerView<'a> {
    pub metadata: Option<&'a TrackMetadata>,
    pub track: &'a Path,
    pub elapsed: u64,
    pub duration: u64,
    pub is_playing: bool,
    pub is_paused: bool,
    pub looping: bool,
    /// Last error worth showing the operator, if any
    pub status: Option<&'a str>,
}

/// Render the player information panel.
pub fn render_player_panel(f: &mut Frame<'_>, area: Rect, view: &PlayerView<'_>) {
    f.render_widget(Block::default().borders(Borders::ALL).title("2: Player"), area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    f.render_widget(Paragraph::new(track_line(view)), inner[0]);
    f.render_widget(
        Paragraph::new(controls_line(view)).alignment(Alignment::Center),
        inner[1],
    );

    if let Some(status) = view.status {
        f.render_widget(
            Paragraph::new(Span::styled(status.to_string(), Style::default().fg(Color::Red))),
            inner[2],
        );
        return;
    }

    let ratio = (view.elapsed as f64 / view.duration.max(1) as f64).clamp(0.0, 1.0);
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC))
            .ratio(ratio)
            .label(format_progress(view.elapsed, view.duration)),
        inner[2],
    );
}

fn track_line(view: &PlayerView<'_>) -> Line<'static> {
    let title = view
        .metadata
        .map(|m| m.title.clone())
        .unwrap_or_else(|| fallback_title(view.track));

    let mut spans = vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))];
    if let Some(artist) = view.metadata.and_then(|m| m.artist.clone()) {
        spans.push(Span::raw(format!(" · {artist}")));
    }
    if let Some(format) = view.metadata.and_then(stream_format) {
        spans.push(Span::styled(
            format!("  {format}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Sample rate and channel count, e.g. `44100 Hz · 2 ch`.
fn stream_format(metadata: &TrackMetadata) -> Option<String> {
    match (metadata.sample_rate, metadata.channels) {
        (Some(rate), Some(channels)) => Some(format!("{rate} Hz · {channels} ch")),
        (Some(rate), None) => Some(format!("{rate} Hz")),
        (None, Some(channels)) => Some(format!("{channels} ch")),
        (None, None) => None,
    }
}

fn controls_line(view: &PlayerView<'_>) -> Line<'static> {
    let play_pause_icon = if !view.is_playing {
        Span::styled(" ⏵ ", Style::default().fg(Color::Gray))
    } else if view.is_paused {
        Span::styled(" ⏵ ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ⏸ ", Style::default().fg(Color::Green))
    };
    let loop_style = if view.looping {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Line::from(vec![
        Span::styled(" ⏹ ", Style::default().fg(Color::Red)),
        Span::raw(" "),
        play_pause_icon,
        Span::raw(" "),
        Span::styled(" ⟲ ", loop_style),
    ])
}

/// `mm:ss / mm:ss` progress label.
pub fn format_progress(elapsed: u64, duration: u64) -> String {
    let duration = duration.max(1);
    format!(
        "{:02}:{:02} / {:02}:{:02}",
        elapsed / 60,
        elapsed % 60,
        duration / 60,
        duration % 60
    )
}
