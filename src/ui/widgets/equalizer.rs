// src/ui/widgets/equalizer.rs
//! Equalizer panel widget wrapper.

use ratatui::{Frame, layout::Rect};

use crate::audio::Visualizer;

/// Render the equalizer columns; `elapsed_secs` drives the outline pulse.
pub fn render_equalizer(f: &mut Frame<'_>, area: Rect, visualizer: &Visualizer, elapsed_secs: f32) {
    visualizer.render(f, area, elapsed_secs);
}
