// src/audio/visualizer/renderer.rs
//! Equalizer column rendering: one rainbow column per band, stacked units.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::audio::spectrum::SpectrumState;

/// Renderer for the equalizer panel.
pub struct EqualizerRenderer {
    /// Glyph used for a lit cell
    unit_char: char,
    /// Fraction of a column left empty on each side of its units
    side_margin: f32,
}

impl EqualizerRenderer {
    pub fn new() -> Self {
        Self {
            unit_char: '█',
            side_margin: 0.15,
        }
    }

    /// Render the equalizer with a pulsing green outline.
    pub fn render(&self, f: &mut Frame<'_>, area: Rect, spectrum: &SpectrumState, elapsed_secs: f32) {
        let green = outline_brightness(elapsed_secs);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(0, green, 0)))
            .title("1: Equalizer");

        let inner = block.inner(area);
        f.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = self.build_lines(inner, spectrum);
        f.render_widget(Paragraph::new(lines), inner);
    }

    /// Lay the columns out row by row, top row first.
    ///
    /// When there are more bands than cells across, neighbouring bands share
    /// a column which shows the loudest of them.
    fn build_lines(&self, area: Rect, spectrum: &SpectrumState) -> Vec<Line<'static>> {
        let bands = spectrum.band_count();
        let columns = bands.min(area.width as usize).max(1);
        let col_width = (area.width as usize / columns).max(1);
        let height = area.height as usize;
        let max_units = spectrum.max_units_per_band();

        let margin = (col_width as f32 * self.side_margin).round() as usize;
        let right_margin = if col_width >= 2 { margin.max(1) } else { margin };
        let lit_width = col_width.saturating_sub(margin + right_margin).max(1);

        let units = spectrum.visual_units();
        let column_units: Vec<(usize, usize)> = (0..columns)
            .map(|column| {
                let first = column * bands / columns;
                let last = ((column + 1) * bands / columns).max(first + 1);
                let loudest = units[first..last].iter().copied().max().unwrap_or(0);
                (first, loudest)
            })
            .collect();

        (0..height)
            .map(|row| {
                let row_from_bottom = height - row - 1;
                let spans: Vec<Span<'static>> = column_units
                    .iter()
                    .map(|&(first_band, lit_units)| {
                        let lit = cell_is_lit(row_from_bottom, height, lit_units, max_units);
                        let body: String = if lit {
                            std::iter::repeat_n(self.unit_char, lit_width).collect()
                        } else {
                            " ".repeat(lit_width)
                        };
                        let padded = format!(
                            "{}{}{}",
                            " ".repeat(margin),
                            body,
                            " ".repeat(col_width.saturating_sub(margin + lit_width))
                        );
                        Span::styled(padded, Style::default().fg(band_color(first_band, bands)))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Default for EqualizerRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the cell `row_from_bottom` rows up a column of `height` rows is
/// part of one of the column's `units` lit units.
///
/// The column is split into `max_units` equal slots. When every slot is at
/// least two rows tall its top row is left dark so units read as separate.
pub(crate) fn cell_is_lit(row_from_bottom: usize, height: usize, units: usize, max_units: usize) -> bool {
    if height == 0 || max_units == 0 {
        return false;
    }
    let slot = row_from_bottom * max_units / height;
    if slot >= units {
        return false;
    }
    if height >= 2 * max_units {
        let next_slot = (row_from_bottom + 1) * max_units / height;
        return next_slot == slot;
    }
    true
}

/// Linearly map `value` from `[in_lo, in_hi]` onto `[out_lo, out_hi]`.
///
/// The result is not clamped. A zero-width input range maps to `out_lo`.
pub fn remap(value: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    let span = in_hi - in_lo;
    if span.abs() < f32::EPSILON {
        return out_lo;
    }
    out_lo + (value - in_lo) / span * (out_hi - out_lo)
}

/// Green level of the outline, swinging between half and full brightness.
pub fn outline_brightness(elapsed_secs: f32) -> u8 {
    remap(elapsed_secs.sin(), -1.0, 1.0, 127.0, 255.0)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Rainbow colour for `band`: hue runs from 0 at the lowest band to 1 at the
/// highest, at full saturation and brightness.
pub fn band_color(band: usize, bands: usize) -> Color {
    let hue = if bands > 1 {
        band as f32 / (bands - 1) as f32
    } else {
        0.0
    };
    let (r, g, b) = hsv_to_rgb(hue, 1.0, 1.0);
    Color::Rgb(r, g, b)
}

/// Convert hue/saturation/value, each in [0, 1], to 8-bit RGB.
/// A hue of 1 wraps back to red.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> (u8, u8, u8) {
    let h = hue.rem_euclid(1.0) * 6.0;
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);

    let sector = h.floor();
    let frac = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * frac);
    let t = v * (1.0 - s * (1.0 - frac));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let to_byte = |c: f32| (c * 255.0).round() as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_colours_sweep_the_hue_wheel() {
        assert_eq!(band_color(0, 8), Color::Rgb(255, 0, 0));
        // last band has hue 1, which is red again
        assert_eq!(band_color(7, 8), Color::Rgb(255, 0, 0));
        assert_eq!(band_color(1, 4), Color::Rgb(0, 255, 0));
        assert_eq!(band_color(2, 4), Color::Rgb(0, 0, 255));
        assert_eq!(band_color(0, 1), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn hsv_primary_and_grey() {
        assert_eq!(hsv_to_rgb(0.5, 1.0, 1.0), (0, 255, 255));
        assert_eq!(hsv_to_rgb(0.3, 0.0, 0.5), (128, 128, 128));
    }

    #[test]
    fn remap_is_linear_and_handles_empty_range() {
        assert_eq!(remap(0.0, -1.0, 1.0, 127.0, 255.0), 191.0);
        assert_eq!(remap(5.0, 0.0, 10.0, 0.0, 1.0), 0.5);
        assert_eq!(remap(3.0, 2.0, 2.0, 7.0, 9.0), 7.0);
    }

    #[test]
    fn outline_pulses_between_half_and_full_green() {
        assert_eq!(outline_brightness(0.0), 191);
        assert_eq!(outline_brightness(std::f32::consts::FRAC_PI_2), 255);
        assert_eq!(outline_brightness(-std::f32::consts::FRAC_PI_2), 127);
    }

    #[test]
    fn tall_columns_leave_a_gap_above_each_unit() {
        // 8 rows, 4 slots of 2 rows each, 2 units lit
        let lit: Vec<bool> = (0..8).map(|r| cell_is_lit(r, 8, 2, 4)).collect();
        assert_eq!(lit, vec![true, false, true, false, false, false, false, false]);
    }

    #[test]
    fn short_columns_fill_solid() {
        // 4 rows, 8 slots: each row covers two slots
        let lit: Vec<bool> = (0..4).map(|r| cell_is_lit(r, 4, 5, 8)).collect();
        assert_eq!(lit, vec![true, true, true, false]);
        assert!(!cell_is_lit(0, 4, 0, 8));
        assert!(!cell_is_lit(0, 0, 3, 8));
    }

    #[test]
    fn full_column_lights_the_top_row() {
        assert!(cell_is_lit(7, 8, 8, 8));
        assert!(cell_is_lit(2, 3, 8, 8));
    }

    fn row_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn one_column_per_band_when_the_panel_is_wide_enough() {
        let mut spectrum = SpectrumState::with_settings(4, 4, 0.96).unwrap();
        spectrum.update(&[1.0, 0.0, 0.0, 1.0]);

        let lines = EqualizerRenderer::new().build_lines(Rect::new(0, 0, 8, 4), &spectrum);
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.spans.len() == 4));
        assert_eq!(row_text(&lines[0]), "█     █ ");
        assert_eq!(lines[0].spans[3].style.fg, Some(band_color(3, 4)));
    }

    #[test]
    fn narrow_panel_merges_bands_instead_of_dropping_them() {
        let mut spectrum = SpectrumState::with_settings(10, 4, 0.96).unwrap();
        let mut raw = [0.0f32; 10];
        raw[9] = 1.0;
        spectrum.update(&raw);

        let lines = EqualizerRenderer::new().build_lines(Rect::new(0, 0, 4, 4), &spectrum);
        assert!(lines.iter().all(|l| l.spans.len() == 4));
        // the top band lives in the last column and must still reach the top row
        assert_eq!(row_text(&lines[0]), "   █");
        assert_eq!(lines[0].spans[3].style.fg, Some(band_color(7, 10)));
    }
}
