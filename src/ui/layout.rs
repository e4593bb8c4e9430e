// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Visibility state for UI sections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionVisibility {
    pub equalizer: bool,
    pub player: bool,
    pub settings: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            equalizer: true,
            player: true,
            settings: false,
        }
    }
}

impl SectionVisibility {
    /// Toggle a section by number (1-3).
    pub fn toggle(&mut self, section: usize) {
        match section {
            1 => self.equalizer = !self.equalizer,
            2 => self.player = !self.player,
            3 => self.settings = !self.settings,
            _ => {}
        }
    }
}

/// Computed layout areas for rendering.
#[derive(Debug, Default, PartialEq)]
pub struct ComputedLayout {
    pub equalizer: Option<Rect>,
    pub player: Option<Rect>,
    pub settings: Option<Rect>,
}

/// Height of the player strip at the bottom.
const PLAYER_HEIGHT: u16 = 6;
/// Width of the settings panel on the right.
const SETTINGS_WIDTH: u16 = 34;

/// Compute the layout based on total area and section visibility.
///
/// The equalizer takes whatever is left once the player strip (bottom) and
/// settings panel (right) have been carved out.
pub fn compute_layout(area: Rect, visibility: &SectionVisibility) -> ComputedLayout {
    let (upper, player) = if visibility.player {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(PLAYER_HEIGHT)])
            .split(area);
        (rows[0], Some(rows[1]))
    } else {
        (area, None)
    };

    let (eq_area, settings) = if visibility.settings {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SETTINGS_WIDTH)])
            .split(upper);
        (cols[0], Some(cols[1]))
    } else {
        (upper, None)
    };

    let equalizer = (visibility.equalizer && eq_area.area() > 0).then_some(eq_area);
    // Without the equalizer the settings panel spreads over the whole upper area.
    let settings = match (visibility.equalizer, settings) {
        (false, Some(_)) => Some(upper),
        (_, s) => s,
    };

    ComputedLayout {
        equalizer,
        player,
        settings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 40,
    };

    #[test]
    fn default_layout_is_equalizer_over_player() {
        let layout = compute_layout(SCREEN, &SectionVisibility::default());
        assert_eq!(layout.equalizer, Some(Rect::new(0, 0, 100, 34)));
        assert_eq!(layout.player, Some(Rect::new(0, 34, 100, 6)));
        assert_eq!(layout.settings, None);
    }

    #[test]
    fn settings_panel_takes_the_right_edge() {
        let mut vis = SectionVisibility::default();
        vis.toggle(3);
        let layout = compute_layout(SCREEN, &vis);
        assert_eq!(layout.equalizer, Some(Rect::new(0, 0, 66, 34)));
        assert_eq!(layout.settings, Some(Rect::new(66, 0, 34, 34)));
    }

    #[test]
    fn hiding_everything_but_the_equalizer_gives_it_the_screen() {
        let mut vis = SectionVisibility::default();
        vis.toggle(2);
        let layout = compute_layout(SCREEN, &vis);
        assert_eq!(layout.equalizer, Some(SCREEN));
        assert_eq!(layout.player, None);
    }

    #[test]
    fn settings_fill_the_space_of_a_hidden_equalizer() {
        let vis = SectionVisibility {
            equalizer: false,
            player: true,
            settings: true,
        };
        let layout = compute_layout(SCREEN, &vis);
        assert_eq!(layout.equalizer, None);
        assert_eq!(layout.settings, Some(Rect::new(0, 0, 100, 34)));
    }
}
