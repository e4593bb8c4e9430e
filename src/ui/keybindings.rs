// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map digit/shifted-digit keys to section number (1..3).
pub fn map_key_to_digit(k: &KeyEvent) -> Option<usize> {
    if let KeyCode::Char(c) = k.code {
        match c {
            '1' | '!' => Some(1),
            '2' | '@' => Some(2),
            '3' | '#' => Some(3),
            _ => None,
        }
    } else {
        None
    }
}

/// Check if the key event is a shifted symbol (!, @, #).
pub fn is_shifted_symbol(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('!') | KeyCode::Char('@') | KeyCode::Char('#')
    )
}

/// Actions the operator can trigger from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    TogglePause,
    Stop,
    Restart,
    ToggleSettings,
    ToggleSection(usize),
    DecayDown,
    DecayUp,
    UnitsDown,
    UnitsUp,
    Quit,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: &KeyEvent) -> Action {
    if let Some(d) = map_key_to_digit(key) {
        if key.modifiers.contains(KeyModifiers::SHIFT) || is_shifted_symbol(key) {
            return Action::ToggleSection(d);
        }
    }

    match key.code {
        KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Char('s') => Action::Stop,
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Char('g') => Action::ToggleSettings,
        KeyCode::Char('[') => Action::DecayDown,
        KeyCode::Char(']') => Action::DecayUp,
        KeyCode::Char('-') => Action::UnitsDown,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::UnitsUp,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}
