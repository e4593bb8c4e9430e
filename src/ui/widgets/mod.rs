// src/ui/widgets/mod.rs
//! Panels drawn by the boxeq UI.

pub mod equalizer;
pub mod player_panel;
pub mod settings_panel;

// Re-export widget rendering functions
pub use equalizer::render_equalizer;
pub use player_panel::render_player_panel;
pub use settings_panel::render_settings_panel;
