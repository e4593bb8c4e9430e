// src/ui/mod.rs
//! UI module - terminal frame loop, layout, input and panels.

pub mod keybindings;
pub mod layout;
pub mod tui;
pub mod widgets;

// Re-export main entry point
pub use tui::run;
