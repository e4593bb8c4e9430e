// src/app/mod.rs
//! Application module - per-frame state, input handling and drawing.

pub mod state;

pub use state::App;
