// src/lib.rs
//! boxeq - a terminal audio-reactive equalizer.
//!
//! A looping track is analysed every frame and drawn as one rainbow column
//! per frequency band, each column stacking as many units as the band's
//! smoothed, peak-normalized level calls for.

pub mod app;
pub mod audio;
pub mod config;
pub mod fs;
pub mod logging;
pub mod ui;
