// src/audio/mod.rs
//! Audio module - looping playback, sample capture and the audio-reactive equalizer.

pub mod metadata;
pub mod player;
pub mod sample_capture;
pub mod spectrum;
pub mod visualizer;

// Re-export commonly used types
pub use metadata::{TrackMetadata, load_metadata};
pub use player::MusicPlayer;
pub use sample_capture::{SampleBuffer, SampleCapture};
pub use spectrum::{SpectrumError, SpectrumState};
pub use visualizer::Visualizer;
