// src/fs/mod.rs
//! Filesystem module - checks that the configured track is playable audio.

pub mod detection;

pub use detection::{FileCategory, FileType, detect_file_type, ensure_audio};
