// src/audio/metadata.rs
//! Track metadata extraction using Lofty.

use std::path::{Path, PathBuf};

use anyhow::Result;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;

/// What the player panel shows about the looping track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMetadata {
    /// Title tag, or the file stem when the track is untagged
    pub title: String,
    pub artist: Option<String>,
    /// Total track length in seconds
    pub duration_secs: u64,
    pub sample_rate: Option<u32>,
    pub channels: Option<u8>,
}

/// Load metadata for a file path without touching player state.
/// This is safe to call from a background thread.
pub fn load_metadata(path: PathBuf) -> Result<TrackMetadata> {
    let tagged_file = Probe::open(&path)?.read()?;

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag());

    let title = tag
        .and_then(|t| t.title().map(|s| s.into_owned()))
        .unwrap_or_else(|| fallback_title(&path));
    let artist = tag.and_then(|t| t.artist().map(|s| s.into_owned()));

    let props = tagged_file.properties();

    Ok(TrackMetadata {
        title,
        artist,
        duration_secs: props.duration().as_secs(),
        sample_rate: props.sample_rate(),
        channels: props.channels(),
    })
}

/// File stem used as a title for untagged tracks.
pub fn fallback_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
