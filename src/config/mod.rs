// src/config/mod.rs
//! Settings file: equalizer, playback and display options.
//!
//! Settings are read once at start-up and written back on exit, so tweaks made
//! from the settings panel survive a restart. Missing keys take their
//! defaults and out-of-range numbers are pulled back into range.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Settings file used when none is given on the command line.
pub const DEFAULT_SETTINGS_PATH: &str = "boxeq.toml";

pub const MIN_DECAY: f32 = 0.5;
pub const MAX_DECAY: f32 = 0.995;
pub const MAX_UNITS: usize = 64;
pub const MAX_BANDS: usize = 256;
pub const MAX_FRAME_RATE: u32 = 240;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub equalizer: EqualizerSettings,
    pub playback: PlaybackSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EqualizerSettings {
    /// Number of frequency bands (columns)
    #[serde(deserialize_with = "count_usize")]
    pub bands: usize,
    /// Visual units in a full column, independent of `bands`
    #[serde(deserialize_with = "count_usize")]
    pub max_units: usize,
    /// Per-frame decay of the smoothed spectrum
    pub decay: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    pub track: PathBuf,
    pub looping: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Update+draw ticks per second
    #[serde(deserialize_with = "count_u32")]
    pub frame_rate: u32,
    /// Whether the settings panel is visible at start-up
    pub show_settings: bool,
}

// Counts are read as signed; negatives become 0 and `sanitized` pulls them into range.
fn count_usize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = i64::deserialize(deserializer)?;
    Ok(usize::try_from(value.max(0)).unwrap_or(usize::MAX))
}

fn count_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = i64::deserialize(deserializer)?;
    Ok(u32::try_from(value.max(0)).unwrap_or(u32::MAX))
}

impl Default for EqualizerSettings {
    fn default() -> Self {
        Self {
            bands: 8,
            max_units: 8,
            decay: 0.96,
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            track: PathBuf::from("Quirky Dog.mp3"),
            looping: true,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            show_settings: false,
        }
    }
}

impl Settings {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path)?;
        Self::from_toml(&contents)
    }

    /// Load `path`, falling back to defaults when the file does not exist yet.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "no settings at {}, using defaults",
                    path.as_ref().display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let parsed: Settings =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;
        Ok(parsed.sanitized())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Serialize(err.to_string()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(&path, self.to_toml()?)?;
        Ok(())
    }

    /// Clamp every numeric setting into its accepted range.
    pub fn sanitized(mut self) -> Self {
        let eq = &mut self.equalizer;
        eq.bands = eq.bands.clamp(1, MAX_BANDS);
        eq.max_units = eq.max_units.clamp(1, MAX_UNITS);
        eq.decay = if eq.decay.is_finite() {
            eq.decay.clamp(MIN_DECAY, MAX_DECAY)
        } else {
            EqualizerSettings::default().decay
        };
        self.display.frame_rate = self.display.frame_rate.clamp(1, MAX_FRAME_RATE);
        self
    }

    /// Step the decay factor by `delta`, staying within range.
    pub fn nudge_decay(&mut self, delta: f32) {
        // Round to three decimals so repeated nudges don't accumulate float drift.
        let stepped = ((self.equalizer.decay + delta) * 1000.0).round() / 1000.0;
        self.equalizer.decay = stepped.clamp(MIN_DECAY, MAX_DECAY);
    }

    /// Step the column height by `delta` units, staying within range.
    pub fn nudge_max_units(&mut self, delta: i32) {
        let stepped = self.equalizer.max_units as i64 + delta as i64;
        self.equalizer.max_units = stepped.clamp(1, MAX_UNITS as i64) as usize;
    }
}
