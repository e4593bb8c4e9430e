// src/fs/detection.rs
//! File type detection using magic numbers and extension-based fallback.

use std::{fmt, path::Path};

use anyhow::{Result, bail};
use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

/// High-level file categories.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FileCategory {
    Audio,
    Video,
    Image,
    Other,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::Audio => "audio",
            FileCategory::Video => "video",
            FileCategory::Image => "image",
            FileCategory::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Detected MIME type + category.
#[derive(Debug, Clone, PartialEq)]
pub struct FileType {
    pub mime: String,
    pub category: FileCategory,
}

/// Detect MIME type & category for a given file path.
///
/// Magic numbers win; the extension is only consulted when the content is
/// not recognised.
pub fn detect_file_type(path: &Path) -> Result<FileType> {
    if let Some(kind) = Infer::new().get_from_path(path)? {
        let category = match kind.matcher_type() {
            MatcherType::Audio => FileCategory::Audio,
            MatcherType::Video => FileCategory::Video,
            MatcherType::Image => FileCategory::Image,
            _ => FileCategory::Other,
        };
        return Ok(FileType {
            mime: kind.mime_type().to_string(),
            category,
        });
    }

    let mime = MimeGuess::from_path(path).first_or_octet_stream().to_string();
    Ok(FileType {
        category: category_from_mime(&mime),
        mime,
    })
}

fn category_from_mime(mime: &str) -> FileCategory {
    match mime.split('/').next().unwrap_or_default() {
        "audio" => FileCategory::Audio,
        "video" => FileCategory::Video,
        "image" => FileCategory::Image,
        _ => FileCategory::Other,
    }
}

/// Fail unless `path` exists and looks like an audio file.
pub fn ensure_audio(path: &Path) -> Result<FileType> {
    if !path.is_file() {
        bail!("track {} not found", path.display());
    }
    let file_type = detect_file_type(path)?;
    if file_type.category != FileCategory::Audio {
        bail!(
            "track {} is {} ({}), not audio",
            path.display(),
            file_type.category,
            file_type.mime
        );
    }
    Ok(file_type)
}
