//! Error types for deck conversion

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Invalid deck line {line} ({text:?}): {reason}")]
    MalformedDeckLine {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("Unable to find {section} card '{name}' in the TTS module")]
    UnresolvedName { section: String, name: String },

    #[error("Invalid TTS module format: {0}")]
    MalformedCatalog(String),

    #[error("Invalid deck template format: {0}")]
    MalformedTemplate(String),

    #[error(
        "Failed to find TTS Json module: {}. Please specify its location",
        .expected.display()
    )]
    CatalogNotFound { expected: PathBuf },

    #[error("Invalid rename '{0}' (expected OLD=NEW)")]
    InvalidRename(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DeckError>;
