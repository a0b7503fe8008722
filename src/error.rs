// src/error.rs
//! Error types for both pipelines.
//!
//! Fatal preconditions (input missing, CSV unreadable, output not writable)
//! surface as these enums and end the run. Per-song retrieval failures are
//! `SourceError`s that the collection loop logs and skips.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Input data could not be loaded.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("File '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not valid UTF-8", .0.display())]
    Encoding(PathBuf),

    #[error("'{}' has no header row", .0.display())]
    Empty(PathBuf),

    #[error("Malformed CSV in '{}': {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Column '{column}' not found in '{}' (available: {available})", path.display())]
    MissingColumn {
        column: String,
        path: PathBuf,
        available: String,
    },
}

/// Writing an output file failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Could not write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Retrieval failures from a `SongSource`.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Status(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Config file problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid option: {0}")]
    Invalid(String),
}

/// Everything the filter pipeline can fail with.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error(transparent)]
    Load(#[from] DataLoadError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Invalid tag pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything the analysis pipeline can fail with.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Load(#[from] DataLoadError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
