//! Error handling module for vid2gif
//!
//! These errors stop a run before any conversion starts. Failures of a
//! single file are `DomainError`s and end up in the batch report instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for vid2gif setup operations
#[derive(Error, Debug)]
pub enum Vid2GifError {
    /// Configuration file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the expected schema
    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A configuration value is out of range or malformed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Output directory could not be prepared
    #[error("Failed to prepare output directory {}: {message}", path.display())]
    OutputDirectory { path: PathBuf, message: String },

    /// Input discovery failed
    #[error("Failed to scan {} for videos: {message}", path.display())]
    Discovery { path: PathBuf, message: String },

    /// Domain error raised outside of a per-file conversion
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type alias for vid2gif operations
pub type Vid2GifResult<T> = std::result::Result<T, Vid2GifError>;
