// Domain errors - Per-file failures raised inside a conversion

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which pass of the two-pass encode failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeStage {
    /// Stage 1: palette generation
    PaletteGeneration,
    /// Stage 2: paletted GIF encode
    PalettedEncode,
}

impl fmt::Display for TranscodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscodeStage::PaletteGeneration => write!(f, "palette generation"),
            TranscodeStage::PalettedEncode => write!(f, "paletted encode"),
        }
    }
}

/// Domain-specific error types
///
/// Every variant is caught at the batch boundary and turned into a
/// `Failed` conversion result; none of them stops the batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The transcoder exited abnormally or could not be started
    #[error("{stage} failed: {diagnostic}")]
    TranscodeFailed {
        stage: TranscodeStage,
        diagnostic: String,
    },

    /// The output vanished or became unreadable before it could be measured
    #[error("cannot measure {}: {message}", path.display())]
    SizeMeasurement { path: PathBuf, message: String },

    /// Filesystem operation failed
    #[error("File system error: {0}")]
    FsFail(String),

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),
}

impl DomainError {
    /// Text shown in the `Failed: ...` status of a conversion result.
    pub fn diagnostic(&self) -> String {
        match self {
            DomainError::TranscodeFailed { diagnostic, .. } => diagnostic.clone(),
            other => other.to_string(),
        }
    }
}
