//! vid2gif Library
//!
//! Batch-converts video files into size-constrained animated GIFs by driving
//! ffmpeg through a two-pass palette pipeline, then reports each output's
//! size against a configured limit.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::{DomainError, TranscodeStage};
pub use domain::model::{
    BatchReport, ConversionRequest, ConversionResult, ConversionStatus, QualityMode,
    QualityProfile, ReportRow,
};
pub use domain::rules::{NamingResolver, ProfileResolver, ProfileTable};
pub use error::{Vid2GifError, Vid2GifResult};
