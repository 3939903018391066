// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Bytes per binary megabyte
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Extension given to every generated file
pub const GIF_EXTENSION: &str = "gif";

/// Quality mode selected for a whole batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityMode {
    /// Faster frame rate, better scaler, ordered dithering
    High,
    /// Slower frame rate, cheaper scaler, no dithering
    Low,
}

impl QualityMode {
    /// All modes, in menu order
    pub const ALL: [QualityMode; 2] = [QualityMode::High, QualityMode::Low];

    /// Parse quality mode from string (case insensitive, menu numbers accepted)
    pub fn parse(mode_str: &str) -> Result<Self, DomainError> {
        match mode_str.trim().to_lowercase().as_str() {
            "high" | "1" => Ok(QualityMode::High),
            "low" | "2" => Ok(QualityMode::Low),
            other => Err(DomainError::BadArgs(format!(
                "Invalid quality mode: {}. Valid modes: high, low",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityMode::High => "high",
            QualityMode::Low => "low",
        }
    }
}

impl fmt::Display for QualityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scaling algorithm passed to the `scale` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleAlgorithm {
    Lanczos,
    Bicubic,
}

impl ScaleAlgorithm {
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        match name.trim().to_lowercase().as_str() {
            "lanczos" => Ok(ScaleAlgorithm::Lanczos),
            "bicubic" => Ok(ScaleAlgorithm::Bicubic),
            other => Err(DomainError::BadArgs(format!(
                "Invalid scale algorithm: {}. Valid algorithms: lanczos, bicubic",
                other
            ))),
        }
    }

    /// The `flags=` value understood by the transcoder
    pub fn flag(&self) -> &'static str {
        match self {
            ScaleAlgorithm::Lanczos => "lanczos",
            ScaleAlgorithm::Bicubic => "bicubic",
        }
    }
}

/// Maximum `bayer_scale` accepted by `paletteuse`
pub const MAX_BAYER_SCALE: u8 = 5;

/// Dithering applied when frames are mapped onto the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherSpec {
    None,
    Bayer { scale: u8 },
}

impl DitherSpec {
    /// Parse `none` or `bayer:<scale>` (a bare `bayer` means the maximum scale)
    pub fn parse(spec: &str) -> Result<Self, DomainError> {
        let lowered = spec.trim().to_lowercase();
        let mut parts = lowered.splitn(2, ':');
        match (parts.next(), parts.next()) {
            (Some("none"), None) => Ok(DitherSpec::None),
            (Some("bayer"), None) => Ok(DitherSpec::Bayer {
                scale: MAX_BAYER_SCALE,
            }),
            (Some("bayer"), Some(scale)) => {
                let scale = scale.parse::<u8>().map_err(|_| {
                    DomainError::BadArgs(format!("Invalid bayer scale: {}", scale))
                })?;
                if scale > MAX_BAYER_SCALE {
                    return Err(DomainError::BadArgs(format!(
                        "Bayer scale must be between 0 and {}",
                        MAX_BAYER_SCALE
                    )));
                }
                Ok(DitherSpec::Bayer { scale })
            }
            _ => Err(DomainError::BadArgs(format!(
                "Invalid dither spec: {}. Expected none or bayer:<0-5>",
                spec
            ))),
        }
    }

    /// Options string appended to `paletteuse=`
    pub fn filter_options(&self) -> String {
        match self {
            DitherSpec::None => "dither=none".to_string(),
            DitherSpec::Bayer { scale } => format!("dither=bayer:bayer_scale={}", scale),
        }
    }
}

impl fmt::Display for DitherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DitherSpec::None => write!(f, "none"),
            DitherSpec::Bayer { scale } => write!(f, "bayer:{}", scale),
        }
    }
}

/// Fixed encode parameters for one quality mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityProfile {
    pub mode: QualityMode,
    pub frame_rate: u32,
    pub scale_filter: ScaleAlgorithm,
    pub dither: DitherSpec,
}

impl QualityProfile {
    /// Shared `fps,scale` prefix of both filter graphs
    ///
    /// Height is `-1` so the transcoder keeps the aspect ratio.
    pub fn sampling_chain(&self, width: u32) -> String {
        format!(
            "fps={},scale={}:-1:flags={}",
            self.frame_rate,
            width,
            self.scale_filter.flag()
        )
    }

    /// Stage 1 filter graph: sample, scale, derive a palette
    pub fn palette_filter(&self, width: u32) -> String {
        format!("{},palettegen", self.sampling_chain(width))
    }

    /// Stage 2 filter graph: sample, scale, map onto the palette from input 1
    pub fn paletteuse_filter(&self, width: u32) -> String {
        format!(
            "{}[x];[x][1:v]paletteuse={}",
            self.sampling_chain(width),
            self.dither.filter_options()
        )
    }
}

/// Parameters shared by every file of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub input_path: PathBuf,
    pub target_width: u32,
    pub profile: QualityProfile,
    pub size_threshold_mb: f64,
    pub overwrite: bool,
}

impl ConversionRequest {
    /// Build the batch-wide request; `input_path` is filled in per file
    pub fn template(
        target_width: u32,
        profile: QualityProfile,
        size_threshold_mb: f64,
        overwrite: bool,
    ) -> Result<Self, DomainError> {
        if target_width == 0 {
            return Err(DomainError::BadArgs("Target width cannot be zero".to_string()));
        }
        if size_threshold_mb.is_nan() || size_threshold_mb <= 0.0 {
            return Err(DomainError::BadArgs(
                "Size threshold must be positive".to_string(),
            ));
        }

        Ok(Self {
            input_path: PathBuf::new(),
            target_width,
            profile,
            size_threshold_mb,
            overwrite,
        })
    }

    /// Copy of this request pointing at another input
    pub fn for_input(&self, input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..self.clone()
        }
    }

    /// Input file name without its extension
    pub fn input_stem(&self) -> Option<String> {
        self.input_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .filter(|stem| !stem.is_empty())
    }
}

/// Outcome of a single conversion
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionStatus {
    /// Output size is within the threshold
    Conformant,
    /// Output was produced but exceeds the threshold; the file is kept
    NonConformant,
    /// No usable output; carries the diagnostic
    Failed(String),
}

impl ConversionStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, ConversionStatus::Failed(_))
    }

    pub fn label(&self) -> String {
        match self {
            ConversionStatus::Conformant => "Conformant".to_string(),
            ConversionStatus::NonConformant => "NonConformant".to_string(),
            ConversionStatus::Failed(diagnostic) => format!("Failed: {}", diagnostic),
        }
    }
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One row of the batch report
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub source_name: String,
    pub output_path: Option<PathBuf>,
    pub size_mb: f64,
    pub status: ConversionStatus,
}

impl ConversionResult {
    /// Result for an output that was produced and measured
    pub fn measured(
        source_name: impl Into<String>,
        output_path: PathBuf,
        size_mb: f64,
        conformant: bool,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            output_path: Some(output_path),
            size_mb,
            status: if conformant {
                ConversionStatus::Conformant
            } else {
                ConversionStatus::NonConformant
            },
        }
    }

    /// Result for a conversion that produced nothing usable; size is always 0
    pub fn failed(source_name: impl Into<String>, error: &DomainError) -> Self {
        Self {
            source_name: source_name.into(),
            output_path: None,
            size_mb: 0.0,
            status: ConversionStatus::Failed(error.diagnostic()),
        }
    }

    /// Size rendered with two decimals, as shown in reports
    pub fn size_label(&self) -> String {
        format!("{:.2}", self.size_mb)
    }

    pub fn to_row(&self) -> ReportRow {
        ReportRow {
            source_name: self.source_name.clone(),
            size_mb: self.size_label(),
            status: self.status.label(),
        }
    }
}

/// Rendering-ready view of a conversion result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub source_name: String,
    pub size_mb: String,
    pub status: String,
}

/// Ordered results of a batch run, one per input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    results: Vec<ConversionResult>,
}

impl BatchReport {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, result: ConversionResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[ConversionResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn conformant_count(&self) -> usize {
        self.count(|status| matches!(status, ConversionStatus::Conformant))
    }

    pub fn non_conformant_count(&self) -> usize {
        self.count(|status| matches!(status, ConversionStatus::NonConformant))
    }

    pub fn failed_count(&self) -> usize {
        self.count(ConversionStatus::is_failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    pub fn rows(&self) -> Vec<ReportRow> {
        self.results.iter().map(ConversionResult::to_row).collect()
    }

    fn count(&self, predicate: impl Fn(&ConversionStatus) -> bool) -> usize {
        self.results
            .iter()
            .filter(|result| predicate(&result.status))
            .count()
    }
}

/// File name shown for an input in reports
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
