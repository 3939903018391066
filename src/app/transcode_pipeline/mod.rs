// Transcode pipeline - Two-pass palette encode for a single input

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempPath;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Transient palette image owned by one in-flight conversion
///
/// The file is removed when the artifact is released or dropped, so it
/// never outlives the conversion on any path.
pub struct PaletteArtifact {
    path: TempPath,
}

impl PaletteArtifact {
    /// Reserve a uniquely named palette file in `work_dir`
    pub fn create(work_dir: &Path, stem: &str) -> Result<Self, DomainError> {
        let file = tempfile::Builder::new()
            .prefix(&format!("{}-", stem))
            .suffix(".palette.png")
            .tempfile_in(work_dir)
            .map_err(|e| {
                DomainError::FsFail(format!(
                    "Failed to create palette file in {}: {}",
                    work_dir.display(),
                    e
                ))
            })?;

        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the palette now, logging anything but an already-missing file
    pub fn release(self) {
        let palette_path = self.path.to_path_buf();
        if let Err(e) = self.path.close() {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to remove palette {}: {}", palette_path.display(), e);
            }
        }
    }
}

/// Runs palette generation then paletted encode through the transcoder port
pub struct TranscodePipeline {
    transcoder: Arc<dyn TranscodePort>,
    fs_port: Arc<dyn FsPort>,
    work_dir: PathBuf,
}

impl TranscodePipeline {
    pub fn new(
        transcoder: Arc<dyn TranscodePort>,
        fs_port: Arc<dyn FsPort>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            transcoder,
            fs_port,
            work_dir: work_dir.into(),
        }
    }

    /// Convert `request.input_path` into the GIF at `output`
    ///
    /// On success the output exists and is non-empty. The palette is gone
    /// when this returns, whatever the outcome.
    pub async fn run(&self, request: &ConversionRequest, output: &Path) -> Result<(), DomainError> {
        let stem = request.input_stem().ok_or_else(|| {
            DomainError::BadArgs(format!(
                "Cannot derive a file name from {}",
                request.input_path.display()
            ))
        })?;

        let palette = PaletteArtifact::create(&self.work_dir, &stem)?;
        let outcome = self.encode(request, &palette, output).await;
        palette.release();
        outcome
    }

    async fn encode(
        &self,
        request: &ConversionRequest,
        palette: &PaletteArtifact,
        output: &Path,
    ) -> Result<(), DomainError> {
        let profile = &request.profile;
        let width = request.target_width;

        let generate = TranscodeInvocation {
            stage: TranscodeStage::PaletteGeneration,
            inputs: vec![request.input_path.clone()],
            filter: FilterGraph::Simple(profile.palette_filter(width)),
            output: palette.path().to_path_buf(),
        };
        debug!("Generating palette at {}", palette.path().display());
        self.transcoder.run(&generate).await?;

        // The palette file was reserved empty; a zero length means nothing was written
        self.require_non_empty(palette.path(), TranscodeStage::PaletteGeneration)
            .await?;

        let encode = TranscodeInvocation {
            stage: TranscodeStage::PalettedEncode,
            inputs: vec![request.input_path.clone(), palette.path().to_path_buf()],
            filter: FilterGraph::Complex(profile.paletteuse_filter(width)),
            output: output.to_path_buf(),
        };
        debug!("Encoding {}", output.display());
        self.transcoder.run(&encode).await?;

        self.require_non_empty(output, TranscodeStage::PalettedEncode)
            .await
    }

    async fn require_non_empty(&self, path: &Path, stage: TranscodeStage) -> Result<(), DomainError> {
        let size = self
            .fs_port
            .get_file_size(path)
            .await
            .map_err(|e| DomainError::TranscodeFailed {
                stage,
                diagnostic: e.diagnostic(),
            })?;
        if size == 0 {
            return Err(DomainError::TranscodeFailed {
                stage,
                diagnostic: format!("transcoder produced no data at {}", path.display()),
            });
        }
        Ok(())
    }
}
