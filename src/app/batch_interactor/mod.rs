// Batch interactor - Orchestrates the conversion of a list of videos

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::app::size_validator::{SizeValidator, SizeVerdict};
use crate::app::transcode_pipeline::TranscodePipeline;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for the batch conversion use case
///
/// Inputs are processed strictly one after another: both encode stages,
/// palette cleanup and size validation finish before the next input starts.
pub struct BatchInteractor {
    pipeline: TranscodePipeline,
    validator: SizeValidator,
    fs_port: Arc<dyn FsPort>,
    output_dir: PathBuf,
}

impl BatchInteractor {
    /// Create new batch interactor with injected collaborators
    pub fn new(
        pipeline: TranscodePipeline,
        validator: SizeValidator,
        fs_port: Arc<dyn FsPort>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            pipeline,
            validator,
            fs_port,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory if it is missing
    pub async fn prepare_output_directory(&self) -> Result<(), DomainError> {
        if !self.fs_port.file_exists(&self.output_dir).await? {
            info!("Creating output directory {}", self.output_dir.display());
        }
        self.fs_port.create_directory(&self.output_dir).await
    }

    /// Convert every input in order; the report has exactly one row per input
    pub async fn execute(&self, template: &ConversionRequest, inputs: &[PathBuf]) -> BatchReport {
        let total = inputs.len();
        let mut report = BatchReport::with_capacity(total);

        for (index, input) in inputs.iter().enumerate() {
            let source_name = display_name(input);
            info!("[{}/{}] Processing {}", index + 1, total, source_name);

            let request = template.for_input(input);
            let result = match self.convert(&request).await {
                Ok((output, verdict)) => {
                    if verdict.conformant {
                        info!("{} -> {} ({:.2} MB)", source_name, output.display(), verdict.size_mb);
                    } else {
                        warn!(
                            "{} -> {} is {:.2} MB, over the {:.2} MB limit",
                            source_name,
                            output.display(),
                            verdict.size_mb,
                            template.size_threshold_mb
                        );
                    }
                    ConversionResult::measured(source_name, output, verdict.size_mb, verdict.conformant)
                }
                Err(e) => {
                    error!("{} failed: {}", source_name, e);
                    ConversionResult::failed(source_name, &e)
                }
            };
            report.push(result);
        }

        info!(
            "Batch finished: {} conformant, {} over limit, {} failed",
            report.conformant_count(),
            report.non_conformant_count(),
            report.failed_count()
        );
        report
    }

    async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> Result<(PathBuf, SizeVerdict), DomainError> {
        let stem = request.input_stem().ok_or_else(|| {
            DomainError::BadArgs(format!(
                "Cannot derive a file name from {}",
                request.input_path.display()
            ))
        })?;

        let output = self.resolve_output_path(&stem, request.overwrite).await?;
        self.pipeline.run(request, &output).await?;
        let verdict = self
            .validator
            .validate(&output, request.size_threshold_mb)
            .await?;
        Ok((output, verdict))
    }

    /// Ask the filesystem about each candidate name until one is free
    async fn resolve_output_path(&self, stem: &str, overwrite: bool) -> Result<PathBuf, DomainError> {
        let mut taken = HashSet::new();
        if !overwrite {
            for candidate in NamingResolver::candidates(&self.output_dir, stem, GIF_EXTENSION) {
                if !self.fs_port.file_exists(&candidate).await? {
                    break;
                }
                taken.insert(candidate);
            }
        }

        let resolved = NamingResolver::resolve(&self.output_dir, stem, GIF_EXTENSION, overwrite, |path| {
            taken.contains(path)
        });

        match &resolved {
            ResolvedName::Suffixed { path, suffix } => info!(
                "{}.{} exists, writing {} instead (suffix {})",
                stem,
                GIF_EXTENSION,
                path.display(),
                suffix
            ),
            ResolvedName::Exhausted(path) => warn!(
                "All {} numbered names for {} are taken, overwriting {}",
                MAX_NAME_SUFFIX,
                stem,
                path.display()
            ),
            ResolvedName::Original(_) => {}
        }

        Ok(resolved.into_path())
    }
}
