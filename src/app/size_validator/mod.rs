// Size validator - Measures a finished GIF against the size threshold

use std::path::Path;
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::rules::SizePolicy;
use crate::ports::*;

/// Measured size and its classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeVerdict {
    pub size_mb: f64,
    pub conformant: bool,
}

/// Reads the output's current length; never touches the file itself
pub struct SizeValidator {
    fs_port: Arc<dyn FsPort>,
}

impl SizeValidator {
    pub fn new(fs_port: Arc<dyn FsPort>) -> Self {
        Self { fs_port }
    }

    pub async fn validate(&self, output: &Path, threshold_mb: f64) -> Result<SizeVerdict, DomainError> {
        let bytes = self.fs_port.get_file_size(output).await.map_err(|e| {
            DomainError::SizeMeasurement {
                path: output.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        let size_mb = SizePolicy::bytes_to_mb(bytes);
        Ok(SizeVerdict {
            size_mb,
            conformant: SizePolicy::is_conformant(size_mb, threshold_mb),
        })
    }
}
