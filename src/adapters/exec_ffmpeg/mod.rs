//! FFmpeg execution adapter
//!
//! Runs the `ffmpeg` command line as a child process, one invocation at a
//! time. Only the exit status decides success; stderr is kept for the
//! diagnostic of a failed conversion.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    binary: PathBuf,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter for the given executable
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl TranscodePort for FFmpegAdapter {
    async fn run(&self, invocation: &TranscodeInvocation) -> Result<(), DomainError> {
        let args = invocation.to_args();
        debug!(
            binary = %self.binary.display(),
            stage = %invocation.stage,
            ?args,
            "Running transcoder"
        );

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| DomainError::TranscodeFailed {
                stage: invocation.stage,
                diagnostic: format!("failed to start {}: {}", self.binary.display(), e),
            })?;

        if output.status.success() {
            return Ok(());
        }

        Err(DomainError::TranscodeFailed {
            stage: invocation.stage,
            diagnostic: summarize_stderr(&output.stderr, output.status),
        })
    }
}

/// Last non-empty stderr line, or the exit status when stderr is silent
pub fn summarize_stderr(stderr: &[u8], status: ExitStatus) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(str::to_string)
        .unwrap_or_else(|| format!("transcoder exited with {}", status))
}
