// Ports - Interface definitions (contracts)

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;

/// Filter graph handed to the transcoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterGraph {
    /// Single-input chain (`-vf`)
    Simple(String),
    /// Multi-input graph with labelled pads (`-filter_complex`)
    Complex(String),
}

impl FilterGraph {
    pub fn flag(&self) -> &'static str {
        match self {
            FilterGraph::Simple(_) => "-vf",
            FilterGraph::Complex(_) => "-filter_complex",
        }
    }

    pub fn graph(&self) -> &str {
        match self {
            FilterGraph::Simple(graph) | FilterGraph::Complex(graph) => graph,
        }
    }
}

/// One run of the external transcoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeInvocation {
    pub stage: TranscodeStage,
    pub inputs: Vec<PathBuf>,
    pub filter: FilterGraph,
    pub output: PathBuf,
}

impl TranscodeInvocation {
    /// Arguments after the binary name; the output is always overwritten
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-loglevel", "error", "-y"]
            .iter()
            .map(OsString::from)
            .collect();

        for input in &self.inputs {
            args.push("-i".into());
            args.push(input.as_os_str().to_owned());
        }

        args.push(self.filter.flag().into());
        args.push(self.filter.graph().into());
        args.push(self.output.as_os_str().to_owned());
        args
    }
}

/// Port for the external transcoding engine
#[async_trait]
pub trait TranscodePort: Send + Sync {
    /// Run one invocation to completion
    ///
    /// A non-zero exit maps to `DomainError::TranscodeFailed` carrying the
    /// engine's diagnostic text.
    async fn run(&self, invocation: &TranscodeInvocation) -> Result<(), DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, path: &Path) -> Result<bool, DomainError>;

    /// Get file size in bytes
    async fn get_file_size(&self, path: &Path) -> Result<u64, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, path: &Path) -> Result<(), DomainError>;
}
