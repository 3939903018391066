//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the convert command
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Input video files, processed in the given order
    /// (default: discover supported videos in --input-dir)
    pub inputs: Vec<PathBuf>,

    /// Directory scanned when no inputs are given
    #[arg(long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Extensions to look for when scanning (replaces the configured allowlist)
    #[arg(long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Output directory for generated GIFs
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output width in pixels; height follows the aspect ratio (100-1000)
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Quality mode: high (larger files) or low (smaller files)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Maximum GIF size in MB before a result is flagged (0.5-10)
    #[arg(short = 's', long)]
    pub max_size: Option<f64>,

    /// Overwrite existing GIFs instead of adding a numeric suffix
    #[arg(long)]
    pub overwrite: bool,

    /// Path to the ffmpeg executable
    #[arg(long)]
    pub ffmpeg: Option<PathBuf>,

    /// Directory for temporary palette images
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the profiles command
#[derive(Args, Debug, Default)]
pub struct ProfilesArgs {
    /// Width used when rendering the filter graphs
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
