//! vid2gif
//!
//! Batch-convert video files into size-constrained animated GIFs.
//!
//! # Features
//!
//! - Two-pass palette encode (palettegen + paletteuse) through ffmpeg
//! - High/low quality profiles with configurable frame rate, scaler and dithering
//! - Per-file size check against a configurable limit
//! - Collision-safe output names (`clip.gif`, `clip_1.gif`, ...)
//!
//! # Usage
//!
//! ```bash
//! vid2gif convert                       # every supported video in the current directory
//! vid2gif convert clip.mp4 -w 320 -m low -s 1.5
//! vid2gif profiles --json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use vid2gif::adapters::tracing_log;
use vid2gif::cli::{commands, Cli, Commands};
use vid2gif::config_initialization::{initialize_configuration, log_configuration};

/// Main entry point for the vid2gif CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let loaded = initialize_configuration(&cli)?;

    // Initialize logging
    tracing_log::init(&loaded.config.logging, cli.log_level.as_deref());
    log_configuration(&loaded);

    // Execute the requested command
    match &cli.command {
        Commands::Convert(args) => {
            info!("Executing convert command");
            commands::convert(args, &loaded.config).await?;
        }
        Commands::Profiles(args) => {
            commands::profiles(args, &loaded.config)?;
        }
    }

    Ok(())
}
