//! CLI module for vid2gif
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{ConvertArgs, ProfilesArgs};

/// vid2gif
///
/// Batch-convert video files into size-constrained animated GIFs using a
/// two-pass ffmpeg palette pipeline.
#[derive(Parser, Debug)]
#[command(name = "vid2gif")]
#[command(about = "vid2gif - Batch video to GIF conversion with size checks")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file (default: vid2gif.toml or config/vid2gif.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert videos to GIFs and report their sizes
    Convert(ConvertArgs),
    /// Show the quality profiles and the filter graphs they produce
    Profiles(ProfilesArgs),
}
