//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use tracing::{debug, info};

use crate::adapters::toml_config::{AppConfig, TomlConfigAdapter};
use crate::cli::{Cli, Commands, ConvertArgs};
use crate::domain::model::QualityMode;
use crate::error::{Vid2GifError, Vid2GifResult};

/// Environment variables and the settings they override
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("VID2GIF_WIDTH", "conversion.width"),
    ("VID2GIF_MODE", "conversion.mode"),
    ("VID2GIF_MAX_SIZE_MB", "conversion.max_size_mb"),
    ("VID2GIF_OVERWRITE", "conversion.overwrite"),
    ("VID2GIF_OUTPUT_DIR", "conversion.output_dir"),
    ("VID2GIF_FFMPEG", "conversion.ffmpeg_path"),
    ("VID2GIF_LOG_LEVEL", "logging.level"),
];

/// Configuration plus where it was loaded from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
    pub env_overrides: usize,
    pub cli_overrides: usize,
}

/// Build the configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration(cli: &Cli) -> Vid2GifResult<LoadedConfig> {
    let adapter = TomlConfigAdapter::discover(cli.config.as_deref())?;
    let source = adapter.source().map(|path| path.to_path_buf());
    let mut config = adapter.into_config();

    let env_overrides = apply_environment(&mut config, |key| std::env::var(key).ok())?;
    let cli_overrides = apply_cli_overrides(&mut config, cli)?;

    config.validate()?;

    Ok(LoadedConfig {
        config,
        source,
        env_overrides,
        cli_overrides,
    })
}

/// Log how the configuration was assembled; call once logging is up
pub fn log_configuration(loaded: &LoadedConfig) {
    match &loaded.source {
        Some(path) => info!("Loaded configuration from: {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }
    if loaded.env_overrides > 0 {
        info!("Applied {} environment variable overrides", loaded.env_overrides);
    }
    if loaded.cli_overrides > 0 {
        debug!("Applied {} CLI configuration overrides", loaded.cli_overrides);
    }
}

/// Apply environment overrides read through `lookup`
pub fn apply_environment(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vid2GifResult<usize> {
    let mut overrides = 0;

    for (env_var, key) in ENV_MAPPINGS {
        let Some(value) = lookup(env_var) else {
            continue;
        };
        let value = value.trim().to_string();

        match *key {
            "conversion.width" => config.conversion.width = parse_value(env_var, &value)?,
            "conversion.mode" => config.conversion.mode = QualityMode::parse(&value)?,
            "conversion.max_size_mb" => {
                config.conversion.max_size_mb = parse_value(env_var, &value)?
            }
            "conversion.overwrite" => config.conversion.overwrite = parse_bool(env_var, &value)?,
            "conversion.output_dir" => config.conversion.output_dir = PathBuf::from(value),
            "conversion.ffmpeg_path" => config.conversion.ffmpeg_path = PathBuf::from(value),
            "logging.level" => config.logging.level = value,
            _ => continue,
        }
        overrides += 1;
    }

    Ok(overrides)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> Vid2GifResult<usize> {
    let mut overrides = 0;

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
        overrides += 1;
    }
    if cli.json_logs {
        config.logging.json = true;
        overrides += 1;
    }

    match &cli.command {
        Commands::Convert(args) => overrides += apply_convert_overrides(config, args)?,
        Commands::Profiles(args) => {
            if let Some(width) = args.width {
                config.conversion.width = width;
                overrides += 1;
            }
        }
    }

    Ok(overrides)
}

fn apply_convert_overrides(config: &mut AppConfig, args: &ConvertArgs) -> Vid2GifResult<usize> {
    let mut overrides = 0;
    let conversion = &mut config.conversion;

    if let Some(output_dir) = &args.output_dir {
        conversion.output_dir = output_dir.clone();
        overrides += 1;
    }
    if let Some(width) = args.width {
        conversion.width = width;
        overrides += 1;
    }
    if let Some(mode) = &args.mode {
        conversion.mode = QualityMode::parse(mode)?;
        overrides += 1;
    }
    if let Some(max_size) = args.max_size {
        conversion.max_size_mb = max_size;
        overrides += 1;
    }
    if args.overwrite {
        conversion.overwrite = true;
        overrides += 1;
    }
    if let Some(ffmpeg) = &args.ffmpeg {
        conversion.ffmpeg_path = ffmpeg.clone();
        overrides += 1;
    }
    if let Some(work_dir) = &args.work_dir {
        conversion.work_dir = Some(work_dir.clone());
        overrides += 1;
    }
    if !args.extensions.is_empty() {
        config.discovery.extensions = args.extensions.clone();
        overrides += 1;
    }

    Ok(overrides)
}

fn parse_value<T: std::str::FromStr>(env_var: &str, value: &str) -> Vid2GifResult<T> {
    value.parse().map_err(|_| Vid2GifError::InvalidConfig {
        message: format!("{} has an invalid value: {}", env_var, value),
    })
}

fn parse_bool(env_var: &str, value: &str) -> Vid2GifResult<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Vid2GifError::InvalidConfig {
            message: format!("{} must be a boolean, got {}", env_var, value),
        }),
    }
}
