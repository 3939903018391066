// TOML config adapter - Typed configuration loaded from TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::model::*;
use crate::domain::rules::ProfileTable;
use crate::error::{Vid2GifError, Vid2GifResult};

/// Files probed, in order, when no `--config` is given
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["vid2gif.toml", "config/vid2gif.toml"];

/// Accepted GIF width range, in pixels
pub const WIDTH_RANGE: (u32, u32) = (100, 1000);
/// Accepted size threshold range, in MB
pub const MAX_SIZE_RANGE: (f64, f64) = (0.5, 10.0);
/// Accepted frame rate range for profiles
pub const FPS_RANGE: (u32, u32) = (1, 60);

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub conversion: ConversionSection,
    pub discovery: DiscoverySection,
    pub profiles: ProfilesSection,
    pub logging: LoggingSection,
}

/// `[conversion]` batch-wide parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionSection {
    pub width: u32,
    pub mode: QualityMode,
    pub max_size_mb: f64,
    pub overwrite: bool,
    pub output_dir: PathBuf,
    /// Where palette artifacts live; the system temp dir when unset
    pub work_dir: Option<PathBuf>,
    pub ffmpeg_path: PathBuf,
}

impl Default for ConversionSection {
    fn default() -> Self {
        Self {
            width: 400,
            mode: QualityMode::High,
            max_size_mb: 2.0,
            overwrite: false,
            output_dir: PathBuf::from("gifs"),
            work_dir: None,
            ffmpeg_path: PathBuf::from("ffmpeg"),
        }
    }
}

impl ConversionSection {
    pub fn work_dir(&self) -> PathBuf {
        self.work_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// `[discovery]` input allowlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoverySection {
    pub extensions: Vec<String>,
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            extensions: [".mp4", ".mkv", ".mov", ".avi", ".webm", ".flv"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// `[profiles.high]` / `[profiles.low]` overrides on top of the built-in table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfilesSection {
    pub high: ProfileOverride,
    pub low: ProfileOverride,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileOverride {
    pub fps: Option<u32>,
    pub scale: Option<String>,
    pub dither: Option<String>,
}

impl ProfileOverride {
    fn apply(&self, base: QualityProfile) -> Vid2GifResult<QualityProfile> {
        let mut profile = base;
        if let Some(fps) = self.fps {
            if fps < FPS_RANGE.0 || fps > FPS_RANGE.1 {
                return Err(invalid(format!(
                    "{} profile fps must be between {} and {}, got {}",
                    base.mode, FPS_RANGE.0, FPS_RANGE.1, fps
                )));
            }
            profile.frame_rate = fps;
        }
        if let Some(scale) = &self.scale {
            profile.scale_filter = ScaleAlgorithm::parse(scale)?;
        }
        if let Some(dither) = &self.dither {
            profile.dither = DitherSpec::parse(dither)?;
        }
        Ok(profile)
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Check every value against its accepted range
    pub fn validate(&self) -> Vid2GifResult<()> {
        let conversion = &self.conversion;
        if conversion.width < WIDTH_RANGE.0 || conversion.width > WIDTH_RANGE.1 {
            return Err(invalid(format!(
                "width must be between {} and {}, got {}",
                WIDTH_RANGE.0, WIDTH_RANGE.1, conversion.width
            )));
        }

        // NaN fails both comparisons, so test for containment
        if !(conversion.max_size_mb >= MAX_SIZE_RANGE.0 && conversion.max_size_mb <= MAX_SIZE_RANGE.1)
        {
            return Err(invalid(format!(
                "max_size_mb must be between {} and {}, got {}",
                MAX_SIZE_RANGE.0, MAX_SIZE_RANGE.1, conversion.max_size_mb
            )));
        }

        if conversion.output_dir.as_os_str().is_empty() {
            return Err(invalid("output_dir cannot be empty".to_string()));
        }

        if self.discovery.extensions.is_empty() {
            return Err(invalid("discovery.extensions cannot be empty".to_string()));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(invalid(format!(
                "Invalid log level: {}. Valid levels: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        self.profile_table().map(|_| ())
    }

    /// Built-in profiles with the configured overrides applied
    pub fn profile_table(&self) -> Vid2GifResult<ProfileTable> {
        let defaults = ProfileTable::default();
        Ok(ProfileTable {
            high: self.profiles.high.apply(defaults.high)?,
            low: self.profiles.low.apply(defaults.low)?,
        })
    }
}

fn invalid(message: String) -> Vid2GifError {
    Vid2GifError::InvalidConfig { message }
}

/// TOML configuration adapter
#[derive(Debug, Clone, Default)]
pub struct TomlConfigAdapter {
    config: AppConfig,
    source: Option<PathBuf>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter holding the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str, origin: &Path) -> Vid2GifResult<Self> {
        let config: AppConfig =
            toml::from_str(content).map_err(|source| Vid2GifError::ConfigParse {
                path: origin.to_path_buf(),
                source,
            })?;

        Ok(Self {
            config,
            source: Some(origin.to_path_buf()),
        })
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Vid2GifResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Vid2GifError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Load the explicit file if given, else the first default path that exists
    pub fn discover(explicit: Option<&Path>) -> Vid2GifResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        DEFAULT_CONFIG_PATHS
            .iter()
            .map(Path::new)
            .find(|path| path.is_file())
            .map(Self::load)
            .unwrap_or_else(|| Ok(Self::new()))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// File the configuration came from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
