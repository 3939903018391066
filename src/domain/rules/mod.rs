// Domain rules - Business logic and policies

use std::path::{Path, PathBuf};

use crate::domain::model::*;

/// Immutable per-mode encode parameters, fixed when the process starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileTable {
    pub high: QualityProfile,
    pub low: QualityProfile,
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self {
            high: QualityProfile {
                mode: QualityMode::High,
                frame_rate: 15,
                scale_filter: ScaleAlgorithm::Lanczos,
                dither: DitherSpec::Bayer { scale: 5 },
            },
            low: QualityProfile {
                mode: QualityMode::Low,
                frame_rate: 10,
                scale_filter: ScaleAlgorithm::Bicubic,
                dither: DitherSpec::None,
            },
        }
    }
}

/// Maps a quality mode onto its profile
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    table: ProfileTable,
}

impl ProfileResolver {
    pub fn new(table: ProfileTable) -> Self {
        Self { table }
    }

    /// Total and pure: every mode has exactly one profile
    pub fn resolve(&self, mode: QualityMode) -> QualityProfile {
        match mode {
            QualityMode::High => self.table.high,
            QualityMode::Low => self.table.low,
        }
    }

    pub fn table(&self) -> &ProfileTable {
        &self.table
    }
}

impl Default for ProfileResolver {
    fn default() -> Self {
        Self::new(ProfileTable::default())
    }
}

/// Size classification against the configured threshold
pub struct SizePolicy;

impl SizePolicy {
    /// Binary megabytes (bytes / 1024 / 1024)
    pub fn bytes_to_mb(bytes: u64) -> f64 {
        bytes as f64 / BYTES_PER_MB
    }

    /// Boundary is inclusive: a file exactly at the threshold conforms
    pub fn is_conformant(size_mb: f64, threshold_mb: f64) -> bool {
        size_mb <= threshold_mb
    }
}

/// Highest numeric suffix tried before giving up on a unique name
pub const MAX_NAME_SUFFIX: u32 = 999;

/// How the naming resolver arrived at its answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedName {
    /// `<base>.<ext>`, either free or overwrite allowed
    Original(PathBuf),
    /// `<base>_<n>.<ext>`, the first free suffix
    Suffixed { path: PathBuf, suffix: u32 },
    /// Every suffix up to the limit was taken; `<base>.<ext>` will be overwritten
    Exhausted(PathBuf),
}

impl ResolvedName {
    pub fn path(&self) -> &Path {
        match self {
            ResolvedName::Original(path) | ResolvedName::Exhausted(path) => path,
            ResolvedName::Suffixed { path, .. } => path,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            ResolvedName::Original(path) | ResolvedName::Exhausted(path) => path,
            ResolvedName::Suffixed { path, .. } => path,
        }
    }
}

/// Collision-safe output naming
///
/// Pure over the `exists` predicate, so it does not care how existence
/// was established. Not safe under concurrent writers.
pub struct NamingResolver;

impl NamingResolver {
    /// Every path `resolve` may probe, in probing order
    pub fn candidates(dir: &Path, base: &str, extension: &str) -> impl Iterator<Item = PathBuf> {
        let dir = dir.to_path_buf();
        let base = base.to_string();
        let extension = extension.to_string();
        (0..=MAX_NAME_SUFFIX).map(move |suffix| match suffix {
            0 => dir.join(format!("{}.{}", base, extension)),
            n => dir.join(format!("{}_{}.{}", base, n, extension)),
        })
    }

    pub fn resolve(
        dir: &Path,
        base: &str,
        extension: &str,
        overwrite: bool,
        exists: impl Fn(&Path) -> bool,
    ) -> ResolvedName {
        let candidate = dir.join(format!("{}.{}", base, extension));
        if overwrite || !exists(&candidate) {
            return ResolvedName::Original(candidate);
        }

        for suffix in 1..=MAX_NAME_SUFFIX {
            let path = dir.join(format!("{}_{}.{}", base, suffix, extension));
            if !exists(&path) {
                return ResolvedName::Suffixed { path, suffix };
            }
        }

        ResolvedName::Exhausted(candidate)
    }
}

#[cfg(test)]
mod tests;
