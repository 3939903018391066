//! Input discovery by extension allowlist

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Vid2GifError, Vid2GifResult};

/// Lowercase an extension and drop its leading dot (`.MP4` -> `mp4`)
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

/// Position of the path's extension in the allowlist, if it is listed
fn allowlist_rank(path: &Path, allowlist: &[String]) -> Option<usize> {
    let extension = path.extension()?.to_string_lossy().to_lowercase();
    allowlist.iter().position(|allowed| *allowed == extension)
}

/// Find supported videos directly inside `dir` (no recursion)
///
/// Files are grouped by the allowlist order and sorted by name within each
/// extension, so the batch order is stable across runs.
pub fn discover_inputs(dir: &Path, extensions: &[String]) -> Vid2GifResult<Vec<PathBuf>> {
    let allowlist: Vec<String> = extensions
        .iter()
        .map(|ext| normalize_extension(ext))
        .filter(|ext| !ext.is_empty())
        .collect();

    let mut found: Vec<(usize, PathBuf)> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| Vid2GifError::Discovery {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        // Follows symlinks; dangling links are skipped
        if !entry.path().is_file() {
            continue;
        }
        if let Some(rank) = allowlist_rank(entry.path(), &allowlist) {
            found.push((rank, entry.into_path()));
        }
    }

    found.sort_by(|(rank_a, path_a), (rank_b, path_b)| {
        rank_a
            .cmp(rank_b)
            .then_with(|| path_a.file_name().cmp(&path_b.file_name()))
    });

    debug!("Discovered {} input(s) in {}", found.len(), dir.display());
    Ok(found.into_iter().map(|(_, path)| path).collect())
}
