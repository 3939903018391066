// Local filesystem adapter - File system operations through tokio::fs

use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
#[derive(Debug, Default, Clone)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn file_exists(&self, path: &Path) -> Result<bool, DomainError> {
        fs::try_exists(path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to stat {}: {}", path.display(), e)))
    }

    async fn get_file_size(&self, path: &Path) -> Result<u64, DomainError> {
        let metadata = fs::metadata(path).await.map_err(|e| {
            DomainError::FsFail(format!("Failed to get file size of {}: {}", path.display(), e))
        })?;
        Ok(metadata.len())
    }

    async fn create_directory(&self, path: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(path).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_size_and_existence() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("clip.gif");
        std::fs::write(&file, vec![0u8; 2048]).unwrap();

        let adapter = LocalFsAdapter::new();
        assert!(adapter.file_exists(&file).await.unwrap());
        assert_eq!(adapter.get_file_size(&file).await.unwrap(), 2048);
        assert!(!adapter
            .file_exists(&temp_dir.path().join("missing.gif"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_size_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = LocalFsAdapter::new();
        assert!(adapter
            .get_file_size(&temp_dir.path().join("missing.gif"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_create_directory_is_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("out").join("gifs");

        let adapter = LocalFsAdapter::new();
        adapter.create_directory(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
