//! Filesystem backend
//!
//! Maps the hierarchical key space onto a local directory tree under
//! `{root}/{container}`. Used for local development runs and as the store
//! the integration tests exercise.

use super::ContentStore;
use crate::domain::{Result, StorageError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Local directory content store
#[derive(Debug)]
pub struct FileStore {
    container_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `{root}/{container}`
    pub fn new(root: impl AsRef<Path>, container: &str) -> Self {
        Self {
            container_dir: root.as_ref().join(container),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let mut path = self.container_dir.clone();
        for segment in key.split('/') {
            // Keys are derived from sanitized labels, but the store still
            // refuses anything that would escape the container directory.
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(StorageError::InvalidKey(key.to_string()).into());
            }
            path.push(segment);
        }
        Ok(path)
    }
}

#[async_trait]
impl ContentStore for FileStore {
    async fn container_exists(&self) -> Result<bool> {
        Ok(tokio::fs::try_exists(&self.container_dir)
            .await
            .map_err(|e| StorageError::ContainerCheckFailed(e.to_string()))?)
    }

    async fn create_container(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.container_dir)
            .await
            .map_err(|e| StorageError::ContainerCreationFailed(e.to_string()))?;
        tracing::info!(path = %self.container_dir.display(), "Created backup directory");
        Ok(())
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("{}: {e}", path.display())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GraphVaultError;

    #[tokio::test]
    async fn test_put_creates_nested_dirs_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "entra-backups");
        store.ensure_container().await.unwrap();

        let key = "2026-08-25/Entra_Users/Alice (abc).json";
        store.put(key, b"first".to_vec()).await.unwrap();
        store.put(key, b"second".to_vec()).await.unwrap();

        let written = std::fs::read(dir.path().join("entra-backups").join(key)).unwrap();
        assert_eq!(written, b"second");
    }

    #[tokio::test]
    async fn test_ensure_container_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "entra-backups");
        assert!(!store.container_exists().await.unwrap());
        store.ensure_container().await.unwrap();
        assert!(store.container_exists().await.unwrap());
        store.ensure_container().await.unwrap();
    }

    #[tokio::test]
    async fn test_traversal_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "entra-backups");
        let result = store.put("../escape.json", b"x".to_vec()).await;
        assert!(matches!(result, Err(GraphVaultError::Storage(_))));
    }
}
