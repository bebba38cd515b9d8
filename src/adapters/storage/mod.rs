//! Content store backends
//!
//! The export engine writes through the [`ContentStore`] trait and never
//! sees which backend it talks to. The factory selects a backend from the
//! `[storage]` configuration section: Azure Blob Storage for production,
//! a local directory for development and tests.

pub mod blob;
pub mod filesystem;

use crate::config::{StorageConfig, StorageTarget};
use crate::domain::{GraphVaultError, Result, StorageError};
use async_trait::async_trait;
use azure_core::credentials::TokenCredential;
use std::sync::Arc;

pub use blob::AzureBlobStore;
pub use filesystem::FileStore;

/// Hierarchical key-value store holding the backup output
///
/// Keys are forward-slash-delimited strings. Writes overwrite: re-running a
/// backup on the same day replaces prior partial results rather than
/// erroring.
#[async_trait]
pub trait ContentStore: Send + Sync + std::fmt::Debug {
    /// Whether the backup container already exists
    async fn container_exists(&self) -> Result<bool>;

    /// Create the backup container
    async fn create_container(&self) -> Result<()>;

    /// Write an object, overwriting any existing object at `key`
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Create the container if it is missing
    ///
    /// Part of run setup; a failure here is fatal to the run.
    async fn ensure_container(&self) -> Result<()> {
        if !self.container_exists().await? {
            self.create_container().await?;
        }
        Ok(())
    }
}

/// Build the content store selected by the configuration
///
/// `credential` is required for the Azure backend and ignored by the
/// filesystem backend.
pub fn create_store(
    config: &StorageConfig,
    credential: Option<Arc<dyn TokenCredential>>,
) -> Result<Arc<dyn ContentStore>> {
    match config.target {
        StorageTarget::Azure => {
            let azure = config.azure.as_ref().ok_or_else(|| {
                GraphVaultError::Configuration(
                    "storage.azure configuration is required when target = 'azure'".to_string(),
                )
            })?;
            let credential = credential.ok_or_else(|| {
                GraphVaultError::Storage(StorageError::AuthenticationFailed(
                    "No workload credential available for Blob Storage".to_string(),
                ))
            })?;
            let store = AzureBlobStore::new(&azure.account, &config.container, credential)?;
            Ok(Arc::new(store))
        }
        StorageTarget::Filesystem => {
            let filesystem = config.filesystem.as_ref().ok_or_else(|| {
                GraphVaultError::Configuration(
                    "storage.filesystem configuration is required when target = 'filesystem'"
                        .to_string(),
                )
            })?;
            let store = FileStore::new(&filesystem.root_path, &config.container);
            Ok(Arc::new(store))
        }
    }
}
