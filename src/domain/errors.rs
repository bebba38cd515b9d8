//! Domain error types
//!
//! This module defines the error hierarchy for GraphVault. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main GraphVault error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
///
/// Setup-time failures (`Authentication`, `SecretAccess`, `StorageBootstrap`,
/// `Configuration`) abort a run before any resource is touched. Everything
/// that happens per-request or per-item during a run is logged and absorbed
/// instead of propagated.
#[derive(Debug, Error)]
pub enum GraphVaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Graph token acquisition failed
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Certificate could not be retrieved from the secret store
    #[error("Secret access error: {0}")]
    SecretAccess(String),

    /// Backup container could not be checked or created
    #[error("Storage bootstrap error: {0}")]
    StorageBootstrap(String),

    /// Content store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Content store-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Container existence check failed
    #[error("Failed to check container: {0}")]
    ContainerCheckFailed(String),

    /// Container could not be created
    #[error("Failed to create container: {0}")]
    ContainerCreationFailed(String),

    /// Blob write failed
    #[error("Failed to write object: {0}")]
    WriteFailed(String),

    /// Credential could not be exchanged for a storage token
    #[error("Storage authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Object key is not usable by this backend
    #[error("Invalid object key: {0}")]
    InvalidKey(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for GraphVaultError {
    fn from(err: std::io::Error) -> Self {
        GraphVaultError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for GraphVaultError {
    fn from(err: serde_json::Error) -> Self {
        GraphVaultError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for GraphVaultError {
    fn from(err: toml::de::Error) -> Self {
        GraphVaultError::Configuration(format!("TOML parse error: {err}"))
    }
}
