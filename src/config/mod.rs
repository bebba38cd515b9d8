//! Configuration management
//!
//! TOML-backed configuration with `${VAR}` environment substitution,
//! `GRAPHVAULT_*` overrides and per-section validation. Credential material
//! never lives in plain `String`s; see [`secret`].

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, AzureConfig, AzureStorageConfig, BackupConfig, CredentialSource,
    FilesystemStorageConfig, GraphConfig, GraphVaultConfig, KeyVaultConfig, LoggingConfig,
    RetryConfig, StorageConfig, StorageTarget,
};
pub use secret::{SecretString, SecretValue};
