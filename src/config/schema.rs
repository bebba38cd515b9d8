//! Configuration schema types
//!
//! This module defines the configuration structure for GraphVault. The
//! structure maps 1:1 to the TOML file; every section carries its own
//! `validate()` so a bad file fails before any Azure call is made.

use crate::domain::resource::{default_catalog, ResourceSpec};
use serde::{Deserialize, Serialize};

/// Content store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageTarget {
    /// Azure Blob Storage
    Azure,
    /// Local directory (development and tests)
    Filesystem,
}

/// How the workload authenticates to Key Vault and Storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    /// Azure Managed Identity (production default)
    #[default]
    ManagedIdentity,
    /// Azure CLI login (local development)
    AzureCli,
}

/// Main GraphVault configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphVaultConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Graph API and token exchange settings
    pub graph: GraphConfig,

    /// Workload credential selection for Key Vault and Storage
    #[serde(default)]
    pub azure: AzureConfig,

    /// Secret store holding the signing certificate
    pub keyvault: KeyVaultConfig,

    /// Content store configuration
    pub storage: StorageConfig,

    /// Catalog and traversal settings
    #[serde(default)]
    pub backup: BackupConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GraphVaultConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.graph.validate()?;
        self.keyvault.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (fetch everything, write nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Graph API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Directory tenant the service identity belongs to
    pub tenant_id: String,

    /// Application (client) identifier of the service identity
    pub client_id: String,

    /// Stable API base URL
    #[serde(default = "default_base_url_v1")]
    pub base_url_v1: String,

    /// Pre-release API base URL
    #[serde(default = "default_base_url_beta")]
    pub base_url_beta: String,

    /// Token audience requested during the credential exchange
    #[serde(default = "default_graph_scope")]
    pub scope: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry/backoff policy
    #[serde(default)]
    pub retry: RetryConfig,
}

impl GraphConfig {
    fn validate(&self) -> Result<(), String> {
        if self.tenant_id.trim().is_empty() {
            return Err("graph.tenant_id must not be empty".to_string());
        }
        if self.client_id.trim().is_empty() {
            return Err("graph.client_id must not be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("graph.timeout_seconds must be greater than 0".to_string());
        }
        self.retry.validate()
    }
}

/// Retry configuration for the Graph HTTP client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total request attempts before giving up on a URL
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff applied on 429 when the server sends no Retry-After header
    #[serde(default = "default_retry_after_secs")]
    pub retry_after_default_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_after_default_secs: default_retry_after_secs(),
        }
    }
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("graph.retry.max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Workload credential configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AzureConfig {
    /// Credential used for Key Vault and Storage (not for Graph)
    #[serde(default)]
    pub credential: CredentialSource,
}

/// Key Vault configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyVaultConfig {
    /// Vault name, expanded to `https://{name}.vault.azure.net`
    pub vault_name: String,

    /// Secret holding the full certificate including the private key
    #[serde(default = "default_certificate_secret_name")]
    pub certificate_secret_name: String,
}

impl KeyVaultConfig {
    fn validate(&self) -> Result<(), String> {
        if self.vault_name.trim().is_empty() {
            return Err("keyvault.vault_name must not be empty".to_string());
        }
        if self.certificate_secret_name.trim().is_empty() {
            return Err("keyvault.certificate_secret_name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Content store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend selection (azure or filesystem)
    pub target: StorageTarget,

    /// Container (or top-level directory) holding the backups
    #[serde(default = "default_container")]
    pub container: String,

    /// Azure Blob Storage settings (required if target = azure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureStorageConfig>,

    /// Filesystem settings (required if target = filesystem)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesystem: Option<FilesystemStorageConfig>,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.container.trim().is_empty() {
            return Err("storage.container must not be empty".to_string());
        }

        // Only the active backend's section is validated; both may be present
        // in the file.
        match self.target {
            StorageTarget::Azure => {
                if let Some(ref config) = self.azure {
                    config.validate()?;
                } else {
                    return Err(
                        "storage.azure configuration is required when target = 'azure'".to_string()
                    );
                }
            }
            StorageTarget::Filesystem => {
                if let Some(ref config) = self.filesystem {
                    config.validate()?;
                } else {
                    return Err(
                        "storage.filesystem configuration is required when target = 'filesystem'"
                            .to_string(),
                    );
                }
            }
        }
        Ok(())
    }
}

/// Azure Blob Storage backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureStorageConfig {
    /// Storage account name, expanded to `https://{account}.blob.core.windows.net`
    pub account: String,
}

impl AzureStorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.account.trim().is_empty() {
            return Err("storage.azure.account must not be empty".to_string());
        }
        Ok(())
    }
}

/// Filesystem backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesystemStorageConfig {
    /// Directory the container directory is created under
    pub root_path: String,
}

impl FilesystemStorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.root_path.trim().is_empty() {
            return Err("storage.filesystem.root_path must not be empty".to_string());
        }
        Ok(())
    }
}

/// Catalog and traversal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Resource catalog; empty means the built-in catalog
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,

    /// Whether to run the two-level security-baseline traversal
    #[serde(default = "default_true")]
    pub include_security_baselines: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            resources: Vec::new(),
            include_security_baselines: true,
        }
    }
}

impl BackupConfig {
    /// Resolve the effective catalog for this run
    pub fn catalog(&self) -> Vec<ResourceSpec> {
        if self.resources.is_empty() {
            default_catalog()
        } else {
            self.resources.clone()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a rolling file in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for rolling log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy (daily or hourly)
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url_v1() -> String {
    "https://graph.microsoft.com/v1.0".to_string()
}

fn default_base_url_beta() -> String {
    "https://graph.microsoft.com/beta".to_string()
}

fn default_graph_scope() -> String {
    "https://graph.microsoft.com/.default".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_after_secs() -> u64 {
    10
}

fn default_certificate_secret_name() -> String {
    "entra-backup-cert".to_string()
}

fn default_container() -> String {
    "entra-backups".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::ApiVersion;

    fn minimal_config() -> GraphVaultConfig {
        GraphVaultConfig {
            application: ApplicationConfig::default(),
            graph: GraphConfig {
                tenant_id: "tenant".to_string(),
                client_id: "client".to_string(),
                base_url_v1: default_base_url_v1(),
                base_url_beta: default_base_url_beta(),
                scope: default_graph_scope(),
                timeout_seconds: 30,
                retry: RetryConfig::default(),
            },
            azure: AzureConfig::default(),
            keyvault: KeyVaultConfig {
                vault_name: "vault".to_string(),
                certificate_secret_name: default_certificate_secret_name(),
            },
            storage: StorageConfig {
                target: StorageTarget::Filesystem,
                container: default_container(),
                azure: None,
                filesystem: Some(FilesystemStorageConfig {
                    root_path: "/tmp/backups".to_string(),
                }),
            },
            backup: BackupConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_minimal_config_validates() {
        assert!(minimal_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = minimal_config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_azure_target_requires_azure_section() {
        let mut config = minimal_config();
        config.storage.target = StorageTarget::Azure;
        config.storage.azure = None;
        let err = config.validate().unwrap_err();
        assert!(err.contains("storage.azure"));
    }

    #[test]
    fn test_zero_retry_attempts_rejected() {
        let mut config = minimal_config();
        config.graph.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_tenant_rejected() {
        let mut config = minimal_config();
        config.graph.tenant_id = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_catalog_falls_back_to_builtin() {
        let backup = BackupConfig::default();
        assert_eq!(backup.catalog().len(), 14);

        let backup = BackupConfig {
            resources: vec![ResourceSpec::new("Only", "/only", ApiVersion::V1)],
            include_security_baselines: false,
        };
        assert_eq!(backup.catalog().len(), 1);
    }

    #[test]
    fn test_credential_source_default() {
        assert_eq!(
            CredentialSource::default(),
            CredentialSource::ManagedIdentity
        );
    }
}
