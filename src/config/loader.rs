//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{AzureStorageConfig, GraphVaultConfig};
use crate::domain::errors::GraphVaultError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GraphVaultConfig
/// 4. Applies environment variable overrides (GRAPHVAULT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use graphvault::config::load_config;
///
/// let config = load_config("graphvault.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GraphVaultConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GraphVaultError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GraphVaultError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: GraphVaultConfig = toml::from_str(&contents)
        .map_err(|e| GraphVaultError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        GraphVaultError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are passed through untouched. All missing variables are
/// collected and reported together.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid substitution regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GraphVaultError::Configuration(format!(
            "Missing environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies GRAPHVAULT_* environment variable overrides
///
/// These cover the opaque identifiers an operator is most likely to inject
/// from the deployment environment rather than the config file: tenant,
/// client, vault name and storage account.
fn apply_env_overrides(config: &mut GraphVaultConfig) {
    if let Ok(tenant_id) = std::env::var("GRAPHVAULT_TENANT_ID") {
        config.graph.tenant_id = tenant_id;
    }
    if let Ok(client_id) = std::env::var("GRAPHVAULT_CLIENT_ID") {
        config.graph.client_id = client_id;
    }
    if let Ok(vault_name) = std::env::var("GRAPHVAULT_KEY_VAULT_NAME") {
        config.keyvault.vault_name = vault_name;
    }
    if let Ok(account) = std::env::var("GRAPHVAULT_STORAGE_ACCOUNT") {
        match config.storage.azure {
            Some(ref mut azure) => azure.account = account,
            None => config.storage.azure = Some(AzureStorageConfig { account }),
        }
    }
}
