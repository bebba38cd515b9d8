//! Init command implementation
//!
//! Writes a starter configuration file with the built-in catalog left
//! implicit and the secrets referenced via environment variables.

use clap::Args;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output path for the configuration file
    #[arg(short, long, default_value = "graphvault.toml")]
    pub output: String,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

const TEMPLATE: &str = r#"# GraphVault configuration

[application]
log_level = "info"
dry_run = false

[graph]
tenant_id = "${GRAPHVAULT_TENANT_ID}"
client_id = "${GRAPHVAULT_CLIENT_ID}"

[graph.retry]
max_attempts = 3
retry_after_default_secs = 10

[azure]
# managed_identity in production, azure_cli for local development
credential = "managed_identity"

[keyvault]
vault_name = "${GRAPHVAULT_KEY_VAULT_NAME}"
certificate_secret_name = "entra-backup-cert"

[storage]
target = "azure"
container = "entra-backups"

[storage.azure]
account = "${GRAPHVAULT_STORAGE_ACCOUNT}"

[backup]
include_security_baselines = true
# Empty resources list means the built-in catalog of Entra and Intune
# resources. Uncomment to define your own:
# [[backup.resources]]
# name = "Entra_Users"
# path = "/users?$top=100"
# api_version = "v1.0"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#;

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let path = Path::new(&self.output);

        if path.exists() && !self.force {
            eprintln!(
                "Refusing to overwrite existing file {} (use --force)",
                path.display()
            );
            return Ok(2);
        }

        std::fs::write(path, TEMPLATE)?;
        println!("Wrote starter configuration to {}", path.display());
        Ok(0)
    }
}
