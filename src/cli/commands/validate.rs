//! Validate-config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match load_config(config_path) {
            Ok(config) => {
                let catalog = config.backup.catalog();
                println!("Configuration is valid: {config_path}");
                println!(
                    "  storage target: {:?}, container: {}",
                    config.storage.target, config.storage.container
                );
                println!("  catalog resources: {}", catalog.len());
                Ok(0)
            }
            Err(e) => {
                eprintln!("Configuration is invalid: {e}");
                Ok(2)
            }
        }
    }
}
