//! Workload credential selection
//!
//! Key Vault and Blob Storage are authenticated with the identity the
//! process runs as (managed identity in production, the Azure CLI login for
//! local development). Graph uses its own certificate credential; see
//! [`crate::adapters::graph::auth`].

use crate::config::CredentialSource;
use crate::domain::{GraphVaultError, Result};
use azure_core::credentials::TokenCredential;
use azure_identity::{AzureCliCredential, ManagedIdentityCredential};
use std::sync::Arc;

/// Build the credential used for Key Vault and Storage requests
pub fn workload_credential(source: CredentialSource) -> Result<Arc<dyn TokenCredential>> {
    match source {
        CredentialSource::ManagedIdentity => {
            let credential = ManagedIdentityCredential::new(None).map_err(|e| {
                GraphVaultError::Authentication(format!(
                    "Failed to create managed identity credential: {e}"
                ))
            })?;
            Ok(credential as Arc<dyn TokenCredential>)
        }
        CredentialSource::AzureCli => {
            let credential = AzureCliCredential::new(None).map_err(|e| {
                GraphVaultError::Authentication(format!(
                    "Failed to create Azure CLI credential: {e}"
                ))
            })?;
            Ok(credential as Arc<dyn TokenCredential>)
        }
    }
}
