//! Azure Blob Storage backend
//!
//! Talks to the Blob service REST API directly with `reqwest`, using a
//! bearer token from the workload credential. Blob keys contain spaces and
//! parentheses, so every path segment is percent-encoded through `url`'s
//! path-segment builder rather than string concatenation.

use super::ContentStore;
use crate::domain::{GraphVaultError, Result, StorageError};
use async_trait::async_trait;
use azure_core::credentials::TokenCredential;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const STORAGE_SCOPE: &str = "https://storage.azure.com/.default";
// Minimum service version that accepts OAuth bearer tokens.
const STORAGE_API_VERSION: &str = "2021-08-06";

/// Blob Storage content store
#[derive(Debug)]
pub struct AzureBlobStore {
    endpoint: String,
    container: String,
    credential: Arc<dyn TokenCredential>,
    http_client: reqwest::Client,
}

impl AzureBlobStore {
    /// Create a store for `https://{account}.blob.core.windows.net/{container}`
    pub fn new(
        account: &str,
        container: &str,
        credential: Arc<dyn TokenCredential>,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                GraphVaultError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            endpoint: format!("https://{account}.blob.core.windows.net"),
            container: container.to_string(),
            credential,
            http_client,
        })
    }

    async fn access_token(&self) -> Result<String> {
        let token = TokenCredential::get_token(&*self.credential, &[STORAGE_SCOPE], None)
            .await
            .map_err(|e| {
                GraphVaultError::Storage(StorageError::AuthenticationFailed(format!(
                    "Failed to acquire storage token: {e}"
                )))
            })?;
        Ok(token.token.secret().to_string())
    }
}

#[async_trait]
impl ContentStore for AzureBlobStore {
    async fn container_exists(&self) -> Result<bool> {
        let token = self.access_token().await?;

        let response = self
            .http_client
            .get(container_url(&self.endpoint, &self.container))
            .header("Authorization", format!("Bearer {token}"))
            .header("x-ms-version", STORAGE_API_VERSION)
            .send()
            .await
            .map_err(|e| {
                GraphVaultError::Storage(StorageError::ContainerCheckFailed(e.to_string()))
            })?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(GraphVaultError::Storage(StorageError::ContainerCheckFailed(
                    format!("status {status}: {body}"),
                )))
            }
        }
    }

    async fn create_container(&self) -> Result<()> {
        let token = self.access_token().await?;

        let response = self
            .http_client
            .put(container_url(&self.endpoint, &self.container))
            .header("Authorization", format!("Bearer {token}"))
            .header("x-ms-version", STORAGE_API_VERSION)
            .send()
            .await
            .map_err(|e| {
                GraphVaultError::Storage(StorageError::ContainerCreationFailed(e.to_string()))
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(container = %self.container, "Created backup container");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(GraphVaultError::Storage(
                StorageError::ContainerCreationFailed(format!("status {status}: {body}")),
            ))
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let token = self.access_token().await?;
        let url = blob_url(&self.endpoint, &self.container, key)?;

        let response = self
            .http_client
            .put(url)
            .header("Authorization", format!("Bearer {token}"))
            .header("x-ms-version", STORAGE_API_VERSION)
            .header("x-ms-blob-type", "BlockBlob")
            .header("Content-Type", "application/json")
            .body(bytes)
            .send()
            .await
            .map_err(|e| GraphVaultError::Storage(StorageError::WriteFailed(e.to_string())))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(GraphVaultError::Storage(StorageError::WriteFailed(format!(
                "status {status} for key '{key}': {body}"
            ))))
        }
    }
}

fn container_url(endpoint: &str, container: &str) -> String {
    format!("{endpoint}/{container}?restype=container")
}

/// Build the percent-encoded blob URL for a forward-slash-delimited key
fn blob_url(endpoint: &str, container: &str, key: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| GraphVaultError::Configuration(format!("Invalid storage endpoint: {e}")))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| GraphVaultError::Storage(StorageError::InvalidKey(key.to_string())))?;
        segments.push(container);
        for segment in key.split('/') {
            segments.push(segment);
        }
    }
    Ok(url)
}
