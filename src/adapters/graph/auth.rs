//! Graph token acquisition
//!
//! The service identity signs in with a certificate pulled from Key Vault.
//! The exchange happens exactly once per run; the resulting bearer token is
//! cached for the run's lifetime and never refreshed. A run that outlives
//! the token's validity window degrades to ordinary 403 skips on later
//! requests, which is the accepted reference behavior.

use crate::config::{SecretString, SecretValue};
use crate::domain::{GraphVaultError, Result};
use azure_core::credentials::{Secret as AzureSecret, TokenCredential};
use azure_identity::ClientCertificateCredential;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};

/// Bearer token for the Graph API, held for the duration of one run
pub struct BearerToken {
    value: SecretString,
    /// When the token was acquired; kept so a future refresh policy has
    /// something to compare against
    pub acquired_at: DateTime<Utc>,
}

impl BearerToken {
    /// Wrap a raw token string
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Secret::new(SecretValue::from(value.into())),
            acquired_at: Utc::now(),
        }
    }

    /// Expose the raw token for request headers
    pub fn expose(&self) -> &str {
        self.value.expose_secret().as_ref()
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerToken")
            .field("value", &"[REDACTED]")
            .field("acquired_at", &self.acquired_at)
            .finish()
    }
}

/// Once-per-run Graph authenticator
pub struct GraphAuthenticator {
    tenant_id: String,
    client_id: String,
    scope: String,
}

impl GraphAuthenticator {
    /// Create an authenticator for the given tenant and client identity
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            scope: scope.into(),
        }
    }

    /// Exchange the certificate for a bearer token
    ///
    /// Takes the certificate by value: the in-memory handle is dropped (and
    /// its backing memory zeroed) on every exit path, success or failure.
    /// Nothing is ever materialized to disk.
    ///
    /// # Errors
    ///
    /// Returns [`GraphVaultError::Authentication`] if the certificate cannot
    /// be parsed or the identity provider rejects the credential. Not
    /// retried; a failure here is fatal to the run.
    pub async fn acquire_token(&self, certificate: SecretString) -> Result<BearerToken> {
        let certificate = AzureSecret::new(certificate.expose_secret().as_ref().to_string());

        let credential = ClientCertificateCredential::new(
            self.tenant_id.clone(),
            self.client_id.clone(),
            certificate,
            AzureSecret::new(String::new()),
            None,
        )
        .map_err(|e| {
            GraphVaultError::Authentication(format!(
                "Failed to create certificate credential: {e}"
            ))
        })?;

        let token = TokenCredential::get_token(&*credential, &[self.scope.as_str()], None)
            .await
            .map_err(|e| {
                GraphVaultError::Authentication(format!("Failed to acquire Graph token: {e}"))
            })?;

        tracing::info!(
            tenant_id = %self.tenant_id,
            scope = %self.scope,
            "Graph API authentication successful"
        );

        Ok(BearerToken::new(token.token.secret().to_string()))
    }
}
