//! Status-driven retry client for Graph GET requests
//!
//! One outbound request wrapped in the retry/backoff policy of the backup
//! engine. The policy is evaluated per attempt, with a fixed total attempt
//! budget:
//!
//! | Condition            | Action                                          |
//! |----------------------|-------------------------------------------------|
//! | 200                  | return parsed body                              |
//! | 400, 403, 404        | warn, give up on this URL                       |
//! | 429                  | sleep for `Retry-After` (default 10s), retry    |
//! | any other status     | warn, give up on this URL                       |
//! | transport error      | retry immediately                               |
//!
//! Exhausting the budget returns `None` like a terminal refusal does;
//! callers cannot tell the two apart and treat both as "no more data for
//! this page sequence". The paginator records the early end so the run
//! summary can report it.

use super::auth::BearerToken;
use crate::config::RetryConfig;
use crate::domain::{GraphVaultError, Result};
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::StatusCode;
use std::time::Duration;

/// HTTP client carrying the run's bearer token and retry policy
pub struct GraphClient {
    http_client: reqwest::Client,
    token: BearerToken,
    max_attempts: u32,
    retry_after_default: Duration,
}

impl GraphClient {
    /// Create a client from the run token and retry configuration
    pub fn new(token: BearerToken, retry: &RetryConfig, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                GraphVaultError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            http_client,
            token,
            max_attempts: retry.max_attempts,
            retry_after_default: Duration::from_secs(retry.retry_after_default_secs),
        })
    }

    /// GET a URL and parse the JSON body, applying the retry policy
    ///
    /// Returns `None` on non-retryable errors and on budget exhaustion;
    /// per-request failures never abort the run.
    pub async fn get_json(&self, url: &str) -> Option<serde_json::Value> {
        let mut attempts = self.max_attempts;

        while attempts > 0 {
            let response = match self
                .http_client
                .get(url)
                .header(AUTHORIZATION, format!("Bearer {}", self.token.expose()))
                .header(CONTENT_TYPE, "application/json")
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    attempts -= 1;
                    tracing::warn!(url, error = %e, "Connection error, retrying");
                    continue;
                }
            };

            match response.status() {
                StatusCode::OK => match response.json::<serde_json::Value>().await {
                    Ok(body) => return Some(body),
                    Err(e) => {
                        tracing::warn!(url, error = %e, "Failed to parse response body");
                        return None;
                    }
                },
                StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                    tracing::warn!(
                        status = response.status().as_u16(),
                        url,
                        "API error, skipping"
                    );
                    return None;
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    let delay = retry_after_delay(response.headers(), self.retry_after_default);
                    tracing::debug!(
                        url,
                        delay_secs = delay.as_secs(),
                        "Rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempts -= 1;
                }
                status => {
                    tracing::warn!(status = status.as_u16(), url, "Unexpected status, skipping");
                    return None;
                }
            }
        }

        tracing::debug!(url, "Retry budget exhausted");
        None
    }
}

/// Parse the Retry-After header (in seconds), falling back to `default`
fn retry_after_delay(headers: &HeaderMap, default: Duration) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}
