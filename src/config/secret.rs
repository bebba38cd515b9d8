//! Secure credential handling using the secrecy crate
//!
//! Certificate material and bearer tokens live in memory only, wrapped in
//! `Secret<SecretValue>`. The `secrecy` crate zeros the memory when the
//! secret is dropped and redacts Debug output, so neither the PEM pulled
//! from the secret store nor the Graph token can leak into logs, memory
//! dumps, or crash reports.
//!
//! # Example
//!
//! ```rust
//! use graphvault::config::{SecretString, SecretValue};
//! use secrecy::{ExposeSecret, Secret};
//!
//! let token: SecretString = Secret::new(SecretValue::from("ey...".to_string()));
//!
//! // Must be explicit to get at the value
//! let raw = token.expose_secret();
//!
//! // Debug output is redacted
//! println!("{:?}", token); // Prints: Secret([REDACTED])
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl From<SecretValue> for String {
    fn from(mut s: SecretValue) -> Self {
        std::mem::take(&mut s.0)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string type used for credential material throughout GraphVault
pub type SecretString = Secret<SecretValue>;

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_value_roundtrip() {
        let secret: SecretString = Secret::new(SecretValue::from("pem-bytes".to_string()));
        assert_eq!(secret.expose_secret().as_ref(), "pem-bytes");
        assert!(!secret.expose_secret().is_empty());
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret: SecretString = Secret::new(SecretValue::from("hunter2".to_string()));
        let debug = format!("{secret:?}");
        assert!(!debug.contains("hunter2"));
    }
}
