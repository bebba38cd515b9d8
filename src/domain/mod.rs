//! Domain models and types for GraphVault.
//!
//! This module contains the core domain types and business rules:
//!
//! - **Resource catalog** ([`ResourceSpec`], [`ApiVersion`], [`default_catalog`])
//! - **Error types** ([`GraphVaultError`], [`StorageError`])
//! - **Per-item outcomes** ([`ItemOutcome`])
//! - **Result type alias** ([`Result`])
//!
//! Exported items themselves are untyped `serde_json::Value`s: the engine
//! must tolerate any object shape the API returns and only peeks at the
//! optional `id`/`displayName`/`name` fields when deriving storage keys.

pub mod errors;
pub mod outcome;
pub mod resource;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{GraphVaultError, StorageError};
pub use outcome::ItemOutcome;
pub use resource::{default_catalog, ApiVersion, ResourceSpec};
pub use result::Result;
