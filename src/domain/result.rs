//! Result type alias for GraphVault operations

use super::errors::GraphVaultError;

/// Convenience alias used by all fallible GraphVault operations
pub type Result<T> = std::result::Result<T, GraphVaultError>;
