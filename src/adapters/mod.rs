//! External integrations
//!
//! - [`graph`] - Graph API authentication, retry client and pagination
//! - [`keyvault`] - certificate retrieval from the secret store
//! - [`storage`] - content store backends (Azure Blob, filesystem)
//! - [`identity`] - workload credential selection

pub mod graph;
pub mod identity;
pub mod keyvault;
pub mod storage;
