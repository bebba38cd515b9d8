//! Graph API integration
//!
//! Three layers, bottom-up: [`auth`] exchanges the Key Vault certificate
//! for a run-scoped bearer token, [`client`] wraps single GET requests in
//! the status-driven retry policy, and [`paginator`] turns a list endpoint
//! into a lazy item sequence by following continuation cursors.

pub mod auth;
pub mod client;
pub mod paginator;

pub use auth::{BearerToken, GraphAuthenticator};
pub use client::GraphClient;
pub use paginator::ItemStream;
