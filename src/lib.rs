// GraphVault - Microsoft Graph Tenant Configuration Backup
// Copyright (c) 2026 GraphVault Contributors
// Licensed under the MIT License

//! # GraphVault - Microsoft Graph tenant configuration backup
//!
//! GraphVault performs a scheduled, unattended export of configuration and
//! identity objects from Microsoft Graph (Entra ID and Intune, stable and
//! beta surfaces) into immutable, timestamped JSON files in object storage.
//!
//! ## Overview
//!
//! One run authenticates once with a certificate pulled from Azure Key
//! Vault, walks a configurable catalog of API resources following
//! server-side pagination cursors, applies a status-driven retry/backoff
//! policy for rate-limited and transient errors, and persists each fetched
//! object under a deterministic path:
//!
//! ```text
//! {run-date}/{category}/{label} ({id}).json
//! ```
//!
//! Transient and per-item failures never abort a run; the run summary
//! records what was lost.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export engine (orchestrator, writer, summary)
//! - [`adapters`] - External integrations (Graph, Key Vault, content stores)
//! - [`domain`] - Core domain types, catalog and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graphvault::config::load_config;
//! use graphvault::core::export::BackupOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("graphvault.toml")?;
//!
//!     // Fatal setup errors (auth, secret access, storage bootstrap)
//!     // surface here, before any resource is touched.
//!     let orchestrator = BackupOrchestrator::bootstrap(&config).await?;
//!
//!     let summary = orchestrator.run().await;
//!     println!("Saved {} objects", summary.total_saved());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`] with the
//! [`domain::GraphVaultError`] taxonomy. Setup errors abort the run;
//! everything per-request or per-item is logged, counted in the summary,
//! and absorbed.
//!
//! ## Logging
//!
//! GraphVault uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(resource = "Entra_Users", "Exporting resource");
//! warn!(status = 403, url = "...", "API error, skipping");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
