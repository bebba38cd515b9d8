//! Backup command implementation
//!
//! The scheduler-facing entry point: load configuration, bootstrap the
//! orchestrator (fatal on any setup failure), run the export. A completed
//! run exits 0 even when items were dropped along the way; the summary is
//! the record of partial loss.

use crate::config::load_config;
use crate::core::export::BackupOrchestrator;
use clap::Args;

/// Arguments for the backup command
#[derive(Args, Debug)]
pub struct BackupArgs {
    /// Fetch everything but write nothing to the content store
    #[arg(long)]
    pub dry_run: bool,

    /// Export only the named catalog resource(s) (comma-separated)
    #[arg(long)]
    pub resource: Option<String>,

    /// Skip the security-baseline traversal
    #[arg(long)]
    pub no_baselines: bool,
}

impl BackupArgs {
    /// Execute the backup command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting backup command");

        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if self.no_baselines {
            config.backup.include_security_baselines = false;
        }

        if let Some(names) = &self.resource {
            let wanted: Vec<String> = names.split(',').map(|s| s.trim().to_string()).collect();
            tracing::info!(resources = ?wanted, "Restricting catalog from CLI");
            let catalog = config
                .backup
                .catalog()
                .into_iter()
                .filter(|spec| wanted.iter().any(|name| name == &spec.name))
                .collect::<Vec<_>>();
            if catalog.is_empty() {
                eprintln!("No catalog resource matches: {names}");
                return Ok(2);
            }
            config.backup.resources = catalog;
        }

        // Setup failures (secret access, auth, storage bootstrap) propagate
        // and abort before any resource is touched.
        let orchestrator = BackupOrchestrator::bootstrap(&config).await?;
        let summary = orchestrator.run().await;

        println!(
            "Backup finished: {} saved, {} skipped, {} failed across {} resources in {}s",
            summary.total_saved(),
            summary.total_skipped(),
            summary.total_failed(),
            summary.reports.len(),
            summary.duration.as_secs()
        );

        if !summary.is_complete() {
            println!("Warning: some items were dropped; see the log for details");
        }

        Ok(0)
    }
}
