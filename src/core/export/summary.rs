//! Backup run summary and reporting
//!
//! Per-request and per-item failures never abort a run, so the summary is
//! the only place the silent losses become visible. "Ran to completion" is
//! the sole success signal; [`BackupSummary::is_complete`] distinguishes a
//! clean run from a lossy one after the fact.

use crate::domain::ItemOutcome;
use std::time::Duration;

/// Outcome of exporting one catalog resource (or the baseline traversal)
#[derive(Debug, Clone)]
pub struct ResourceReport {
    /// Resource / category name
    pub name: String,

    /// Items written to the content store
    pub saved: usize,

    /// Items intentionally not written (dry-run)
    pub skipped: usize,

    /// Items whose write failed; lost from this backup
    pub failed: usize,

    /// Whether a page sequence ended early on a request failure
    pub truncated: bool,
}

impl ResourceReport {
    /// Create an empty report for a resource
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            saved: 0,
            skipped: 0,
            failed: 0,
            truncated: false,
        }
    }

    /// Fold one item outcome into the counts
    pub fn record(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Saved { .. } => self.saved += 1,
            ItemOutcome::Skipped { .. } => self.skipped += 1,
            ItemOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Summary of one backup run
#[derive(Debug, Clone, Default)]
pub struct BackupSummary {
    /// One report per exported resource, in catalog order
    pub reports: Vec<ResourceReport>,

    /// Duration of the run
    pub duration: Duration,
}

impl BackupSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resource report
    pub fn add_report(&mut self, report: ResourceReport) {
        self.reports.push(report);
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Total items written across all resources
    pub fn total_saved(&self) -> usize {
        self.reports.iter().map(|r| r.saved).sum()
    }

    /// Total items lost to write failures
    pub fn total_failed(&self) -> usize {
        self.reports.iter().map(|r| r.failed).sum()
    }

    /// Total items skipped (dry-run)
    pub fn total_skipped(&self) -> usize {
        self.reports.iter().map(|r| r.skipped).sum()
    }

    /// True if nothing was lost and no sequence ended early
    pub fn is_complete(&self) -> bool {
        self.total_failed() == 0 && !self.reports.iter().any(|r| r.truncated)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            resources = self.reports.len(),
            saved = self.total_saved(),
            skipped = self.total_skipped(),
            failed = self.total_failed(),
            complete = self.is_complete(),
            duration_secs = self.duration.as_secs(),
            "Backup completed"
        );

        for report in &self.reports {
            if report.failed > 0 || report.truncated {
                tracing::warn!(
                    resource = %report.name,
                    saved = report.saved,
                    failed = report.failed,
                    truncated = report.truncated,
                    "Resource exported with losses"
                );
            }
        }
    }
}
