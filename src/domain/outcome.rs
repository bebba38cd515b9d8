//! Per-item persistence outcome
//!
//! The reference behavior for this kind of backup is fire-and-forget: a
//! failed write is logged and the item is simply missing from the backup.
//! GraphVault keeps the run-continues semantics but makes the silence
//! observable by returning an explicit outcome per item, which the
//! orchestrator aggregates into the run summary.

/// Result of attempting to persist one exported item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Item was written to the content store under `key`
    Saved { key: String },

    /// Item was intentionally not written (e.g. dry-run mode)
    Skipped { reason: String },

    /// Write was attempted and failed; the item is lost from this backup
    Failed { reason: String },
}

impl ItemOutcome {
    /// Build a skipped outcome
    pub fn skipped(reason: impl Into<String>) -> Self {
        ItemOutcome::Skipped {
            reason: reason.into(),
        }
    }

    /// Build a failed outcome
    pub fn failed(reason: impl Into<String>) -> Self {
        ItemOutcome::Failed {
            reason: reason.into(),
        }
    }

    /// True if the item landed in the store
    pub fn is_saved(&self) -> bool {
        matches!(self, ItemOutcome::Saved { .. })
    }
}
