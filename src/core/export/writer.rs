//! Object writer - derives storage keys and persists exported items
//!
//! Every fetched object lands under a deterministic, collision-resistant
//! key: `{run_date}/{category}/{label} ({id}).json`. The label is a
//! human-readable handle derived from the item's optional well-known
//! fields; the id makes the key unique. Items with identical id and label
//! describe the same logical object, so overwriting is acceptable.

use crate::adapters::storage::ContentStore;
use crate::domain::ItemOutcome;
use serde_json::Value;
use std::sync::Arc;

/// Longest label kept in a key; longer display names are cut off.
const MAX_LABEL_LEN: usize = 60;

/// Writes exported items into the content store under dated keys
pub struct ObjectWriter {
    store: Arc<dyn ContentStore>,
    run_date: String,
    dry_run: bool,
}

impl ObjectWriter {
    /// Create a writer for one run
    ///
    /// `run_date` is computed once per run (format `%Y-%m-%d`) so every key
    /// of the run shares the same prefix and a same-day re-run overwrites
    /// the previous attempt.
    pub fn new(store: Arc<dyn ContentStore>, run_date: impl Into<String>, dry_run: bool) -> Self {
        Self {
            store,
            run_date: run_date.into(),
            dry_run,
        }
    }

    /// Persist one item under the given category
    ///
    /// A write failure is logged and reported as [`ItemOutcome::Failed`];
    /// it never aborts the run. In dry-run mode nothing is written and the
    /// outcome is [`ItemOutcome::Skipped`].
    pub async fn save(&self, category: &str, item: &Value) -> ItemOutcome {
        let key = self.object_key(category, item);

        if self.dry_run {
            tracing::debug!(key = %key, "Dry run, skipping write");
            return ItemOutcome::skipped("dry-run");
        }

        let bytes = match serde_json::to_vec_pretty(item) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Failed to serialize item");
                return ItemOutcome::failed(format!("serialization: {e}"));
            }
        };

        match self.store.put(&key, bytes).await {
            Ok(()) => ItemOutcome::Saved { key },
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Object upload failed");
                ItemOutcome::failed(e.to_string())
            }
        }
    }

    /// Derive the full storage key for an item
    pub fn object_key(&self, category: &str, item: &Value) -> String {
        let label = sanitize_label(derive_label(item));
        let id = item.get("id").and_then(Value::as_str).unwrap_or("noid");
        format!("{}/{}/{} ({}).json", self.run_date, category, label, id)
    }
}

/// Pick the human-readable handle for an item
///
/// Fallback chain: `displayName`, `name`, `id`, then the literal "unknown".
fn derive_label(item: &Value) -> &str {
    item.get("displayName")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            item.get("name")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .or_else(|| {
            item.get("id")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or("unknown")
}

/// Reduce a label to storage-safe characters
///
/// Keeps alphanumerics, space, dot, underscore and hyphen, trims
/// surrounding whitespace, then truncates to 60 characters.
fn sanitize_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-'))
        .collect::<String>()
        .trim()
        .chars()
        .take(MAX_LABEL_LEN)
        .collect()
}
