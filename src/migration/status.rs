//! Migration status summaries

use crate::migration::{MigrationRecord, NO_BATCH};
use serde::{Deserialize, Serialize};

/// Title shown above a migration report
pub const REPORT_TITLE: &str = "Migrations applied";

/// Outcome of the apply step that preceded the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplySummary {
    /// Batch the new migrations were applied in
    pub batch_id: i64,

    /// Number of migrations applied in that batch
    pub applied: usize,
}

impl ApplySummary {
    #[must_use]
    pub fn new(batch_id: i64, applied: usize) -> Self {
        Self { batch_id, applied }
    }

    #[must_use]
    pub fn has_new_migrations(&self) -> bool {
        self.applied > 0
    }

    /// Batch to highlight: the one just applied, or `0` if nothing was
    #[must_use]
    pub fn highlight_batch_id(&self) -> i64 {
        if self.has_new_migrations() {
            self.batch_id
        } else {
            NO_BATCH
        }
    }

    /// One-line description shown under [`REPORT_TITLE`]
    #[must_use]
    pub fn subtitle(&self) -> String {
        if self.has_new_migrations() {
            format!(
                "{} new migrations applied in batch {}",
                self.applied, self.batch_id
            )
        } else {
            "No new migrations applied".to_string()
        }
    }
}

/// Migration status counts derived from a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Total number of migrations (applied + pending)
    pub total: usize,

    /// Number of applied migrations
    pub applied_count: usize,

    /// Number of pending migrations
    pub pending_count: usize,

    /// Highest batch id among applied migrations
    pub latest_batch_id: Option<i64>,
}

impl MigrationStatus {
    /// Count applied and pending records
    #[must_use]
    pub fn from_records(records: &[MigrationRecord]) -> Self {
        let applied_count = records.iter().filter(|r| r.is_applied()).count();
        let latest_batch_id = records
            .iter()
            .filter(|r| r.is_applied() && r.batch_id != NO_BATCH)
            .map(|r| r.batch_id)
            .max();

        Self {
            total: records.len(),
            applied_count,
            pending_count: records.len() - applied_count,
            latest_batch_id,
        }
    }

    /// Check if all migrations are applied
    #[must_use]
    pub fn is_up_to_date(&self) -> bool {
        self.pending_count == 0
    }
}
