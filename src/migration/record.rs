//! `MigrationRecord` - one migration as reported by the status collaborator

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Batch id reserved for migrations that are not part of any applied batch
pub const NO_BATCH: i64 = 0;

/// Represents a migration record in a status snapshot
///
/// All records sharing the same non-zero `batch_id` were applied atomically and
/// therefore carry the same `applied_at` value. Grouping relies on this; see
/// [`check_batch_coherence`](crate::migration::check_batch_coherence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    /// Informational identifier, never used for ordering or grouping
    #[serde(default)]
    pub id: i64,

    /// Sortable timestamp-like prefix of the migration file (`YYYYMMDDHHMMSS`)
    pub name: String,

    /// Human-readable remainder of the migration file name
    #[serde(default)]
    pub comment: String,

    /// Deployment batch, `0` when the migration is not part of an applied batch
    pub batch_id: i64,

    /// When the migration was applied (`None` if pending)
    #[serde(default)]
    pub applied_at: Option<DateTime<Utc>>,
}

impl MigrationRecord {
    /// Create a pending `MigrationRecord`
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, comment: impl Into<String>, batch_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            comment: comment.into(),
            batch_id,
            applied_at: None,
        }
    }

    /// Mark the record as applied at `applied_at`
    #[must_use]
    pub fn applied(mut self, applied_at: DateTime<Utc>) -> Self {
        self.applied_at = Some(applied_at);
        self
    }

    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.applied_at.is_some()
    }

    /// File name of the migration without extension: `{name}_{comment}`
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}_{}", self.name, self.comment)
    }

    /// `applied_at` formatted as RFC 3339 with whole seconds and a `Z` suffix
    #[must_use]
    pub fn applied_at_rfc3339(&self) -> Option<String> {
        self.applied_at.map(|at| format_rfc3339(&at))
    }
}

pub(crate) fn format_rfc3339(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
