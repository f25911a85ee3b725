//! Migration report error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised around the report core
///
/// Rendering is total and never fails; these come from loading snapshots and
/// from the explicit batch coherence check.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Snapshot could not be read
    #[error("Failed to read migration snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON or does not match the record shape
    #[error("Invalid migration snapshot from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Members of one batch carry different `applied_at` values
    #[error(
        "Migration '{name}' in batch {batch_id} has a different applied time than the rest of its batch.\n\
         Batches are applied atomically, so every member must share one timestamp."
    )]
    IncoherentBatch { batch_id: i64, name: String },

    /// Two batches carry the same `applied_at` value
    #[error(
        "Batches {first} and {second} share the same applied time.\n\
         Their migrations cannot be told apart when grouping."
    )]
    SharedAppliedAt { first: i64, second: i64 },
}
