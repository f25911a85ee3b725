//! Record sources - where migration status snapshots come from
//!
//! Applying migrations and querying their status is done elsewhere; a
//! `RecordSource` hands the result over as a [`StatusSnapshot`].

use crate::migration::{ApplySummary, MigrationError, MigrationRecord, MigrationReport};
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Path value meaning "read from standard input"
pub const STDIN_PATH: &str = "-";

/// Migration status as handed over by the apply/status step
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StatusSnapshot {
    pub records: Vec<MigrationRecord>,

    /// Outcome of the apply step, if one ran
    #[serde(default)]
    pub applied: Option<ApplySummary>,
}

// Snapshots are accepted either as a bare array or as a full object.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotRepr {
    Records(Vec<MigrationRecord>),
    Full(StatusSnapshot),
}

impl StatusSnapshot {
    #[must_use]
    pub fn new(records: Vec<MigrationRecord>, applied: Option<ApplySummary>) -> Self {
        Self { records, applied }
    }

    /// Parse a snapshot from JSON text
    ///
    /// `origin` only labels errors (a path, or `stdin`).
    ///
    /// # Errors
    ///
    /// Returns `MigrationError::Parse` if the text is neither a record array nor
    /// a snapshot object.
    pub fn from_json(text: &str, origin: &str) -> Result<Self, MigrationError> {
        let repr: SnapshotRepr =
            serde_json::from_str(text).map_err(|source| MigrationError::Parse {
                origin: origin.to_string(),
                source,
            })?;

        Ok(match repr {
            SnapshotRepr::Records(records) => Self::new(records, None),
            SnapshotRepr::Full(snapshot) => snapshot,
        })
    }

    /// Batch to highlight, falling back to the apply summary
    #[must_use]
    pub fn highlight_batch_id(&self, explicit: Option<i64>) -> i64 {
        explicit.unwrap_or_else(|| {
            self.applied
                .map(|summary| summary.highlight_batch_id())
                .unwrap_or_default()
        })
    }

    /// Build the report for this snapshot
    #[must_use]
    pub fn into_report(self, highlight: Option<i64>) -> MigrationReport {
        let highlight_batch_id = self.highlight_batch_id(highlight);
        MigrationReport::new(self.records, highlight_batch_id)
    }
}

/// Supplier of migration status snapshots
pub trait RecordSource {
    /// Load the current snapshot
    ///
    /// # Errors
    ///
    /// Returns a `MigrationError` if the snapshot cannot be read or parsed.
    fn load(&self) -> Result<StatusSnapshot, MigrationError>;
}

/// Snapshot stored as JSON in a file, or on stdin for [`STDIN_PATH`]
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == STDIN_PATH
    }

    fn read(&self) -> Result<String, MigrationError> {
        let io_error = |source: std::io::Error| MigrationError::Io {
            path: self.path.clone(),
            source,
        };

        if self.is_stdin() {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(io_error)?;
            Ok(text)
        } else {
            fs::read_to_string(&self.path).map_err(io_error)
        }
    }
}

impl RecordSource for JsonFileSource {
    fn load(&self) -> Result<StatusSnapshot, MigrationError> {
        let text = self.read()?;
        let origin = if self.is_stdin() {
            "stdin".to_string()
        } else {
            self.path.display().to_string()
        };

        let snapshot = StatusSnapshot::from_json(&text, &origin)?;
        log::debug!(
            "loaded {} migration records from {}",
            snapshot.records.len(),
            origin
        );
        Ok(snapshot)
    }
}

/// In-memory snapshot, for embedding callers and tests
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshot: StatusSnapshot,
}

impl StaticSource {
    #[must_use]
    pub fn new(snapshot: StatusSnapshot) -> Self {
        Self { snapshot }
    }
}

impl RecordSource for StaticSource {
    fn load(&self) -> Result<StatusSnapshot, MigrationError> {
        Ok(self.snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bare_array_snapshot() {
        let snapshot = StatusSnapshot::from_json(
            r#"[{"name": "20200101120000", "comment": "a", "batch_id": 0}]"#,
            "test",
        )
        .unwrap();
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.applied, None);
        assert_eq!(snapshot.highlight_batch_id(None), 0);
    }

    #[test]
    fn test_object_snapshot_with_summary() {
        let snapshot = StatusSnapshot::from_json(
            r#"{
                "records": [{"name": "20200101120000", "comment": "a", "batch_id": 2,
                             "applied_at": "2020-01-02T13:00:00Z"}],
                "applied": {"batch_id": 2, "applied": 1}
            }"#,
            "test",
        )
        .unwrap();
        assert_eq!(snapshot.applied, Some(ApplySummary::new(2, 1)));
        assert_eq!(snapshot.highlight_batch_id(None), 2);
        assert_eq!(snapshot.highlight_batch_id(Some(5)), 5);
    }

    #[test]
    fn test_invalid_snapshot_reports_origin() {
        let err = StatusSnapshot::from_json(r#"{"nope": true}"#, "status.json").unwrap_err();
        assert!(matches!(err, MigrationError::Parse { .. }));
        assert!(err.to_string().contains("status.json"));
    }

    #[test]
    fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "name": "20200101120000", "comment": "a", "batch_id": 1, "applied_at": null}}]"#
        )
        .unwrap();

        let snapshot = JsonFileSource::new(file.path()).load().unwrap();
        assert_eq!(snapshot.records[0].id, 1);
        assert!(!snapshot.records[0].is_applied());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("missing.json"));
        assert!(matches!(source.load(), Err(MigrationError::Io { .. })));
    }

    #[test]
    fn test_static_source_into_report() {
        let snapshot = StatusSnapshot::new(
            vec![MigrationRecord::new(1, "20200101120000", "a", 0)],
            Some(ApplySummary::new(0, 0)),
        );
        let report = StaticSource::new(snapshot).load().unwrap().into_report(None);
        assert_eq!(report.highlight_batch_id(), 0);
        assert_eq!(report.records().len(), 1);
    }
}
