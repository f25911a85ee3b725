//! `MigrationReport` - the entry point for rendering a status snapshot

use crate::migration::{
    group_records, render_structured, render_terminal, sort_records, MigrationGroup,
    MigrationRecord, StructuredReport, Styling,
};

/// A sorted, immutable snapshot of migration records ready for rendering
///
/// Sorting happens once in [`MigrationReport::new`]. Both render methods are
/// pure queries over that state and may be called any number of times, from
/// any number of threads.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use migreport::migration::{MigrationRecord, MigrationReport, Styling};
///
/// let at = Utc.with_ymd_and_hms(2020, 1, 2, 12, 0, 0).unwrap();
/// let report = MigrationReport::new(
///     vec![MigrationRecord::new(1, "20200101120000", "create_users", 1).applied(at)],
///     1,
/// );
///
/// assert_eq!(
///     report.render_terminal(Styling::Plain),
///     " ✓ Batch 1\n     - 20200101120000_create_users (2020-01-02T12:00:00Z)\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    records: Vec<MigrationRecord>,
    highlight_batch_id: i64,
}

impl MigrationReport {
    /// Create a report from unsorted records
    ///
    /// `highlight_batch_id` is the batch rendered without fading, usually the
    /// one just applied, or `0` when nothing new was applied.
    #[must_use]
    pub fn new(mut records: Vec<MigrationRecord>, highlight_batch_id: i64) -> Self {
        sort_records(&mut records);

        Self {
            records,
            highlight_batch_id,
        }
    }

    /// Records in display order
    #[must_use]
    pub fn records(&self) -> &[MigrationRecord] {
        &self.records
    }

    #[must_use]
    pub fn highlight_batch_id(&self) -> i64 {
        self.highlight_batch_id
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records partitioned into batches, newest first
    #[must_use]
    pub fn groups(&self) -> Vec<MigrationGroup<'_>> {
        group_records(&self.records)
    }

    /// Terminal tree, or an empty string when there are no records
    #[must_use]
    pub fn render_terminal(&self, styling: Styling) -> String {
        render_terminal(&self.groups(), self.highlight_batch_id, styling)
    }

    /// Batch-keyed map, or `None` when there are no records
    #[must_use]
    pub fn render_structured(&self) -> Option<StructuredReport> {
        render_structured(&self.groups())
    }
}
