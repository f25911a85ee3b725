//! Partitioning of sorted records into batches

use crate::migration::{MigrationError, MigrationRecord, NO_BATCH};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A contiguous run of sorted records sharing a batch id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationGroup<'a> {
    pub batch_id: i64,
    pub records: Vec<&'a MigrationRecord>,
}

impl<'a> MigrationGroup<'a> {
    fn new(batch_id: i64) -> Self {
        Self {
            batch_id,
            records: Vec::new(),
        }
    }

    /// Whether the group holds records outside any applied batch
    #[must_use]
    pub fn is_unbatched(&self) -> bool {
        self.batch_id == NO_BATCH
    }

    /// Whether the batch has been applied
    ///
    /// Members of a batch are applied together, so the first record decides.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.records.first().is_some_and(|record| record.is_applied())
    }
}

/// Split records, already sorted with [`sort_records`](crate::migration::sort_records),
/// into groups
///
/// A new group starts whenever the batch id changes from one record to the next.
/// Batches are only contiguous when the input honours the batch coherence
/// invariant; otherwise a batch may come out split across several groups.
pub fn group_records(records: &[MigrationRecord]) -> Vec<MigrationGroup<'_>> {
    let mut groups = Vec::new();

    let Some(first) = records.first() else {
        return groups;
    };
    let mut current = MigrationGroup::new(first.batch_id);

    for record in records {
        if record.batch_id != current.batch_id {
            let next = MigrationGroup::new(record.batch_id);
            let done = std::mem::replace(&mut current, next);
            // Never emit an empty group.
            if !done.records.is_empty() {
                groups.push(done);
            }
        }

        current.records.push(record);
    }

    if !current.records.is_empty() {
        groups.push(current);
    }

    log::trace!(
        "grouped {} migration records into {} batches",
        records.len(),
        groups.len()
    );

    groups
}

/// Check the invariant grouping depends on
///
/// Every non-zero batch must carry a single `applied_at` value, and no two
/// non-zero batches may share one applied instant. Batch `0` ("No group") is
/// exempt from both rules, and pending batches are never compared with each
/// other. Rendering does not call this; it is for callers and tests that want
/// the precondition asserted rather than assumed.
///
/// # Errors
///
/// Returns `MigrationError::IncoherentBatch` when a batch mixes timestamps, and
/// `MigrationError::SharedAppliedAt` when two batches were applied at the same
/// instant.
pub fn check_batch_coherence(records: &[MigrationRecord]) -> Result<(), MigrationError> {
    let mut batch_times: HashMap<i64, Option<DateTime<Utc>>> = HashMap::new();

    for record in records.iter().filter(|r| r.batch_id != NO_BATCH) {
        match batch_times.get(&record.batch_id) {
            Some(seen) if *seen != record.applied_at => {
                return Err(MigrationError::IncoherentBatch {
                    batch_id: record.batch_id,
                    name: record.display_name(),
                });
            }
            Some(_) => {}
            None => {
                batch_times.insert(record.batch_id, record.applied_at);
            }
        }
    }

    let mut owners: HashMap<DateTime<Utc>, i64> = HashMap::new();
    let mut batches: Vec<(i64, DateTime<Utc>)> = batch_times
        .into_iter()
        .filter_map(|(batch_id, applied_at)| applied_at.map(|at| (batch_id, at)))
        .collect();
    batches.sort_by_key(|(batch_id, _)| *batch_id);

    for (batch_id, applied_at) in batches {
        if let Some(other) = owners.insert(applied_at, batch_id) {
            return Err(MigrationError::SharedAppliedAt {
                first: other,
                second: batch_id,
            });
        }
    }

    Ok(())
}
