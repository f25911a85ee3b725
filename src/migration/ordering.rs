//! Deterministic ordering of migration records
//!
//! Records are ordered last-applied first, so that the members of a batch end
//! up next to each other and batches read newest to oldest.

use crate::migration::MigrationRecord;
use std::cmp::Ordering;

/// Compare two records for display order
///
/// Keys, each one only consulted on a tie of the previous:
/// 1. `applied_at` descending, pending records after all applied ones
/// 2. `name + comment` descending
/// 3. `batch_id` descending
pub fn compare_records(a: &MigrationRecord, b: &MigrationRecord) -> Ordering {
    // `None < Some(_)`, so comparing b to a puts pending records last.
    b.applied_at
        .cmp(&a.applied_at)
        .then_with(|| compare_concatenated(b, a))
        .then_with(|| b.batch_id.cmp(&a.batch_id))
}

/// Sort records in place for display
///
/// The sort is stable: records tying on every key keep their input order.
pub fn sort_records(records: &mut [MigrationRecord]) {
    if records.is_empty() {
        return;
    }

    records.sort_by(compare_records);
    log::trace!("sorted {} migration records", records.len());
}

// Byte-wise comparison of `name + comment` without allocating the concatenation.
fn compare_concatenated(a: &MigrationRecord, b: &MigrationRecord) -> Ordering {
    let lhs = a.name.bytes().chain(a.comment.bytes());
    let rhs = b.name.bytes().chain(b.comment.bytes());
    lhs.cmp(rhs)
}
