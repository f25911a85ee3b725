//! Structured (map of lists) rendering of grouped migrations

use crate::migration::record::format_rfc3339;
use crate::migration::MigrationGroup;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Plain view of one migration for programmatic consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRecord {
    pub name: String,
    pub comment: String,
    /// RFC 3339 timestamp, present only for applied migrations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<String>,
}

/// Migrations keyed by the decimal form of their batch id
pub type StructuredReport = BTreeMap<String, Vec<StructuredRecord>>;

/// Render `groups` as a batch-keyed map
///
/// Returns `None` when there are no groups, so callers can tell "no migrations"
/// apart from an empty map. Within a key, records keep the group order.
pub fn render_structured(groups: &[MigrationGroup<'_>]) -> Option<StructuredReport> {
    if groups.is_empty() {
        return None;
    }

    let mut output = StructuredReport::new();

    for group in groups {
        let entries = output.entry(group.batch_id.to_string()).or_default();
        entries.extend(group.records.iter().map(|record| StructuredRecord {
            name: record.name.clone(),
            comment: record.comment.clone(),
            applied_at: record.applied_at.as_ref().map(format_rfc3339),
        }));
    }

    Some(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::{group_records, MigrationRecord};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_no_groups_is_absent() {
        assert_eq!(render_structured(&[]), None);
    }

    #[test]
    fn test_applied_at_omitted_when_pending() {
        let at = Utc.with_ymd_and_hms(2020, 1, 2, 12, 0, 0).unwrap();
        let records = vec![
            MigrationRecord::new(1, "20200101120000", "migration_1", 1).applied(at),
            MigrationRecord::new(2, "20200101120000", "migration_2", 0),
        ];
        let groups = group_records(&records);
        let report = render_structured(&groups).unwrap();

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "0": [{"name": "20200101120000", "comment": "migration_2"}],
                "1": [{
                    "name": "20200101120000",
                    "comment": "migration_1",
                    "applied_at": "2020-01-02T12:00:00Z"
                }]
            })
        );
    }

    #[test]
    fn test_split_batch_appends_to_same_key() {
        let records = vec![
            MigrationRecord::new(1, "a", "", 1),
            MigrationRecord::new(2, "b", "", 2),
            MigrationRecord::new(3, "c", "", 1),
        ];
        let groups = group_records(&records);
        let report = render_structured(&groups).unwrap();

        let names: Vec<&str> = report["1"].iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(report["2"].len(), 1);
    }
}
