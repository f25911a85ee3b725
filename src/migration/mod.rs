//! Migration status reports
//!
//! This module turns a flat, unordered list of migration records into:
//! - a styled terminal tree, one entry per batch
//! - a batch-keyed map of plain records for JSON consumers
//!
//! Records are sorted once ([`sort_records`]), partitioned into batches
//! ([`group_records`]), and then projected by two independent renderers
//! ([`render_terminal`], [`render_structured`]). [`MigrationReport`] bundles the
//! three steps.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use migreport::migration::{MigrationRecord, MigrationReport, Styling};
//!
//! let at = Utc.with_ymd_and_hms(2020, 1, 2, 12, 0, 0).unwrap();
//! let report = MigrationReport::new(
//!     vec![
//!         MigrationRecord::new(1, "20200101120000", "create_users", 1).applied(at),
//!         MigrationRecord::new(2, "20200101130000", "add_email", 0),
//!     ],
//!     0,
//! );
//!
//! print!("{}", report.render_terminal(Styling::Ansi));
//! let json = serde_json::to_string(&report.render_structured()).unwrap();
//! assert!(json.contains("\"1\""));
//! ```

pub mod error;
pub mod group;
pub mod ordering;
pub mod record;
pub mod report;
pub mod source;
pub mod status;
pub mod structured;
pub mod style;
pub mod terminal;

pub use error::MigrationError;
pub use group::{check_batch_coherence, group_records, MigrationGroup};
pub use ordering::{compare_records, sort_records};
pub use record::{MigrationRecord, NO_BATCH};
pub use report::MigrationReport;
pub use source::{JsonFileSource, RecordSource, StaticSource, StatusSnapshot, STDIN_PATH};
pub use status::{ApplySummary, MigrationStatus, REPORT_TITLE};
pub use structured::{render_structured, StructuredRecord, StructuredReport};
pub use style::{Line, Span, Style, Styling, Tone};
pub use terminal::{render_terminal, terminal_lines};
