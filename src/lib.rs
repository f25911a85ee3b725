//! # migreport
//!
//! Batch-grouped migration status reports for terminals and JSON consumers.
//!
//! Feed [`migration::MigrationReport`] the records produced by an apply or
//! status step and render them as a styled tree or as a batch-keyed map.

pub mod config;
pub mod migration;

pub use config::{ColorChoice, OutputFormat, ReportConfig};
pub use migration::{MigrationError, MigrationRecord, MigrationReport, Styling};
