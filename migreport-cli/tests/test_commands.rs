//! Tests for the migreport commands

use clap::Parser;
use migreport::{ColorChoice, OutputFormat, ReportConfig, Styling};
use migreport_cli::{run, Cli, Commands, Settings};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const SNAPSHOT: &str = r#"{
    "records": [
        {"id": 1, "name": "20200101120000", "comment": "migration_1", "batch_id": 1, "applied_at": "2020-01-02T12:00:00Z"},
        {"id": 2, "name": "20200101120000", "comment": "migration_2", "batch_id": 1, "applied_at": "2020-01-02T12:00:00Z"},
        {"id": 3, "name": "20200101120000", "comment": "migration_3", "batch_id": 2, "applied_at": "2020-01-02T13:00:00Z"},
        {"id": 4, "name": "20200101140000", "comment": "migration_4", "batch_id": 0}
    ],
    "applied": {"batch_id": 2, "applied": 1}
}"#;

fn snapshot_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn settings(input: &Path, command: Commands) -> Settings {
    Settings {
        input: input.to_path_buf(),
        color: ColorChoice::Never,
        check_coherence: false,
        command,
    }
}

fn run_to_string(settings: &Settings) -> anyhow::Result<String> {
    let mut out = Vec::new();
    run(settings, Styling::Plain, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_status_command() {
    let file = snapshot_file(SNAPSHOT);
    let output =
        run_to_string(&settings(file.path(), Commands::Status { highlight: None })).unwrap();

    assert_eq!(
        output,
        "Migrations applied\n\
         1 new migrations applied in batch 2\n\
         \n\
         \x20✓ Batch 2\n\
         \x20    - 20200101120000_migration_3 (2020-01-02T13:00:00Z)\n\
         \x20✓ Batch 1\n\
         \x20    - 20200101120000_migration_2 (2020-01-02T12:00:00Z)\n\
         \x20    - 20200101120000_migration_1 (2020-01-02T12:00:00Z)\n\
         \x20No group\n\
         \x20    - 20200101140000_migration_4\n"
    );
}

#[test]
fn test_status_command_empty_snapshot() {
    let file = snapshot_file("[]");
    let output =
        run_to_string(&settings(file.path(), Commands::Status { highlight: Some(3) })).unwrap();

    assert_eq!(output, "Migrations applied\nNo new migrations applied\n");
}

#[test]
fn test_json_command() {
    let file = snapshot_file(SNAPSHOT);
    let output = run_to_string(&settings(file.path(), Commands::Json { pretty: false })).unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["2"][0]["comment"], "migration_3");
    assert_eq!(value["1"].as_array().unwrap().len(), 2);
    assert_eq!(value["0"][0]["name"], "20200101140000");
    assert!(value["0"][0].get("applied_at").is_none());
}

#[test]
fn test_json_command_empty_snapshot_prints_null() {
    let file = snapshot_file("[]");
    let output = run_to_string(&settings(file.path(), Commands::Json { pretty: true })).unwrap();
    assert_eq!(output, "null\n");
}

#[test]
fn test_info_command() {
    let file = snapshot_file(SNAPSHOT);
    let output = run_to_string(&settings(file.path(), Commands::Info)).unwrap();

    assert_eq!(
        output,
        "Total Migrations: 4\n\
         Applied: 3\n\
         Pending: 1\n\
         Latest Applied Batch: 2\n\
         Last Run: 1 migration(s) in batch 2\n"
    );
}

#[test]
fn test_coherence_check_rejects_mixed_batch() {
    let file = snapshot_file(
        r#"[
            {"name": "20200101120000", "comment": "a", "batch_id": 1, "applied_at": "2020-01-02T12:00:00Z"},
            {"name": "20200101130000", "comment": "b", "batch_id": 1, "applied_at": "2020-01-02T13:00:00Z"}
        ]"#,
    );
    let mut checked = settings(file.path(), Commands::Info);
    checked.check_coherence = true;

    let err = run_to_string(&checked).unwrap_err();
    assert!(format!("{err:#}").contains("batch 1"));

    checked.check_coherence = false;
    assert!(run_to_string(&checked).is_ok());
}

#[test]
fn test_coherence_check_allows_unbatched_and_pending() {
    let file = snapshot_file(
        r#"[
            {"name": "20200101120000", "comment": "a", "batch_id": 1, "applied_at": "2020-01-02T12:00:00Z"},
            {"name": "20200101130000", "comment": "b", "batch_id": 0, "applied_at": "2020-01-02T12:00:00Z"},
            {"name": "20200101140000", "comment": "c", "batch_id": 0},
            {"name": "20200101150000", "comment": "d", "batch_id": 2},
            {"name": "20200101160000", "comment": "e", "batch_id": 3}
        ]"#,
    );
    let mut checked = settings(file.path(), Commands::Status { highlight: None });
    checked.check_coherence = true;

    let output = run_to_string(&checked).unwrap();
    assert!(output.contains(" ✗ Batch 2\n"));
    assert!(output.contains(" ✗ Batch 3\n"));
    assert!(output.contains(" No group\n"));
}

#[test]
fn test_missing_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = settings(&dir.path().join("missing.json"), Commands::Info);
    assert!(run_to_string(&missing).is_err());
}

#[test]
fn test_flags_override_config() {
    let cli = Cli::try_parse_from([
        "migreport",
        "--input",
        "status.json",
        "--color",
        "never",
        "json",
        "--pretty",
    ])
    .unwrap();
    let config = ReportConfig {
        color: ColorChoice::Always,
        input: Some(PathBuf::from("other.json")),
        ..ReportConfig::default()
    };

    let resolved = Settings::resolve(cli, config).unwrap();
    assert_eq!(resolved.input, PathBuf::from("status.json"));
    assert_eq!(resolved.color, ColorChoice::Never);
    assert_eq!(resolved.command, Commands::Json { pretty: true });
}

#[test]
fn test_config_format_picks_default_command() {
    let cli = Cli::try_parse_from(["migreport"]).unwrap();
    let config = ReportConfig {
        format: OutputFormat::Json,
        input: Some(PathBuf::from("status.json")),
        check_coherence: true,
        ..ReportConfig::default()
    };

    let resolved = Settings::resolve(cli, config).unwrap();
    assert_eq!(resolved.command, Commands::Json { pretty: false });
    assert!(resolved.check_coherence);
    assert_eq!(resolved.color, ColorChoice::Auto);
}

#[test]
fn test_missing_input_is_an_error() {
    let cli = Cli::try_parse_from(["migreport", "info"]).unwrap();
    assert!(Settings::resolve(cli, ReportConfig::default()).is_err());
}

#[test]
fn test_invalid_color_flag_rejected() {
    assert!(Cli::try_parse_from(["migreport", "--color", "sometimes"]).is_err());
}
