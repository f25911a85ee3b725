//! migreport command line library
//!
//! The binary (main.rs) only parses arguments, sets up logging and loads
//! configuration; everything it prints goes through [`run`].

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use migreport::migration::{
    check_batch_coherence, ApplySummary, JsonFileSource, Line, MigrationStatus,
    RecordSource, Span, StatusSnapshot, Style, Styling, REPORT_TITLE,
};
use migreport::{ColorChoice, OutputFormat, ReportConfig};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "migreport")]
#[command(about = "Render migration status snapshots grouped by batch")]
#[command(version)]
pub struct Cli {
    /// Status snapshot (JSON), `-` for stdin
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// When to use colors: auto, always or never
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,

    /// Fail if batches do not share a single applied time
    #[arg(long, global = true)]
    pub check: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show migrations as a tree grouped by batch
    Status {
        /// Batch to highlight (default: the batch just applied, or none)
        #[arg(long)]
        highlight: Option<i64>,
    },

    /// Print migrations as JSON keyed by batch
    Json {
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },

    /// Show migration counts
    Info,
}

/// Settings after layering command line flags over configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input: PathBuf,
    pub color: ColorChoice,
    pub check_coherence: bool,
    pub command: Commands,
}

impl Settings {
    /// Merge flags over `config`
    ///
    /// # Errors
    ///
    /// Fails when no snapshot was given by either.
    pub fn resolve(cli: Cli, config: ReportConfig) -> anyhow::Result<Self> {
        let Some(input) = cli.input.or(config.input) else {
            bail!("No status snapshot given. Use --input or set MIGREPORT__REPORT__INPUT.");
        };

        let command = cli.command.unwrap_or(match config.format {
            OutputFormat::Terminal => Commands::Status { highlight: None },
            OutputFormat::Json => Commands::Json { pretty: false },
        });

        Ok(Self {
            input,
            color: cli.color.unwrap_or(config.color),
            check_coherence: cli.check || config.check_coherence,
            command,
        })
    }
}

/// Decide the styling mode, forcing `colored` on or off where asked
pub fn apply_color_choice(choice: ColorChoice) -> Styling {
    match choice {
        ColorChoice::Never => Styling::Plain,
        ColorChoice::Always => {
            colored::control::set_override(true);
            Styling::Ansi
        }
        ColorChoice::Auto => Styling::Ansi,
    }
}

/// Load the snapshot and print the selected command's output to `out`
pub fn run(settings: &Settings, styling: Styling, out: &mut impl Write) -> anyhow::Result<()> {
    let snapshot = JsonFileSource::new(&settings.input)
        .load()
        .context("Failed to load migration status")?;

    if settings.check_coherence {
        check_batch_coherence(&snapshot.records).context("Batch coherence check failed")?;
        log::debug!("batch coherence check passed");
    }

    match &settings.command {
        Commands::Status { highlight } => handle_status(snapshot, *highlight, styling, out),
        Commands::Json { pretty } => handle_json(snapshot, *pretty, out),
        Commands::Info => handle_info(&snapshot, out),
    }
}

fn handle_status(
    snapshot: StatusSnapshot,
    highlight: Option<i64>,
    styling: Styling,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let subtitle = snapshot.applied.unwrap_or_default().subtitle();
    let report = snapshot.into_report(highlight);

    let title = Line::new().push(Span::new(REPORT_TITLE, Style::plain().bold()));
    let subtitle = Line::new().push(Span::new(subtitle, Style::plain().faint(true)));
    writeln!(out, "{}", title.render(styling))?;
    writeln!(out, "{}", subtitle.render(styling))?;

    let tree = report.render_terminal(styling);
    if !tree.is_empty() {
        writeln!(out)?;
        write!(out, "{tree}")?;
    }

    Ok(())
}

fn handle_json(snapshot: StatusSnapshot, pretty: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let structured = snapshot.into_report(None).render_structured();

    let text = if pretty {
        serde_json::to_string_pretty(&structured)?
    } else {
        serde_json::to_string(&structured)?
    };
    writeln!(out, "{text}")?;

    Ok(())
}

fn handle_info(snapshot: &StatusSnapshot, out: &mut impl Write) -> anyhow::Result<()> {
    let status = MigrationStatus::from_records(&snapshot.records);

    writeln!(out, "Total Migrations: {}", status.total)?;
    writeln!(out, "Applied: {}", status.applied_count)?;
    writeln!(out, "Pending: {}", status.pending_count)?;

    if let Some(latest) = status.latest_batch_id {
        writeln!(out, "Latest Applied Batch: {latest}")?;
    }
    if let Some(ApplySummary { batch_id, applied }) =
        snapshot.applied.filter(ApplySummary::has_new_migrations)
    {
        writeln!(out, "Last Run: {applied} migration(s) in batch {batch_id}")?;
    }
    if status.is_up_to_date() {
        writeln!(out, "Up to date")?;
    }

    Ok(())
}
