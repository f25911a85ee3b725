//! migreport - migration status reports from the command line
//!
//! Reads a status snapshot produced by the migration tooling and prints it as a
//! batch-grouped tree or as JSON.

use anyhow::Context;
use clap::Parser;
use migreport::ReportConfig;
use migreport_cli::{apply_color_choice, run, Cli, Settings};
use std::process;

fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = try_main(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn try_main(cli: Cli) -> anyhow::Result<()> {
    let config = ReportConfig::load().context("Failed to load configuration")?;
    let settings = Settings::resolve(cli, config)?;
    log::debug!("resolved settings: {settings:?}");

    let styling = apply_color_choice(settings.color);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&settings, styling, &mut out)
}
