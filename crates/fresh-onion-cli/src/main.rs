//! fresh-onion CLI tool.
//!
//! Usage:
//! ```bash
//! fresh-onion
//! ```
//!
//! Searches the current directory tree for `onion.config.json`, checks every
//! layer it declares, and exits with 0 when the onion is fresh, 1 when rotten.
//! Log verbosity is read from `FRESH_ONION_LOG` (e.g. `FRESH_ONION_LOG=debug`).

use clap::Parser;
use fresh_onion_core::{discovery, pipeline};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod output;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "FRESH_ONION_LOG";

/// Layer dependency checker for onion-architecture TypeScript projects
#[derive(Parser)]
#[command(name = "fresh-onion")]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> Result<ExitCode> {
    let _cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir()
        .into_diagnostic()
        .wrap_err("Failed to read current directory")?;
    let config_path = discovery::locate_config(&cwd).wrap_err("Failed to load config")?;
    println!("Using config {}", config_path.display());
    let loaded =
        discovery::LoadedConfig::from_path(config_path).wrap_err("Failed to load config")?;

    let report = pipeline::check_loaded(&loaded);
    tracing::debug!("{} file(s) checked", report.files_checked);
    output::print(&report);

    Ok(ExitCode::from(report.verdict().exit_code()))
}
