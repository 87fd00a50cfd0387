//! End-to-end run: load, validate, check.

use std::path::Path;
use tracing::warn;

use crate::config::ConfigError;
use crate::discovery::{load_config, LoadedConfig};
use crate::engine::RuleEngine;
use crate::types::{Diagnostic, Report};
use crate::typescript::TypeScriptExtractor;

/// Locates the config below `start` and checks the project it describes.
///
/// # Errors
///
/// Returns error if the config cannot be found, read, or parsed.
pub fn run(start: &Path) -> Result<Report, ConfigError> {
    let loaded = load_config(start)?;
    Ok(check_loaded(&loaded))
}

/// Validates a loaded config and, if it is sound, checks every layer.
///
/// An invalid config yields a report holding only the config problems;
/// no files are scanned.
#[must_use]
pub fn check_loaded(loaded: &LoadedConfig) -> Report {
    if let Err(problems) = loaded.config.validate() {
        warn!("{} has {} problem(s)", loaded.path.display(), problems.len());
        let mut report = Report::new();
        for problem in problems {
            report.push(Diagnostic::InvalidConfig(problem));
        }
        return report;
    }

    RuleEngine::new(
        loaded.config.clone(),
        loaded.base_dir.clone(),
        Box::new(TypeScriptExtractor::new()),
    )
    .check()
}
