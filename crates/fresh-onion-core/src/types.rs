//! Diagnostics, run report, and verdict.

use std::fmt;
use std::path::PathBuf;

use crate::config::ConfigProblem;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Reported, but does not rot the onion.
    Warning,
    /// Fails the run.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// File path relative to the project base directory.
    pub file: PathBuf,
    /// Line number (0-indexed).
    pub line: usize,
    /// Column number (0-indexed, UTF-16 code units).
    pub column: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A single finding of a run.
///
/// Paths are relative to the project base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The configuration is structurally invalid.
    InvalidConfig(ConfigProblem),
    /// A layer has no rule, so its imports are not checked.
    MissingRule {
        /// Unchecked layer.
        layer: String,
    },
    /// A layer's directory does not exist.
    MissingLayerDirectory {
        /// Layer name.
        layer: String,
        /// Configured directory.
        path: PathBuf,
    },
    /// A file or directory could not be read or parsed.
    UnreadablePath {
        /// Path that was skipped.
        path: PathBuf,
        /// Underlying error.
        reason: String,
    },
    /// An import target lies in no configured layer.
    UnresolvedLayer {
        /// Where the import is written.
        location: Location,
        /// Resolved import target.
        target: PathBuf,
    },
    /// An import crosses a layer boundary its rule does not allow.
    BoundaryViolation {
        /// Importing layer.
        layer: String,
        /// Where the import is written.
        location: Location,
        /// Imported layer.
        target_layer: String,
        /// Resolved import target.
        target: PathBuf,
    },
}

impl Diagnostic {
    /// Stable diagnostic code (e.g., `"ONION006"`).
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "ONION001",
            Self::MissingRule { .. } => "ONION002",
            Self::MissingLayerDirectory { .. } => "ONION003",
            Self::UnreadablePath { .. } => "ONION004",
            Self::UnresolvedLayer { .. } => "ONION005",
            Self::BoundaryViolation { .. } => "ONION006",
        }
    }

    /// Severity of this diagnostic.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::InvalidConfig(_)
            | Self::UnresolvedLayer { .. }
            | Self::BoundaryViolation { .. } => Severity::Error,
            Self::MissingRule { .. }
            | Self::MissingLayerDirectory { .. }
            | Self::UnreadablePath { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(problem) => write!(f, "{problem}"),
            Self::MissingRule { layer } => write!(f, "No rules defined for layer {layer}"),
            Self::MissingLayerDirectory { layer, path } => {
                write!(f, "Layer {layer} directory does not exist: {}", path.display())
            }
            Self::UnreadablePath { path, reason } => {
                write!(f, "Could not read {}: {reason}", path.display())
            }
            Self::UnresolvedLayer { location, target } => write!(
                f,
                "❓ Could not determine layer for import path: {} in {location}",
                target.display()
            ),
            Self::BoundaryViolation {
                layer,
                location,
                target_layer,
                target,
            } => write!(
                f,
                "❌ {layer} ({location}) is importing from {target_layer} ({})",
                target.display()
            ),
        }
    }
}

/// Final outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No error-level diagnostics.
    Fresh,
    /// At least one error-level diagnostic.
    Rotten,
}

impl Verdict {
    /// Process exit code for this verdict.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Fresh => 0,
            Self::Rotten => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fresh => write!(f, "👍 Fresh 🧅"),
            Self::Rotten => write!(f, "👎 Rotten 🧅"),
        }
    }
}

/// Everything a run found, in discovery order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// All diagnostics, grouped by layer, then file, then import order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl Report {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == Severity::Error)
    }

    /// Counts diagnostics as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let errors = self
            .diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
            .count();
        (errors, self.diagnostics.len() - errors)
    }

    /// Fresh if nothing failed.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        if self.has_errors() {
            Verdict::Rotten
        } else {
            Verdict::Fresh
        }
    }

    /// Adds diagnostics from another report.
    pub fn extend(&mut self, other: Self) {
        self.diagnostics.extend(other.diagnostics);
        self.files_checked += other.files_checked;
    }
}
