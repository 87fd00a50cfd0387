//! Local import edges of a single source file.

use std::path::{Path, PathBuf};

use crate::extractor::{ExtractError, LanguageExtractor};
use crate::utils::paths::{normalize, relative_to};

/// One local import statement, resolved against the project base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    /// Absolute path of the importing file.
    pub file: PathBuf,
    /// Import target relative to the base directory (e.g., `src/domain/user`).
    pub target: PathBuf,
    /// Line of the specifier (0-indexed).
    pub line: usize,
    /// Column of the specifier (0-indexed).
    pub column: usize,
}

impl ImportEdge {
    /// Absolute path of the import target.
    #[must_use]
    pub fn absolute_target(&self, base_dir: &Path) -> PathBuf {
        normalize(&base_dir.join(&self.target))
    }
}

/// Errors while collecting the imports of a file.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The file could not be read as text.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// The extractor failed on the file.
    #[error("failed to parse {}: {source}", .path.display())]
    Extract {
        /// File that failed.
        path: PathBuf,
        /// Extractor error.
        source: ExtractError,
    },
}

/// Relative (`./`, `../`) and absolute (`/`) specifiers are local; anything
/// else names a package.
#[must_use]
pub fn is_local(specifier: &str) -> bool {
    specifier.starts_with('.') || specifier.starts_with('/')
}

/// Collects the local import edges of `file`, in source order.
///
/// Package imports are dropped. Each remaining specifier is resolved against
/// the file's directory and expressed relative to `base_dir`.
///
/// # Errors
///
/// Returns error if the file cannot be read or the extractor fails.
pub fn local_imports(
    file: &Path,
    base_dir: &Path,
    extractor: &dyn LanguageExtractor,
) -> Result<Vec<ImportEdge>, ImportError> {
    let source = std::fs::read_to_string(file).map_err(|e| ImportError::Read {
        path: file.to_path_buf(),
        source: e,
    })?;

    let specifiers = extractor
        .extract(&source)
        .map_err(|e| ImportError::Extract {
            path: file.to_path_buf(),
            source: e,
        })?;

    let file_dir = file.parent().unwrap_or(base_dir);

    Ok(specifiers
        .into_iter()
        .filter(|imp| is_local(&imp.specifier))
        .map(|imp| {
            let absolute = normalize(&file_dir.join(&imp.specifier));
            ImportEdge {
                file: file.to_path_buf(),
                target: relative_to(&absolute, base_dir),
                line: imp.line,
                column: imp.column,
            }
        })
        .collect())
}
