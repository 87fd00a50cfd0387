//! Filesystem discovery: locating the config file and listing layer sources.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::{ConfigError, OnionConfig, CONFIG_FILE_NAME};
use crate::extractor::LanguageExtractor;
use crate::utils::paths::normalize;

/// A parsed config together with where it was found.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Absolute path of the config file.
    pub path: PathBuf,
    /// Directory holding the config file; layer paths are relative to it.
    pub base_dir: PathBuf,
    /// The parsed (not yet validated) configuration.
    pub config: OnionConfig,
}

/// Errors while listing the files of a layer.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// The layer root does not exist or is not a directory.
    #[error("{} is not a directory", .0.display())]
    Missing(PathBuf),
    /// A directory below the layer root could not be read.
    #[error("failed to walk {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },
}

/// Searches `start` and all its descendants for [`CONFIG_FILE_NAME`].
///
/// The search is depth-first and returns the first match. Within a directory,
/// files are visited before subdirectories and both in file-name order, so a
/// config in `start` itself always wins.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if no config file exists in the subtree,
/// or [`ConfigError::Search`] if a directory cannot be read.
pub fn find_config(start: &Path) -> Result<PathBuf, ConfigError> {
    let walker = WalkDir::new(start).sort_by(|a, b| {
        a.file_type()
            .is_dir()
            .cmp(&b.file_type().is_dir())
            .then_with(|| a.file_name().cmp(b.file_name()))
    });

    for entry in walker {
        let entry = entry.map_err(|e| ConfigError::Search {
            start: start.to_path_buf(),
            source: e,
        })?;

        if entry.file_type().is_file() && entry.file_name() == CONFIG_FILE_NAME {
            debug!("Found config: {}", entry.path().display());
            return Ok(entry.into_path());
        }
    }

    Err(ConfigError::NotFound {
        start: start.to_path_buf(),
    })
}

/// Resolves `start` against the working directory and finds the config below it.
///
/// Returns the absolute config path without reading it.
///
/// # Errors
///
/// Returns error if the working directory is unavailable or no config is found.
pub fn locate_config(start: &Path) -> Result<PathBuf, ConfigError> {
    let start = if start.is_absolute() {
        normalize(start)
    } else {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
            path: start.to_path_buf(),
            source: e,
        })?;
        normalize(&cwd.join(start))
    };
    find_config(&start)
}

impl LoadedConfig {
    /// Reads and parses the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let config = OnionConfig::from_file(&path)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(Self {
            path,
            base_dir,
            config,
        })
    }
}

/// Locates and parses the config below `start`.
///
/// # Errors
///
/// Returns error if the config cannot be found, read, or parsed.
pub fn load_config(start: &Path) -> Result<LoadedConfig, ConfigError> {
    LoadedConfig::from_path(locate_config(start)?)
}

/// Lists every source file below `root` that `extractor` accepts.
///
/// Directories are descended unconditionally, symlinks are not followed, and
/// results come in file-name order.
///
/// # Errors
///
/// Returns [`WalkError::Missing`] if `root` is not a directory and
/// [`WalkError::Io`] if part of the tree cannot be read.
pub fn layer_files(
    root: &Path,
    extractor: &dyn LanguageExtractor,
) -> Result<Vec<PathBuf>, WalkError> {
    if !root.is_dir() {
        return Err(WalkError::Missing(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| WalkError::Io {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if entry
            .file_name()
            .to_str()
            .is_some_and(|name| extractor.accepts(name))
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typescript::TypeScriptExtractor;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"{ "layers": { "A": "a" }, "rules": [{ "from": "A", "allowedImports": [] }] }"#;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn finds_config_in_start_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), CONFIG).unwrap();

        let found = find_config(tmp.path()).unwrap();
        assert_eq!(found, tmp.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn finds_config_in_descendant() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("packages/app")).unwrap();
        fs::write(tmp.path().join("packages/app").join(CONFIG_FILE_NAME), CONFIG).unwrap();

        let found = find_config(tmp.path()).unwrap();
        assert_eq!(found, tmp.path().join("packages/app").join(CONFIG_FILE_NAME));
    }

    #[test]
    fn first_match_in_name_order_wins() {
        let tmp = TempDir::new().unwrap();
        for dir in ["b", "a"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
            fs::write(tmp.path().join(dir).join(CONFIG_FILE_NAME), CONFIG).unwrap();
        }

        let found = find_config(tmp.path()).unwrap();
        assert_eq!(found, tmp.path().join("a").join(CONFIG_FILE_NAME));
    }

    #[test]
    fn config_in_start_dir_beats_earlier_sorted_subdirs() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("apps/web")).unwrap();
        fs::write(tmp.path().join("apps/web").join(CONFIG_FILE_NAME), CONFIG).unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), CONFIG).unwrap();

        let found = find_config(tmp.path()).unwrap();
        assert_eq!(found, tmp.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn locate_config_does_not_parse() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "{ layers: ").unwrap();

        let path = locate_config(tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join(CONFIG_FILE_NAME));
        let err = LoadedConfig::from_path(path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_config_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = find_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn load_config_sets_base_dir() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("project")).unwrap();
        fs::write(tmp.path().join("project").join(CONFIG_FILE_NAME), CONFIG).unwrap();

        let loaded = load_config(tmp.path()).unwrap();
        assert_eq!(loaded.base_dir, tmp.path().join("project"));
        assert_eq!(loaded.config.layers[0].name, "A");
    }

    #[test]
    fn load_config_rejects_malformed_json() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "{ layers: ").unwrap();

        let err = load_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn layer_files_skips_declarations_and_other_extensions() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "service.ts");
        touch(tmp.path(), "nested/deep/repo.ts");
        touch(tmp.path(), "types.d.ts");
        touch(tmp.path(), "view.tsx");
        touch(tmp.path(), "README.md");

        let files = layer_files(tmp.path(), &TypeScriptExtractor::new()).unwrap();
        assert_eq!(
            files,
            [
                tmp.path().join("nested/deep/repo.ts"),
                tmp.path().join("service.ts"),
            ]
        );
    }

    #[test]
    fn layer_files_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let files = layer_files(tmp.path(), &TypeScriptExtractor::new()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn layer_files_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = layer_files(&tmp.path().join("nope"), &TypeScriptExtractor::new()).unwrap_err();
        assert!(matches!(err, WalkError::Missing(_)));
    }
}
