//! Lexical path utilities.
//!
//! Import targets usually name files without their extension, so they cannot
//! be canonicalized through the filesystem. These helpers resolve `.` and `..`
//! purely on the path components.

use std::path::{Component, Path, PathBuf};

/// Resolves `.` and `..` components without touching the filesystem.
///
/// `..` at the root of an absolute path stays at the root; leading `..` of a
/// relative path are kept.
///
/// # Examples
///
/// ```
/// use fresh_onion_core::utils::paths::normalize;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
/// ```
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    parts.iter().collect()
}

/// Expresses `path` relative to `base`, inserting `..` where `path` leaves it.
///
/// Both paths are normalized first. Returns an empty path when they are equal.
///
/// # Examples
///
/// ```
/// use fresh_onion_core::utils::paths::relative_to;
/// use std::path::{Path, PathBuf};
///
/// let rel = relative_to(Path::new("/p/src/a/x"), Path::new("/p/src/b"));
/// assert_eq!(rel, PathBuf::from("../a/x"));
/// ```
#[must_use]
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path = normalize(path);
    let base = normalize(base);

    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..base_parts.len() {
        result.push("..");
    }
    for part in &path_parts[common..] {
        result.push(part);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_removes_cur_dir() {
        assert_eq!(normalize(Path::new("/a/./b/.")), PathBuf::from("/a/b"));
    }

    #[test]
    fn normalize_resolves_parent_dir() {
        assert_eq!(
            normalize(Path::new("/p/src/app/../domain/x")),
            PathBuf::from("/p/src/domain/x")
        );
    }

    #[test]
    fn normalize_stops_at_root() {
        assert_eq!(normalize(Path::new("/../../a")), PathBuf::from("/a"));
    }

    #[test]
    fn normalize_keeps_leading_parent_of_relative_path() {
        assert_eq!(normalize(Path::new("../../a/../b")), PathBuf::from("../../b"));
    }

    #[test]
    fn relative_to_descendant() {
        assert_eq!(
            relative_to(Path::new("/p/src/domain/user"), Path::new("/p")),
            PathBuf::from("src/domain/user")
        );
    }

    #[test]
    fn relative_to_outside_base() {
        assert_eq!(
            relative_to(Path::new("/lib/shared"), Path::new("/p/src")),
            PathBuf::from("../../lib/shared")
        );
    }

    #[test]
    fn relative_to_same_path_is_empty() {
        assert_eq!(relative_to(Path::new("/p/./src"), Path::new("/p/src")), PathBuf::new());
    }
}
