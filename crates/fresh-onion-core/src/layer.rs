//! Layer resolution: maps absolute paths to architecture layers.

use std::path::{Path, PathBuf};

use crate::config::OnionConfig;

/// Resolves absolute paths to the layer whose root directory contains them.
///
/// Containment is checked per path component, so `src/domain` does not
/// contain `src/domain-services`. When layer roots are nested, the most
/// specific (longest) root wins; equal roots keep declaration order.
pub struct LayerResolver {
    /// (absolute root, layer name) sorted by root depth descending.
    roots: Vec<(PathBuf, String)>,
}

impl LayerResolver {
    /// Build a resolver from config, resolving layer paths against `base_dir`.
    #[must_use]
    pub fn new(config: &OnionConfig, base_dir: &Path) -> Self {
        let mut roots: Vec<(PathBuf, String)> = config
            .layers
            .iter()
            .map(|layer| (layer.root(base_dir), layer.name.clone()))
            .collect();
        // Deepest root first; sort is stable so ties stay in declaration order
        roots.sort_by(|a, b| b.0.components().count().cmp(&a.0.components().count()));
        Self { roots }
    }

    /// Which layer does this absolute path belong to?
    #[must_use]
    pub fn resolve(&self, path: &Path) -> Option<&str> {
        self.owner(path).map(|(_, name)| name)
    }

    /// The matching layer together with its absolute root.
    #[must_use]
    pub fn owner(&self, path: &Path) -> Option<(&Path, &str)> {
        self.roots
            .iter()
            .find(|(root, _)| path.starts_with(root))
            .map(|(root, name)| (root.as_path(), name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config() -> OnionConfig {
        OnionConfig::parse(
            r#"{
                "layers": {
                    "domain": "src/domain",
                    "domain-services": "src/domain-services",
                    "infra": "src/infra",
                    "infra-db": "src/infra/db"
                },
                "rules": []
            }"#,
        )
        .expect("parse failed")
    }

    fn resolver() -> LayerResolver {
        LayerResolver::new(&make_config(), Path::new("/project"))
    }

    #[test]
    fn resolves_file_under_root() {
        let r = resolver();
        assert_eq!(r.resolve(Path::new("/project/src/domain/model/user")), Some("domain"));
    }

    #[test]
    fn resolves_root_itself() {
        let r = resolver();
        assert_eq!(r.resolve(Path::new("/project/src/domain")), Some("domain"));
    }

    #[test]
    fn no_false_prefix_match() {
        let r = resolver();
        // "src/domain-services" must not be claimed by "src/domain"
        assert_eq!(
            r.resolve(Path::new("/project/src/domain-services/repo")),
            Some("domain-services")
        );
    }

    #[test]
    fn resolves_longest_root() {
        let r = resolver();
        assert_eq!(r.resolve(Path::new("/project/src/infra/db/pg")), Some("infra-db"));
        assert_eq!(r.resolve(Path::new("/project/src/infra/http/api")), Some("infra"));
    }

    #[test]
    fn owner_reports_matched_root() {
        let r = resolver();
        assert_eq!(
            r.owner(Path::new("/project/src/infra/db/pg")),
            Some((Path::new("/project/src/infra/db"), "infra-db"))
        );
    }

    #[test]
    fn unknown_path_returns_none() {
        let r = resolver();
        assert_eq!(r.resolve(Path::new("/project/lib/shared")), None);
        assert_eq!(r.resolve(Path::new("/elsewhere/src/domain/x")), None);
    }
}
