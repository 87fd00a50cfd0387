//! Onion rule engine.
//!
//! Walks every declared layer, extracts the local imports of each of its
//! files, and checks each edge against the layer's rule, collecting
//! [`Diagnostic`]s into a [`Report`].

use std::error::Error as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{OnionConfig, RuleDef};
use crate::discovery::{layer_files, WalkError};
use crate::extractor::LanguageExtractor;
use crate::imports::{local_imports, ImportEdge};
use crate::layer::LayerResolver;
use crate::types::{Diagnostic, Location, Report};
use crate::utils::paths::relative_to;

/// Evaluates layer import rules over a project tree.
pub struct RuleEngine {
    config: OnionConfig,
    base_dir: PathBuf,
    resolver: LayerResolver,
    extractor: Box<dyn LanguageExtractor>,
}

impl RuleEngine {
    /// Create a new engine. Layer paths are resolved against `base_dir`.
    #[must_use]
    pub fn new(
        config: OnionConfig,
        base_dir: impl Into<PathBuf>,
        extractor: Box<dyn LanguageExtractor>,
    ) -> Self {
        let base_dir = base_dir.into();
        let resolver = LayerResolver::new(&config, &base_dir);
        Self {
            config,
            base_dir,
            resolver,
            extractor,
        }
    }

    /// Check every layer, in declaration order.
    #[must_use]
    pub fn check(&self) -> Report {
        let mut report = Report::new();
        for layer in &self.config.layers {
            let mut layer_report = Report::new();
            self.check_layer(&layer.name, &mut layer_report);
            report.extend(layer_report);
        }

        let (errors, warnings) = report.count_by_severity();
        info!(
            "Checked {} {} files: {} error(s), {} warning(s)",
            report.files_checked,
            self.extractor.language_id(),
            errors,
            warnings
        );
        report
    }

    /// Check the files of one layer, appending findings to `report`.
    ///
    /// A layer without a rule is reported and skipped. Files that belong to
    /// a layer with a deeper root are left to that layer; layers sharing a
    /// root each check its files under their own rule.
    pub fn check_layer(&self, layer: &str, report: &mut Report) {
        let Some(layer_def) = self.config.layer(layer) else {
            warn!("Unknown layer {layer}");
            return;
        };

        let Some(rule) = self.config.rule_for(layer) else {
            warn!("No rules defined for layer {layer}");
            report.push(Diagnostic::MissingRule {
                layer: layer.to_owned(),
            });
            return;
        };

        let root = layer_def.root(&self.base_dir);
        let files = match layer_files(&root, self.extractor.as_ref()) {
            Ok(files) => files,
            Err(WalkError::Missing(_)) => {
                report.push(Diagnostic::MissingLayerDirectory {
                    layer: layer.to_owned(),
                    path: layer_def.path.clone(),
                });
                return;
            }
            Err(WalkError::Io { path, source }) => {
                report.push(Diagnostic::UnreadablePath {
                    path: self.relative(&path),
                    reason: source.to_string(),
                });
                return;
            }
        };

        debug!("Layer {layer}: {} file(s) under {}", files.len(), root.display());

        let depth = root.components().count();
        for file in &files {
            if let Some((owner_root, owner)) = self.resolver.owner(file) {
                if owner != layer && owner_root.components().count() > depth {
                    debug!("Skipping {} (nested layer {owner})", file.display());
                    continue;
                }
            }
            report.files_checked += 1;

            match local_imports(file, &self.base_dir, self.extractor.as_ref()) {
                Ok(edges) => {
                    for edge in &edges {
                        self.check_edge(layer, rule, edge, report);
                    }
                }
                Err(e) => {
                    warn!("{e}");
                    report.push(Diagnostic::UnreadablePath {
                        path: self.relative(file),
                        reason: e.source().map_or_else(|| e.to_string(), ToString::to_string),
                    });
                }
            }
        }
    }

    fn check_edge(&self, layer: &str, rule: &RuleDef, edge: &ImportEdge, report: &mut Report) {
        let location = Location::new(self.relative(&edge.file), edge.line, edge.column);

        let Some(target_layer) = self.resolver.resolve(&edge.absolute_target(&self.base_dir))
        else {
            report.push(Diagnostic::UnresolvedLayer {
                location,
                target: edge.target.clone(),
            });
            return;
        };

        if target_layer == layer || rule.allows(target_layer) {
            return;
        }

        report.push(Diagnostic::BoundaryViolation {
            layer: layer.to_owned(),
            location,
            target_layer: target_layer.to_owned(),
            target: edge.target.clone(),
        });
    }

    fn relative(&self, path: &Path) -> PathBuf {
        relative_to(path, &self.base_dir)
    }
}
