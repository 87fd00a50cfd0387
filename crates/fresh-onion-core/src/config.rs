//! JSON configuration for onion layers and their import rules.
//!
//! ```json
//! {
//!   "layers": { "domain": "src/domain", "app": "src/app" },
//!   "rules": [
//!     { "from": "domain", "allowedImports": [] },
//!     { "from": "app", "allowedImports": ["domain"] }
//!   ]
//! }
//! ```
//!
//! Layer paths are relative to the directory holding the config file.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::utils::paths::normalize;

/// File name searched for when locating the configuration.
pub const CONFIG_FILE_NAME: &str = "onion.config.json";

/// Top-level onion configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OnionConfig {
    /// Layer definitions, in declaration order.
    #[serde(deserialize_with = "deserialize_layers")]
    pub layers: Vec<LayerDef>,

    /// Import rules, one per layer.
    pub rules: Vec<RuleDef>,
}

/// A named architecture layer mapped to a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerDef {
    /// Layer name (e.g., `"domain-model"`).
    pub name: String,
    /// Directory relative to the config file's directory.
    pub path: PathBuf,
}

impl LayerDef {
    /// Absolute, normalized root directory of this layer.
    #[must_use]
    pub fn root(&self, base_dir: &Path) -> PathBuf {
        normalize(&base_dir.join(&self.path))
    }
}

/// The set of layers a given layer may import from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDef {
    /// Layer the rule applies to.
    pub from: String,
    /// Layers that `from` may import.
    pub allowed_imports: Vec<String>,
}

impl RuleDef {
    /// Whether this rule lets its layer import from `layer`.
    #[must_use]
    pub fn allows(&self, layer: &str) -> bool {
        self.allowed_imports.iter().any(|a| a == layer)
    }
}

/// Keeps the JSON object order of `layers` and rejects duplicate names.
fn deserialize_layers<'de, D>(deserializer: D) -> Result<Vec<LayerDef>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LayersVisitor;

    impl<'de> Visitor<'de> for LayersVisitor {
        type Value = Vec<LayerDef>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of layer names to directory paths")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut layers: Vec<LayerDef> = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, path)) = map.next_entry::<String, PathBuf>()? {
                if layers.iter().any(|l| l.name == name) {
                    return Err(de::Error::custom(format!("duplicate layer `{name}`")));
                }
                layers.push(LayerDef { name, path });
            }
            Ok(layers)
        }
    }

    deserializer.deserialize_map(LayersVisitor)
}

/// Fatal errors while locating or loading configuration.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// No config file anywhere under the start directory.
    #[error("could not find {} under {}", CONFIG_FILE_NAME, .start.display())]
    #[diagnostic(
        code(fresh_onion::config::not_found),
        help("create an onion.config.json in the project directory")
    )]
    NotFound {
        /// Directory the search started from.
        start: PathBuf,
    },

    /// Walking the directory tree during the search failed.
    #[error("failed to search {}: {source}", .start.display())]
    #[diagnostic(code(fresh_onion::config::search))]
    Search {
        /// Directory the search started from.
        start: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },

    /// Failed to read config file.
    #[error("failed to read {}: {source}", .path.display())]
    #[diagnostic(code(fresh_onion::config::io))]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// Failed to parse JSON, or the JSON has the wrong shape.
    #[error("invalid config: {message}")]
    #[diagnostic(
        code(fresh_onion::config::parse),
        help("expected an object with `layers` (name to path) and `rules` (from, allowedImports)")
    )]
    Parse {
        /// Parse error detail.
        message: String,
    },
}

/// A structural problem in an otherwise well-formed config.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigProblem {
    /// A rule's `from` names no declared layer.
    #[error("Rule from layer {from} does not exist")]
    UnknownRuleSource {
        /// The dangling layer name.
        from: String,
    },

    /// A rule allows importing from an undeclared layer.
    #[error("Rule from layer {from} allows import from non-existent layer {layer}")]
    UnknownAllowedImport {
        /// Rule source layer.
        from: String,
        /// The dangling allowed layer.
        layer: String,
    },

    /// A declared layer has no rule.
    #[error("Layer {layer} has no rules")]
    MissingRule {
        /// Layer without a rule.
        layer: String,
    },

    /// A declared layer has more than one rule.
    #[error("Layer {layer} has more than one rule")]
    DuplicateRule {
        /// Layer with several rules.
        layer: String,
    },
}

impl OnionConfig {
    /// Load from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or does not match the config shape.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Check that rules and layers reference each other consistently.
    ///
    /// # Errors
    ///
    /// Returns every problem found, in rule order, then layer order.
    pub fn validate(&self) -> Result<(), Vec<ConfigProblem>> {
        let layer_names: HashSet<&str> = self.layers.iter().map(|l| l.name.as_str()).collect();
        let mut ruled: HashSet<&str> = HashSet::new();
        let mut problems = Vec::new();

        for rule in &self.rules {
            if !layer_names.contains(rule.from.as_str()) {
                problems.push(ConfigProblem::UnknownRuleSource {
                    from: rule.from.clone(),
                });
            } else if !ruled.insert(rule.from.as_str()) {
                problems.push(ConfigProblem::DuplicateRule {
                    layer: rule.from.clone(),
                });
            }

            for allowed in &rule.allowed_imports {
                if !layer_names.contains(allowed.as_str()) {
                    problems.push(ConfigProblem::UnknownAllowedImport {
                        from: rule.from.clone(),
                        layer: allowed.clone(),
                    });
                }
            }
        }

        for layer in &self.layers {
            if !ruled.contains(layer.name.as_str()) {
                problems.push(ConfigProblem::MissingRule {
                    layer: layer.name.clone(),
                });
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }

    /// Looks up a layer by name.
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&LayerDef> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// The first rule whose `from` is `layer`.
    #[must_use]
    pub fn rule_for(&self, layer: &str) -> Option<&RuleDef> {
        self.rules.iter().find(|r| r.from == layer)
    }
}
