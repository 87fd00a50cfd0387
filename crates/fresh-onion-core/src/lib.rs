//! # fresh-onion-core
//!
//! Dependency-direction checks for onion (hexagonal) TypeScript projects.
//!
//! An `onion.config.json` maps layer names to directories and lists, per
//! layer, which other layers it may import from. This crate provides:
//!
//! - [`OnionConfig`] for loading and validating that configuration
//! - [`LanguageExtractor`] trait for pluggable import extraction, with
//!   [`TypeScriptExtractor`] built on Tree-sitter
//! - [`LayerResolver`] for path-to-layer mapping
//! - [`RuleEngine`] for checking every local import edge
//! - [`Report`] and [`Verdict`] for the outcome of a run
//!
//! ## Example
//!
//! ```no_run
//! use fresh_onion_core::pipeline;
//!
//! let report = pipeline::run(std::path::Path::new("."))?;
//! for diagnostic in &report.diagnostics {
//!     println!("{diagnostic}");
//! }
//! println!("{}", report.verdict());
//! # Ok::<(), fresh_onion_core::ConfigError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod discovery;
pub mod engine;
pub mod extractor;
pub mod imports;
pub mod layer;
pub mod pipeline;
pub mod types;
pub mod typescript;

/// Utility modules shared across the checks.
pub mod utils;

pub use config::{ConfigError, ConfigProblem, OnionConfig, CONFIG_FILE_NAME};
pub use discovery::LoadedConfig;
pub use engine::RuleEngine;
pub use extractor::{ImportSpecifier, LanguageExtractor};
pub use imports::ImportEdge;
pub use layer::LayerResolver;
pub use types::{Diagnostic, Location, Report, Severity, Verdict};
pub use typescript::TypeScriptExtractor;
