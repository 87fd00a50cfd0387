//! Language-agnostic import extraction trait.
//!
//! `LanguageExtractor` is the seam between the layer checks and a concrete
//! parser. Implement it to teach fresh-onion how to find import specifiers
//! in another language.

/// One import module specifier as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    /// Specifier text without quotes (e.g., `../domain/user`).
    pub specifier: String,
    /// Line of the specifier literal (0-indexed).
    pub line: usize,
    /// Column of the specifier literal (0-indexed, in UTF-16 code units).
    pub column: usize,
}

/// Errors raised by an extractor.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Loader error detail.
        message: String,
    },
    /// The parser returned no tree.
    #[error("{language} parser produced no syntax tree")]
    NoTree {
        /// Language identifier.
        language: &'static str,
    },
}

/// Trait for language-specific import extraction.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"typescript"`).
    fn language_id(&self) -> &'static str;

    /// File name suffixes this extractor handles (e.g., `&[".ts"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// File name suffixes that look like sources but must be skipped.
    fn excluded_suffixes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether a file with this name should be analyzed.
    fn accepts(&self, file_name: &str) -> bool {
        self.extensions().iter().any(|ext| file_name.ends_with(ext))
            && !self
                .excluded_suffixes()
                .iter()
                .any(|suffix| file_name.ends_with(suffix))
    }

    /// Extract top-level import specifiers, in source order.
    ///
    /// # Errors
    ///
    /// Returns error if the parser cannot be set up or produces no tree.
    fn extract(&self, source: &str) -> Result<Vec<ImportSpecifier>, ExtractError>;
}
