//! TypeScript import extractor using Tree-sitter.

use tree_sitter::{Language, Node, Parser};

use crate::extractor::{ExtractError, ImportSpecifier, LanguageExtractor};

/// Extracts top-level `import ... from "..."` specifiers from TypeScript source.
pub struct TypeScriptExtractor {
    language: Language,
}

impl TypeScriptExtractor {
    /// Creates a new TypeScript extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }

    /// Reads the `source` string of an `import_statement`, quotes stripped.
    fn extract_import(node: &Node<'_>, src: &[u8]) -> Option<ImportSpecifier> {
        let source = node.child_by_field_name("source")?;
        let literal = source.utf8_text(src).ok()?;
        let specifier = literal.get(1..literal.len().checked_sub(1)?)?;
        let position = source.start_position();

        Some(ImportSpecifier {
            specifier: specifier.to_owned(),
            line: position.row,
            column: Self::utf16_column(src, source.start_byte(), position.column),
        })
    }

    /// Tree-sitter columns are byte offsets; editors and `tsc` count UTF-16 units.
    fn utf16_column(src: &[u8], start_byte: usize, byte_column: usize) -> usize {
        src.get(start_byte.saturating_sub(byte_column)..start_byte)
            .and_then(|prefix| std::str::from_utf8(prefix).ok())
            .map_or(byte_column, |prefix| prefix.encode_utf16().count())
    }
}

impl Default for TypeScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for TypeScriptExtractor {
    fn language_id(&self) -> &'static str {
        "typescript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".ts"]
    }

    fn excluded_suffixes(&self) -> &'static [&'static str] {
        &[".d.ts"]
    }

    fn extract(&self, source: &str) -> Result<Vec<ImportSpecifier>, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ExtractError::Language {
                language: self.language_id(),
                message: e.to_string(),
            })?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ExtractError::NoTree {
            language: self.language_id(),
        })?;
        let root = tree.root_node();

        let mut imports = Vec::new();
        let mut cursor = root.walk();
        for node in root.children(&mut cursor) {
            if node.kind() == "import_statement" {
                if let Some(imp) = Self::extract_import(&node, src) {
                    imports.push(imp);
                }
            }
        }

        Ok(imports)
    }
}
