//! Polymorphic source parsing: one implementation per supported language,
//! dispatched by file extension through a registry rather than an
//! inheritance hierarchy.

mod python;
mod rust;
pub mod tokens;

use crate::core::{ClassMetrics, Language};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Capability set every language parser implements.
pub trait Parser: Send + Sync {
    /// Parse a single source file into the classes it contains.
    ///
    /// Returns `Err(Error::Parse)` only for unrecoverable syntax errors; for
    /// recoverable syntax errors, implementations should return whatever
    /// classes they could recognize instead of failing. An empty file yields
    /// an empty `Vec`.
    fn parse_file(&self, path: &Path, source: &str) -> Result<Vec<ClassMetrics>>;

    fn language(&self) -> Language;
}

/// A read-only mapping from file extension to the parser that handles it.
pub struct ParserRegistry {
    by_extension: HashMap<String, std::sync::Arc<dyn Parser>>,
}

impl ParserRegistry {
    /// The default registry: Rust (via `syn`) and Python (via `tree-sitter`).
    pub fn default_registry() -> Self {
        let mut registry = Self {
            by_extension: HashMap::new(),
        };
        registry.register(std::sync::Arc::new(rust::RustParser));
        registry.register(std::sync::Arc::new(python::PythonParser::new()));
        registry
    }

    pub fn register(&mut self, parser: std::sync::Arc<dyn Parser>) {
        for ext in parser.language().extensions() {
            self.by_extension.insert((*ext).to_string(), parser.clone());
        }
    }

    /// Every extension this registry recognizes, used by the tree builder to
    /// decide which files to include.
    pub fn recognized_extensions(&self) -> Vec<String> {
        self.by_extension.keys().cloned().collect()
    }

    pub fn is_recognized(&self, ext: &str) -> bool {
        self.by_extension.contains_key(&ext.to_lowercase())
    }

    /// Look up the parser for a file's extension and parse it. Reads the
    /// file from disk, surfacing `Error::Io` on read failure.
    pub fn parse_path(&self, path: &Path) -> Result<Vec<ClassMetrics>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let parser = self.by_extension.get(&ext).ok_or_else(|| Error::Parse {
            path: path.to_path_buf(),
            message: format!("no parser registered for extension '{ext}'"),
        })?;

        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        parser.parse_file(path, &source)
    }
}

/// Count lines that, after trimming, are non-empty and do not start with the
/// language's single-line comment marker.
pub fn count_significant_lines(body: &str, comment_marker: &str) -> usize {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(comment_marker))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_non_blank_non_comment_lines() {
        let body = "fn a() {\n    // a comment\n\n    let x = 1;\n}\n";
        assert_eq!(count_significant_lines(body, "//"), 3);
    }

    #[test]
    fn default_registry_recognizes_rust_and_python() {
        let registry = ParserRegistry::default_registry();
        assert!(registry.is_recognized("rs"));
        assert!(registry.is_recognized("py"));
        assert!(!registry.is_recognized("go"));
    }
}
