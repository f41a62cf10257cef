//! Small shared value types used across the core.

use serde::{Deserialize, Serialize};

/// Language enumeration for all languages a [`crate::parsing::Parser`] can be
/// registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Rust,
    Python,
}

impl Language {
    /// File extensions (without the leading dot) recognized for this language.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Rust => &["rs"],
            Language::Python => &["py", "pyw"],
        }
    }

    /// The single-line comment marker used by this language.
    pub fn line_comment_marker(&self) -> &'static str {
        match self {
            Language::Rust => "//",
            Language::Python => "#",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Rust => "Rust",
            Language::Python => "Python",
        }
    }
}
