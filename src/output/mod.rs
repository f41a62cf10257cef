//! Report renderers: terminal (colored summary), Markdown (tabular), and
//! JSON (the full enriched tree and report, serialized as-is).

mod json;
mod markdown;
mod terminal;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

use crate::core::{Report, TreeNode};
use std::io::Write;

/// A renderer for one output format. Cosmetic ordering and whitespace are
/// not part of the contract — only the JSON writer's field names are.
pub trait OutputWriter {
    fn write_report(&mut self, tree: &TreeNode, report: &Report) -> anyhow::Result<()>;
}
