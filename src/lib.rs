//! Godhunter: detects god files, god classes, and god methods by structural
//! thresholds, and proposes refactoring extractions for god classes via
//! unsupervised clustering over their methods.

pub mod cli;
pub mod clustering;
pub mod config;
pub mod core;
pub mod detector;
pub mod engine;
pub mod error;
pub mod observability;
pub mod output;
pub mod parsing;
pub mod tree_builder;

pub use core::{ClassMetrics, MethodMetrics, Report, Thresholds, TreeNode};
pub use engine::Engine;
pub use error::{Error, Result};
pub use parsing::ParserRegistry;
