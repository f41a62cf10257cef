//! Core data model: the entities every other module operates on.

pub mod metrics;
pub mod outcome;
pub mod thresholds;
pub mod tree;
pub mod types;

pub use metrics::{ClassMetrics, MethodMetrics, Parameter};
pub use outcome::{
    ClassOutcome, FileOutcome, GodClassEntry, GodFileEntry, GodFileVerdict, GodMethodRecord,
    Report, ResponsibilityCluster,
};
pub use thresholds::{Thresholds, ThresholdsOverride};
pub use tree::{NodeKind, TreeNode};
pub use types::Language;
