//! Analysis outcomes attached to tree nodes, plus the flattened report.

use super::metrics::{ClassMetrics, MethodMetrics};
use std::path::PathBuf;

/// A proposed extraction: a subset of a god class's methods believed to
/// share a responsibility.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ResponsibilityCluster {
    pub suggested_class_name: String,
    pub methods: Vec<MethodMetrics>,
    pub cohesion_score: f64,
    pub shared_dependencies: Vec<String>,
    pub justification: String,
}

/// A method whose structural metrics cross a threshold.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GodMethodRecord {
    pub method: MethodMetrics,
    pub class_name: String,
    pub file_path: PathBuf,
    pub violations: Vec<String>,
    pub violation_score: u32,
}

/// Per-class verdict: whether it's a god class, and if so what the clusterer
/// proposes for it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ClassOutcome {
    pub class: ClassMetrics,
    pub is_god_class: bool,
    pub suggested_extractions: Vec<ResponsibilityCluster>,
    pub god_methods: Vec<GodMethodRecord>,
    pub summary: String,
}

/// Present only when a file crosses a file-level threshold.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GodFileVerdict {
    pub class_count: usize,
    pub total_lines: usize,
    pub class_names: Vec<String>,
    pub violations: Vec<String>,
    pub violation_score: u32,
}

/// The full analysis result for one source file.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FileOutcome {
    pub file_path: PathBuf,
    pub classes: Vec<ClassMetrics>,
    pub god_file_verdict: Option<GodFileVerdict>,
    pub class_outcomes: Vec<ClassOutcome>,
    /// Set when the parser could not read or recover the file; the run
    /// continues with this file contributing no classes.
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn failed(file_path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            file_path,
            classes: Vec::new(),
            god_file_verdict: None,
            class_outcomes: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Flattened, whole-project summary computed from the enriched tree.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Report {
    pub total_files: usize,
    pub total_classes: usize,
    pub god_files: Vec<GodFileEntry>,
    pub god_classes: Vec<GodClassEntry>,
    pub god_methods: Vec<GodMethodRecord>,
    /// Classes with at least one god method but that are not themselves god
    /// classes.
    pub classes_with_god_methods: Vec<GodClassEntry>,
    pub healthy_class_count: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct GodFileEntry {
    pub file_path: PathBuf,
    pub verdict: GodFileVerdict,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct GodClassEntry {
    pub file_path: PathBuf,
    pub class_name: String,
    pub outcome: ClassOutcome,
}

impl Report {
    /// Whether the project is clean: no god files, god classes, or god
    /// methods were found.
    pub fn is_clean(&self) -> bool {
        self.god_files.is_empty() && self.god_classes.is_empty() && self.god_methods.is_empty()
    }
}
