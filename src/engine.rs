//! Orchestrates a full analysis: build the tree, walk it with directory-level
//! parallelism (rayon work-stealing, order preserved), then flatten the
//! enriched tree into a [`Report`].

use crate::clustering;
use crate::core::{
    ClassOutcome, FileOutcome, GodClassEntry, GodFileEntry, NodeKind, Report, Thresholds, TreeNode,
};
use crate::detector;
use crate::error::{Error, Result};
use crate::parsing::ParserRegistry;
use crate::tree_builder::TreeBuilder;
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct Engine<'a> {
    registry: &'a ParserRegistry,
    thresholds: Thresholds,
    cancel: Arc<AtomicBool>,
}

impl<'a> Engine<'a> {
    pub fn new(registry: &'a ParserRegistry, thresholds: Thresholds) -> Self {
        Self {
            registry,
            thresholds,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Attach a cooperative cancellation flag; callers can flip it from
    /// another thread to abort an in-progress run.
    pub fn with_cancellation(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run a full analysis rooted at `root`. Fails only if the tree cannot
    /// be built (`PathNotFound`) or the run is cancelled mid-flight.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn analyze(&self, root: &Path) -> Result<(TreeNode, Report)> {
        let builder = TreeBuilder::new(self.registry);
        let tree = builder.build(root)?;

        debug!("tree built, beginning enrichment");
        let enriched = self.enrich(tree)?;

        let report = build_report(&enriched);
        Ok((enriched, report))
    }

    fn enrich(&self, node: TreeNode) -> Result<TreeNode> {
        if self.cancel.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }

        match node.kind {
            NodeKind::File => self.enrich_file(node),
            NodeKind::Directory => {
                let children: Result<Vec<TreeNode>> = node
                    .children
                    .into_par_iter()
                    .map(|child| self.enrich(child))
                    .collect();
                Ok(TreeNode::directory(node.name, node.path, node.depth).with_children(children?))
            }
        }
    }

    fn enrich_file(&self, node: TreeNode) -> Result<TreeNode> {
        let outcome = match self.registry.parse_path(&node.path) {
            Ok(classes) => self.analyze_classes(&node.path, classes),
            Err(Error::Io { source, .. }) => {
                FileOutcome::failed(node.path.clone(), format!("io error: {source}"))
            }
            Err(Error::Parse { message, .. }) => {
                FileOutcome::failed(node.path.clone(), format!("parse error: {message}"))
            }
            Err(other) => return Err(other),
        };

        Ok(node.with_outcome(outcome))
    }

    fn analyze_classes(&self, path: &Path, classes: Vec<crate::core::ClassMetrics>) -> FileOutcome {
        let god_file_verdict = detector::god_file_verdict(path, &classes, &self.thresholds);

        let class_outcomes: Vec<ClassOutcome> = classes
            .iter()
            .map(|class| self.analyze_class(class))
            .collect();

        FileOutcome {
            file_path: path.to_path_buf(),
            classes,
            god_file_verdict,
            class_outcomes,
            error: None,
        }
    }

    fn analyze_class(&self, class: &crate::core::ClassMetrics) -> ClassOutcome {
        let class_verdict = detector::is_god_class(class, &self.thresholds);

        let god_methods: Vec<_> = class
            .methods
            .iter()
            .filter_map(|method| {
                let verdict = detector::is_god_method(method, &self.thresholds);
                verdict.is_god_method.then(|| crate::core::GodMethodRecord {
                    method: method.clone(),
                    class_name: class.name.clone(),
                    file_path: class.file_path.clone(),
                    violations: verdict.violations,
                    violation_score: verdict.violation_score,
                })
            })
            .collect();

        let suggested_extractions = if class_verdict.is_god_class {
            clustering::cluster(class, &self.thresholds)
        } else {
            Vec::new()
        };

        let summary = summarize(class, &class_verdict, &god_methods, &suggested_extractions);

        ClassOutcome {
            class: class.clone(),
            is_god_class: class_verdict.is_god_class,
            suggested_extractions,
            god_methods,
            summary,
        }
    }
}

fn summarize(
    class: &crate::core::ClassMetrics,
    verdict: &detector::ClassVerdict,
    god_methods: &[crate::core::GodMethodRecord],
    extractions: &[crate::core::ResponsibilityCluster],
) -> String {
    if !verdict.is_god_class && god_methods.is_empty() {
        return format!("{} is within all configured thresholds", class.name);
    }
    let mut parts = Vec::new();
    if verdict.is_god_class {
        parts.push(format!("god class ({})", verdict.violations.join("; ")));
    }
    if !god_methods.is_empty() {
        parts.push(format!("{} god method(s)", god_methods.len()));
    }
    if !extractions.is_empty() {
        parts.push(format!("{} suggested extraction(s)", extractions.len()));
    }
    format!("{}: {}", class.name, parts.join(", "))
}

/// Walk the enriched tree once, sequentially, to compute the flattened
/// report. Order of the resulting lists follows tree traversal order.
fn build_report(root: &TreeNode) -> Report {
    let mut report = Report::default();

    for node in root.iter() {
        let Some(outcome) = &node.outcome else {
            continue;
        };

        report.total_files += 1;
        report.total_classes += outcome.classes.len();

        if let Some(verdict) = &outcome.god_file_verdict {
            report.god_files.push(GodFileEntry {
                file_path: outcome.file_path.clone(),
                verdict: verdict.clone(),
            });
        }

        for class_outcome in &outcome.class_outcomes {
            let entry = GodClassEntry {
                file_path: outcome.file_path.clone(),
                class_name: class_outcome.class.name.clone(),
                outcome: class_outcome.clone(),
            };

            if class_outcome.is_god_class {
                report.god_classes.push(entry);
            } else if !class_outcome.god_methods.is_empty() {
                report.classes_with_god_methods.push(entry);
            } else {
                report.healthy_class_count += 1;
            }

            report.god_methods.extend(class_outcome.god_methods.iter().cloned());
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn empty_directory_yields_empty_report() {
        let temp = TempDir::new().unwrap();
        let registry = ParserRegistry::default_registry();
        let engine = Engine::new(&registry, Thresholds::default());
        let (_tree, report) = engine.analyze(temp.path()).unwrap();
        assert_eq!(report.total_files, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn missing_root_propagates_path_not_found() {
        let registry = ParserRegistry::default_registry();
        let engine = Engine::new(&registry, Thresholds::default());
        let result = engine.analyze(Path::new("/no/such/path/anywhere"));
        assert!(matches!(result, Err(Error::PathNotFound(_))));
    }

    #[test]
    fn healthy_class_produces_clean_report() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "small.rs",
            "struct Small;\nimpl Small {\n    pub fn greet(&self) -> i32 { 1 }\n}\n",
        );
        let registry = ParserRegistry::default_registry();
        let engine = Engine::new(&registry, Thresholds::default());
        let (_tree, report) = engine.analyze(temp.path()).unwrap();
        assert_eq!(report.total_files, 1);
        assert_eq!(report.total_classes, 1);
        assert!(report.is_clean());
        assert_eq!(report.healthy_class_count, 1);
    }

    #[test]
    fn cancellation_flag_short_circuits_the_run() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.rs", "struct A;\n");
        let registry = ParserRegistry::default_registry();
        let cancel = Arc::new(AtomicBool::new(true));
        let engine = Engine::new(&registry, Thresholds::default()).with_cancellation(cancel);
        let result = engine.analyze(temp.path());
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[test]
    fn unparseable_file_is_recorded_as_an_error_without_aborting() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "broken.rs", "fn (((( not rust");
        let registry = ParserRegistry::default_registry();
        let engine = Engine::new(&registry, Thresholds::default());
        let (tree, report) = engine.analyze(temp.path()).unwrap();
        let file_node = tree.children.iter().find(|n| n.name == "broken.rs").unwrap();
        assert!(file_node.outcome.as_ref().unwrap().error.is_some());
        assert_eq!(report.total_files, 1);
    }
}
