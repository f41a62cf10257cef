//! Unsupervised responsibility clustering for god classes: turns a class's
//! method list into a handful of `ResponsibilityCluster` extraction
//! proposals via k-means over TF-style token and structural features.

mod features;
mod kmeans;
mod naming;

use crate::core::{ClassMetrics, MethodMetrics, ResponsibilityCluster, Thresholds};

/// Propose extractions for a god class. Returns an empty list if the class
/// has fewer than `thresholds.min_cluster_size` methods.
pub fn cluster(class: &ClassMetrics, thresholds: &Thresholds) -> Vec<ResponsibilityCluster> {
    let methods = &class.methods;
    if methods.len() < thresholds.min_cluster_size {
        return Vec::new();
    }

    let vocabulary = features::build_vocabulary(methods);
    let points = features::build_feature_vectors(methods, &vocabulary);

    let best = select_best_k(&points, methods.len(), &class.qualified_name);
    let Some(result) = best else {
        return Vec::new();
    };

    let mut clusters: Vec<ResponsibilityCluster> = group_by_label(methods, &result.labels)
        .into_iter()
        .filter(|group| group.len() >= thresholds.min_cluster_size)
        .map(|group| enrich(group, &class.name))
        .collect();

    clusters.sort_by(|a, b| {
        b.cohesion_score
            .partial_cmp(&a.cohesion_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    clusters
}

/// `n <= 3` forces `k = 2`; otherwise sweep `k` in `[2, min(floor(sqrt(n)), 5)]`
/// and keep whichever converged run has the lowest within-cluster sum of
/// squares. This mirrors the documented "pick the minimum-WCSS k" behavior
/// rather than a true elbow or silhouette method.
fn select_best_k(points: &[Vec<f64>], n: usize, seed: &str) -> Option<kmeans::KMeansResult> {
    if n <= 3 {
        return kmeans::run(points, 2, seed);
    }

    let k_max = ((n as f64).sqrt().floor() as usize).min(5);
    let mut best: Option<kmeans::KMeansResult> = None;
    for k in 2..=k_max {
        if let Some(candidate) = kmeans::run(points, k, seed) {
            let is_better = best.as_ref().map(|b| candidate.wcss < b.wcss).unwrap_or(true);
            if is_better {
                best = Some(candidate);
            }
        }
    }
    best
}

fn group_by_label(methods: &[MethodMetrics], labels: &[usize]) -> Vec<Vec<MethodMetrics>> {
    let cluster_count = labels.iter().copied().max().map(|m| m + 1).unwrap_or(0);
    let mut groups: Vec<Vec<MethodMetrics>> = vec![Vec::new(); cluster_count];
    for (method, &label) in methods.iter().zip(labels.iter()) {
        groups[label].push(method.clone());
    }
    groups.into_iter().filter(|g| !g.is_empty()).collect()
}

fn enrich(methods: Vec<MethodMetrics>, parent_class_name: &str) -> ResponsibilityCluster {
    let shared_dependencies = naming::shared_dependencies(&methods);
    let cohesion_score = naming::cohesion_score(&methods, &shared_dependencies);
    let suggested_class_name = naming::suggest_class_name(&methods, parent_class_name);
    let justification = naming::justification(&methods, &shared_dependencies);

    ResponsibilityCluster {
        suggested_class_name,
        methods,
        cohesion_score,
        shared_dependencies,
        justification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn method(name: &str, token_bag: &[&str], accessed: &[&str]) -> MethodMetrics {
        MethodMetrics {
            name: name.into(),
            line_count: 5,
            cyclomatic_complexity: 1,
            parameters: vec![],
            return_type: None,
            is_public: true,
            is_static: false,
            called_methods: BTreeSet::new(),
            accessed_identifiers: accessed.iter().map(|s| s.to_string()).collect(),
            token_bag: token_bag.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn class_with(methods: Vec<MethodMetrics>) -> ClassMetrics {
        ClassMetrics {
            name: "Big".into(),
            qualified_name: "crate::Big".into(),
            file_path: PathBuf::from("big.rs"),
            line_count: 200,
            method_count: methods.len(),
            property_count: 0,
            field_count: 0,
            cyclomatic_complexity: methods.iter().map(|m| m.cyclomatic_complexity).sum(),
            methods,
            dependencies: vec![],
        }
    }

    #[test]
    fn fewer_methods_than_min_cluster_size_yields_no_clusters() {
        let class = class_with(vec![method("a", &["save"], &["db"])]);
        let thresholds = Thresholds::default();
        assert!(cluster(&class, &thresholds).is_empty());
    }

    #[test]
    fn two_well_separated_responsibilities_yield_two_clusters() {
        let methods = vec![
            method("saveUser", &["save", "user"], &["db"]),
            method("loadUser", &["load", "user"], &["db"]),
            method("deleteUser", &["delete", "user"], &["db"]),
            method("renderReport", &["render", "report"], &["template"]),
            method("exportReport", &["export", "report"], &["template"]),
            method("printReport", &["print", "report"], &["template"]),
        ];
        let class = class_with(methods);
        let thresholds = Thresholds::default();
        let clusters = cluster(&class, &thresholds);
        assert!(!clusters.is_empty());
        for c in &clusters {
            assert!(c.methods.len() >= thresholds.min_cluster_size);
        }
    }
}
