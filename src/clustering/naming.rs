//! Cluster-level enrichment: shared dependencies, cohesion score, suggested
//! name, and a human-readable justification string.

use crate::core::MethodMetrics;
use crate::parsing::tokens::split_identifier;
use std::collections::BTreeMap;

const STOP_WORDS: &[&str] = &[
    "get", "set", "add", "remove", "delete", "update", "create", "save", "load", "handle",
    "process", "execute", "run", "do", "is", "has", "can",
];

/// Identifiers appearing in `accessed_identifiers` of at least half
/// (rounded up) of the cluster's methods.
pub fn shared_dependencies(methods: &[MethodMetrics]) -> Vec<String> {
    if methods.is_empty() {
        return Vec::new();
    }
    let threshold = methods.len().div_ceil(2);

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for method in methods {
        for ident in &method.accessed_identifiers {
            *counts.entry(ident.as_str()).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count >= threshold)
        .map(|(ident, _)| ident.to_string())
        .collect()
}

/// `|sharedDependencies| / mean(|accessedFields| + 1)` over the cluster's
/// methods, clamped to `[0, 1]`. A singleton cluster always scores `0.5`.
pub fn cohesion_score(methods: &[MethodMetrics], shared_deps: &[String]) -> f64 {
    if methods.len() == 1 {
        return 0.5;
    }
    if methods.is_empty() {
        return 0.0;
    }

    let mean_accessed: f64 = methods
        .iter()
        .map(|m| (m.accessed_identifiers.len() + 1) as f64)
        .sum::<f64>()
        / methods.len() as f64;

    if mean_accessed == 0.0 {
        return 0.0;
    }

    (shared_deps.len() as f64 / mean_accessed).clamp(0.0, 1.0)
}

/// Tokenize each method name, drop stop words, and take the two
/// highest-frequency remaining tokens (ties broken by first appearance) to
/// build a `{First}{Second}Service` name. Falls back to
/// `{parent_class_name}Component` if no tokens survive.
pub fn suggest_class_name(methods: &[MethodMetrics], parent_class_name: &str) -> String {
    let mut frequency: BTreeMap<String, usize> = BTreeMap::new();
    let mut first_seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut order = 0usize;

    for method in methods {
        for token in split_identifier(&method.name) {
            if STOP_WORDS.contains(&token.as_str()) {
                continue;
            }
            *frequency.entry(token.clone()).or_insert(0) += 1;
            first_seen.entry(token).or_insert_with(|| {
                order += 1;
                order
            });
        }
    }

    let mut tokens: Vec<&String> = frequency.keys().collect();
    tokens.sort_by(|a, b| {
        frequency[*b]
            .cmp(&frequency[*a])
            .then_with(|| first_seen[*a].cmp(&first_seen[*b]))
    });

    let top_two: Vec<String> = tokens.into_iter().take(2).map(|t| capitalize(t)).collect();

    if top_two.is_empty() {
        format!("{parent_class_name}Component")
    } else {
        format!("{}Service", top_two.join(""))
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// "Cohesive group of N method(s) (up to five names) sharing dependencies
/// on (up to three shared deps)".
pub fn justification(methods: &[MethodMetrics], shared_deps: &[String]) -> String {
    let names: Vec<&str> = methods.iter().take(5).map(|m| m.name.as_str()).collect();
    let deps: Vec<&str> = shared_deps.iter().take(3).map(String::as_str).collect();

    if deps.is_empty() {
        format!(
            "Cohesive group of {} method(s) ({})",
            methods.len(),
            names.join(", ")
        )
    } else {
        format!(
            "Cohesive group of {} method(s) ({}) sharing dependencies on ({})",
            methods.len(),
            names.join(", "),
            deps.join(", ")
        )
    }
}
