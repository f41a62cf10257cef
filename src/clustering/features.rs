//! Per-method numeric feature vectors: a TF-style bag-of-tokens weighting
//! plus six normalized structural features, over the token vocabulary of a
//! single class.

use crate::core::MethodMetrics;
use std::collections::BTreeSet;

/// The class-wide token vocabulary, in a stable order (`BTreeSet` iteration
/// order), shared across every method's feature vector so dimensions line
/// up.
pub fn build_vocabulary(methods: &[MethodMetrics]) -> Vec<String> {
    let mut vocab = BTreeSet::new();
    for method in methods {
        for token in &method.token_bag {
            vocab.insert(token.clone());
        }
    }
    vocab.into_iter().collect()
}

/// Build one feature vector per method, each of length
/// `vocabulary.len() + 6`.
pub fn build_feature_vectors(methods: &[MethodMetrics], vocabulary: &[String]) -> Vec<Vec<f64>> {
    methods
        .iter()
        .map(|method| feature_vector(method, vocabulary))
        .collect()
}

fn feature_vector(method: &MethodMetrics, vocabulary: &[String]) -> Vec<f64> {
    let total_tokens = method.token_bag.len().max(1) as f64;
    let mut vector: Vec<f64> = vocabulary
        .iter()
        .map(|token| {
            if method.token_bag.contains(token) {
                1.0 / total_tokens
            } else {
                0.0
            }
        })
        .collect();

    vector.push(method.line_count as f64 / 100.0);
    vector.push(method.cyclomatic_complexity as f64 / 20.0);
    vector.push(method.called_methods.len() as f64 / 10.0);
    vector.push(method.accessed_identifiers.len() as f64 / 10.0);
    vector.push(if method.is_public { 1.0 } else { 0.0 });
    vector.push(if method.is_static { 1.0 } else { 0.0 });

    vector
}

pub fn squared_euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn method(token_bag: &[&str], lines: usize, complexity: u32) -> MethodMetrics {
        MethodMetrics {
            name: "m".into(),
            line_count: lines,
            cyclomatic_complexity: complexity,
            parameters: vec![],
            return_type: None,
            is_public: true,
            is_static: false,
            called_methods: BTreeSet::new(),
            accessed_identifiers: BTreeSet::new(),
            token_bag: token_bag.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn vocabulary_is_union_of_token_bags() {
        let methods = vec![method(&["save", "user"], 10, 2), method(&["load", "user"], 5, 1)];
        let vocab = build_vocabulary(&methods);
        assert_eq!(vocab, vec!["load", "save", "user"]);
    }

    #[test]
    fn feature_vector_length_is_vocabulary_plus_six() {
        let methods = vec![method(&["save", "user"], 10, 2)];
        let vocab = build_vocabulary(&methods);
        let vectors = build_feature_vectors(&methods, &vocab);
        assert_eq!(vectors[0].len(), vocab.len() + 6);
    }

    #[test]
    fn structural_features_are_normalized() {
        let methods = vec![method(&["save"], 100, 20)];
        let vocab = build_vocabulary(&methods);
        let vectors = build_feature_vectors(&methods, &vocab);
        let structural = &vectors[0][vocab.len()..];
        assert_eq!(structural[0], 1.0); // lineCount/100
        assert_eq!(structural[1], 1.0); // complexity/20
    }
}
