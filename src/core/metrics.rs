//! Per-method and per-class structural facts extracted from a parsed source file.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// A single declared parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Parameter {
    pub name: String,
    /// The declared type as written, if the language requires/allows one.
    pub type_name: Option<String>,
}

/// Structural facts about a single method, independent of source language.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MethodMetrics {
    pub name: String,
    pub line_count: usize,
    pub cyclomatic_complexity: u32,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub is_public: bool,
    pub is_static: bool,
    pub called_methods: BTreeSet<String>,
    pub accessed_identifiers: BTreeSet<String>,
    pub token_bag: BTreeSet<String>,
}

impl MethodMetrics {
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}

/// Structural facts about a single class (or, for Rust, the merged `impl`
/// surface of a type), independent of source language.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassMetrics {
    pub name: String,
    pub qualified_name: String,
    pub file_path: PathBuf,
    pub line_count: usize,
    pub method_count: usize,
    pub property_count: usize,
    pub field_count: usize,
    pub cyclomatic_complexity: u32,
    pub methods: Vec<MethodMetrics>,
    /// Capped at 50 entries: import/namespace directives plus capitalized
    /// identifier references, in encounter order.
    pub dependencies: Vec<String>,
}

impl ClassMetrics {
    /// Sum of all methods' cyclomatic complexities. Matches
    /// `cyclomatic_complexity` by construction but is exposed so tests can
    /// pin the round-trip invariant directly against the method list.
    pub fn complexity_from_methods(&self) -> u32 {
        self.methods.iter().map(|m| m.cyclomatic_complexity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(complexity: u32) -> MethodMetrics {
        MethodMetrics {
            name: "m".into(),
            line_count: 1,
            cyclomatic_complexity: complexity,
            parameters: vec![],
            return_type: None,
            is_public: true,
            is_static: false,
            called_methods: BTreeSet::new(),
            accessed_identifiers: BTreeSet::new(),
            token_bag: BTreeSet::new(),
        }
    }

    #[test]
    fn class_complexity_is_sum_of_method_complexities() {
        let methods: Vec<MethodMetrics> = [2u32, 3, 5].iter().map(|c| method(*c)).collect();
        let class = ClassMetrics {
            name: "C".into(),
            qualified_name: "C".into(),
            file_path: PathBuf::from("c.rs"),
            line_count: 30,
            method_count: methods.len(),
            property_count: 0,
            field_count: 0,
            cyclomatic_complexity: methods.iter().map(|m| m.cyclomatic_complexity).sum(),
            methods,
            dependencies: vec![],
        };
        assert_eq!(class.complexity_from_methods(), 10);
        assert_eq!(class.cyclomatic_complexity, 10);
    }

    fn class_from(methods: Vec<MethodMetrics>) -> ClassMetrics {
        ClassMetrics {
            name: "C".into(),
            qualified_name: "C".into(),
            file_path: PathBuf::from("c.rs"),
            line_count: methods.len(),
            method_count: methods.len(),
            property_count: 0,
            field_count: 0,
            cyclomatic_complexity: methods.iter().map(|m| m.cyclomatic_complexity).sum(),
            methods,
            dependencies: vec![],
        }
    }

    #[test]
    fn class_complexity_is_additive_under_method_list_concatenation() {
        let group_a: Vec<MethodMetrics> = [2u32, 3].iter().map(|c| method(*c)).collect();
        let group_b: Vec<MethodMetrics> = [5u32, 7, 1].iter().map(|c| method(*c)).collect();

        let complexity_a = class_from(group_a.clone()).complexity_from_methods();
        let complexity_b = class_from(group_b.clone()).complexity_from_methods();

        let mut concatenated = group_a;
        concatenated.extend(group_b);
        let combined = class_from(concatenated);

        assert_eq!(combined.complexity_from_methods(), complexity_a + complexity_b);
    }
}
