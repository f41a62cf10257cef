//! Pure threshold predicates: god class, god method, and god file
//! detection. Each function is total, side-effect-free, and deterministic —
//! no I/O, no shared state, just metrics in and a verdict out.

use crate::core::{ClassMetrics, GodFileVerdict, MethodMetrics, Thresholds};
use std::path::Path;

/// Result of evaluating a single [`ClassMetrics`] against [`Thresholds`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClassVerdict {
    pub is_god_class: bool,
    pub violations: Vec<String>,
}

/// True iff the class's line count, method count, or cyclomatic complexity
/// exceeds its respective threshold.
pub fn is_god_class(class: &ClassMetrics, thresholds: &Thresholds) -> ClassVerdict {
    let mut violations = Vec::new();

    if class.line_count > thresholds.max_class_lines {
        violations.push(format!(
            "{} lines exceeds max of {}",
            class.line_count, thresholds.max_class_lines
        ));
    }
    if class.method_count > thresholds.max_methods {
        violations.push(format!(
            "{} methods exceeds max of {}",
            class.method_count, thresholds.max_methods
        ));
    }
    if class.cyclomatic_complexity > thresholds.max_class_complexity {
        violations.push(format!(
            "cyclomatic complexity {} exceeds max of {}",
            class.cyclomatic_complexity, thresholds.max_class_complexity
        ));
    }

    ClassVerdict {
        is_god_class: !violations.is_empty(),
        violations,
    }
}

/// Result of evaluating a single [`MethodMetrics`] against [`Thresholds`].
#[derive(Debug, Clone, PartialEq)]
pub struct MethodVerdict {
    pub is_god_method: bool,
    pub violations: Vec<String>,
    pub violation_score: u32,
}

/// True iff the method's line count, cyclomatic complexity, or parameter
/// count exceeds its respective threshold. The score weights complexity
/// twice as heavily as line count or parameter overruns.
pub fn is_god_method(method: &MethodMetrics, thresholds: &Thresholds) -> MethodVerdict {
    let mut violations = Vec::new();

    let line_overage = method.line_count.saturating_sub(thresholds.max_method_lines);
    if line_overage > 0 {
        violations.push(format!(
            "{} lines exceeds max of {}",
            method.line_count, thresholds.max_method_lines
        ));
    }

    let complexity_overage = method
        .cyclomatic_complexity
        .saturating_sub(thresholds.max_method_complexity);
    if complexity_overage > 0 {
        violations.push(format!(
            "cyclomatic complexity {} exceeds max of {}",
            method.cyclomatic_complexity, thresholds.max_method_complexity
        ));
    }

    let param_count = method.parameter_count();
    let param_overage = param_count.saturating_sub(thresholds.max_method_parameters);
    if param_overage > 0 {
        violations.push(format!(
            "{} parameters exceeds max of {}",
            param_count, thresholds.max_method_parameters
        ));
    }

    let violation_score =
        (line_overage as u32) + (complexity_overage * 2) + (param_overage as u32);

    MethodVerdict {
        is_god_method: !violations.is_empty(),
        violations,
        violation_score,
    }
}

/// True iff a file's class count or total line count exceeds its
/// respective threshold. Returns `None` when the file is clean.
pub fn god_file_verdict(
    _file_path: &Path,
    classes: &[ClassMetrics],
    thresholds: &Thresholds,
) -> Option<GodFileVerdict> {
    let class_count = classes.len();
    let total_lines: usize = classes.iter().map(|c| c.line_count).sum();

    let mut violations = Vec::new();
    let class_overage = class_count.saturating_sub(thresholds.max_classes_per_file);
    if class_overage > 0 {
        violations.push(format!(
            "{class_count} classes exceeds max of {}",
            thresholds.max_classes_per_file
        ));
    }
    let line_overage = total_lines.saturating_sub(thresholds.max_file_lines);
    if line_overage > 0 {
        violations.push(format!(
            "{total_lines} total lines exceeds max of {}",
            thresholds.max_file_lines
        ));
    }

    if violations.is_empty() {
        return None;
    }

    let violation_score = (class_overage as u32) * 5 + (line_overage as u32);

    Some(GodFileVerdict {
        class_count,
        total_lines,
        class_names: classes.iter().map(|c| c.name.clone()).collect(),
        violations,
        violation_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn method(lines: usize, complexity: u32, params: usize) -> MethodMetrics {
        MethodMetrics {
            name: "m".into(),
            line_count: lines,
            cyclomatic_complexity: complexity,
            parameters: (0..params)
                .map(|i| crate::core::Parameter {
                    name: format!("p{i}"),
                    type_name: None,
                })
                .collect(),
            return_type: None,
            is_public: true,
            is_static: false,
            called_methods: BTreeSet::new(),
            accessed_identifiers: BTreeSet::new(),
            token_bag: BTreeSet::new(),
        }
    }

    fn class(lines: usize, method_count: usize, complexity: u32) -> ClassMetrics {
        ClassMetrics {
            name: "C".into(),
            qualified_name: "C".into(),
            file_path: PathBuf::from("c.rs"),
            line_count: lines,
            method_count,
            property_count: 0,
            field_count: 0,
            cyclomatic_complexity: complexity,
            methods: vec![],
            dependencies: vec![],
        }
    }

    #[test]
    fn class_under_all_thresholds_is_healthy() {
        let thresholds = Thresholds::default();
        let verdict = is_god_class(&class(10, 2, 3), &thresholds);
        assert!(!verdict.is_god_class);
        assert!(verdict.violations.is_empty());
    }

    #[test]
    fn class_over_line_threshold_is_god_class() {
        let thresholds = Thresholds::default();
        let verdict = is_god_class(&class(301, 2, 3), &thresholds);
        assert!(verdict.is_god_class);
        assert_eq!(verdict.violations.len(), 1);
    }

    #[test]
    fn method_violation_score_weights_complexity_double() {
        let thresholds = Thresholds::default();
        // lines: 50 + 5 over -> 5; complexity: 10 + 3 over -> 3*2=6; params: 5 + 1 over -> 1
        let m = method(55, 13, 6);
        let verdict = is_god_method(&m, &thresholds);
        assert!(verdict.is_god_method);
        assert_eq!(verdict.violation_score, 5 + 6 + 1);
    }

    #[test]
    fn method_at_exactly_threshold_is_not_god_method() {
        let thresholds = Thresholds::default();
        let m = method(
            thresholds.max_method_lines,
            thresholds.max_method_complexity,
            thresholds.max_method_parameters,
        );
        let verdict = is_god_method(&m, &thresholds);
        assert!(!verdict.is_god_method);
        assert_eq!(verdict.violation_score, 0);
    }

    #[test]
    fn god_file_verdict_is_none_when_clean() {
        let thresholds = Thresholds::default();
        let classes = vec![class(10, 2, 1)];
        assert!(god_file_verdict(Path::new("f.rs"), &classes, &thresholds).is_none());
    }

    #[test]
    fn god_file_verdict_scores_class_overage_heavier_than_lines() {
        let thresholds = Thresholds::default();
        // 4 classes over max of 3 -> overage 1 * 5 = 5; total lines 10, under 500 -> 0
        let classes = vec![class(10, 1, 1), class(0, 1, 1), class(0, 1, 1), class(0, 1, 1)];
        let verdict = god_file_verdict(Path::new("f.rs"), &classes, &thresholds).unwrap();
        assert_eq!(verdict.violation_score, 5);
        assert_eq!(verdict.class_count, 4);
    }

    #[test]
    fn god_file_verdict_is_invariant_under_class_list_permutation() {
        let thresholds = Thresholds::default();
        let classes = vec![
            class(120, 2, 3),
            class(80, 1, 2),
            class(200, 3, 4),
            class(60, 1, 1),
        ];
        let mut reversed = classes.clone();
        reversed.reverse();

        let original = god_file_verdict(Path::new("f.rs"), &classes, &thresholds).unwrap();
        let from_reversed = god_file_verdict(Path::new("f.rs"), &reversed, &thresholds).unwrap();

        assert_eq!(original.class_count, from_reversed.class_count);
        assert_eq!(original.total_lines, from_reversed.total_lines);
        assert_eq!(original.violations, from_reversed.violations);
        assert_eq!(original.violation_score, from_reversed.violation_score);
    }
}
