//! Immutable configuration record of numeric limits and clustering knobs.

use serde::{Deserialize, Serialize};

/// Structural limits that the detector and clusterer compare metrics against.
///
/// Created once by the caller and shared read-only for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub max_class_lines: usize,
    pub max_methods: usize,
    pub max_class_complexity: u32,
    pub max_method_lines: usize,
    pub max_method_complexity: u32,
    pub max_method_parameters: usize,
    pub max_classes_per_file: usize,
    pub max_file_lines: usize,
    pub min_cluster_size: usize,
    pub cluster_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_class_lines: 300,
            max_methods: 20,
            max_class_complexity: 50,
            max_method_lines: 50,
            max_method_complexity: 10,
            max_method_parameters: 5,
            max_classes_per_file: 3,
            max_file_lines: 500,
            min_cluster_size: 3,
            cluster_threshold: 0.7,
        }
    }
}

/// Partial override of [`Thresholds`] as read from a config file; every field
/// is optional so that missing keys fall back to [`Thresholds::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThresholdsOverride {
    pub max_class_lines: Option<usize>,
    pub max_methods: Option<usize>,
    pub max_class_complexity: Option<u32>,
    pub max_method_lines: Option<usize>,
    pub max_method_complexity: Option<u32>,
    pub max_method_parameters: Option<usize>,
    pub max_classes_per_file: Option<usize>,
    pub max_file_lines: Option<usize>,
    pub min_cluster_size: Option<usize>,
    pub cluster_threshold: Option<f64>,
}

impl ThresholdsOverride {
    /// Merge this override onto the default thresholds, keeping defaults for
    /// any field left unset.
    pub fn merge_over_defaults(&self) -> Thresholds {
        let defaults = Thresholds::default();
        Thresholds {
            max_class_lines: self.max_class_lines.unwrap_or(defaults.max_class_lines),
            max_methods: self.max_methods.unwrap_or(defaults.max_methods),
            max_class_complexity: self
                .max_class_complexity
                .unwrap_or(defaults.max_class_complexity),
            max_method_lines: self.max_method_lines.unwrap_or(defaults.max_method_lines),
            max_method_complexity: self
                .max_method_complexity
                .unwrap_or(defaults.max_method_complexity),
            max_method_parameters: self
                .max_method_parameters
                .unwrap_or(defaults.max_method_parameters),
            max_classes_per_file: self
                .max_classes_per_file
                .unwrap_or(defaults.max_classes_per_file),
            max_file_lines: self.max_file_lines.unwrap_or(defaults.max_file_lines),
            min_cluster_size: self.min_cluster_size.unwrap_or(defaults.min_cluster_size),
            cluster_threshold: self
                .cluster_threshold
                .unwrap_or(defaults.cluster_threshold),
        }
    }
}
