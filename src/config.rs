//! `.godhunter.toml` discovery and parsing. A missing or malformed config
//! file is never fatal — it degrades to [`Thresholds::default`] with a
//! logged warning, mirroring the teacher's config-loading posture.

use crate::core::{Thresholds, ThresholdsOverride};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CONFIG_FILE_NAMES: &[&str] = &[".godhunter.toml", "godhunter.toml"];
const MAX_ANCESTOR_DEPTH: usize = 10;

/// The on-disk shape of a config file: a single `[thresholds]` table whose
/// keys match [`Thresholds`]'s field names. Unknown top-level keys are
/// ignored by serde's default (non-`deny_unknown_fields`) behavior.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GodhunterConfig {
    #[serde(default)]
    pub thresholds: ThresholdsOverride,
}

impl GodhunterConfig {
    pub fn resolve_thresholds(&self) -> Thresholds {
        self.thresholds.merge_over_defaults()
    }
}

/// Search `start` and its ancestors (up to [`MAX_ANCESTOR_DEPTH`] levels)
/// for a recognized config filename, parse the first one found, and return
/// the resolved thresholds. Returns [`Thresholds::default`] if none is found
/// or the one found is malformed.
pub fn load_thresholds(start: &Path) -> Thresholds {
    directory_ancestors(start, MAX_ANCESTOR_DEPTH)
        .find_map(|dir| find_config_file(&dir))
        .and_then(|path| try_load_config_from_path(&path))
        .map(|config| config.resolve_thresholds())
        .unwrap_or_else(|| {
            debug!("no config file found; using default thresholds");
            Thresholds::default()
        })
}

/// Explicit `--config` path: if given, it must exist and parse; a missing or
/// malformed explicit path still falls back to defaults with a warning
/// rather than aborting the run, per the engine's no-hard-failure posture.
pub fn load_thresholds_from_path(path: &Path) -> Thresholds {
    try_load_config_from_path(path)
        .map(|config| config.resolve_thresholds())
        .unwrap_or_else(|| {
            warn!(path = %path.display(), "could not load config; using default thresholds");
            Thresholds::default()
        })
}

fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn try_load_config_from_path(path: &Path) -> Option<GodhunterConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), %err, "failed to read config file");
            }
            return None;
        }
    };

    match toml::from_str::<GodhunterConfig>(&contents) {
        Ok(config) => {
            debug!(path = %path.display(), "loaded config");
            Some(config)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "malformed config; falling back to defaults");
            None
        }
    }
}

fn directory_ancestors(start: &Path, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start.to_path_buf()), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let thresholds = load_thresholds(temp.path());
        assert_eq!(thresholds, Thresholds::default());
    }

    #[test]
    fn overrides_merge_onto_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(".godhunter.toml"),
            "[thresholds]\nmax_methods = 8\n",
        )
        .unwrap();
        let thresholds = load_thresholds(temp.path());
        assert_eq!(thresholds.max_methods, 8);
        assert_eq!(thresholds.max_class_lines, Thresholds::default().max_class_lines);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(".godhunter.toml"),
            "[thresholds]\nmax_methods = 8\n\n[some_unknown_section]\nfoo = 1\n",
        )
        .unwrap();
        let thresholds = load_thresholds(temp.path());
        assert_eq!(thresholds.max_methods, 8);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".godhunter.toml"), "not valid toml [[[").unwrap();
        let thresholds = load_thresholds(temp.path());
        assert_eq!(thresholds, Thresholds::default());
    }
}
