//! Shared error type for godhunter operations.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type returned by the core library.
#[derive(Debug, Error)]
pub enum Error {
    /// The analysis root does not exist on disk.
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    /// A file could not be read.
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file could not be recovered by its parser.
    #[error("parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A malformed configuration file.
    #[error("configuration error: {0}")]
    Config(String),

    /// The run was cancelled via the cooperative cancellation flag.
    #[error("analysis cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
