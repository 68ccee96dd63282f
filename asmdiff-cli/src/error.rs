//! Errors raised before any diffing starts.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid command-line input. Exits with status 2.
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error(
        "Both paths must be files or both must be directories: {} and {}",
        original.display(),
        changed.display()
    )]
    MixedPathKinds { original: PathBuf, changed: PathBuf },
}
