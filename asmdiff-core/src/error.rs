//! Error types for asmdiff-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for diff operations.
pub type Result<T> = std::result::Result<T, DiffError>;

/// A module file could not be turned into a symbol model.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid symbol snapshot.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two types in one module share a full name.
    #[error("Duplicate type '{full_name}' in {}", path.display())]
    DuplicateType { path: PathBuf, full_name: String },

    /// A referenced module was not found under any resolution root.
    #[error("Unresolved reference '{reference}' from {}", path.display())]
    UnresolvedReference { path: PathBuf, reference: String },
}

/// Errors surfaced by the module and batch diff operations.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A directory root could not be enumerated.
    #[error("Cannot enumerate {}: {message}", root.display())]
    Discovery { root: PathBuf, message: String },
}
