//! Loading symbol models from disk.
//!
//! Parsing a module's binary representation is the job of an external metadata
//! reader; the diff engine only sees it through [`ModuleReader`]. The bundled
//! [`JsonModuleReader`] consumes symbol snapshots, the JSON form of
//! [`ModuleDef`] written by such a reader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::types::ModuleDef;

/// Source of symbol models.
///
/// `resolution_roots` are the directories searched when the module refers to
/// other modules.
pub trait ModuleReader: Send + Sync {
    fn load_module(&self, path: &Path, resolution_roots: &[PathBuf]) -> Result<ModuleDef, LoadError>;
}

/// Reads JSON symbol snapshots.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonModuleReader;

impl JsonModuleReader {
    pub fn new() -> Self {
        Self
    }
}

impl ModuleReader for JsonModuleReader {
    fn load_module(&self, path: &Path, resolution_roots: &[PathBuf]) -> Result<ModuleDef, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let module: ModuleDef = serde_json::from_str(&content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(dup) = module.first_duplicate_type() {
            return Err(LoadError::DuplicateType {
                path: path.to_path_buf(),
                full_name: dup.to_string(),
            });
        }

        for reference in &module.references {
            if !resolution_roots.iter().any(|root| root.join(reference).is_file()) {
                return Err(LoadError::UnresolvedReference {
                    path: path.to_path_buf(),
                    reference: reference.clone(),
                });
            }
        }

        tracing::debug!(
            path = %path.display(),
            types = module.types.len(),
            "loaded symbol snapshot"
        );
        Ok(module)
    }
}

/// Directory used to resolve references of the module at `path`.
pub fn resolution_root(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
