//! Comparator logic for diffing symbol models.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::differ::changes::{ChangeSet, TypeChange};
use crate::differ::members::diff_type_members;
use crate::error::LoadError;
use crate::reader::{resolution_root, ModuleReader};
use crate::types::{ModuleDef, TypeDef};

/// Diff two symbol models of the same module.
///
/// Original types are visited in model order: a type missing from `changed` is
/// removed, a type whose members differ is modified (with its member changes
/// nested), an identical type is omitted. Types only in `changed` are appended
/// as added, in `changed` order.
///
/// Type full names must be unique within each model.
pub fn diff_types(original: &ModuleDef, changed: &ModuleDef) -> ChangeSet {
    let mut result = ChangeSet::new(changed.name.clone());

    let changed_by_name: HashMap<&str, &TypeDef> = changed
        .types
        .iter()
        .map(|t| (t.full_name.as_str(), t))
        .collect();
    let original_names: HashSet<&str> = original
        .types
        .iter()
        .map(|t| t.full_name.as_str())
        .collect();

    for base in &original.types {
        match changed_by_name.get(base.full_name.as_str()) {
            Some(head) => {
                let members = diff_type_members(base, head);
                if !members.is_empty() {
                    result.insert(TypeChange::modified(base.full_name.clone(), members));
                }
            }
            None => result.insert(TypeChange::removed(base.full_name.clone())),
        }
    }

    // Added types
    for head in &changed.types {
        if !original_names.contains(head.full_name.as_str()) {
            result.insert(TypeChange::added(head.full_name.clone()));
        }
    }

    result
}

/// Load two module files and diff them.
///
/// Each file's containing directory is its reference resolution root. The
/// resulting change set is labelled with the changed file's name. A model with
/// a repeated type name is rejected whichever reader produced it.
pub fn diff_modules(
    reader: &dyn ModuleReader,
    original_path: &Path,
    changed_path: &Path,
) -> Result<ChangeSet, LoadError> {
    let original = reader.load_module(original_path, &[resolution_root(original_path)])?;
    let changed = reader.load_module(changed_path, &[resolution_root(changed_path)])?;
    for (path, module) in [(original_path, &original), (changed_path, &changed)] {
        if let Some(dup) = module.first_duplicate_type() {
            return Err(LoadError::DuplicateType {
                path: path.to_path_buf(),
                full_name: dup.to_string(),
            });
        }
    }

    let mut result = diff_types(&original, &changed);
    result.module = changed_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| changed_path.display().to_string());

    tracing::debug!(
        original = %original_path.display(),
        changed = %changed_path.display(),
        types = result.len(),
        "diffed module pair"
    );
    Ok(result)
}
