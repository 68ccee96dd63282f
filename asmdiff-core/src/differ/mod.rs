//! Structural diff engine for comparing symbol models.
//!
//! This module compares two versions of a module at the level of declared
//! types and their members, producing a change set with one entry per added,
//! removed or modified type and nested entries for added and removed members.
//!
//! # Example
//!
//! ```
//! use asmdiff_core::differ::diff_types;
//! use asmdiff_core::types::{MethodDef, ModuleDef, TypeDef};
//!
//! let method = |name: &str| MethodDef::new(name, vec![], "System.Void");
//! let original = ModuleDef::new("Lib", vec![TypeDef::new("Foo").with_methods(vec![method("M1")])]);
//! let changed = ModuleDef::new("Lib", vec![TypeDef::new("Foo").with_methods(vec![method("M2")])]);
//!
//! let changes = diff_types(&original, &changed);
//! let keys: Vec<_> = changes.records().into_iter().map(|r| r.key).collect();
//! assert_eq!(keys, vec!["Foo", "M:Foo.M1", "M:Foo.M2"]);
//! ```

pub mod changes;
pub mod comparator;
pub mod members;

pub use changes::{
    BatchSummary, ChangeKind, ChangeRecord, ChangeSet, MemberChange, MemberChangeKind,
    PairFailure, TypeChange, TypeChangeKind,
};
pub use comparator::{diff_modules, diff_types};
pub use members::{diff_members, diff_type_members};
