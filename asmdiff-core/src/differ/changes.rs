//! Change types and result structures for structural diff.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::identity::MemberId;

/// Kind of a single change record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    AddedType,
    ModifiedType,
    RemovedType,
    AddedMember,
    RemovedMember,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 5] = [
        ChangeKind::AddedType,
        ChangeKind::ModifiedType,
        ChangeKind::RemovedType,
        ChangeKind::AddedMember,
        ChangeKind::RemovedMember,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::AddedType => "added_type",
            ChangeKind::ModifiedType => "modified_type",
            ChangeKind::RemovedType => "removed_type",
            ChangeKind::AddedMember => "added_member",
            ChangeKind::RemovedMember => "removed_member",
        }
    }

    pub fn is_type_level(&self) -> bool {
        matches!(
            self,
            ChangeKind::AddedType | ChangeKind::ModifiedType | ChangeKind::RemovedType
        )
    }

    /// Removals break consumers compiled against the original module.
    pub fn is_breaking(&self) -> bool {
        matches!(self, ChangeKind::RemovedType | ChangeKind::RemovedMember)
    }
}

/// Classification of a type present in the change set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeChangeKind {
    Added,
    Modified,
    Removed,
}

impl TypeChangeKind {
    pub fn change_kind(&self) -> ChangeKind {
        match self {
            TypeChangeKind::Added => ChangeKind::AddedType,
            TypeChangeKind::Modified => ChangeKind::ModifiedType,
            TypeChangeKind::Removed => ChangeKind::RemovedType,
        }
    }
}

/// Direction of a member change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberChangeKind {
    Added,
    Removed,
}

impl MemberChangeKind {
    pub fn change_kind(&self) -> ChangeKind {
        match self {
            MemberChangeKind::Added => ChangeKind::AddedMember,
            MemberChangeKind::Removed => ChangeKind::RemovedMember,
        }
    }
}

/// A member added to or removed from a type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberChange {
    pub kind: MemberChangeKind,
    pub member: MemberId,
}

impl MemberChange {
    pub fn added(member: MemberId) -> Self {
        Self {
            kind: MemberChangeKind::Added,
            member,
        }
    }

    pub fn removed(member: MemberId) -> Self {
        Self {
            kind: MemberChangeKind::Removed,
            member,
        }
    }

    /// Kind-prefixed display key.
    pub fn key(&self) -> String {
        self.member.key()
    }
}

/// A type-level change with the member changes nested under it.
///
/// Only modified types carry member changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeChange {
    pub full_name: String,
    pub kind: TypeChangeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberChange>,
}

impl TypeChange {
    pub fn added(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            kind: TypeChangeKind::Added,
            members: Vec::new(),
        }
    }

    pub fn removed(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            kind: TypeChangeKind::Removed,
            members: Vec::new(),
        }
    }

    pub fn modified(full_name: impl Into<String>, members: Vec<MemberChange>) -> Self {
        Self {
            full_name: full_name.into(),
            kind: TypeChangeKind::Modified,
            members,
        }
    }
}

/// One flattened `(key, kind)` pair as shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub key: String,
    pub kind: ChangeKind,
}

/// All differences between two versions of one module.
///
/// Type entries are unique by full name; member entries are unique by
/// [`MemberId`] within their type. Insertion order is preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    /// Label of the compared module (relative path in batch mode).
    pub module: String,
    types: Vec<TypeChange>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ChangeSet {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ..Default::default()
        }
    }

    /// Add a type-level change.
    ///
    /// A second entry for an already recorded type is merged into the first:
    /// its member changes are appended unless an equal change is already there.
    pub fn insert(&mut self, change: TypeChange) {
        match self.index.get(&change.full_name) {
            Some(&i) => {
                let existing = &mut self.types[i];
                for member in change.members {
                    if !existing.members.contains(&member) {
                        existing.members.push(member);
                    }
                }
            }
            None => {
                self.index.insert(change.full_name.clone(), self.types.len());
                self.types.push(change);
            }
        }
    }

    pub fn types(&self) -> &[TypeChange] {
        &self.types
    }

    pub fn get(&self, full_name: &str) -> Option<&TypeChange> {
        self.index.get(full_name).map(|&i| &self.types[i])
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of type-level entries.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Number of records of the given kind.
    pub fn count(&self, kind: ChangeKind) -> usize {
        if kind.is_type_level() {
            self.types
                .iter()
                .filter(|t| t.kind.change_kind() == kind)
                .count()
        } else {
            self.types
                .iter()
                .flat_map(|t| &t.members)
                .filter(|m| m.kind.change_kind() == kind)
                .count()
        }
    }

    /// Flatten into display records: each type entry followed by its members.
    ///
    /// Members whose display keys collide within a type (a field whose type
    /// changed, a method whose return type changed) are keyed by
    /// [`MemberId::qualified_key`] instead, so every record key is unique.
    pub fn records(&self) -> Vec<ChangeRecord> {
        let mut records = Vec::new();
        for t in &self.types {
            records.push(ChangeRecord {
                key: t.full_name.clone(),
                kind: t.kind.change_kind(),
            });

            let mut key_counts: HashMap<String, usize> = HashMap::new();
            for m in &t.members {
                *key_counts.entry(m.key()).or_default() += 1;
            }
            for m in &t.members {
                let key = m.key();
                let collides = key_counts.get(&key).is_some_and(|&n| n > 1);
                records.push(ChangeRecord {
                    key: if collides { m.member.qualified_key() } else { key },
                    kind: m.kind.change_kind(),
                });
            }
        }
        records
    }
}

/// A module pair that could not be diffed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairFailure {
    pub path: String,
    pub error: String,
}

/// Aggregate statistics for a batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub files_processed: usize,

    pub types_added: usize,
    pub types_modified: usize,
    pub types_removed: usize,

    pub members_added: usize,
    pub members_removed: usize,

    /// Files present on one side only, deduplicated by message.
    pub warnings: Vec<String>,

    /// Matched pairs whose diff failed.
    pub failures: Vec<PairFailure>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one module's change set into the counters.
    pub fn record(&mut self, changes: &ChangeSet) {
        self.types_added += changes.count(ChangeKind::AddedType);
        self.types_modified += changes.count(ChangeKind::ModifiedType);
        self.types_removed += changes.count(ChangeKind::RemovedType);
        self.members_added += changes.count(ChangeKind::AddedMember);
        self.members_removed += changes.count(ChangeKind::RemovedMember);
    }

    /// Add a warning line unless the same text is already present.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.warnings.contains(&message) {
            self.warnings.push(message);
        }
    }

    pub fn fail(&mut self, path: impl Into<String>, error: impl Into<String>) {
        self.failures.push(PairFailure {
            path: path.into(),
            error: error.into(),
        });
    }

    /// Running total for one kind of record.
    pub fn count(&self, kind: ChangeKind) -> usize {
        match kind {
            ChangeKind::AddedType => self.types_added,
            ChangeKind::ModifiedType => self.types_modified,
            ChangeKind::RemovedType => self.types_removed,
            ChangeKind::AddedMember => self.members_added,
            ChangeKind::RemovedMember => self.members_removed,
        }
    }

    pub fn breaking_changes(&self) -> usize {
        ChangeKind::ALL
            .iter()
            .filter(|kind| kind.is_breaking())
            .map(|&kind| self.count(kind))
            .sum()
    }

    /// One-line summary, e.g. `types: 1 added, 2 modified; members: 3 removed`.
    pub fn text(&self) -> String {
        let mut parts = Vec::new();

        let type_parts = counts_text(&[
            (self.types_added, "added"),
            (self.types_removed, "removed"),
            (self.types_modified, "modified"),
        ]);
        if !type_parts.is_empty() {
            parts.push(format!("types: {}", type_parts));
        }

        let member_parts = counts_text(&[
            (self.members_added, "added"),
            (self.members_removed, "removed"),
        ]);
        if !member_parts.is_empty() {
            parts.push(format!("members: {}", member_parts));
        }

        if parts.is_empty() {
            "No changes".to_string()
        } else {
            parts.join("; ")
        }
    }
}

fn counts_text(counts: &[(usize, &str)]) -> String {
    counts
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, label)| format!("{} {}", n, label))
        .collect::<Vec<_>>()
        .join(", ")
}
