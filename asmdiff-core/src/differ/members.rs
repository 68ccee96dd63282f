//! Member-level diff between two member sequences of one kind.

use std::collections::HashSet;

use crate::differ::changes::MemberChange;
use crate::identity::{member_id, Member, MemberId, MemberKind};
use crate::types::TypeDef;

/// Compute removed and added members of one kind.
///
/// Removals (members of `original` with no identical member in `changed`) come
/// first, in `original` order, followed by additions in `changed` order. A
/// member identity repeated within one sequence is reported once.
pub fn diff_members<M: Member>(
    original_type: &TypeDef,
    original: &[M],
    changed_type: &TypeDef,
    changed: &[M],
) -> Vec<MemberChange> {
    let original_ids: Vec<MemberId> = original.iter().map(|m| member_id(original_type, m)).collect();
    let changed_ids: Vec<MemberId> = changed.iter().map(|m| member_id(changed_type, m)).collect();

    let original_set: HashSet<&MemberId> = original_ids.iter().collect();
    let changed_set: HashSet<&MemberId> = changed_ids.iter().collect();

    let mut changes = Vec::new();

    // Removed members
    let mut seen = HashSet::new();
    for id in &original_ids {
        if !changed_set.contains(id) && seen.insert(id) {
            changes.push(MemberChange::removed(id.clone()));
        }
    }

    // Added members
    let mut seen = HashSet::new();
    for id in &changed_ids {
        if !original_set.contains(id) && seen.insert(id) {
            changes.push(MemberChange::added(id.clone()));
        }
    }

    changes
}

/// Member diff over all four kinds, visited in [`MemberKind::ALL`] order.
pub fn diff_type_members(original: &TypeDef, changed: &TypeDef) -> Vec<MemberChange> {
    MemberKind::ALL
        .iter()
        .flat_map(|kind| match kind {
            MemberKind::Method => {
                diff_members(original, &original.methods, changed, &changed.methods)
            }
            MemberKind::Field => diff_members(original, &original.fields, changed, &changed.fields),
            MemberKind::Property => {
                diff_members(original, &original.properties, changed, &changed.properties)
            }
            MemberKind::Event => diff_members(original, &original.events, changed, &changed.events),
        })
        .collect()
}
