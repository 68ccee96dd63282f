//! Structural identity for types and members.
//!
//! A type is identified by its fully qualified name and nothing else. A member
//! is identified by the composite key `(declaring type, kind, signature)`, so a
//! member with an unchanged signature that moved to another type is a
//! different member.
//!
//! [`MemberId`] equality is the member comparer: two members satisfy
//! [`same_member`] exactly when their ids are equal, which is what lets the
//! diff engine match members by hashing ids. Types are matched by full name,
//! the key [`same_type`] compares.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{EventDef, FieldDef, MethodDef, PropertyDef, TypeDef};

/// The four member kinds, in the order the type diff visits them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemberKind {
    Method,
    Field,
    Property,
    Event,
}

impl MemberKind {
    pub const ALL: [MemberKind; 4] = [
        MemberKind::Method,
        MemberKind::Field,
        MemberKind::Property,
        MemberKind::Event,
    ];

    /// Key prefix used when a member change is flattened for display.
    pub fn prefix(&self) -> &'static str {
        match self {
            MemberKind::Method => "M:",
            MemberKind::Field => "F:",
            MemberKind::Property => "P:",
            MemberKind::Event => "E:",
        }
    }
}

/// Kind-specific signature data. Equality here is exact.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Signature {
    Method {
        name: String,
        generic_arity: u32,
        parameters: Vec<String>,
        return_type: String,
    },
    Field {
        name: String,
        field_type: String,
    },
    Property {
        name: String,
        parameters: Vec<String>,
        property_type: String,
        has_getter: bool,
        has_setter: bool,
    },
    Event {
        name: String,
        event_type: String,
    },
}

impl Signature {
    /// Signature parts the display name leaves out, e.g. `~System.Int32` for a
    /// method's return type or `~System.String{get;set}` for a property.
    pub fn discriminator(&self) -> String {
        match self {
            Signature::Method { return_type, .. } => format!("~{}", return_type),
            Signature::Field { field_type, .. } => format!("~{}", field_type),
            Signature::Property {
                property_type,
                has_getter,
                has_setter,
                ..
            } => {
                let accessors: Vec<&str> = [(*has_getter, "get"), (*has_setter, "set")]
                    .iter()
                    .filter(|(present, _)| *present)
                    .map(|(_, name)| *name)
                    .collect();
                format!("~{}{{{}}}", property_type, accessors.join(";"))
            }
            Signature::Event { event_type, .. } => format!("~{}", event_type),
        }
    }
}

/// Composite member identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId {
    pub declaring_type: String,
    pub kind: MemberKind,
    /// Display name relative to the declaring type.
    pub local_name: String,
    pub signature: Signature,
}

impl MemberId {
    /// Fully qualified member name, e.g. `Ns.Foo.Bar(System.Int32)`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.declaring_type, self.local_name)
    }

    /// Kind-prefixed key, e.g. `M:Ns.Foo.Bar(System.Int32)`.
    pub fn key(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.full_name())
    }

    /// Key carrying the whole signature. Distinct ids of one kind declared by
    /// one type never share a qualified key.
    pub fn qualified_key(&self) -> String {
        format!("{}{}", self.key(), self.signature.discriminator())
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// A member entity that can take part in a member diff.
pub trait Member {
    const KIND: MemberKind;

    fn signature(&self) -> Signature;

    fn local_name(&self) -> String;
}

impl Member for MethodDef {
    const KIND: MemberKind = MemberKind::Method;

    fn signature(&self) -> Signature {
        Signature::Method {
            name: self.name.clone(),
            generic_arity: self.generic_arity,
            parameters: self.parameters.clone(),
            return_type: self.return_type.clone(),
        }
    }

    fn local_name(&self) -> String {
        MethodDef::local_name(self)
    }
}

impl Member for FieldDef {
    const KIND: MemberKind = MemberKind::Field;

    fn signature(&self) -> Signature {
        Signature::Field {
            name: self.name.clone(),
            field_type: self.field_type.clone(),
        }
    }

    fn local_name(&self) -> String {
        self.name.clone()
    }
}

impl Member for PropertyDef {
    const KIND: MemberKind = MemberKind::Property;

    fn signature(&self) -> Signature {
        Signature::Property {
            name: self.name.clone(),
            parameters: self.parameters.clone(),
            property_type: self.property_type.clone(),
            has_getter: self.has_getter,
            has_setter: self.has_setter,
        }
    }

    fn local_name(&self) -> String {
        PropertyDef::local_name(self)
    }
}

impl Member for EventDef {
    const KIND: MemberKind = MemberKind::Event;

    fn signature(&self) -> Signature {
        Signature::Event {
            name: self.name.clone(),
            event_type: self.event_type.clone(),
        }
    }

    fn local_name(&self) -> String {
        self.name.clone()
    }
}

/// Two types are the same type only if their full names match exactly.
pub fn same_type(a: &TypeDef, b: &TypeDef) -> bool {
    a.full_name == b.full_name
}

/// Build the identity of `member` as declared by `declaring`.
pub fn member_id<M: Member>(declaring: &TypeDef, member: &M) -> MemberId {
    MemberId {
        declaring_type: declaring.full_name.clone(),
        kind: M::KIND,
        local_name: member.local_name(),
        signature: member.signature(),
    }
}

/// Signature equality including declaring-type identity.
pub fn same_member<M: Member>(a_type: &TypeDef, a: &M, b_type: &TypeDef, b: &M) -> bool {
    member_id(a_type, a) == member_id(b_type, b)
}
