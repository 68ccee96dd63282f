//! Symbol model for a compiled module.
//!
//! These types are the in-memory representation produced by a metadata reader:
//! a module owns an ordered list of types, and each type owns ordered lists of
//! its methods, fields, properties and events. Member entities carry only the
//! data that takes part in identity (name and kind-specific signature); the
//! declaring type is supplied by the owning [`TypeDef`].

use serde::{Deserialize, Serialize};

/// Conversion operators are the only methods whose return type is part of the
/// rendered name.
const CONVERSION_OPERATORS: &[&str] = &["op_Implicit", "op_Explicit"];

/// A compiled module: the unit being diffed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDef {
    pub name: String,
    /// File names of modules this one depends on.
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

impl ModuleDef {
    pub fn new(name: impl Into<String>, types: Vec<TypeDef>) -> Self {
        Self {
            name: name.into(),
            references: Vec::new(),
            types,
        }
    }

    /// Return the first type name that occurs more than once, if any.
    pub fn first_duplicate_type(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.types
            .iter()
            .map(|t| t.full_name.as_str())
            .find(|name| !seen.insert(*name))
    }
}

/// A declared type and the members it owns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Fully qualified name including namespace and generic arity, e.g. `Ns.List`1`.
    pub full_name: String,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    #[serde(default)]
    pub events: Vec<EventDef>,
}

impl TypeDef {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Default::default()
        }
    }

    pub fn with_methods(mut self, methods: Vec<MethodDef>) -> Self {
        self.methods = methods;
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldDef>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_properties(mut self, properties: Vec<PropertyDef>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_events(mut self, events: Vec<EventDef>) -> Self {
        self.events = events;
        self
    }
}

/// A method, constructor or operator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    #[serde(default)]
    pub generic_arity: u32,
    /// Fully qualified parameter type names, in declaration order.
    #[serde(default)]
    pub parameters: Vec<String>,
    pub return_type: String,
}

impl MethodDef {
    pub fn new(name: impl Into<String>, parameters: Vec<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_arity: 0,
            parameters,
            return_type: return_type.into(),
        }
    }

    pub fn with_generic_arity(mut self, arity: u32) -> Self {
        self.generic_arity = arity;
        self
    }

    /// Name relative to the declaring type, e.g. `Map``1(T)`.
    pub fn local_name(&self) -> String {
        let mut s = self.name.clone();
        if self.generic_arity > 0 {
            s.push_str(&format!("``{}", self.generic_arity));
        }
        push_parameters(&mut s, &self.parameters);
        if CONVERSION_OPERATORS.contains(&self.name.as_str()) {
            s.push('~');
            s.push_str(&self.return_type);
        }
        s
    }
}

/// A data field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub field_type: String,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }
}

/// A property or indexer. The accessor shape is part of its identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    /// Indexer parameter types; empty for ordinary properties.
    #[serde(default)]
    pub parameters: Vec<String>,
    pub property_type: String,
    #[serde(default)]
    pub has_getter: bool,
    #[serde(default)]
    pub has_setter: bool,
}

impl PropertyDef {
    pub fn new(name: impl Into<String>, property_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            property_type: property_type.into(),
            has_getter: true,
            has_setter: false,
        }
    }

    pub fn with_setter(mut self) -> Self {
        self.has_setter = true;
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<String>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn local_name(&self) -> String {
        let mut s = self.name.clone();
        push_parameters(&mut s, &self.parameters);
        s
    }
}

/// An event slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventDef {
    pub name: String,
    pub event_type: String,
}

impl EventDef {
    pub fn new(name: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            event_type: event_type.into(),
        }
    }
}

fn push_parameters(s: &mut String, parameters: &[String]) {
    if !parameters.is_empty() {
        s.push('(');
        s.push_str(&parameters.join(","));
        s.push(')');
    }
}
