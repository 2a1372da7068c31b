use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::annotations::{Annotation, AnnotationKind};

/// Declared kind of a described type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Bool,
    Int,
    Float,
    Text,
    Uuid,
    Date,
    Time,
    Timestamp,
    Object,
    List,
    Set,
    Map,
}

impl TypeKind {
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            TypeKind::Object | TypeKind::List | TypeKind::Set | TypeKind::Map
        )
    }

    pub fn is_container(&self) -> bool {
        matches!(self, TypeKind::List | TypeKind::Set | TypeKind::Map)
    }

    /// Lowercase display name of the kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            TypeKind::Bool => "bool",
            TypeKind::Int => "int",
            TypeKind::Float => "float",
            TypeKind::Text => "text",
            TypeKind::Uuid => "uuid",
            TypeKind::Date => "date",
            TypeKind::Time => "time",
            TypeKind::Timestamp => "timestamp",
            TypeKind::Object => "object",
            TypeKind::List => "list",
            TypeKind::Set => "set",
            TypeKind::Map => "map",
        }
    }
}

/// Uniform description of a language-level type: declared kind, generic
/// parameters in declaration order, named fields, and attached annotations.
///
/// The generation core depends only on this shape, never on a concrete
/// reflection mechanism.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct TypeDescriptor {
    /// Display name of the type (e.g. `map<text, int>`).
    pub name: String,
    pub kind: TypeKind,
    /// Generic parameters in declaration order (element type for lists and
    /// sets, key then value for maps).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeDescriptor>,
    /// Named fields for object types, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

/// A named field of an object type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct FieldDescriptor {
    pub name: String,
    pub descriptor: TypeDescriptor,
}

impl TypeDescriptor {
    /// Descriptor for a scalar kind, named after the kind.
    pub fn scalar(kind: TypeKind) -> Self {
        Self {
            name: kind.display_name().to_string(),
            kind,
            type_params: Vec::new(),
            fields: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn list(element: TypeDescriptor) -> Self {
        Self {
            name: format!("list<{}>", element.name),
            kind: TypeKind::List,
            type_params: vec![element],
            fields: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn set(element: TypeDescriptor) -> Self {
        Self {
            name: format!("set<{}>", element.name),
            kind: TypeKind::Set,
            type_params: vec![element],
            fields: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self {
            name: format!("map<{}, {}>", key.name, value.name),
            kind: TypeKind::Map,
            type_params: vec![key, value],
            fields: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn object(name: &str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            kind: TypeKind::Object,
            type_params: Vec::new(),
            fields,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    /// First annotation of the requested kind, or `None` when absent.
    pub fn find_annotation(&self, kind: AnnotationKind) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|annotation| annotation.kind() == kind)
    }
}
