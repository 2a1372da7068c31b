use crate::annotations::{Annotation, AnnotationKind};
use crate::descriptor::TypeDescriptor;

/// Role a container element plays within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// Plain element of a list or set.
    Item,
    /// Key side of a map entry.
    Key,
    /// Value side of a map entry.
    Value,
}

/// A typed location inside a container, identified by a zero-based index.
///
/// The index doubles as element identity and as a stable seed-derivation
/// input, so regenerating the same index under the same seed is
/// deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementProperty {
    pub descriptor: TypeDescriptor,
    pub role: ElementRole,
    pub index: usize,
    /// Forced null-injection probability, bypassing the configured policy.
    pub null_inject_override: Option<f64>,
}

/// Composite map-entry location pairing a key element with a value element.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntryProperty {
    /// Descriptor of the owning map type, kept for diagnostics.
    pub map: TypeDescriptor,
    pub key: ElementProperty,
    pub value: ElementProperty,
    pub index: usize,
}

/// A named field location on an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldProperty {
    /// Display name of the owning object type.
    pub owner: String,
    pub name: String,
    pub descriptor: TypeDescriptor,
}

/// Immutable descriptor of a typed location in the data graph, independent
/// of any generated value. Identity is structural (type plus path).
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Root(TypeDescriptor),
    Field(FieldProperty),
    Element(ElementProperty),
    MapEntry(MapEntryProperty),
}

impl Property {
    pub fn root(descriptor: TypeDescriptor) -> Self {
        Property::Root(descriptor)
    }

    pub fn field(owner: String, name: String, descriptor: TypeDescriptor) -> Self {
        Property::Field(FieldProperty {
            owner,
            name,
            descriptor,
        })
    }

    pub fn element(
        descriptor: TypeDescriptor,
        role: ElementRole,
        index: usize,
        null_inject_override: Option<f64>,
    ) -> Self {
        Property::Element(ElementProperty {
            descriptor,
            role,
            index,
            null_inject_override,
        })
    }

    pub fn map_entry(
        map: TypeDescriptor,
        key: ElementProperty,
        value: ElementProperty,
        index: usize,
    ) -> Self {
        Property::MapEntry(MapEntryProperty {
            map,
            key,
            value,
            index,
        })
    }

    /// Descriptor of the type at this location. Map entries report the
    /// owning map's descriptor; their own shape is the key/value pair.
    pub fn descriptor(&self) -> &TypeDescriptor {
        match self {
            Property::Root(descriptor) => descriptor,
            Property::Field(field) => &field.descriptor,
            Property::Element(element) => &element.descriptor,
            Property::MapEntry(entry) => &entry.map,
        }
    }

    /// True iff this location has no owning container or field above it.
    pub fn is_root(&self) -> bool {
        matches!(self, Property::Root(_))
    }

    /// Zero-based position within the parent container, when applicable.
    pub fn element_index(&self) -> Option<usize> {
        match self {
            Property::Element(element) => Some(element.index),
            Property::MapEntry(entry) => Some(entry.index),
            _ => None,
        }
    }

    /// Forced null-injection probability carried by element locations.
    pub fn null_inject_override(&self) -> Option<f64> {
        match self {
            Property::Element(element) => element.null_inject_override,
            _ => None,
        }
    }

    pub fn find_annotation(&self, kind: AnnotationKind) -> Option<&Annotation> {
        self.descriptor().find_annotation(kind)
    }
}
