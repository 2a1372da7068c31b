use fixtura_core::{ElementRole, Property};

/// Resolves the display/binding name of a generated property node.
pub trait PropertyNameResolver: Send + Sync {
    fn resolve(&self, property: &Property) -> String;
}

/// Default naming: root nodes use the type display name, fields their field
/// name, container elements and map entries `[index]`, and the two halves of
/// a map entry `key` and `value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPropertyNameResolver;

impl PropertyNameResolver for DefaultPropertyNameResolver {
    fn resolve(&self, property: &Property) -> String {
        match property {
            Property::Root(descriptor) => descriptor.name.clone(),
            Property::Field(field) => field.name.clone(),
            Property::Element(element) => match element.role {
                ElementRole::Item => format!("[{}]", element.index),
                ElementRole::Key => "key".to_string(),
                ElementRole::Value => "value".to_string(),
            },
            Property::MapEntry(entry) => format!("[{}]", entry.index),
        }
    }
}
