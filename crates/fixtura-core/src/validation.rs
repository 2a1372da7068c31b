use std::collections::BTreeSet;

use crate::annotations::Annotation;
use crate::descriptor::{TypeDescriptor, TypeKind};
use crate::error::{Error, Result};

/// Validate structural well-formedness of a type descriptor.
///
/// This checks:
/// - type-parameter counts per kind (one for lists/sets, two for maps)
/// - scalar kinds carry no parameters or fields
/// - duplicate field names on object types
/// - declared size/range bounds are not inverted
pub fn validate_descriptor(descriptor: &TypeDescriptor) -> Result<()> {
    match descriptor.kind {
        TypeKind::Map => {
            if descriptor.type_params.len() != 2 {
                return Err(Error::InvalidDescriptor(format!(
                    "map type '{}' must declare exactly two type parameters, found {}",
                    descriptor.name,
                    descriptor.type_params.len()
                )));
            }
        }
        TypeKind::List | TypeKind::Set => {
            if descriptor.type_params.len() != 1 {
                return Err(Error::InvalidDescriptor(format!(
                    "container type '{}' must declare exactly one type parameter, found {}",
                    descriptor.name,
                    descriptor.type_params.len()
                )));
            }
        }
        TypeKind::Object => {
            if !descriptor.type_params.is_empty() {
                return Err(Error::InvalidDescriptor(format!(
                    "object type '{}' must not declare type parameters",
                    descriptor.name
                )));
            }

            let mut names = BTreeSet::new();
            for field in &descriptor.fields {
                if !names.insert(field.name.as_str()) {
                    return Err(Error::InvalidDescriptor(format!(
                        "duplicate field name: {}.{}",
                        descriptor.name, field.name
                    )));
                }
            }
        }
        _ => {
            if !descriptor.type_params.is_empty() || !descriptor.fields.is_empty() {
                return Err(Error::InvalidDescriptor(format!(
                    "scalar type '{}' must not declare type parameters or fields",
                    descriptor.name
                )));
            }
        }
    }

    for annotation in &descriptor.annotations {
        match annotation {
            Annotation::Size {
                min: Some(min),
                max: Some(max),
            } if min > max => {
                return Err(Error::InvalidDescriptor(format!(
                    "size bounds are inverted on '{}': {min} > {max}",
                    descriptor.name
                )));
            }
            Annotation::Range {
                min: Some(min),
                max: Some(max),
            } if min > max => {
                return Err(Error::InvalidDescriptor(format!(
                    "range bounds are inverted on '{}': {min} > {max}",
                    descriptor.name
                )));
            }
            _ => {}
        }
    }

    for param in &descriptor.type_params {
        validate_descriptor(param)?;
    }
    for field in &descriptor.fields {
        validate_descriptor(&field.descriptor)?;
    }

    Ok(())
}
