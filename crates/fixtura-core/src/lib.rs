//! Core contracts and helpers for Fixtura.
//!
//! This crate defines the canonical type-descriptor model, the property
//! locations the generation tree is built from, validation helpers, and
//! errors shared across the generation crates.

pub mod annotations;
pub mod descriptor;
pub mod error;
pub mod property;
pub mod validation;

pub use annotations::{Annotation, AnnotationKind};
pub use descriptor::{FieldDescriptor, TypeDescriptor, TypeKind};
pub use error::{Error, Result};
pub use property::{ElementProperty, ElementRole, FieldProperty, MapEntryProperty, Property};
pub use validation::validate_descriptor;

/// Current contract version for descriptor artifacts.
pub const DESCRIPTOR_VERSION: &str = "0.1";
