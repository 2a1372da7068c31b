//! Recursive, type-driven generation core for Fixtura.
//!
//! This crate builds a tree of generatable properties for an arbitrary type
//! descriptor and resolves each node into a deferred, sample-on-demand
//! generator, subject to per-node container-size and null-injection
//! policies. It never samples scalar values itself; the resolution callback
//! bottoms out in a collaborator crate.

pub mod arbitrary;
pub mod container;
pub mod context;
pub mod errors;
pub mod generator;
pub mod names;
pub mod node;
pub mod policy;
pub mod seed;
pub mod value;

pub use arbitrary::Arbitrary;
pub use container::ArbitraryContainerInfo;
pub use context::{GenerationContext, ResolveArbitrary};
pub use errors::GenerationError;
pub use generator::{
    ContainerPropertyGenerator, GenerateOptions, GenerateRequest, MapEntryPropertyGenerator,
    MapPropertyGenerator, ObjectPropertyGenerator, PropertyCategory, PropertyGenerator,
    PropertyGeneratorRegistry, ScalarPropertyGenerator,
};
pub use names::{DefaultPropertyNameResolver, PropertyNameResolver};
pub use node::ArbitraryProperty;
pub use policy::{
    ContainerSizePolicy, DefaultContainerSizePolicy, DefaultNullInjectPolicy,
    FixedContainerSizePolicy, NullInjectPolicy,
};
pub use seed::{hash_index_seed, hash_seed};
pub use value::Value;
