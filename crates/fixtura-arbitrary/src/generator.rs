use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use fixtura_core::{ElementProperty, ElementRole, Property, TypeDescriptor, TypeKind};

use crate::container::ArbitraryContainerInfo;
use crate::errors::GenerationError;
use crate::names::{DefaultPropertyNameResolver, PropertyNameResolver};
use crate::node::ArbitraryProperty;
use crate::policy::{
    ContainerSizePolicy, DefaultContainerSizePolicy, DefaultNullInjectPolicy, NullInjectPolicy,
};
use crate::seed::{hash_index_seed, hash_seed};

/// Knobs for one generation pass. Policies are stateless and reentrant, so
/// one options value may serve concurrent tree builds.
#[derive(Clone)]
pub struct GenerateOptions {
    /// Base seed; every node derives its own seed from it.
    pub seed: u64,
    /// Recursion bound for deeply nested or self-referential types.
    pub max_depth: usize,
    pub size_policy: Arc<dyn ContainerSizePolicy>,
    pub null_policy: Arc<dyn NullInjectPolicy>,
    pub name_resolver: Arc<dyn PropertyNameResolver>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            max_depth: 32,
            size_policy: Arc::new(DefaultContainerSizePolicy::default()),
            null_policy: Arc::new(DefaultNullInjectPolicy::default()),
            name_resolver: Arc::new(DefaultPropertyNameResolver),
        }
    }
}

impl fmt::Debug for GenerateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateOptions")
            .field("seed", &self.seed)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

/// One node-generation request flowing through the registry.
#[derive(Debug)]
pub struct GenerateRequest<'a> {
    pub property: Property,
    /// Position within the owning container, absent for non-element nodes.
    pub element_index: Option<usize>,
    pub depth: usize,
    /// Node seed derived from the parent seed and this node's identity.
    pub seed: u64,
    pub options: &'a GenerateOptions,
}

impl<'a> GenerateRequest<'a> {
    /// Request for the top of a generation tree.
    pub fn root(property: Property, options: &'a GenerateOptions) -> Self {
        let seed = hash_seed(options.seed, &property.descriptor().name);
        Self {
            property,
            element_index: None,
            depth: 0,
            seed,
            options,
        }
    }

    /// Derive a child request one level deeper.
    pub fn child(
        &self,
        property: Property,
        element_index: Option<usize>,
        seed: u64,
    ) -> GenerateRequest<'a> {
        GenerateRequest {
            property,
            element_index,
            depth: self.depth + 1,
            seed,
            options: self.options,
        }
    }
}

/// Structural category the registry dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyCategory {
    Scalar,
    Object,
    Container,
    Map,
    MapEntry,
}

impl PropertyCategory {
    /// Category tag for a property, derived from its variant and the
    /// descriptor kind already present on it.
    pub fn of(property: &Property) -> Self {
        if matches!(property, Property::MapEntry(_)) {
            return PropertyCategory::MapEntry;
        }
        match property.descriptor().kind {
            TypeKind::Object => PropertyCategory::Object,
            TypeKind::List | TypeKind::Set => PropertyCategory::Container,
            TypeKind::Map => PropertyCategory::Map,
            _ => PropertyCategory::Scalar,
        }
    }
}

/// Builds the `ArbitraryProperty` node for one structural category.
pub trait PropertyGenerator: Send + Sync {
    fn generate(
        &self,
        request: &GenerateRequest<'_>,
        registry: &PropertyGeneratorRegistry,
    ) -> Result<ArbitraryProperty, GenerationError>;
}

/// Per-category property generators; the composability point for
/// independently registered type handlers.
pub struct PropertyGeneratorRegistry {
    generators: HashMap<PropertyCategory, Arc<dyn PropertyGenerator>>,
}

impl PropertyGeneratorRegistry {
    /// Registry with the default generator installed for every category.
    pub fn new() -> Self {
        let mut registry = Self {
            generators: HashMap::new(),
        };
        registry.register(PropertyCategory::Scalar, Arc::new(ScalarPropertyGenerator));
        registry.register(PropertyCategory::Object, Arc::new(ObjectPropertyGenerator));
        registry.register(
            PropertyCategory::Container,
            Arc::new(ContainerPropertyGenerator),
        );
        registry.register(PropertyCategory::Map, Arc::new(MapPropertyGenerator));
        registry.register(
            PropertyCategory::MapEntry,
            Arc::new(MapEntryPropertyGenerator),
        );
        registry
    }

    /// Replace the generator for a category.
    pub fn register(&mut self, category: PropertyCategory, generator: Arc<dyn PropertyGenerator>) {
        self.generators.insert(category, generator);
    }

    /// Build the node for `request`, dispatching on its structural category.
    pub fn generate(
        &self,
        request: &GenerateRequest<'_>,
    ) -> Result<ArbitraryProperty, GenerationError> {
        if request.depth > request.options.max_depth {
            return Err(GenerationError::DepthExceeded(format!(
                "recursion bound {} hit at type '{}'",
                request.options.max_depth,
                request.property.descriptor().name
            )));
        }

        let category = PropertyCategory::of(&request.property);
        let generator = self.generators.get(&category).ok_or_else(|| {
            GenerationError::Unsupported(format!(
                "no property generator registered for category {category:?}"
            ))
        })?;

        let node = generator.generate(request, self)?;
        debug!(
            name = %node.resolved_name(),
            category = ?category,
            children = node.children().len(),
            null_inject = node.null_inject(),
            "generated property node"
        );
        Ok(node)
    }
}

impl Default for PropertyGeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn checked_null_inject(
    request: &GenerateRequest<'_>,
    container_info: Option<&ArbitraryContainerInfo>,
) -> Result<f64, GenerationError> {
    let probability = request.options.null_policy.null_inject(request, container_info);
    if !(0.0..=1.0).contains(&probability) {
        warn!(
            probability,
            type_name = %request.property.descriptor().name,
            "null-injection policy returned out-of-range probability"
        );
        return Err(GenerationError::PolicyViolation(format!(
            "null-injection probability {probability} outside [0, 1] for type '{}'",
            request.property.descriptor().name
        )));
    }
    Ok(probability)
}

fn param_names(params: &[TypeDescriptor]) -> String {
    params
        .iter()
        .map(|param| param.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Leaf generator for scalar-typed nodes.
pub struct ScalarPropertyGenerator;

impl PropertyGenerator for ScalarPropertyGenerator {
    fn generate(
        &self,
        request: &GenerateRequest<'_>,
        _registry: &PropertyGeneratorRegistry,
    ) -> Result<ArbitraryProperty, GenerationError> {
        let null_inject = checked_null_inject(request, None)?;
        ArbitraryProperty::new(
            request.property.clone(),
            request.options.name_resolver.resolve(&request.property),
            null_inject,
            request.element_index,
            Vec::new(),
            None,
        )
    }
}

/// Generator for object-typed nodes: one child per declared field, in
/// declaration order.
pub struct ObjectPropertyGenerator;

impl PropertyGenerator for ObjectPropertyGenerator {
    fn generate(
        &self,
        request: &GenerateRequest<'_>,
        registry: &PropertyGeneratorRegistry,
    ) -> Result<ArbitraryProperty, GenerationError> {
        let descriptor = request.property.descriptor().clone();

        let mut children = Vec::with_capacity(descriptor.fields.len());
        for field in &descriptor.fields {
            let property = Property::field(
                descriptor.name.clone(),
                field.name.clone(),
                field.descriptor.clone(),
            );
            let child = request.child(property, None, hash_seed(request.seed, &field.name));
            children.push(registry.generate(&child)?);
        }

        let null_inject = checked_null_inject(request, None)?;
        ArbitraryProperty::new(
            request.property.clone(),
            request.options.name_resolver.resolve(&request.property),
            null_inject,
            request.element_index,
            children,
            None,
        )
    }
}

/// Generator for list- and set-typed nodes: one item element per index
/// chosen by the container-size policy.
pub struct ContainerPropertyGenerator;

impl PropertyGenerator for ContainerPropertyGenerator {
    fn generate(
        &self,
        request: &GenerateRequest<'_>,
        registry: &PropertyGeneratorRegistry,
    ) -> Result<ArbitraryProperty, GenerationError> {
        let descriptor = request.property.descriptor().clone();
        let params = &descriptor.type_params;
        if params.len() != 1 {
            return Err(GenerationError::InvalidType(format!(
                "container type '{}' must have exactly one element type parameter, found {}: [{}]",
                descriptor.name,
                params.len(),
                param_names(params)
            )));
        }

        let container_info = request.options.size_policy.container_info(request)?;
        let element_type = params[0].clone();

        let mut children = Vec::with_capacity(container_info.size());
        for index in 0..container_info.size() {
            let property = Property::element(element_type.clone(), ElementRole::Item, index, None);
            let child = request.child(
                property,
                Some(index),
                hash_index_seed(request.seed, index as u64),
            );
            children.push(registry.generate(&child)?);
        }

        let null_inject = checked_null_inject(request, Some(&container_info))?;
        ArbitraryProperty::new(
            request.property.clone(),
            request.options.name_resolver.resolve(&request.property),
            null_inject,
            request.element_index,
            children,
            Some(container_info),
        )
    }
}

/// Generator for map-typed nodes.
///
/// Each entry index yields a composite child pairing a key element (forced
/// null-injection of exactly 0.0; map keys are never null) with a value
/// element that inherits whatever the general null-injection policy assigns.
pub struct MapPropertyGenerator;

impl PropertyGenerator for MapPropertyGenerator {
    fn generate(
        &self,
        request: &GenerateRequest<'_>,
        registry: &PropertyGeneratorRegistry,
    ) -> Result<ArbitraryProperty, GenerationError> {
        let descriptor = request.property.descriptor().clone();
        let params = &descriptor.type_params;
        if params.len() != 2 {
            return Err(GenerationError::InvalidType(format!(
                "map type '{}' must have exactly two type parameters for key and value, found {}: [{}]",
                descriptor.name,
                params.len(),
                param_names(params)
            )));
        }

        let container_info = request.options.size_policy.container_info(request)?;
        let key_type = params[0].clone();
        let value_type = params[1].clone();

        let mut children = Vec::with_capacity(container_info.size());
        for index in 0..container_info.size() {
            let entry = Property::map_entry(
                descriptor.clone(),
                ElementProperty {
                    descriptor: key_type.clone(),
                    role: ElementRole::Key,
                    index,
                    null_inject_override: Some(0.0),
                },
                ElementProperty {
                    descriptor: value_type.clone(),
                    role: ElementRole::Value,
                    index,
                    null_inject_override: None,
                },
                index,
            );
            let child = request.child(
                entry,
                Some(index),
                hash_index_seed(request.seed, index as u64),
            );
            children.push(registry.generate(&child)?);
        }

        let null_inject = checked_null_inject(request, Some(&container_info))?;
        ArbitraryProperty::new(
            request.property.clone(),
            request.options.name_resolver.resolve(&request.property),
            null_inject,
            request.element_index,
            children,
            Some(container_info),
        )
    }
}

/// Generator for map-entry composites: children are the key node followed by
/// the value node. Entries themselves are structural and never null; absence
/// is expressed through container size.
pub struct MapEntryPropertyGenerator;

impl PropertyGenerator for MapEntryPropertyGenerator {
    fn generate(
        &self,
        request: &GenerateRequest<'_>,
        registry: &PropertyGeneratorRegistry,
    ) -> Result<ArbitraryProperty, GenerationError> {
        let Property::MapEntry(entry) = &request.property else {
            return Err(GenerationError::InvalidType(format!(
                "map-entry generator received non-entry property of type '{}'",
                request.property.descriptor().name
            )));
        };

        let key_request = request.child(
            Property::Element(entry.key.clone()),
            Some(entry.index),
            hash_seed(request.seed, "key"),
        );
        let value_request = request.child(
            Property::Element(entry.value.clone()),
            Some(entry.index),
            hash_seed(request.seed, "value"),
        );
        let children = vec![
            registry.generate(&key_request)?,
            registry.generate(&value_request)?,
        ];

        ArbitraryProperty::new(
            request.property.clone(),
            request.options.name_resolver.resolve(&request.property),
            0.0,
            Some(entry.index),
            children,
            None,
        )
    }
}
