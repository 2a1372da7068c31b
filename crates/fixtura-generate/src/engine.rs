use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use fixtura_arbitrary::{
    GenerateOptions, GenerateRequest, GenerationContext, GenerationError,
    PropertyGeneratorRegistry, Value, hash_index_seed, hash_seed,
};
use fixtura_core::{Property, TypeDescriptor, validate_descriptor};

use crate::resolver::DefaultResolver;

/// End-to-end fixture generation: descriptor in, sampled values out.
///
/// The engine validates the descriptor, builds the property tree once, wires
/// the default resolution function over it and then samples one value per
/// requested instance. Each instance draws from its own seeded stream, so
/// the output for a given `(options.seed, descriptor, index)` triple never
/// changes across runs.
pub struct FixtureEngine {
    options: GenerateOptions,
    registry: PropertyGeneratorRegistry,
}

impl FixtureEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options,
            registry: PropertyGeneratorRegistry::new(),
        }
    }

    /// Engine with caller-provided category generators.
    pub fn with_registry(options: GenerateOptions, registry: PropertyGeneratorRegistry) -> Self {
        Self { options, registry }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate a single fixture for `descriptor`.
    pub fn create(&self, descriptor: &TypeDescriptor) -> Result<Value, GenerationError> {
        self.create_many(descriptor, 1)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                GenerationError::ValueGeneration(format!(
                    "no value produced for type '{}'",
                    descriptor.name
                ))
            })
    }

    /// Generate `count` fixtures for `descriptor`, one per instance seed.
    pub fn create_many(
        &self,
        descriptor: &TypeDescriptor,
        count: usize,
    ) -> Result<Vec<Value>, GenerationError> {
        validate_descriptor(descriptor)
            .map_err(|error| GenerationError::InvalidType(error.to_string()))?;

        info!(
            type_name = %descriptor.name,
            count,
            seed = self.options.seed,
            "generating fixtures"
        );

        let request = GenerateRequest::root(Property::root(descriptor.clone()), &self.options);
        let node = self.registry.generate(&request)?;

        let resolver = DefaultResolver;
        let context = Arc::new(GenerationContext::new(
            node.clone(),
            node.children().to_vec(),
            None,
            Arc::new(resolver),
        ));
        let arbitrary = resolver.arbitrary_for(&context);

        let type_seed = hash_seed(self.options.seed, &descriptor.name);
        let mut values = Vec::with_capacity(count);
        for instance in 0..count {
            let mut rng = ChaCha8Rng::seed_from_u64(hash_index_seed(type_seed, instance as u64));
            let value = arbitrary.sample(&mut rng)?;
            debug!(instance, "sampled fixture instance");
            values.push(value);
        }

        info!(type_name = %descriptor.name, produced = values.len(), "generation complete");
        Ok(values)
    }
}
