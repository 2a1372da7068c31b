use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use fixtura_core::{Annotation, AnnotationKind};

use crate::container::ArbitraryContainerInfo;
use crate::errors::GenerationError;
use crate::generator::GenerateRequest;
use crate::seed::hash_seed;

/// Decides the probability that a node's generated value is null.
///
/// Called exactly once per node during tree construction. Implementations
/// must be deterministic for identical inputs, side-effect free, and return
/// a probability in `[0, 1]`; the registry fails fast otherwise.
pub trait NullInjectPolicy: Send + Sync {
    fn null_inject(
        &self,
        request: &GenerateRequest<'_>,
        container_info: Option<&ArbitraryContainerInfo>,
    ) -> f64;
}

/// Decides how many elements a container-typed node should have.
///
/// Implementations must respect declared `Size` annotations, apply a default
/// distribution otherwise, and always return a size within their own bounds.
pub trait ContainerSizePolicy: Send + Sync {
    fn container_info(
        &self,
        request: &GenerateRequest<'_>,
    ) -> Result<ArbitraryContainerInfo, GenerationError>;
}

/// Default null-injection policy.
///
/// Element-level overrides win over everything (map keys are forced to 0.0
/// by the map generator). Roots are never null. `NotNull` annotations, and
/// containers unless `nullable_containers` is set, suppress nulls;
/// `Nullable` restores the configured rate even under `default_not_null`.
#[derive(Debug, Clone)]
pub struct DefaultNullInjectPolicy {
    /// Probability assigned to nullable nodes.
    pub rate: f64,
    /// Allow container-typed nodes themselves to be null.
    pub nullable_containers: bool,
    /// Treat unannotated nodes as not-null.
    pub default_not_null: bool,
}

impl Default for DefaultNullInjectPolicy {
    fn default() -> Self {
        Self {
            rate: 0.2,
            nullable_containers: false,
            default_not_null: false,
        }
    }
}

impl NullInjectPolicy for DefaultNullInjectPolicy {
    fn null_inject(
        &self,
        request: &GenerateRequest<'_>,
        _container_info: Option<&ArbitraryContainerInfo>,
    ) -> f64 {
        if let Some(forced) = request.property.null_inject_override() {
            return forced;
        }
        if request.property.is_root() {
            return 0.0;
        }

        let descriptor = request.property.descriptor();
        if descriptor.find_annotation(AnnotationKind::NotNull).is_some() {
            return 0.0;
        }
        if descriptor.kind.is_container() && !self.nullable_containers {
            return 0.0;
        }
        if descriptor
            .find_annotation(AnnotationKind::Nullable)
            .is_some()
        {
            return self.rate;
        }
        if self.default_not_null {
            return 0.0;
        }
        self.rate
    }
}

/// Default container-size policy: `Size` annotations override the configured
/// bounds, and the concrete size is drawn deterministically from the node
/// seed.
#[derive(Debug, Clone)]
pub struct DefaultContainerSizePolicy {
    pub min: usize,
    pub max: usize,
}

impl Default for DefaultContainerSizePolicy {
    fn default() -> Self {
        Self { min: 0, max: 3 }
    }
}

impl ContainerSizePolicy for DefaultContainerSizePolicy {
    fn container_info(
        &self,
        request: &GenerateRequest<'_>,
    ) -> Result<ArbitraryContainerInfo, GenerationError> {
        let mut min = self.min;
        let mut max = self.max;
        if let Some(Annotation::Size {
            min: declared_min,
            max: declared_max,
        }) = request.property.find_annotation(AnnotationKind::Size)
        {
            if let Some(declared_min) = declared_min {
                min = *declared_min as usize;
            }
            if let Some(declared_max) = declared_max {
                max = *declared_max as usize;
            }
        }

        if min > max {
            return Err(GenerationError::PolicyViolation(format!(
                "declared size bounds are inverted for '{}': {min} > {max}",
                request.property.descriptor().name
            )));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(hash_seed(request.seed, "container_size"));
        let size = rng.random_range(min..=max);
        ArbitraryContainerInfo::new(min, max, size)
    }
}

/// Size policy pinned to a single element count; handy for tests and for
/// callers that want exact cardinality.
#[derive(Debug, Clone, Copy)]
pub struct FixedContainerSizePolicy {
    pub size: usize,
}

impl FixedContainerSizePolicy {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl ContainerSizePolicy for FixedContainerSizePolicy {
    fn container_info(
        &self,
        _request: &GenerateRequest<'_>,
    ) -> Result<ArbitraryContainerInfo, GenerationError> {
        ArbitraryContainerInfo::new(self.size, self.size, self.size)
    }
}
