use std::fmt;
use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::errors::GenerationError;
use crate::value::Value;

type SampleFn = dyn Fn(&mut dyn RngCore) -> Result<Value, GenerationError> + Send + Sync;

/// A deferred, sample-on-demand producer of randomized values.
///
/// Nothing is generated until `sample` is called, so unused branches of a
/// generation tree are never materialized.
#[derive(Clone)]
pub struct Arbitrary {
    sample: Arc<SampleFn>,
}

impl Arbitrary {
    pub fn new(
        sample: impl Fn(&mut dyn RngCore) -> Result<Value, GenerationError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            sample: Arc::new(sample),
        }
    }

    /// Generator that yields the same value on every sample.
    pub fn constant(value: Value) -> Self {
        Arbitrary::new(move |_| Ok(value.clone()))
    }

    /// Generator that fails with the given error on every sample.
    pub fn fail(error: GenerationError) -> Self {
        Arbitrary::new(move |_| Err(error.clone()))
    }

    /// Draw one value from this generator.
    pub fn sample(&self, rng: &mut dyn RngCore) -> Result<Value, GenerationError> {
        (self.sample)(rng)
    }

    /// Wrap this generator so it yields `Null` with the given probability.
    pub fn or_null(self, probability: f64) -> Self {
        if probability <= 0.0 {
            return self;
        }
        let probability = probability.min(1.0);
        Arbitrary::new(move |rng| {
            if rng.random_bool(probability) {
                Ok(Value::Null)
            } else {
                self.sample(rng)
            }
        })
    }
}

impl fmt::Debug for Arbitrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Arbitrary(..)")
    }
}
