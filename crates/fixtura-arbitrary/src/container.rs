use crate::errors::GenerationError;

/// Resolved cardinality decision for a container node: the declared bounds
/// plus the concrete element count chosen within them. Computed once per
/// node at generation time and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbitraryContainerInfo {
    min: usize,
    max: usize,
    size: usize,
}

impl ArbitraryContainerInfo {
    /// Build a cardinality decision, failing fast when the chosen size falls
    /// outside the declared bounds.
    pub fn new(min: usize, max: usize, size: usize) -> Result<Self, GenerationError> {
        if min > max {
            return Err(GenerationError::PolicyViolation(format!(
                "container size bounds are inverted: {min} > {max}"
            )));
        }
        if size < min || size > max {
            return Err(GenerationError::PolicyViolation(format!(
                "container size {size} outside declared bounds {min}..={max}"
            )));
        }
        Ok(Self { min, max, size })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Concrete element count for the node.
    pub fn size(&self) -> usize {
        self.size
    }
}
