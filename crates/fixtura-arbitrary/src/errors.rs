use thiserror::Error;

/// Errors emitted while building or sampling a generation tree.
///
/// Structural errors abort the whole tree build; generation of one fixture
/// instance is all-or-nothing.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// Malformed type metadata reached a property generator.
    #[error("invalid type: {0}")]
    InvalidType(String),
    /// A size or null-injection policy broke its contract.
    #[error("policy violation: {0}")]
    PolicyViolation(String),
    /// The configured recursion bound was hit.
    #[error("depth exceeded: {0}")]
    DepthExceeded(String),
    /// A sampled generator failed to produce a value.
    #[error("value generation failed: {0}")]
    ValueGeneration(String),
    /// A requested feature is not supported.
    #[error("unsupported: {0}")]
    Unsupported(String),
}
