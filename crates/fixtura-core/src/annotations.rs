use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind tag used to look up annotations on a descriptor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    NotNull,
    Nullable,
    Size,
    Range,
    Pattern,
}

/// Pre-parsed constraint metadata attached to a typed location.
///
/// Annotations arrive as data; parsing them out of a host language is the
/// introspection layer's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// The location never holds a null value.
    NotNull,
    /// The location may hold a null value.
    Nullable,
    /// Declared element-count bounds for containers, or length bounds for text.
    Size { min: Option<u64>, max: Option<u64> },
    /// Declared numeric bounds.
    Range { min: Option<f64>, max: Option<f64> },
    /// Regular expression the generated text must match.
    Pattern { regex: String },
}

impl Annotation {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Annotation::NotNull => AnnotationKind::NotNull,
            Annotation::Nullable => AnnotationKind::Nullable,
            Annotation::Size { .. } => AnnotationKind::Size,
            Annotation::Range { .. } => AnnotationKind::Range,
            Annotation::Pattern { .. } => AnnotationKind::Pattern,
        }
    }
}
