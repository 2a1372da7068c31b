use fixtura_core::Property;

use crate::container::ArbitraryContainerInfo;
use crate::errors::GenerationError;
use crate::value::Value;

/// A node in the generation tree: a property plus generation metadata.
///
/// Created once by a property generator and immutable thereafter. The node
/// owns its children; upward navigation lives on `GenerationContext`, not
/// here.
#[derive(Debug, Clone, PartialEq)]
pub struct ArbitraryProperty {
    property: Property,
    resolved_name: String,
    null_inject: f64,
    element_index: Option<usize>,
    children: Vec<ArbitraryProperty>,
    fixed_value: Option<Value>,
    container_info: Option<ArbitraryContainerInfo>,
}

impl ArbitraryProperty {
    pub fn new(
        property: Property,
        resolved_name: String,
        null_inject: f64,
        element_index: Option<usize>,
        children: Vec<ArbitraryProperty>,
        container_info: Option<ArbitraryContainerInfo>,
    ) -> Result<Self, GenerationError> {
        if !(0.0..=1.0).contains(&null_inject) {
            return Err(GenerationError::PolicyViolation(format!(
                "null-injection probability {null_inject} outside [0, 1] for '{resolved_name}'"
            )));
        }
        Ok(Self {
            property,
            resolved_name,
            null_inject,
            element_index,
            children,
            fixed_value: None,
            container_info,
        })
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    /// Display/binding name resolved at node creation.
    pub fn resolved_name(&self) -> &str {
        &self.resolved_name
    }

    /// Probability that the node's generated value is null; fixed at
    /// creation and applied uniformly on every sample.
    pub fn null_inject(&self) -> f64 {
        self.null_inject
    }

    /// Zero-based position within the parent container, when applicable.
    pub fn element_index(&self) -> Option<usize> {
        self.element_index
    }

    /// Ordered child nodes, in generation order.
    pub fn children(&self) -> &[ArbitraryProperty] {
        &self.children
    }

    /// Pre-fixed value bypassing generation, when set.
    pub fn fixed_value(&self) -> Option<&Value> {
        self.fixed_value.as_ref()
    }

    /// Cardinality decision for container nodes.
    pub fn container_info(&self) -> Option<&ArbitraryContainerInfo> {
        self.container_info.as_ref()
    }

    /// Functional update pinning this node to a fixed value; generation for
    /// the node is short-circuited to that exact value on every sample.
    pub fn with_fixed_value(mut self, value: Value) -> Self {
        self.fixed_value = Some(value);
        self
    }
}
