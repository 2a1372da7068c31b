use std::collections::HashMap;
use std::sync::Arc;

use fixtura_core::{Annotation, AnnotationKind, Property, TypeDescriptor, TypeKind};

use crate::arbitrary::Arbitrary;
use crate::node::ArbitraryProperty;

/// Resolution callback turning a child node into a generator.
///
/// This is the sole extension point by which nested generation is wired back
/// into whatever orchestrates the whole tree; the context never knows about
/// concrete generator registries.
pub trait ResolveArbitrary: Send + Sync {
    fn resolve(&self, context: &Arc<GenerationContext>, property: &ArbitraryProperty) -> Arbitrary;
}

impl<F> ResolveArbitrary for F
where
    F: Fn(&Arc<GenerationContext>, &ArbitraryProperty) -> Arbitrary + Send + Sync,
{
    fn resolve(&self, context: &Arc<GenerationContext>, property: &ArbitraryProperty) -> Arbitrary {
        self(context, property)
    }
}

/// Per-node wrapper exposing lazy child-generator resolution and upward
/// navigation.
///
/// The child list is copied at construction and immutable afterwards. The
/// owner link forms a singly-linked ancestor chain that is only ever walked
/// upward; a context lives no longer than the generation pass that created
/// it. None of its operations perform generation themselves; sampling errors
/// belong to the resolution function and the returned generators.
pub struct GenerationContext {
    node: ArbitraryProperty,
    children: Vec<ArbitraryProperty>,
    owner: Option<Arc<GenerationContext>>,
    resolve: Arc<dyn ResolveArbitrary>,
}

impl GenerationContext {
    pub fn new(
        node: ArbitraryProperty,
        children: Vec<ArbitraryProperty>,
        owner: Option<Arc<GenerationContext>>,
        resolve: Arc<dyn ResolveArbitrary>,
    ) -> Self {
        Self {
            node,
            children,
            owner,
            resolve,
        }
    }

    pub fn arbitrary_property(&self) -> &ArbitraryProperty {
        &self.node
    }

    pub fn property(&self) -> &Property {
        self.node.property()
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        self.property().descriptor()
    }

    pub fn type_kind(&self) -> TypeKind {
        self.descriptor().kind
    }

    /// Annotation lookup on the wrapped property; `None` when absent.
    pub fn find_annotation(&self, kind: AnnotationKind) -> Option<&Annotation> {
        self.property().find_annotation(kind)
    }

    /// Read-only ordered view of the child nodes captured at construction.
    pub fn children(&self) -> &[ArbitraryProperty] {
        &self.children
    }

    /// Map each child's resolved name to a generator for that child.
    ///
    /// Children carrying a fixed value produce a constant generator and the
    /// resolution callback is never invoked for them; all other children go
    /// through the injected resolution function with `(self, child)`.
    /// Duplicate resolved names resolve last-write-wins. Nothing is sampled
    /// here; generators stay lazy until the caller draws from them.
    pub fn children_as_generators(self: &Arc<Self>) -> HashMap<String, Arbitrary> {
        let mut generators = HashMap::with_capacity(self.children.len());
        for child in &self.children {
            let arbitrary = match child.fixed_value() {
                Some(value) => Arbitrary::constant(value.clone()),
                None => self.resolve.resolve(self, child),
            };
            generators.insert(child.resolved_name().to_string(), arbitrary);
        }
        generators
    }

    /// Owning parent context, absent at the root.
    pub fn owner_context(&self) -> Option<&Arc<GenerationContext>> {
        self.owner.as_ref()
    }

    /// True iff the underlying property denotes a top-level node.
    pub fn is_root(&self) -> bool {
        self.node.property().is_root()
    }

    pub fn resolve_arbitrary(&self) -> &Arc<dyn ResolveArbitrary> {
        &self.resolve
    }
}
