//! Default resolution function: turns a property tree into one lazy
//! generator per node, assembling containers and objects from their child
//! generators.

use std::collections::BTreeMap;
use std::sync::Arc;

use fixtura_arbitrary::{
    Arbitrary, ArbitraryProperty, GenerationContext, GenerationError, PropertyCategory,
    ResolveArbitrary, Value,
};

use crate::scalars::scalar_arbitrary;

/// Resolution strategy covering every built-in structural category.
///
/// Resolution is recursive and lazy: building the generator for a node wires
/// up its children's generators, but nothing is sampled until the caller
/// draws from the final arbitrary. Errors discovered while wiring (an
/// unusable pattern, say) are deferred into failing generators so resolution
/// itself stays infallible.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultResolver;

impl ResolveArbitrary for DefaultResolver {
    fn resolve(&self, context: &Arc<GenerationContext>, property: &ArbitraryProperty) -> Arbitrary {
        let child_context = Arc::new(GenerationContext::new(
            property.clone(),
            property.children().to_vec(),
            Some(context.clone()),
            context.resolve_arbitrary().clone(),
        ));
        self.arbitrary_for(&child_context)
    }
}

impl DefaultResolver {
    /// Generator for the node a context wraps.
    pub fn arbitrary_for(&self, context: &Arc<GenerationContext>) -> Arbitrary {
        match PropertyCategory::of(context.property()) {
            PropertyCategory::Scalar => self.scalar(context),
            PropertyCategory::Object => self.object(context),
            PropertyCategory::Container => self.container(context),
            PropertyCategory::Map => self.map(context),
            PropertyCategory::MapEntry => self.map_entry(context),
        }
    }

    fn scalar(&self, context: &Arc<GenerationContext>) -> Arbitrary {
        let base = match scalar_arbitrary(context.descriptor()) {
            Ok(arbitrary) => arbitrary,
            Err(error) => return Arbitrary::fail(error),
        };
        base.or_null(context.arbitrary_property().null_inject())
    }

    fn object(&self, context: &Arc<GenerationContext>) -> Arbitrary {
        let null_inject = context.arbitrary_property().null_inject();
        let names = child_names(context);
        let generators = context.children_as_generators();

        Arbitrary::new(move |rng| {
            let mut object = BTreeMap::new();
            for name in &names {
                let generator = generators.get(name).ok_or_else(|| missing_child(name))?;
                object.insert(name.clone(), generator.sample(rng)?);
            }
            Ok(Value::Object(object))
        })
        .or_null(null_inject)
    }

    fn container(&self, context: &Arc<GenerationContext>) -> Arbitrary {
        let null_inject = context.arbitrary_property().null_inject();
        let is_set = context.type_kind() == fixtura_core::TypeKind::Set;
        let names = child_names(context);
        let generators = context.children_as_generators();

        Arbitrary::new(move |rng| {
            let mut items: Vec<Value> = Vec::with_capacity(names.len());
            for name in &names {
                let generator = generators.get(name).ok_or_else(|| missing_child(name))?;
                let item = generator.sample(rng)?;
                // Sets drop duplicate draws instead of retrying.
                if is_set && items.contains(&item) {
                    continue;
                }
                items.push(item);
            }
            Ok(if is_set {
                Value::Set(items)
            } else {
                Value::List(items)
            })
        })
        .or_null(null_inject)
    }

    fn map(&self, context: &Arc<GenerationContext>) -> Arbitrary {
        let null_inject = context.arbitrary_property().null_inject();
        let names = child_names(context);
        let generators = context.children_as_generators();

        Arbitrary::new(move |rng| {
            let mut entries: Vec<(Value, Value)> = Vec::with_capacity(names.len());
            for name in &names {
                let generator = generators.get(name).ok_or_else(|| missing_child(name))?;
                match generator.sample(rng)? {
                    Value::Entry(key, value) => {
                        // Duplicate keys collapse last-write-wins.
                        if let Some(slot) = entries.iter_mut().find(|(existing, _)| *existing == *key)
                        {
                            slot.1 = *value;
                        } else {
                            entries.push((*key, *value));
                        }
                    }
                    other => {
                        return Err(GenerationError::ValueGeneration(format!(
                            "map entry generator produced {other:?} instead of an entry"
                        )));
                    }
                }
            }
            Ok(Value::Map(entries))
        })
        .or_null(null_inject)
    }

    fn map_entry(&self, context: &Arc<GenerationContext>) -> Arbitrary {
        let generators = context.children_as_generators();

        // Entries are structural pairs; null injection applies to the key
        // and value generators inside, never to the entry itself.
        Arbitrary::new(move |rng| {
            let key = generators
                .get("key")
                .ok_or_else(|| missing_child("key"))?
                .sample(rng)?;
            let value = generators
                .get("value")
                .ok_or_else(|| missing_child("value"))?
                .sample(rng)?;
            Ok(Value::Entry(Box::new(key), Box::new(value)))
        })
    }
}

fn child_names(context: &Arc<GenerationContext>) -> Vec<String> {
    context
        .children()
        .iter()
        .map(|child| child.resolved_name().to_string())
        .collect()
}

fn missing_child(name: &str) -> GenerationError {
    GenerationError::ValueGeneration(format!("no generator resolved for child '{name}'"))
}
