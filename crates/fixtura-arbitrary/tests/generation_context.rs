use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fixtura_arbitrary::{
    Arbitrary, ArbitraryProperty, GenerateOptions, GenerateRequest, GenerationContext,
    PropertyGeneratorRegistry, Value,
};
use fixtura_core::{AnnotationKind, FieldDescriptor, Property, TypeDescriptor, TypeKind};

fn user_descriptor() -> TypeDescriptor {
    TypeDescriptor::object(
        "user",
        vec![
            FieldDescriptor {
                name: "id".to_string(),
                descriptor: TypeDescriptor::scalar(TypeKind::Int),
            },
            FieldDescriptor {
                name: "name".to_string(),
                descriptor: TypeDescriptor::scalar(TypeKind::Text),
            },
        ],
    )
}

fn generate_node(descriptor: TypeDescriptor, options: &GenerateOptions) -> ArbitraryProperty {
    let registry = PropertyGeneratorRegistry::new();
    registry
        .generate(&GenerateRequest::root(Property::root(descriptor), options))
        .expect("generate node")
}

fn context_for(
    node: &ArbitraryProperty,
    resolve: Arc<dyn fixtura_arbitrary::ResolveArbitrary>,
) -> Arc<GenerationContext> {
    Arc::new(GenerationContext::new(
        node.clone(),
        node.children().to_vec(),
        None,
        resolve,
    ))
}

#[test]
fn fixed_value_short_circuits_resolution() {
    let options = GenerateOptions::default();
    let node = generate_node(user_descriptor(), &options);

    let fixed_child = node.children()[0].clone().with_fixed_value(Value::Int(42));
    let plain_child = node.children()[1].clone();

    let resolve_calls = Arc::new(AtomicUsize::new(0));
    let counter = resolve_calls.clone();
    let resolve = Arc::new(
        move |_: &Arc<GenerationContext>, _: &ArbitraryProperty| -> Arbitrary {
            counter.fetch_add(1, Ordering::SeqCst);
            Arbitrary::constant(Value::Null)
        },
    );

    let context = Arc::new(GenerationContext::new(
        node.clone(),
        vec![fixed_child, plain_child],
        None,
        resolve,
    ));
    let generators = context.children_as_generators();

    // Only the non-fixed child went through the resolution function.
    assert_eq!(resolve_calls.load(Ordering::SeqCst), 1);

    let fixed = generators.get("id").expect("fixed child generator");
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    for _ in 0..3 {
        assert_eq!(fixed.sample(&mut rng).expect("sample"), Value::Int(42));
    }
}

#[test]
fn generators_stay_lazy_until_sampled() {
    let options = GenerateOptions::default();
    let node = generate_node(user_descriptor(), &options);

    let sample_calls = Arc::new(AtomicUsize::new(0));
    let counter = sample_calls.clone();
    let resolve = Arc::new(
        move |_: &Arc<GenerationContext>, _: &ArbitraryProperty| -> Arbitrary {
            let counter = counter.clone();
            Arbitrary::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Int(0))
            })
        },
    );

    let context = context_for(&node, resolve);
    let generators = context.children_as_generators();
    assert_eq!(generators.len(), 2);
    assert_eq!(sample_calls.load(Ordering::SeqCst), 0);

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    generators
        .get("id")
        .expect("id generator")
        .sample(&mut rng)
        .expect("sample");

    // The unused branch was never sampled.
    assert_eq!(sample_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn children_view_reflects_construction_snapshot() {
    let options = GenerateOptions::default();
    let node = generate_node(user_descriptor(), &options);
    let resolve = Arc::new(
        |_: &Arc<GenerationContext>, _: &ArbitraryProperty| -> Arbitrary {
            Arbitrary::constant(Value::Null)
        },
    );

    let context = context_for(&node, resolve);
    assert_eq!(context.children(), node.children());
    assert_eq!(context.children(), context.children());
    assert_eq!(context.children()[0].resolved_name(), "id");
    assert_eq!(context.children()[1].resolved_name(), "name");
}

#[test]
fn duplicate_resolved_names_are_last_write_wins() {
    let options = GenerateOptions::default();
    let node = generate_node(user_descriptor(), &options);

    let first = ArbitraryProperty::new(
        Property::field(
            "user".to_string(),
            "dup".to_string(),
            TypeDescriptor::scalar(TypeKind::Int),
        ),
        "dup".to_string(),
        0.0,
        None,
        Vec::new(),
        None,
    )
    .expect("first node")
    .with_fixed_value(Value::Int(1));
    let second = ArbitraryProperty::new(
        Property::field(
            "user".to_string(),
            "dup".to_string(),
            TypeDescriptor::scalar(TypeKind::Int),
        ),
        "dup".to_string(),
        0.0,
        None,
        Vec::new(),
        None,
    )
    .expect("second node")
    .with_fixed_value(Value::Int(2));

    let resolve = Arc::new(
        |_: &Arc<GenerationContext>, _: &ArbitraryProperty| -> Arbitrary {
            Arbitrary::constant(Value::Null)
        },
    );
    let context = Arc::new(GenerationContext::new(
        node,
        vec![first, second],
        None,
        resolve,
    ));

    let generators = context.children_as_generators();
    assert_eq!(generators.len(), 1);

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let value = generators
        .get("dup")
        .expect("dup generator")
        .sample(&mut rng)
        .expect("sample");
    assert_eq!(value, Value::Int(2));
}

#[test]
fn owner_chain_walks_upward_to_the_root() {
    let options = GenerateOptions::default();
    let node = generate_node(user_descriptor(), &options);
    let resolve = Arc::new(
        |_: &Arc<GenerationContext>, _: &ArbitraryProperty| -> Arbitrary {
            Arbitrary::constant(Value::Null)
        },
    );

    let root_context = context_for(&node, resolve.clone());
    assert!(root_context.is_root());
    assert!(root_context.owner_context().is_none());

    let child_node = node.children()[0].clone();
    let child_context = GenerationContext::new(
        child_node.clone(),
        child_node.children().to_vec(),
        Some(root_context.clone()),
        resolve,
    );
    assert!(!child_context.is_root());
    let owner = child_context.owner_context().expect("owner context");
    assert!(owner.is_root());
    assert_eq!(owner.descriptor().name, "user");
}

#[test]
fn find_annotation_returns_none_when_absent() {
    let options = GenerateOptions::default();
    let node = generate_node(user_descriptor(), &options);
    let resolve = Arc::new(
        |_: &Arc<GenerationContext>, _: &ArbitraryProperty| -> Arbitrary {
            Arbitrary::constant(Value::Null)
        },
    );

    let context = context_for(&node, resolve);
    assert_eq!(context.type_kind(), TypeKind::Object);
    assert!(context.find_annotation(AnnotationKind::Size).is_none());
    assert!(context.find_annotation(AnnotationKind::Pattern).is_none());
}
