use std::sync::Arc;

use fixtura_arbitrary::{
    DefaultNullInjectPolicy, FixedContainerSizePolicy, GenerateOptions, GenerationError, Value,
};
use fixtura_core::{FieldDescriptor, TypeDescriptor, TypeKind};
use fixtura_generate::FixtureEngine;

fn map_descriptor() -> TypeDescriptor {
    TypeDescriptor::map(
        TypeDescriptor::scalar(TypeKind::Text),
        TypeDescriptor::scalar(TypeKind::Int),
    )
}

fn options_with_size(seed: u64, size: usize) -> GenerateOptions {
    GenerateOptions {
        seed,
        size_policy: Arc::new(FixedContainerSizePolicy::new(size)),
        ..GenerateOptions::default()
    }
}

#[test]
fn map_fixture_has_policy_chosen_entry_count() {
    let engine = FixtureEngine::new(options_with_size(11, 3));
    let fixture = engine.create(&map_descriptor()).expect("create map");

    match fixture {
        Value::Map(entries) => {
            assert_eq!(entries.len(), 3);
            for (key, _) in &entries {
                assert!(matches!(key, Value::Text(_)), "map key was {key:?}");
            }
        }
        other => panic!("expected a map value, got {other:?}"),
    }
}

#[test]
fn empty_map_fixture_is_an_empty_map() {
    let engine = FixtureEngine::new(options_with_size(11, 0));
    let fixture = engine.create(&map_descriptor()).expect("create map");
    assert_eq!(fixture, Value::Map(Vec::new()));
}

#[test]
fn map_with_wrong_arity_is_rejected_before_generation() {
    let descriptor = TypeDescriptor {
        name: "map".to_string(),
        kind: TypeKind::Map,
        type_params: vec![TypeDescriptor::scalar(TypeKind::Text)],
        fields: Vec::new(),
        annotations: Vec::new(),
    };

    let engine = FixtureEngine::new(GenerateOptions::default());
    let result = engine.create(&descriptor);
    assert!(matches!(result, Err(GenerationError::InvalidType(_))));
}

#[test]
fn same_seed_produces_identical_fixtures() {
    let descriptor = TypeDescriptor::object(
        "profile",
        vec![
            FieldDescriptor {
                name: "id".to_string(),
                descriptor: TypeDescriptor::scalar(TypeKind::Uuid),
            },
            FieldDescriptor {
                name: "name".to_string(),
                descriptor: TypeDescriptor::scalar(TypeKind::Text),
            },
            FieldDescriptor {
                name: "scores".to_string(),
                descriptor: TypeDescriptor::list(TypeDescriptor::scalar(TypeKind::Int)),
            },
        ],
    );

    let first = FixtureEngine::new(options_with_size(42, 2))
        .create_many(&descriptor, 5)
        .expect("first batch");
    let second = FixtureEngine::new(options_with_size(42, 2))
        .create_many(&descriptor, 5)
        .expect("second batch");

    assert_eq!(first, second);
}

#[test]
fn different_seeds_produce_different_fixtures() {
    let descriptor = TypeDescriptor::object(
        "profile",
        vec![FieldDescriptor {
            name: "name".to_string(),
            descriptor: TypeDescriptor::scalar(TypeKind::Text),
        }],
    );

    let first = FixtureEngine::new(options_with_size(1, 2))
        .create_many(&descriptor, 4)
        .expect("first batch");
    let second = FixtureEngine::new(options_with_size(2, 2))
        .create_many(&descriptor, 4)
        .expect("second batch");

    assert_ne!(first, second);
}

#[test]
fn full_null_rate_nulls_out_optional_fields_but_not_the_root() {
    let descriptor = TypeDescriptor::object(
        "account",
        vec![FieldDescriptor {
            name: "balance".to_string(),
            descriptor: TypeDescriptor::scalar(TypeKind::Int),
        }],
    );
    let options = GenerateOptions {
        null_policy: Arc::new(DefaultNullInjectPolicy {
            rate: 1.0,
            nullable_containers: false,
            default_not_null: false,
        }),
        ..GenerateOptions::default()
    };

    let fixture = FixtureEngine::new(options)
        .create(&descriptor)
        .expect("create account");
    match fixture {
        Value::Object(fields) => assert_eq!(fields.get("balance"), Some(&Value::Null)),
        other => panic!("expected an object value, got {other:?}"),
    }
}

#[test]
fn set_fixtures_drop_duplicate_draws() {
    let descriptor = TypeDescriptor::set(TypeDescriptor::scalar(TypeKind::Bool));
    let options = GenerateOptions {
        seed: 5,
        size_policy: Arc::new(FixedContainerSizePolicy::new(8)),
        null_policy: Arc::new(DefaultNullInjectPolicy {
            rate: 0.0,
            nullable_containers: false,
            default_not_null: false,
        }),
        ..GenerateOptions::default()
    };

    let fixture = FixtureEngine::new(options)
        .create(&descriptor)
        .expect("create set");
    match fixture {
        Value::Set(items) => {
            assert!(items.len() <= 2, "bool set had {} items", items.len());
            for (index, item) in items.iter().enumerate() {
                assert!(!items[..index].contains(item), "duplicate {item:?} in set");
            }
        }
        other => panic!("expected a set value, got {other:?}"),
    }
}

#[test]
fn nested_containers_generate_through_every_level() {
    let descriptor = TypeDescriptor::list(TypeDescriptor::map(
        TypeDescriptor::scalar(TypeKind::Text),
        TypeDescriptor::scalar(TypeKind::Int),
    ));

    let fixture = FixtureEngine::new(options_with_size(3, 2))
        .create(&descriptor)
        .expect("create nested");
    match fixture {
        Value::List(items) => {
            assert_eq!(items.len(), 2);
            for item in &items {
                assert!(matches!(item, Value::Map(_)), "list item was {item:?}");
            }
        }
        other => panic!("expected a list value, got {other:?}"),
    }
}

#[test]
fn create_many_returns_requested_count() {
    let engine = FixtureEngine::new(options_with_size(9, 1));
    let fixtures = engine
        .create_many(&TypeDescriptor::scalar(TypeKind::Int), 7)
        .expect("create batch");
    assert_eq!(fixtures.len(), 7);
}
