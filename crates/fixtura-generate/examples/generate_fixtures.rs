use std::env;

use fixtura_arbitrary::GenerateOptions;
use fixtura_core::{Annotation, FieldDescriptor, TypeDescriptor, TypeKind};
use fixtura_generate::FixtureEngine;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut seed: u64 = 0;
    let mut count: usize = 3;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = args.next().ok_or("missing value for --seed")?.parse()?,
            "--count" => count = args.next().ok_or("missing value for --count")?.parse()?,
            _ => return Err("unexpected argument".into()),
        }
    }

    let descriptor = order_descriptor();

    let options = GenerateOptions {
        seed,
        ..GenerateOptions::default()
    };
    let engine = FixtureEngine::new(options);
    let fixtures = engine.create_many(&descriptor, count)?;

    for (index, fixture) in fixtures.iter().enumerate() {
        println!("--- fixture {index} ---");
        println!("{fixture:#?}");
    }
    Ok(())
}

fn order_descriptor() -> TypeDescriptor {
    TypeDescriptor::object(
        "order",
        vec![
            FieldDescriptor {
                name: "id".to_string(),
                descriptor: TypeDescriptor::scalar(TypeKind::Uuid),
            },
            FieldDescriptor {
                name: "reference".to_string(),
                descriptor: TypeDescriptor::scalar(TypeKind::Text).with_annotations(vec![
                    Annotation::Pattern {
                        regex: "ORD-[0-9]{6}".to_string(),
                    },
                ]),
            },
            FieldDescriptor {
                name: "total".to_string(),
                descriptor: TypeDescriptor::scalar(TypeKind::Float).with_annotations(vec![
                    Annotation::Range {
                        min: Some(0.0),
                        max: Some(999.99),
                    },
                ]),
            },
            FieldDescriptor {
                name: "placed_at".to_string(),
                descriptor: TypeDescriptor::scalar(TypeKind::Timestamp),
            },
            FieldDescriptor {
                name: "tags".to_string(),
                descriptor: TypeDescriptor::set(TypeDescriptor::scalar(TypeKind::Text)),
            },
            FieldDescriptor {
                name: "line_quantities".to_string(),
                descriptor: TypeDescriptor::map(
                    TypeDescriptor::scalar(TypeKind::Text),
                    TypeDescriptor::scalar(TypeKind::Int).with_annotations(vec![
                        Annotation::Range {
                            min: Some(1.0),
                            max: Some(20.0),
                        },
                    ]),
                ),
            },
        ],
    )
}
