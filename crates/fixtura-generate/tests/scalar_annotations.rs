use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fixtura_arbitrary::{GenerationError, Value};
use fixtura_core::{Annotation, TypeDescriptor, TypeKind};
use fixtura_generate::scalar_arbitrary;

fn samples(descriptor: &TypeDescriptor, count: usize) -> Vec<Value> {
    let arbitrary = scalar_arbitrary(descriptor).expect("scalar arbitrary");
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    (0..count)
        .map(|_| arbitrary.sample(&mut rng).expect("sample"))
        .collect()
}

#[test]
fn int_range_annotation_bounds_every_sample() {
    let descriptor = TypeDescriptor::scalar(TypeKind::Int).with_annotations(vec![
        Annotation::Range {
            min: Some(5.0),
            max: Some(10.0),
        },
    ]);

    for value in samples(&descriptor, 200) {
        let value = value.as_i64().expect("int value");
        assert!((5..=10).contains(&value), "sample {value} out of range");
    }
}

#[test]
fn float_range_annotation_bounds_every_sample() {
    let descriptor = TypeDescriptor::scalar(TypeKind::Float).with_annotations(vec![
        Annotation::Range {
            min: Some(-1.5),
            max: Some(1.5),
        },
    ]);

    for value in samples(&descriptor, 200) {
        let value = value.as_f64().expect("float value");
        assert!((-1.5..=1.5).contains(&value), "sample {value} out of range");
    }
}

#[test]
fn text_size_annotation_bounds_length() {
    let descriptor = TypeDescriptor::scalar(TypeKind::Text).with_annotations(vec![
        Annotation::Size {
            min: Some(4),
            max: Some(8),
        },
    ]);

    for value in samples(&descriptor, 100) {
        let text = value.as_str().expect("text value").to_string();
        assert!((4..=8).contains(&text.len()), "length {} out of bounds", text.len());
        assert!(text.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}

#[test]
fn pattern_annotation_shapes_generated_text() {
    let descriptor = TypeDescriptor::scalar(TypeKind::Text).with_annotations(vec![
        Annotation::Pattern {
            regex: "[a-c]{3}-[0-9]{2}".to_string(),
        },
    ]);
    let matcher = regex::Regex::new("^[a-c]{3}-[0-9]{2}$").expect("matcher");

    for value in samples(&descriptor, 100) {
        let text = value.as_str().expect("text value");
        assert!(matcher.is_match(text), "'{text}' does not match the pattern");
    }
}

#[test]
fn invalid_pattern_is_rejected() {
    let descriptor = TypeDescriptor::scalar(TypeKind::Text).with_annotations(vec![
        Annotation::Pattern {
            regex: "(".to_string(),
        },
    ]);

    let result = scalar_arbitrary(&descriptor);
    assert!(matches!(result, Err(GenerationError::InvalidType(_))));
}

#[test]
fn inverted_range_is_rejected() {
    let descriptor = TypeDescriptor::scalar(TypeKind::Int).with_annotations(vec![
        Annotation::Range {
            min: Some(10.0),
            max: Some(5.0),
        },
    ]);

    let result = scalar_arbitrary(&descriptor);
    assert!(matches!(result, Err(GenerationError::InvalidType(_))));
}

#[test]
fn generated_uuids_are_version_four() {
    for value in samples(&TypeDescriptor::scalar(TypeKind::Uuid), 50) {
        match value {
            Value::Uuid(text) => {
                let parsed = uuid::Uuid::parse_str(&text).expect("well-formed uuid");
                assert_eq!(parsed.get_version_num(), 4);
            }
            other => panic!("expected a uuid value, got {other:?}"),
        }
    }
}

#[test]
fn generated_dates_stay_within_the_base_year() {
    let min = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).expect("min date");
    let max = chrono::NaiveDate::from_ymd_opt(2024, 12, 31).expect("max date");

    for value in samples(&TypeDescriptor::scalar(TypeKind::Date), 100) {
        match value {
            Value::Date(date) => assert!(date >= min && date <= max, "date {date} out of range"),
            other => panic!("expected a date value, got {other:?}"),
        }
    }
}

#[test]
fn non_scalar_kinds_are_unsupported() {
    let descriptor = TypeDescriptor::object("thing", Vec::new());
    let result = scalar_arbitrary(&descriptor);
    assert!(matches!(result, Err(GenerationError::Unsupported(_))));
}
