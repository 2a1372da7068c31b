//! Annotation-aware scalar arbitraries: the base-value generator library the
//! resolution function bottoms out to.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rand::{Rng, RngCore};

use fixtura_arbitrary::{Arbitrary, GenerationError, Value};
use fixtura_core::{Annotation, AnnotationKind, TypeDescriptor, TypeKind};

const DEFAULT_INT_MIN: i64 = 0;
const DEFAULT_INT_MAX: i64 = 10000;
const DEFAULT_FLOAT_MIN: f64 = 0.0;
const DEFAULT_FLOAT_MAX: f64 = 10000.0;
const DEFAULT_TEXT_MIN: usize = 1;
const DEFAULT_TEXT_MAX: usize = 32;
const DEFAULT_MAX_REPEAT: u32 = 32;
const CHARSET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Build the base arbitrary for a scalar descriptor, honoring `Range`,
/// `Size`, and `Pattern` annotations where they apply.
pub fn scalar_arbitrary(descriptor: &TypeDescriptor) -> Result<Arbitrary, GenerationError> {
    match descriptor.kind {
        TypeKind::Bool => Ok(Arbitrary::new(|rng| Ok(Value::Bool(rng.random_bool(0.5))))),
        TypeKind::Int => {
            let (min, max) = int_bounds(descriptor)?;
            Ok(Arbitrary::new(move |rng| {
                Ok(Value::Int(rng.random_range(min..=max)))
            }))
        }
        TypeKind::Float => {
            let (min, max) = float_bounds(descriptor)?;
            Ok(Arbitrary::new(move |rng| {
                Ok(Value::Float(rng.random_range(min..=max)))
            }))
        }
        TypeKind::Text => text_arbitrary(descriptor),
        TypeKind::Uuid => Ok(Arbitrary::new(|rng| Ok(Value::Uuid(random_uuid(rng))))),
        TypeKind::Date => Ok(Arbitrary::new(|rng| {
            let offset = rng.random_range(0..=365_i64);
            Ok(Value::Date(base_date() + Duration::days(offset)))
        })),
        TypeKind::Time => Ok(Arbitrary::new(|rng| Ok(Value::Time(random_time(rng))))),
        TypeKind::Timestamp => Ok(Arbitrary::new(|rng| {
            let offset = rng.random_range(0..=365_i64);
            let date = base_date() + Duration::days(offset);
            Ok(Value::Timestamp(NaiveDateTime::new(date, random_time(rng))))
        })),
        other => Err(GenerationError::Unsupported(format!(
            "no scalar arbitrary for {other:?} type '{}'",
            descriptor.name
        ))),
    }
}

fn int_bounds(descriptor: &TypeDescriptor) -> Result<(i64, i64), GenerationError> {
    let (min, max) = range_bounds(descriptor);
    let min = min.map(|value| value as i64).unwrap_or(DEFAULT_INT_MIN);
    let max = max.map(|value| value as i64).unwrap_or(DEFAULT_INT_MAX);
    if min > max {
        return Err(GenerationError::InvalidType(format!(
            "range bounds are inverted on '{}': {min} > {max}",
            descriptor.name
        )));
    }
    Ok((min, max))
}

fn float_bounds(descriptor: &TypeDescriptor) -> Result<(f64, f64), GenerationError> {
    let (min, max) = range_bounds(descriptor);
    let min = min.unwrap_or(DEFAULT_FLOAT_MIN);
    let max = max.unwrap_or(DEFAULT_FLOAT_MAX);
    if min > max {
        return Err(GenerationError::InvalidType(format!(
            "range bounds are inverted on '{}': {min} > {max}",
            descriptor.name
        )));
    }
    Ok((min, max))
}

fn range_bounds(descriptor: &TypeDescriptor) -> (Option<f64>, Option<f64>) {
    match descriptor.find_annotation(AnnotationKind::Range) {
        Some(Annotation::Range { min, max }) => (*min, *max),
        _ => (None, None),
    }
}

fn text_arbitrary(descriptor: &TypeDescriptor) -> Result<Arbitrary, GenerationError> {
    if let Some(Annotation::Pattern { regex }) = descriptor.find_annotation(AnnotationKind::Pattern)
    {
        let distribution =
            rand_regex::Regex::compile(regex, DEFAULT_MAX_REPEAT).map_err(|err| {
                GenerationError::InvalidType(format!(
                    "invalid pattern '{regex}' on '{}': {err}",
                    descriptor.name
                ))
            })?;
        return Ok(Arbitrary::new(move |rng| {
            let text: String = rng.sample(&distribution);
            Ok(Value::Text(text))
        }));
    }

    let (mut min_len, mut max_len) = (DEFAULT_TEXT_MIN, DEFAULT_TEXT_MAX);
    if let Some(Annotation::Size { min, max }) = descriptor.find_annotation(AnnotationKind::Size) {
        if let Some(min) = min {
            min_len = *min as usize;
        }
        if let Some(max) = max {
            max_len = *max as usize;
        }
    }
    if min_len > max_len {
        return Err(GenerationError::InvalidType(format!(
            "size bounds are inverted on '{}': {min_len} > {max_len}",
            descriptor.name
        )));
    }

    Ok(Arbitrary::new(move |rng| {
        let len = rng.random_range(min_len..=max_len);
        let mut text = String::with_capacity(len);
        for _ in 0..len {
            let index = rng.random_range(0..CHARSET.len());
            text.push(CHARSET.as_bytes()[index] as char);
        }
        Ok(Value::Text(text))
    }))
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

fn random_time(rng: &mut dyn RngCore) -> NaiveTime {
    let seconds = rng.random_range(0_u32..86400);
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or_default()
}

fn random_uuid(rng: &mut dyn RngCore) -> String {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    uuid::Uuid::from_bytes(bytes).to_string()
}
