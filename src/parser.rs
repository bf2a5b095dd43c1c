//! Multi-schema payload parser.
//!
//! Sources share no payload contract, but in practice emit one of three
//! JSON shapes. Each shape gets a matcher: a pure predicate-plus-extractor
//! that returns `None` when the shape does not apply, or the extraction
//! result when it does. Matchers run in fixed priority order and the first
//! match wins; a matched shape that carries unparseable values fails rather
//! than falling through to the next matcher.

use crate::error::ParseError;
use crate::model::CanonicalReading;
use serde_json::Value;

type ShapeMatcher = fn(&Value) -> Option<Result<CanonicalReading, ParseError>>;

/// Recognized shapes, in priority order.
const MATCHERS: &[ShapeMatcher] = &[match_flat_numeric, match_string_encoded, match_nested];

/// Parses a raw source payload into a canonical reading.
///
/// Invalid JSON fails with [`ParseError::MalformedPayload`]; valid JSON
/// matching none of the recognized shapes fails with
/// [`ParseError::UnknownFormat`]. Never returns a partial or zeroed reading.
pub fn parse(payload: &str) -> Result<CanonicalReading, ParseError> {
    let root: Value = serde_json::from_str(payload).map_err(ParseError::malformed)?;

    for matcher in MATCHERS {
        if let Some(result) = matcher(&root) {
            return result;
        }
    }

    Err(ParseError::unknown_format(payload))
}

/// Shape 1: `{ "temp": 20.1, "hum": 55 }`
fn match_flat_numeric(root: &Value) -> Option<Result<CanonicalReading, ParseError>> {
    let (temp, hum) = match (root.get("temp"), root.get("hum")) {
        (Some(t), Some(h)) => (t, h),
        _ => return None,
    };
    Some(build_reading(numeric_field("temp", temp), numeric_field("hum", hum)))
}

/// Shape 2: `{ "temperature": "21.7", "humidity": "58" }`
fn match_string_encoded(root: &Value) -> Option<Result<CanonicalReading, ParseError>> {
    let (temp, hum) = match (root.get("temperature"), root.get("humidity")) {
        (Some(t), Some(h)) => (t, h),
        _ => return None,
    };
    Some(build_reading(
        decimal_text_field("temperature", temp),
        decimal_text_field("humidity", hum),
    ))
}

/// Shape 3: `{ "weather": { "t": 22.5, "h": 53.3 } }`
fn match_nested(root: &Value) -> Option<Result<CanonicalReading, ParseError>> {
    let weather = root.get("weather")?;
    // A `weather` object without both fields is not a match for this shape
    let (temp, hum) = match (weather.get("t"), weather.get("h")) {
        (Some(t), Some(h)) => (t, h),
        _ => return None,
    };
    Some(build_reading(numeric_field("t", temp), numeric_field("h", hum)))
}

fn build_reading(
    temperature: Result<f64, ParseError>,
    humidity: Result<f64, ParseError>,
) -> Result<CanonicalReading, ParseError> {
    Ok(CanonicalReading {
        temperature: temperature?,
        humidity: humidity?,
    })
}

fn numeric_field(name: &str, value: &Value) -> Result<f64, ParseError> {
    value
        .as_f64()
        .ok_or_else(|| ParseError::malformed(format!("field '{name}' is not a number: {value}")))
}

fn decimal_text_field(name: &str, value: &Value) -> Result<f64, ParseError> {
    // Sources are inconsistent about quoting under these keys; a bare
    // number is accepted as its textual form
    if let Some(number) = value.as_f64() {
        return Ok(number);
    }
    let text = value.as_str().ok_or_else(|| {
        ParseError::malformed(format!("field '{name}' is not decimal text: {value}"))
    })?;
    text.trim().parse::<f64>().map_err(|e| {
        ParseError::malformed(format!("field '{name}' is not decimal text '{text}': {e}"))
    })
}
