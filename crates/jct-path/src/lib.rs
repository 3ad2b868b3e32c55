#![doc = include_str!("../README.md")]

use jct_error::{JctError, JctResult};
use jct_value::JsonValue;

/// Look up `key` (dot-notation, e.g. `"server.host"` or `"items.0"`) in
/// `root`.
///
/// At each segment: an object is indexed by the segment as a key name; an
/// array is indexed by the segment parsed as a non-negative decimal index.
/// Any other combination — indexing a scalar, a non-numeric segment on an
/// array, an out-of-range array index, a missing object key — fails with
/// [`JctError::NotFound`].
///
/// # Errors
///
/// Returns [`JctError::NotFound`] if any segment cannot be navigated, and
/// [`JctError::BadInput`] if `key` is empty.
pub fn get<'a>(root: &'a JsonValue, key: &str) -> JctResult<&'a JsonValue> {
    if key.is_empty() {
        return Err(JctError::BadInput("key must not be empty".to_string()));
    }
    let mut current = root;
    for segment in key.split('.') {
        current = step(current, segment)?;
    }
    Ok(current)
}

fn step<'a>(current: &'a JsonValue, segment: &str) -> JctResult<&'a JsonValue> {
    match current {
        JsonValue::Object(obj) => obj
            .get(segment)
            .ok_or_else(|| JctError::NotFound(format!("no key '{segment}'"))),
        JsonValue::Array(items) => {
            let idx = parse_index(segment)?;
            items
                .get(idx)
                .ok_or_else(|| JctError::NotFound(format!("index {idx} out of range")))
        }
        _ => Err(JctError::NotFound(format!(
            "cannot navigate into a scalar at '{segment}'"
        ))),
    }
}

fn parse_index(segment: &str) -> JctResult<usize> {
    segment
        .parse::<usize>()
        .map_err(|_| JctError::NotFound(format!("'{segment}' is not a valid array index")))
}

/// Assign `value` at `key` (dot-notation) in `root`, auto-creating missing
/// intermediate objects and extending arrays with `Null` padding up to the
/// target index.
///
/// The final segment is assigned: on an object this replaces any existing
/// value; on an array, indices beyond the current length first extend the
/// array with `Null` entries.
///
/// # Errors
///
/// Returns [`JctError::BadInput`] if `key` is empty, and
/// [`JctError::NotFound`] if an intermediate segment navigates into an
/// array with a non-numeric segment or into a scalar that isn't the root.
pub fn set(root: &mut JsonValue, key: &str, value: JsonValue) -> JctResult<()> {
    if key.is_empty() {
        return Err(JctError::BadInput("key must not be empty".to_string()));
    }
    let segments: Vec<&str> = key.split('.').collect();
    set_segments(root, &segments, value)
}

fn set_segments(current: &mut JsonValue, segments: &[&str], value: JsonValue) -> JctResult<()> {
    let (head, rest) = segments
        .split_first()
        .expect("set_segments is never called with an empty slice");

    if rest.is_empty() {
        assign(current, head, value)
    } else {
        let child = step_mut_for_write(current, head, rest[0])?;
        set_segments(child, rest, value)
    }
}

/// Navigate (or create) the intermediate container named by `segment`,
/// choosing object-vivification vs. array-extension based on whether the
/// *next* segment looks like an array index.
fn step_mut_for_write<'a>(
    current: &'a mut JsonValue,
    segment: &str,
    next_segment: &str,
) -> JctResult<&'a mut JsonValue> {
    if current.is_null() {
        *current = if next_segment.parse::<usize>().is_ok() {
            JsonValue::array()
        } else {
            JsonValue::object()
        };
    }

    match current {
        JsonValue::Object(obj) => {
            if !obj.contains_key(segment) {
                obj.insert(segment, JsonValue::Null);
            }
            Ok(obj.get_mut(segment).expect("just inserted"))
        }
        JsonValue::Array(items) => {
            let idx = parse_index(segment)?;
            extend_with_nulls(items, idx);
            Ok(&mut items[idx])
        }
        _ => Err(JctError::NotFound(format!(
            "cannot navigate into a scalar at '{segment}'"
        ))),
    }
}

fn assign(current: &mut JsonValue, segment: &str, value: JsonValue) -> JctResult<()> {
    if current.is_null() {
        *current = if segment.parse::<usize>().is_ok() {
            JsonValue::array()
        } else {
            JsonValue::object()
        };
    }

    match current {
        JsonValue::Object(obj) => {
            obj.insert(segment, value);
            Ok(())
        }
        JsonValue::Array(items) => {
            let idx = parse_index(segment)?;
            extend_with_nulls(items, idx);
            items[idx] = value;
            Ok(())
        }
        _ => Err(JctError::NotFound(format!(
            "cannot navigate into a scalar at '{segment}'"
        ))),
    }
}

fn extend_with_nulls(items: &mut Vec<JsonValue>, idx: usize) {
    if idx >= items.len() {
        items.resize(idx + 1, JsonValue::Null);
    }
}

/// Coerce a raw CLI value string into a [`JsonValue`] scalar: `true`,
/// `false`, and `null` match exactly; otherwise the string becomes a
/// [`JsonValue::Number`] if and only if the entire non-empty string parses
/// as a number, else a [`JsonValue::String`]. An empty string always
/// coerces to an empty string, never to zero.
#[must_use]
pub fn coerce_value_string(s: &str) -> JsonValue {
    match s {
        "true" => return JsonValue::Bool(true),
        "false" => return JsonValue::Bool(false),
        "null" => return JsonValue::Null,
        "" => return JsonValue::string(""),
        _ => {}
    }
    if let Some(n) = parse_entire_number(s) {
        JsonValue::Number(n)
    } else {
        JsonValue::string(s)
    }
}

/// Parses `s` as an `f64` only if the *whole* string is consumed, mirroring
/// `strtod`'s all-or-nothing contract for this use: leading `+` is
/// permitted even though Rust's own `f64::from_str` rejects it.
fn parse_entire_number(s: &str) -> Option<f64> {
    let trimmed = s.strip_prefix('+').unwrap_or(s);
    trimmed.parse::<f64>().ok()
}
