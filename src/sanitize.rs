//! Key normalization applied to every JSON response.
//!
//! Scryfall objects carry `id` and `object` keys. Every map at every depth has
//! `id` moved to `api_id` and `object` moved to `obj` before any further
//! processing, so typed records never see the raw names.

use serde_json::{Map, Value};

/// Pairs of `(raw key, sanitized key)`, applied in order.
const RENAMES: [(&str, &str); 2] = [("id", "api_id"), ("object", "obj")];

/// Recursively rename reserved keys in `value`.
///
/// Maps have their reserved keys renamed before their values are sanitized;
/// sequences are rebuilt element by element. A renamed key overwrites an
/// existing target key in the same map.
pub fn sanitize(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize).collect()),
        Value::Object(map) => Value::Object(sanitize_map(map)),
        other => other,
    }
}

fn sanitize_map(mut map: Map<String, Value>) -> Map<String, Value> {
    for (from, to) in RENAMES {
        if let Some(v) = map.remove(from) {
            map.insert(to.to_string(), v);
        }
    }
    map.into_iter().map(|(k, v)| (k, sanitize(v))).collect()
}

/// Sanitize a borrowed value, leaving the caller's copy untouched.
pub fn sanitized(value: &Value) -> Value {
    sanitize(value.clone())
}
