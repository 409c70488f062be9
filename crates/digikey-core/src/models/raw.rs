//! Default-on-missing field access over raw response mappings.
//!
//! Value objects never validate at construction. Each accessor reads one key
//! through [`field_or`] with the default spelled out at the call site, so the
//! default policy stays visible and testable.

use serde_json::{Map, Value};
use tracing::warn;

use crate::schema::coerce;

/// Reads `key`, coercing with `coerce`. Absent or `null` yields `default`;
/// a present value that fails coercion also yields `default`, with a warning.
pub fn field_or<T>(
    raw: &Map<String, Value>,
    key: &str,
    default: T,
    coerce: impl Fn(&Value) -> Option<T>,
) -> T {
    field_opt(raw, key, coerce).unwrap_or(default)
}

/// Like [`field_or`] with `None` as the default.
pub fn field_opt<T>(
    raw: &Map<String, Value>,
    key: &str,
    coerce: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = raw.get(key).filter(|value| !value.is_null())?;
    let coerced = coerce(value);
    if coerced.is_none() {
        warn!(field = key, found = %value, "response field could not be coerced; using default");
    }
    coerced
}

pub(crate) fn int_or(raw: &Map<String, Value>, key: &str, default: i64) -> i64 {
    field_or(raw, key, default, coerce::to_integer)
}

pub(crate) fn float_or(raw: &Map<String, Value>, key: &str, default: f64) -> f64 {
    field_or(raw, key, default, coerce::to_float)
}

pub(crate) fn text_or(raw: &Map<String, Value>, key: &str, default: &str) -> String {
    field_or(raw, key, default.to_owned(), coerce::to_text)
}

pub(crate) fn opt_int(raw: &Map<String, Value>, key: &str) -> Option<i64> {
    field_opt(raw, key, coerce::to_integer)
}

pub(crate) fn opt_text(raw: &Map<String, Value>, key: &str) -> Option<String> {
    field_opt(raw, key, coerce::to_text)
}

/// Nested mapping under `key`, or an empty one.
pub(crate) fn object_or_empty(raw: &Map<String, Value>, key: &str) -> Map<String, Value> {
    field_or(raw, key, Map::new(), |value| value.as_object().cloned())
}

/// Sequence under `key`, or an empty one.
pub(crate) fn items_or_empty<'a>(raw: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    match raw.get(key) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => &[],
        Some(other) => {
            warn!(field = key, found = %other, "response field is not a list; using empty list");
            &[]
        }
    }
}

/// Mapping elements of the sequence under `key`; other elements are skipped
/// with a warning.
pub(crate) fn object_items(raw: &Map<String, Value>, key: &str) -> Vec<Map<String, Value>> {
    items_or_empty(raw, key)
        .iter()
        .filter_map(|item| match item {
            Value::Object(object) => Some(object.clone()),
            other => {
                warn!(field = key, found = %other, "skipping list element that is not a mapping");
                None
            }
        })
        .collect()
}
