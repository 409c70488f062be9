//! Recursive key-casing transform between the wire casing (`ParameterId`)
//! and the canonical casing used by the schemas (`parameter_id`).
//!
//! The transform only looks at key names. Keys whose word boundaries cannot
//! be recovered (for example an acronym run such as `RoHS`) do not round-trip
//! exactly; that is accepted rather than reported.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("acronym pattern must compile"));
static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("word pattern must compile"));
static UNDERSCORE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|_)(.)").expect("segment pattern must compile"));

/// `parameter_id` -> `ParameterId`.
pub fn camelize(key: &str) -> String {
    UNDERSCORE_SEGMENT
        .replace_all(key, |caps: &Captures<'_>| caps[1].to_uppercase())
        .into_owned()
}

/// `ParameterId` -> `parameter_id`.
pub fn underscore(key: &str) -> String {
    let word = ACRONYM_BOUNDARY.replace_all(key, "${1}_${2}");
    let word = WORD_BOUNDARY.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}

/// Rewrites every object key, at any depth, to the wire casing.
pub fn to_camel(value: &Value) -> Value {
    rekey(value, camelize)
}

/// Rewrites every object key, at any depth, to the canonical casing.
pub fn to_snake(value: &Value) -> Value {
    rekey(value, underscore)
}

fn rekey(value: &Value, rename: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, inner)| (rename(key), rekey(inner, rename)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|item| rekey(item, rename)).collect()),
        scalar => scalar.clone(),
    }
}
