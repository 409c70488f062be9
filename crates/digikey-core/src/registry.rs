//! Process-wide table of named schemas.
//!
//! | Name | Validates |
//! |------|-----------|
//! | `parametric_filter` | one `{parameter_id, value_id}` filter |
//! | `filters` | taxonomy, manufacturer and parametric filters |
//! | `sort` | sort criterion, including the parameter-id rule |
//! | `keyword_search_request` | a full keyword search |
//! | `part_detail_request` | a part lookup (either wire style) |
//! | `limited_taxonomy` | one taxon, recursively |
//! | `filter_option` | one filter option with its values |
//! | `filter_value` | one filter value |
//!
//! Built on first use and never torn down. Lookups accept the snake_case
//! name or its CamelCase form (`KeywordSearchRequest`).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::domain::requests::{
    filters_schema, keyword_search_request_schema, parametric_filter_schema,
    part_detail_request_schema, sort_schema,
};
use crate::key_case;
use crate::models::{filter_option_schema, filter_value_schema, limited_taxonomy_schema};
use crate::schema::{Schema, SchemaRef};
use crate::SchemaError;

static REGISTRY: LazyLock<BTreeMap<&'static str, SchemaRef>> = LazyLock::new(|| {
    let schemas: [SchemaRef; 8] = [
        parametric_filter_schema,
        filters_schema,
        sort_schema,
        keyword_search_request_schema,
        part_detail_request_schema,
        limited_taxonomy_schema,
        filter_option_schema,
        filter_value_schema,
    ];
    schemas
        .into_iter()
        .map(|schema| (schema().name(), schema))
        .collect()
});

/// Registered names, sorted.
pub fn list_schemas() -> Vec<&'static str> {
    REGISTRY.keys().copied().collect()
}

pub fn get_schema(name: &str) -> Result<&'static Schema, SchemaError> {
    REGISTRY
        .get(normalize(name).as_str())
        .map(|schema| schema())
        .ok_or_else(|| SchemaError::SchemaNotFound(name.trim().to_owned()))
}

pub fn has_schema(name: &str) -> bool {
    REGISTRY.contains_key(normalize(name).as_str())
}

fn normalize(name: &str) -> String {
    key_case::underscore(name.trim())
}
