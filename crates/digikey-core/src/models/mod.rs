//! Response object graph.
//!
//! Two families live here. Validated branches ([`LimitedTaxonomy`],
//! [`FilterOption`]) are checked against a schema when the search result is
//! built and then held as plain structs. Read-only wrappers ([`Part`] and its
//! parts) keep the raw mapping and default each field on access.

mod filter_option;
mod part;
pub mod raw;
mod search_result;
mod taxonomy;
mod value_objects;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub use filter_option::{filter_option_schema, filter_value_schema, FilterOption, FilterValue};
pub use part::Part;
pub use search_result::KeywordSearchResult;
pub use taxonomy::{limited_taxonomy_schema, LimitedTaxonomy, Walk};
pub use value_objects::{Family, IdTextPair, PidVid, PriceBreak};

use crate::schema::Schema;
use crate::CoreError;

/// Conforms a snake-cased branch and deserializes the coerced record.
fn conform_branch<T: DeserializeOwned>(
    schema: &Schema,
    branch: &'static str,
    snake: &Value,
) -> Result<T, CoreError> {
    let record = schema
        .conform(snake)
        .map_err(|report| CoreError::InvalidResponse { branch, report })?;
    Ok(serde_json::from_value(Value::Object(record))?)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
