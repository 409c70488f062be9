use std::fmt::{Display, Formatter, Write as _};

use serde_json::{Map, Value};
use tracing::debug;

use super::raw::{int_or, object_items};
use super::{FilterOption, LimitedTaxonomy, Part};
use crate::error::json_type_name;
use crate::{CoreError, SchemaError};

/// A keyword search response.
///
/// The taxonomy tree and the filter options are built and validated once, at
/// construction. Products stay raw and are wrapped on every call to
/// [`KeywordSearchResult::products`].
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordSearchResult {
    raw: Map<String, Value>,
    taxonomy: LimitedTaxonomy,
    filter_options: Vec<FilterOption>,
}

impl KeywordSearchResult {
    pub fn new(raw: Value) -> Result<Self, CoreError> {
        let raw = match raw {
            Value::Object(raw) => raw,
            other => {
                return Err(SchemaError::NotAMapping {
                    context: "keyword search result",
                    found: json_type_name(&other),
                }
                .into())
            }
        };

        let taxonomy = raw
            .get("LimitedTaxonomy")
            .ok_or(CoreError::MissingBranch("LimitedTaxonomy"))
            .and_then(LimitedTaxonomy::from_wire)?;
        let filter_options = raw
            .get("FilterOptions")
            .ok_or(CoreError::MissingBranch("FilterOptions"))
            .and_then(FilterOption::list_from_wire)?;

        debug!(
            taxonomy_depth = taxonomy.depth(),
            filter_options = filter_options.len(),
            "built keyword search result"
        );

        Ok(Self {
            raw,
            taxonomy,
            filter_options,
        })
    }

    pub fn taxonomy(&self) -> &LimitedTaxonomy {
        &self.taxonomy
    }

    pub fn filter_options(&self) -> &[FilterOption] {
        &self.filter_options
    }

    /// Parts wrapped from the raw `Products` list; empty when absent.
    pub fn products(&self) -> Vec<Part> {
        object_items(&self.raw, "Products")
            .into_iter()
            .map(Part::new)
            .collect()
    }

    /// Total number of matches reported by the service, not the page size.
    pub fn hits(&self) -> i64 {
        int_or(&self.raw, "ProductsCount", 0)
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// The result line, optionally followed by one tab-indented line per part.
    pub fn summary(&self, include_products: bool) -> String {
        let mut out = self.to_string();
        if include_products {
            for part in self.products() {
                let _ = write!(out, "\n\t{part}");
            }
        }
        out
    }
}

impl TryFrom<Value> for KeywordSearchResult {
    type Error = CoreError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl Display for KeywordSearchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<KeywordSearchResult: hits={}>", self.hits())
    }
}
