use std::fmt::{Display, Formatter};

use serde_json::{Map, Value};

use super::raw::{object_items, object_or_empty, opt_int, opt_text, text_or};
use super::value_objects::raw_wrapper;
use super::{IdTextPair, PidVid, PriceBreak};
use crate::config::DEFAULT_SITE_URL;

/// A product as returned by search or part-detail lookups.
///
/// Nothing is checked up front; each accessor reads one raw field and falls
/// back to its documented default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Part {
    raw: Map<String, Value>,
}

raw_wrapper!(Part, "part");

impl Part {
    /// Quantity price breaks; empty when absent.
    pub fn standard_pricing(&self) -> Vec<PriceBreak> {
        object_items(&self.raw, "StandardPricing")
            .into_iter()
            .map(PriceBreak::new)
            .collect()
    }

    pub fn category(&self) -> IdTextPair {
        IdTextPair::new(object_or_empty(&self.raw, "Category"))
    }

    pub fn family(&self) -> IdTextPair {
        IdTextPair::new(object_or_empty(&self.raw, "Family"))
    }

    /// Manufacturer display name; `""` when absent.
    pub fn manufacturer(&self) -> String {
        PidVid::new(object_or_empty(&self.raw, "Manufacturer")).value()
    }

    pub fn mpn(&self) -> Option<String> {
        opt_text(&self.raw, "ManufacturerPartNumber")
    }

    pub fn part_status(&self) -> Option<String> {
        opt_text(&self.raw, "PartStatus")
    }

    pub fn digikey_pn(&self) -> Option<String> {
        opt_text(&self.raw, "DigiKeyPartNumber")
    }

    /// Product page on the default site.
    pub fn digikey_url(&self) -> String {
        self.url_on(DEFAULT_SITE_URL)
    }

    /// Product page relative to `site_url`.
    pub fn url_on(&self, site_url: &str) -> String {
        format!("{site_url}{}", text_or(&self.raw, "PartUrl", ""))
    }

    pub fn in_stock(&self) -> Option<i64> {
        opt_int(&self.raw, "QuantityAvailable")
    }

    /// Minimum order quantity.
    pub fn moq(&self) -> Option<i64> {
        opt_int(&self.raw, "MinimumOrderQuantity")
    }

    /// `(name, value)` pairs in the order the service listed them. A repeated
    /// name keeps its first position and its last value.
    pub fn parameters(&self) -> Vec<(String, String)> {
        let mut parameters: Vec<(String, String)> = Vec::new();
        for pair in object_items(&self.raw, "Parameters").into_iter().map(PidVid::new) {
            let (name, value) = (pair.parameter(), pair.value());
            match parameters.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = value,
                None => parameters.push((name, value)),
            }
        }
        parameters
    }

    /// Value of the named parameter, if listed.
    pub fn parameter(&self, name: &str) -> Option<String> {
        self.parameters()
            .into_iter()
            .find_map(|(existing, value)| (existing == name).then_some(value))
    }

    pub fn description_product(&self) -> Option<String> {
        opt_text(&self.raw, "ProductDescription")
    }

    pub fn description_detailed(&self) -> Option<String> {
        opt_text(&self.raw, "DetailedDescription")
    }

    pub fn datasheet(&self) -> Option<String> {
        opt_text(&self.raw, "PrimaryDatasheet")
    }
}

impl Display for Part {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.mpn() {
            Some(mpn) => write!(f, "<Part mpn={mpn}>"),
            None => f.write_str("<Part mpn=None>"),
        }
    }
}
