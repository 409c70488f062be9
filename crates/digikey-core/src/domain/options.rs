use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Column a keyword search can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOption {
    #[serde(rename = "SortByDigiKeyPartNumber")]
    DigiKeyPartNumber,
    #[serde(rename = "SortByManufacturerPartNumber")]
    ManufacturerPartNumber,
    #[serde(rename = "SortByDescription")]
    Description,
    #[serde(rename = "SortByManufacturer")]
    Manufacturer,
    #[serde(rename = "SortByMinimumOrderQuantity")]
    MinimumOrderQuantity,
    #[serde(rename = "SortByQuantityAvailable")]
    QuantityAvailable,
    #[serde(rename = "SortByUnitPrice")]
    UnitPrice,
    /// Requires a `sort_parameter_id`.
    #[serde(rename = "SortByParameter")]
    Parameter,
}

impl SortOption {
    pub const ALL: [Self; 8] = [
        Self::DigiKeyPartNumber,
        Self::ManufacturerPartNumber,
        Self::Description,
        Self::Manufacturer,
        Self::MinimumOrderQuantity,
        Self::QuantityAvailable,
        Self::UnitPrice,
        Self::Parameter,
    ];

    /// Wire names, in the same order as [`Self::ALL`].
    pub const NAMES: [&'static str; 8] = [
        "SortByDigiKeyPartNumber",
        "SortByManufacturerPartNumber",
        "SortByDescription",
        "SortByManufacturer",
        "SortByMinimumOrderQuantity",
        "SortByQuantityAvailable",
        "SortByUnitPrice",
        "SortByParameter",
    ];

    pub const fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub const ALL: [Self; 2] = [Self::Ascending, Self::Descending];

    pub const NAMES: [&'static str; 2] = ["Ascending", "Descending"];

    pub const fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

/// Result filters applied by the search endpoint itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchOption {
    LeadFree,
    CollapsePackagingTypes,
    ExcludeNonStock,
    Has3DModel,
    InStock,
    ManufacturerPartSearch,
    NewProductsOnly,
    RoHSCompliant,
    HasMentorFootprint,
}

impl SearchOption {
    pub const ALL: [Self; 9] = [
        Self::LeadFree,
        Self::CollapsePackagingTypes,
        Self::ExcludeNonStock,
        Self::Has3DModel,
        Self::InStock,
        Self::ManufacturerPartSearch,
        Self::NewProductsOnly,
        Self::RoHSCompliant,
        Self::HasMentorFootprint,
    ];

    pub const NAMES: [&'static str; 9] = [
        "LeadFree",
        "CollapsePackagingTypes",
        "ExcludeNonStock",
        "Has3DModel",
        "InStock",
        "ManufacturerPartSearch",
        "NewProductsOnly",
        "RoHSCompliant",
        "HasMentorFootprint",
    ];

    pub const fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

macro_rules! wire_enum_traits {
    ($ty:ty, $kind:literal) => {
        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let value = value.trim();
                Self::ALL
                    .into_iter()
                    .find(|candidate| candidate.as_str() == value)
                    .ok_or_else(|| ValidationError::UnknownVariant {
                        kind: $kind,
                        value: value.to_owned(),
                        expected: Self::NAMES.join(", "),
                    })
            }
        }
    };
}

wire_enum_traits!(SortOption, "sort option");
wire_enum_traits!(SortDirection, "sort direction");
wire_enum_traits!(SearchOption, "search option");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_line_up_with_variants() {
        for option in SortOption::ALL {
            let wire = serde_json::to_value(option).expect("must serialize");
            assert_eq!(wire, option.as_str());
        }
        for option in SearchOption::ALL {
            let wire = serde_json::to_value(option).expect("must serialize");
            assert_eq!(wire, option.as_str());
        }
        for direction in SortDirection::ALL {
            let wire = serde_json::to_value(direction).expect("must serialize");
            assert_eq!(wire, direction.as_str());
        }
    }

    #[test]
    fn parses_sort_option() {
        let option = SortOption::from_str("SortByParameter").expect("must parse");
        assert_eq!(option, SortOption::Parameter);
    }

    #[test]
    fn parsing_is_case_sensitive() {
        let err = SearchOption::from_str("instock").expect_err("must fail");
        assert!(matches!(err, ValidationError::UnknownVariant { .. }));
        assert_eq!(
            SearchOption::from_str("InStock").expect("must parse"),
            SearchOption::InStock
        );
    }
}
