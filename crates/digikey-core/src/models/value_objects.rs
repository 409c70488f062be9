use std::fmt::{Display, Formatter};

use serde_json::{Map, Value};

use super::raw::{float_or, int_or, text_or};

/// Shared plumbing for the unvalidated read-only wrappers: each one owns its
/// backing mapping and can only be built from a JSON object.
macro_rules! raw_wrapper {
    ($ty:ident, $context:literal) => {
        impl $ty {
            pub fn new(raw: Map<String, Value>) -> Self {
                Self { raw }
            }

            /// The backing mapping, exactly as received.
            pub fn raw(&self) -> &Map<String, Value> {
                &self.raw
            }

            pub fn into_raw(self) -> Map<String, Value> {
                self.raw
            }
        }

        impl TryFrom<Value> for $ty {
            type Error = crate::SchemaError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::Object(raw) => Ok(Self::new(raw)),
                    other => Err(crate::SchemaError::NotAMapping {
                        context: $context,
                        found: crate::error::json_type_name(&other),
                    }),
                }
            }
        }

        impl From<Map<String, Value>> for $ty {
            fn from(raw: Map<String, Value>) -> Self {
                Self::new(raw)
            }
        }
    };
}

pub(crate) use raw_wrapper;

/// One quantity break of a part's standard pricing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceBreak {
    raw: Map<String, Value>,
}

raw_wrapper!(PriceBreak, "price break");

impl PriceBreak {
    pub fn break_quantity(&self) -> i64 {
        int_or(&self.raw, "BreakQuantity", 0)
    }

    pub fn unit_price(&self) -> f64 {
        float_or(&self.raw, "UnitPrice", 0.0)
    }

    pub fn total_price(&self) -> f64 {
        float_or(&self.raw, "TotalPrice", 0.0)
    }
}

/// `{Id, Text}` pair used for categories and families.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdTextPair {
    raw: Map<String, Value>,
}

raw_wrapper!(IdTextPair, "id/text pair");

impl IdTextPair {
    pub fn id(&self) -> String {
        text_or(&self.raw, "Id", "")
    }

    pub fn text(&self) -> String {
        text_or(&self.raw, "Text", "")
    }
}

/// Parameter-id/value-id pair with display names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PidVid {
    raw: Map<String, Value>,
}

raw_wrapper!(PidVid, "parameter/value pair");

impl PidVid {
    pub fn parameter_id(&self) -> i64 {
        int_or(&self.raw, "ParameterId", 0)
    }

    /// Value id as text, like every other `ValueId` on the wire; `""` when absent.
    pub fn value_id(&self) -> String {
        text_or(&self.raw, "ValueId", "")
    }

    pub fn parameter(&self) -> String {
        text_or(&self.raw, "Parameter", "")
    }

    pub fn value(&self) -> String {
        text_or(&self.raw, "Value", "")
    }
}

impl Display for PidVid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<PidVid param={} val={}>", self.parameter(), self.value())
    }
}

/// Product family summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Family {
    raw: Map<String, Value>,
}

raw_wrapper!(Family, "family");

impl Family {
    pub fn id(&self) -> String {
        text_or(&self.raw, "Id", "")
    }

    pub fn name(&self) -> String {
        text_or(&self.raw, "Name", "")
    }

    pub fn part_count(&self) -> i64 {
        int_or(&self.raw, "PartCount", 0)
    }
}
