use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{conform_branch, null_as_empty};
use crate::error::json_type_name;
use crate::key_case;
use crate::schema::{ErrorReport, Field, FieldErrors, FieldType, Schema};
use crate::{CoreError, SchemaError};

static FILTER_VALUE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("filter_value")
        .field(Field::text("value_id"))
        .field(Field::text("value"))
});

static FILTER_OPTION: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("filter_option")
        .field(Field::list("values", FieldType::Nested(filter_value_schema)))
        .field(Field::integer("parameter_id"))
        .field(Field::text("parameter"))
});

pub fn filter_value_schema() -> &'static Schema {
    &FILTER_VALUE
}

pub fn filter_option_schema() -> &'static Schema {
    &FILTER_OPTION
}

/// One selectable value of a [`FilterOption`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValue {
    pub value_id: Option<String>,
    pub value: Option<String>,
}

impl Display for FilterValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{} : {}}}",
            self.value_id.as_deref().unwrap_or_default(),
            self.value.as_deref().unwrap_or_default()
        )
    }
}

/// A parameter the result set can be narrowed by, with its values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub values: Vec<FilterValue>,
    pub parameter_id: Option<i64>,
    pub parameter: Option<String>,
}

impl FilterOption {
    /// Builds every option of the wire-cased `FilterOptions` branch.
    ///
    /// All malformed elements are reported together, keyed by index.
    pub fn list_from_wire(raw: &Value) -> Result<Vec<Self>, CoreError> {
        let Value::Array(items) = raw else {
            return Err(SchemaError::NotASequence {
                context: "FilterOptions",
                found: json_type_name(raw),
            }
            .into());
        };

        let mut options = Vec::with_capacity(items.len());
        let mut report = ErrorReport::new();
        for (index, item) in items.iter().enumerate() {
            let snake = key_case::to_snake(item);
            match conform_branch(filter_option_schema(), "FilterOptions", &snake) {
                Ok(option) => options.push(option),
                Err(CoreError::InvalidResponse { report: item_report, .. }) => {
                    report.insert(index.to_string(), FieldErrors::Nested(item_report));
                }
                Err(other) => return Err(other),
            }
        }

        match report.into_option() {
            None => Ok(options),
            Some(report) => Err(CoreError::InvalidResponse {
                branch: "FilterOptions",
                report,
            }),
        }
    }
}

impl Display for FilterOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = self
            .parameter_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        write!(f, "{{{id} : {}}}", self.parameter.as_deref().unwrap_or_default())
    }
}
