use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{SearchOption, SortDirection, SortOption};
use crate::key_case;
use crate::schema::{ErrorReport, Field, FieldType, Schema, Violation};
use crate::{CoreError, ValidationError};

static PARAMETRIC_FILTER: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("parametric_filter")
        .field(Field::integer("parameter_id").required())
        .field(Field::text("value_id").required().length(1, 100))
        .strict()
});

static FILTERS: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("filters")
        .field(Field::list("taxonomy_ids", FieldType::Integer))
        .field(Field::list("manufacturer_ids", FieldType::Integer))
        .field(Field::list(
            "parametric_filters",
            FieldType::Nested(parametric_filter_schema),
        ))
        .strict()
});

static SORT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("sort")
        .field(Field::choice("sort_option", &SortOption::NAMES).required())
        .field(Field::choice("direction", &SortDirection::NAMES).required())
        .field(Field::integer("sort_parameter_id"))
        .rule(
            "sort_parameter_id",
            &["sort_option", "sort_parameter_id"],
            sort_parameter_matches_option,
        )
        .strict()
});

static KEYWORD_SEARCH_REQUEST: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("keyword_search_request")
        .field(Field::text("keywords").required())
        .field(Field::list(
            "search_options",
            FieldType::Choice(&SearchOption::NAMES),
        ))
        .field(
            Field::integer("record_count")
                .required()
                .default(10)
                .range(1, 50),
        )
        .field(Field::integer("record_start_pos").default(0))
        .field(Field::nested("filters", filters_schema))
        .field(Field::nested("sort", sort_schema))
        .field(Field::integer("requested_quantity").default(1))
        .strict()
});

static PART_DETAIL_REQUEST: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("part_detail_request")
        .field(Field::text("part").required())
        .field(Field::boolean("include_all_associated_products"))
        .field(Field::boolean("include_all_for_use_with_products"))
        .field(Field::text("includes"))
        .strict()
});

pub fn parametric_filter_schema() -> &'static Schema {
    &PARAMETRIC_FILTER
}

pub fn filters_schema() -> &'static Schema {
    &FILTERS
}

pub fn sort_schema() -> &'static Schema {
    &SORT
}

pub fn keyword_search_request_schema() -> &'static Schema {
    &KEYWORD_SEARCH_REQUEST
}

pub fn part_detail_request_schema() -> &'static Schema {
    &PART_DETAIL_REQUEST
}

fn sort_parameter_matches_option(record: &Map<String, Value>) -> Result<(), String> {
    let by_parameter = record["sort_option"].as_str() == Some(SortOption::Parameter.as_str());
    let has_parameter = !record["sort_parameter_id"].is_null();

    match (by_parameter, has_parameter) {
        (true, false) => Err(String::from(
            "If sorting by parameter a sort parameter must be set",
        )),
        (false, true) => Err(String::from(
            "If not sorting by parameter no sort parameter id should be provided",
        )),
        _ => Ok(()),
    }
}

/// Validates a raw snake_case request against `schema` and returns its wire
/// form: defaults applied, absent optionals dropped, keys camelized.
pub fn encode(schema: &Schema, raw: &Value) -> Result<Value, CoreError> {
    let record = schema.conform(raw).map_err(CoreError::InvalidRequest)?;
    Ok(key_case::to_camel(&strip_nulls(Value::Object(record))))
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, inner)| !inner.is_null())
                .map(|(key, inner)| (key, strip_nulls(inner)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        scalar => scalar,
    }
}

/// Typed request value backed by one of the request schemas.
///
/// Typed and raw callers share the same validation path: the value is
/// serialized to its snake_case shape and run through [`Self::schema`].
pub trait RequestShape: Serialize {
    fn schema() -> &'static Schema;

    fn to_raw(&self) -> Result<Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }

    fn errors(&self) -> Option<ErrorReport> {
        match self.to_raw() {
            Ok(raw) => Self::schema().validate(&raw),
            Err(err) => Some(ErrorReport::root(Violation::conversion(err.to_string()))),
        }
    }

    fn is_valid(&self) -> bool {
        self.errors().is_none()
    }
}

/// One parametric filter: a parameter id and the value id to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParametricFilter {
    pub parameter_id: i64,
    pub value_id: String,
}

impl ParametricFilter {
    pub fn new(parameter_id: i64, value_id: impl Into<String>) -> Self {
        Self {
            parameter_id,
            value_id: value_id.into(),
        }
    }
}

impl RequestShape for ParametricFilter {
    fn schema() -> &'static Schema {
        parametric_filter_schema()
    }
}

/// Narrowing criteria for a keyword search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taxonomy_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manufacturer_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parametric_filters: Vec<ParametricFilter>,
}

impl Filters {
    pub fn with_taxonomy_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.taxonomy_ids.extend(ids);
        self
    }

    pub fn with_manufacturer_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.manufacturer_ids.extend(ids);
        self
    }

    pub fn with_parametric_filter(mut self, filter: ParametricFilter) -> Self {
        self.parametric_filters.push(filter);
        self
    }
}

impl RequestShape for Filters {
    fn schema() -> &'static Schema {
        filters_schema()
    }
}

/// Sort criterion. `sort_parameter_id` is set exactly when sorting by
/// parameter; the schema rejects any other combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub sort_option: SortOption,
    pub direction: SortDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_parameter_id: Option<i64>,
}

impl Sort {
    pub const fn new(sort_option: SortOption, direction: SortDirection) -> Self {
        Self {
            sort_option,
            direction,
            sort_parameter_id: None,
        }
    }

    pub const fn by_parameter(parameter_id: i64, direction: SortDirection) -> Self {
        Self {
            sort_option: SortOption::Parameter,
            direction,
            sort_parameter_id: Some(parameter_id),
        }
    }

    pub fn with_parameter_id(mut self, parameter_id: i64) -> Self {
        self.sort_parameter_id = Some(parameter_id);
        self
    }
}

impl RequestShape for Sort {
    fn schema() -> &'static Schema {
        sort_schema()
    }
}

/// Query sent to the keyword search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSearchRequest {
    pub keywords: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_options: Vec<SearchOption>,
    /// Maximum number of items to return (1..=50).
    pub record_count: i64,
    /// Ordinal position of the first returned item.
    pub record_start_pos: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    /// Quantity used when sorting by unit price.
    pub requested_quantity: i64,
}

impl KeywordSearchRequest {
    pub const DEFAULT_RECORD_COUNT: i64 = 10;

    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            search_options: Vec::new(),
            record_count: Self::DEFAULT_RECORD_COUNT,
            record_start_pos: 0,
            filters: None,
            sort: None,
            requested_quantity: 1,
        }
    }

    pub fn with_record_count(mut self, record_count: i64) -> Self {
        self.record_count = record_count;
        self
    }

    pub fn with_record_start_pos(mut self, record_start_pos: i64) -> Self {
        self.record_start_pos = record_start_pos;
        self
    }

    pub fn with_search_option(mut self, option: SearchOption) -> Self {
        self.search_options.push(option);
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_requested_quantity(mut self, requested_quantity: i64) -> Self {
        self.requested_quantity = requested_quantity;
        self
    }

    /// Validated wire form (`Keywords`, `RecordCount`, ...).
    pub fn to_wire(&self) -> Result<Value, CoreError> {
        encode(Self::schema(), &self.to_raw()?)
    }
}

impl RequestShape for KeywordSearchRequest {
    fn schema() -> &'static Schema {
        keyword_search_request_schema()
    }
}

/// Wire shape used for part-detail lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartDetailStyle {
    /// `Part`, `IncludeAllAssociatedProducts`, `IncludeAllForUseWithProducts`.
    #[default]
    Post,
    /// `Part`, `Includes`.
    Get,
}

impl PartDetailStyle {
    pub const ALL: [Self; 2] = [Self::Post, Self::Get];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Get => "get",
        }
    }

    const fn wire_fields(self) -> &'static [&'static str] {
        match self {
            Self::Post => &[
                "part",
                "include_all_associated_products",
                "include_all_for_use_with_products",
            ],
            Self::Get => &["part", "includes"],
        }
    }
}

impl Display for PartDetailStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartDetailStyle {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "post" => Ok(Self::Post),
            "get" => Ok(Self::Get),
            other => Err(ValidationError::UnknownVariant {
                kind: "part detail style",
                value: other.to_owned(),
                expected: String::from("post, get"),
            }),
        }
    }
}

/// Part-detail lookup. One logical request; [`Self::to_wire`] picks the
/// fields each transport style carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDetailRequest {
    /// Part number. Works best with Digi-Key part numbers.
    pub part: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_all_associated_products: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_all_for_use_with_products: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes: Option<String>,
}

impl PartDetailRequest {
    pub fn new(part: impl Into<String>) -> Self {
        Self {
            part: part.into(),
            ..Self::default()
        }
    }

    pub fn include_associated(mut self, include: bool) -> Self {
        self.include_all_associated_products = Some(include);
        self
    }

    pub fn include_for_use_with(mut self, include: bool) -> Self {
        self.include_all_for_use_with_products = Some(include);
        self
    }

    pub fn with_includes(mut self, includes: impl Into<String>) -> Self {
        self.includes = Some(includes.into());
        self
    }

    pub fn to_wire(&self, style: PartDetailStyle) -> Result<Value, CoreError> {
        encode_part_detail(&self.to_raw()?, style)
    }
}

impl RequestShape for PartDetailRequest {
    fn schema() -> &'static Schema {
        part_detail_request_schema()
    }
}

/// Validates a raw part-detail request and serializes it for `style`.
pub fn encode_part_detail(raw: &Value, style: PartDetailStyle) -> Result<Value, CoreError> {
    let mut record = part_detail_request_schema()
        .conform(raw)
        .map_err(CoreError::InvalidRequest)?;
    record.retain(|_, value| !value.is_null());

    let keep = style.wire_fields();
    let dropped = record
        .keys()
        .filter(|key| !keep.contains(&key.as_str()))
        .cloned()
        .collect::<Vec<_>>();
    if !dropped.is_empty() {
        debug!(style = %style, ?dropped, "part detail fields not carried by this style");
    }
    record.retain(|key, _| keep.contains(&key.as_str()));

    Ok(key_case::to_camel(&Value::Object(record)))
}
