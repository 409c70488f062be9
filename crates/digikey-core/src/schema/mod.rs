//! Declarative record schemas and the engine that interprets them.
//!
//! A [`Schema`] is an ordered list of [`Field`] descriptors plus optional
//! [`CrossFieldRule`]s. [`Schema::conform`] coerces a raw JSON object into a
//! record that satisfies every descriptor and every rule, or returns an
//! [`ErrorReport`] listing *all* failures. A cross-field rule runs once the
//! fields it reads have passed their own checks, and sees the coerced values.
//!
//! Nested schemas are referenced through a [`SchemaRef`] function pointer, so
//! a schema can point at itself (the taxonomy tree does) without any
//! define-then-patch step.

pub(crate) mod coerce;
mod report;

use serde_json::{Map, Value};
use tracing::debug;

pub use report::{ElementReport, ErrorReport, FieldErrors, Violation, ViolationKind, ROOT_KEY};

use crate::error::{json_type_name, SchemaError};

/// Lazily resolved reference to a schema; allows self-reference.
pub type SchemaRef = fn() -> &'static Schema;

/// Semantic type of a field.
#[derive(Debug, Clone)]
pub enum FieldType {
    Boolean,
    Integer,
    Text,
    /// Text restricted to a fixed, case-sensitive value set.
    Choice(&'static [&'static str]),
    Nested(SchemaRef),
    List(Box<FieldType>),
}

impl FieldType {
    pub fn list_of(inner: FieldType) -> Self {
        Self::List(Box::new(inner))
    }

    fn describe(&self) -> String {
        match self {
            Self::Boolean => String::from("boolean"),
            Self::Integer => String::from("integer"),
            Self::Text | Self::Choice(_) => String::from("text"),
            Self::Nested(schema) => format!("'{}' record", schema().name()),
            Self::List(inner) => format!("list of {}", inner.describe()),
        }
    }
}

/// One named, typed field of a schema.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    kind: FieldType,
    required: bool,
    default: Option<Value>,
    min_value: Option<i64>,
    max_value: Option<i64>,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl Field {
    pub fn new(name: &'static str, kind: FieldType) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
        }
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldType::Integer)
    }

    pub fn text(name: &'static str) -> Self {
        Self::new(name, FieldType::Text)
    }

    pub fn choice(name: &'static str, allowed: &'static [&'static str]) -> Self {
        Self::new(name, FieldType::Choice(allowed))
    }

    pub fn nested(name: &'static str, schema: SchemaRef) -> Self {
        Self::new(name, FieldType::Nested(schema))
    }

    pub fn list(name: &'static str, inner: FieldType) -> Self {
        Self::new(name, FieldType::list_of(inner))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value used when the key is absent. An explicit `null` is not absent.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> &FieldType {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    fn conform(&self, value: &Value) -> Result<Value, FieldErrors> {
        conform_value(&self.kind, value, self)
    }

    fn check_integer(&self, number: i64) -> Result<(), FieldErrors> {
        if let Some(min) = self.min_value.filter(|min| number < *min) {
            return Err(FieldErrors::single(Violation::constraint(format!(
                "Int value should be greater than or equal to {min}."
            ))));
        }
        if let Some(max) = self.max_value.filter(|max| number > *max) {
            return Err(FieldErrors::single(Violation::constraint(format!(
                "Int value should be less than or equal to {max}."
            ))));
        }
        Ok(())
    }

    fn check_text(&self, text: &str) -> Result<(), FieldErrors> {
        let length = text.chars().count();
        if self.min_length.is_some_and(|min| length < min) {
            return Err(FieldErrors::single(Violation::constraint(
                "String value is too short.",
            )));
        }
        if self.max_length.is_some_and(|max| length > max) {
            return Err(FieldErrors::single(Violation::constraint(
                "String value is too long.",
            )));
        }
        Ok(())
    }
}

/// Rule evaluated over the coerced record.
///
/// A rule runs only when every field it `reads` passed its own checks, so
/// `check` may index those fields directly.
#[derive(Debug, Clone, Copy)]
pub struct CrossFieldRule {
    /// Field the failure is reported against.
    pub field: &'static str,
    pub reads: &'static [&'static str],
    pub check: fn(&Map<String, Value>) -> Result<(), String>,
}

/// A named, ordered set of field descriptors.
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: Vec<Field>,
    rules: Vec<CrossFieldRule>,
    strict: bool,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            rules: Vec::new(),
            strict: false,
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn rule(
        mut self,
        field: &'static str,
        reads: &'static [&'static str],
        check: fn(&Map<String, Value>) -> Result<(), String>,
    ) -> Self {
        self.rules.push(CrossFieldRule {
            field,
            reads,
            check,
        });
        self
    }

    /// Reject keys the schema does not declare.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_named(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Coerces `raw` into a record holding every declared field (absent
    /// optional fields are `null`, absent defaulted fields take their default).
    pub fn conform(&self, raw: &Value) -> Result<Map<String, Value>, ErrorReport> {
        let Value::Object(input) = raw else {
            return Err(ErrorReport::root(Violation::conversion(format!(
                "Expected a mapping for '{}', found {}.",
                self.name,
                json_type_name(raw)
            ))));
        };

        let mut report = ErrorReport::new();
        let mut record = Map::new();

        if self.strict {
            for key in input.keys().filter(|key| self.field_named(key).is_none()) {
                report.push(key.clone(), Violation::conversion("Rogue field."));
            }
        }

        for field in &self.fields {
            match (input.get(field.name), &field.default) {
                (None, Some(default)) => {
                    record.insert(field.name.to_owned(), default.clone());
                }
                (None | Some(Value::Null), _) if field.required => {
                    report.push(field.name, Violation::missing());
                }
                (None | Some(Value::Null), _) => {
                    record.insert(field.name.to_owned(), Value::Null);
                }
                (Some(value), _) => match field.conform(value) {
                    Ok(coerced) => {
                        record.insert(field.name.to_owned(), coerced);
                    }
                    Err(errors) => report.insert(field.name, errors),
                },
            }
        }

        for rule in &self.rules {
            if rule.reads.iter().any(|field| !record.contains_key(*field)) {
                continue;
            }
            if let Err(message) = (rule.check)(&record) {
                report.push(rule.field, Violation::cross_field(message));
            }
        }

        if report.is_empty() {
            Ok(record)
        } else {
            debug!(schema = self.name, failing_fields = report.len(), "schema rejected value");
            Err(report)
        }
    }

    /// `None` when `raw` is fully valid, otherwise every violation found.
    pub fn validate(&self, raw: &Value) -> Option<ErrorReport> {
        self.conform(raw).err()
    }

    /// Validates each element of `raw`; `None` only if all of them pass.
    ///
    /// Reports are returned for failing elements only, tagged with their
    /// index. Errors only when `raw` is not an array at all.
    pub fn validate_list(&self, raw: &Value) -> Result<Option<Vec<ElementReport>>, SchemaError> {
        let Value::Array(items) = raw else {
            return Err(SchemaError::NotASequence {
                context: self.name,
                found: json_type_name(raw),
            });
        };

        let reports = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                self.validate(item)
                    .map(|report| ElementReport { index, report })
            })
            .collect::<Vec<_>>();

        Ok((!reports.is_empty()).then_some(reports))
    }

    pub fn is_valid(&self, raw: &Value) -> bool {
        self.validate(raw).is_none()
    }

    pub fn is_valid_list(&self, raw: &Value) -> Result<bool, SchemaError> {
        Ok(self.validate_list(raw)?.is_none())
    }
}

fn conform_value(kind: &FieldType, value: &Value, field: &Field) -> Result<Value, FieldErrors> {
    let not_coercible = || {
        FieldErrors::single(Violation::conversion(format!(
            "Couldn't interpret {} as {}.",
            json_type_name(value),
            kind.describe()
        )))
    };

    match kind {
        FieldType::Boolean => coerce::to_boolean(value)
            .map(Value::Bool)
            .ok_or_else(not_coercible),
        FieldType::Integer => {
            let number = coerce::to_integer(value).ok_or_else(not_coercible)?;
            field.check_integer(number)?;
            Ok(Value::from(number))
        }
        FieldType::Text => {
            let text = coerce::to_text(value).ok_or_else(not_coercible)?;
            field.check_text(&text)?;
            Ok(Value::String(text))
        }
        FieldType::Choice(allowed) => {
            let text = coerce::to_text(value).ok_or_else(not_coercible)?;
            if !allowed.contains(&text.as_str()) {
                return Err(FieldErrors::single(Violation::constraint(format!(
                    "Value must be one of {}.",
                    allowed.join(", ")
                ))));
            }
            field.check_text(&text)?;
            Ok(Value::String(text))
        }
        FieldType::Nested(schema) => {
            if !value.is_object() {
                return Err(not_coercible());
            }
            schema()
                .conform(value)
                .map(Value::Object)
                .map_err(FieldErrors::Nested)
        }
        FieldType::List(inner) => {
            let Value::Array(items) = value else {
                return Err(not_coercible());
            };

            let mut converted = Vec::with_capacity(items.len());
            let mut failures = std::collections::BTreeMap::new();
            for (index, item) in items.iter().enumerate() {
                let outcome = if item.is_null() {
                    Err(FieldErrors::single(Violation::conversion(
                        "Null is not a valid list element.",
                    )))
                } else {
                    conform_value(inner, item, field)
                };
                match outcome {
                    Ok(coerced) => converted.push(coerced),
                    Err(errors) => {
                        failures.insert(index, errors);
                    }
                }
            }

            if failures.is_empty() {
                Ok(Value::Array(converted))
            } else {
                Err(FieldErrors::Items(failures))
            }
        }
    }
}
