use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Key used for failures that concern the whole value rather than one field.
pub const ROOT_KEY: &str = "$";

/// Failure taxonomy shared by every schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Required field absent or null.
    MissingRequired,
    /// Present and well-typed, but outside its range, length or allowed set.
    Constraint,
    /// Present but not coercible to the declared type.
    Conversion,
    /// Rejected by a rule spanning several fields.
    CrossField,
}

/// One human-readable validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing() -> Self {
        Self::new(ViolationKind::MissingRequired, "This field is required.")
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Constraint, message)
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Conversion, message)
    }

    pub fn cross_field(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::CrossField, message)
    }
}

/// Errors attached to a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldErrors {
    Messages(Vec<Violation>),
    /// The field holds a nested record.
    Nested(ErrorReport),
    /// The field holds a sequence; keyed by element index.
    Items(BTreeMap<usize, FieldErrors>),
}

impl FieldErrors {
    pub fn single(violation: Violation) -> Self {
        Self::Messages(vec![violation])
    }

    fn collect_into<'a>(&'a self, path: String, out: &mut Vec<(String, &'a Violation)>) {
        match self {
            Self::Messages(violations) => {
                out.extend(violations.iter().map(|violation| (path.clone(), violation)));
            }
            Self::Nested(report) => report.collect_into(Some(&path), out),
            Self::Items(items) => {
                for (index, errors) in items {
                    errors.collect_into(format!("{path}.{index}"), out);
                }
            }
        }
    }
}

/// Structured validation outcome: field (or rule) name to its errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorReport {
    entries: BTreeMap<String, FieldErrors>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(violation: Violation) -> Self {
        let mut report = Self::new();
        report.push(ROOT_KEY, violation);
        report
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields carrying at least one error.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldErrors> {
        self.entries.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn push(&mut self, field: impl Into<String>, violation: Violation) {
        let entry = self
            .entries
            .entry(field.into())
            .or_insert_with(|| FieldErrors::Messages(Vec::new()));
        match entry {
            FieldErrors::Messages(violations) => violations.push(violation),
            other => *other = FieldErrors::single(violation),
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, errors: FieldErrors) {
        self.entries.insert(field.into(), errors);
    }

    /// Every violation, flattened, with a dotted path such as
    /// `filters.parametric_filters.1.value_id`.
    pub fn violations(&self) -> Vec<(String, &Violation)> {
        let mut out = Vec::new();
        self.collect_into(None, &mut out);
        out
    }

    /// Whether the field at `path` carries a violation of `kind`.
    pub fn has(&self, path: &str, kind: ViolationKind) -> bool {
        self.violations()
            .iter()
            .any(|(at, violation)| at == path && violation.kind == kind)
    }

    pub fn into_option(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }

    fn collect_into<'a>(&'a self, prefix: Option<&str>, out: &mut Vec<(String, &'a Violation)>) {
        for (field, errors) in &self.entries {
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{field}"),
                None => field.clone(),
            };
            errors.collect_into(path, out);
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .violations()
            .into_iter()
            .map(|(path, violation)| format!("{path}: {}", violation.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&rendered)
    }
}

/// Errors for one element of a validated sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementReport {
    pub index: usize,
    pub report: ErrorReport,
}
