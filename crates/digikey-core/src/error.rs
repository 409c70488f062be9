use thiserror::Error;

use crate::config::ConfigError;
use crate::schema::ErrorReport;
use crate::transport::TransportError;

/// Parse errors for the typed option enums.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid {kind} '{value}', expected one of {expected}")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

/// Misuse of the schema or wrapper APIs.
///
/// Bad *data* never produces one of these; it is reported through an
/// [`ErrorReport`]. These only fire when the caller hands a helper a value of
/// the wrong overall shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("expected a JSON object for '{context}', found {found}")]
    NotAMapping {
        context: &'static str,
        found: &'static str,
    },
    #[error("expected a JSON array for '{context}', found {found}")]
    NotASequence {
        context: &'static str,
        found: &'static str,
    },
    #[error("schema not found: {0}")]
    SchemaNotFound(String),
}

/// Top-level error type for the request/response pipeline.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("request rejected: {0}")]
    InvalidRequest(ErrorReport),

    #[error("response branch '{branch}' is malformed: {report}")]
    InvalidResponse {
        branch: &'static str,
        report: ErrorReport,
    },

    #[error("response is missing the '{0}' branch")]
    MissingBranch(&'static str),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// The validation report behind this error, if there is one.
    pub fn report(&self) -> Option<&ErrorReport> {
        match self {
            Self::InvalidRequest(report) | Self::InvalidResponse { report, .. } => Some(report),
            _ => None,
        }
    }
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
