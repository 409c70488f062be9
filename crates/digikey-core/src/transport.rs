//! The seam to whatever actually talks to the catalog service.
//!
//! This crate never performs network I/O. A [`Transport`] receives an already
//! validated, wire-cased query and hands back the parsed JSON response.

use std::fmt::{Display, Formatter};

use serde_json::Value;

/// Catalog operations a transport must be able to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    KeywordSearch,
    PartDetails,
}

impl Endpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeywordSearch => "keyword_search",
            Self::PartDetails => "part_details",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a transport.
///
/// The client stamps the [`Endpoint`] it was calling onto every error that
/// passes through it, so callers can tell a failed search from a failed part
/// lookup without tracking the call themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    endpoint: Option<Endpoint>,
    message: String,
    retryable: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            endpoint: None,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn non_retryable(message: impl Into<String>) -> Self {
        Self {
            retryable: false,
            ..Self::new(message)
        }
    }

    /// Records the endpoint that failed. An endpoint already set by the
    /// transport is kept.
    #[must_use]
    pub fn at(mut self, endpoint: Endpoint) -> Self {
        self.endpoint.get_or_insert(endpoint);
        self
    }

    pub const fn endpoint(&self) -> Option<Endpoint> {
        self.endpoint
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether repeating the same call might succeed. Callers decide; the
    /// client never retries.
    pub const fn retryable(&self) -> bool {
        self.retryable
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.endpoint {
            Some(endpoint) => write!(f, "transport error on {endpoint}: {}", self.message),
            None => write!(f, "transport error: {}", self.message),
        }
    }
}

impl std::error::Error for TransportError {}

pub trait Transport {
    fn fetch(&self, endpoint: Endpoint, query: &Value) -> Result<Value, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, endpoint: Endpoint, query: &Value) -> Result<Value, TransportError> {
        (**self).fetch(endpoint, query)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn fetch(&self, endpoint: Endpoint, query: &Value) -> Result<Value, TransportError> {
        (**self).fetch(endpoint, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_retry_flags() {
        let transient = TransportError::new("connection reset");
        assert!(transient.retryable());
        assert_eq!(transient.to_string(), "transport error: connection reset");

        let fatal = TransportError::non_retryable("401 unauthorized");
        assert!(!fatal.retryable());
        assert_eq!(fatal.message(), "401 unauthorized");
        assert_eq!(fatal.endpoint(), None);
    }

    #[test]
    fn error_names_the_failed_endpoint() {
        let err = TransportError::new("timed out").at(Endpoint::PartDetails);
        assert_eq!(err.endpoint(), Some(Endpoint::PartDetails));
        assert!(err.retryable());
        assert_eq!(err.to_string(), "transport error on part_details: timed out");

        let kept = err.at(Endpoint::KeywordSearch);
        assert_eq!(kept.endpoint(), Some(Endpoint::PartDetails));
    }

    #[test]
    fn endpoint_names() {
        assert_eq!(Endpoint::KeywordSearch.to_string(), "keyword_search");
        assert_eq!(Endpoint::PartDetails.as_str(), "part_details");
    }
}
