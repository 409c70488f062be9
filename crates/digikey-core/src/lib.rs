//! Core contracts for the Digi-Key catalog client.
//!
//! This crate contains:
//! - A declarative schema engine with structured error reports
//! - Request schemas, typed request builders, and their wire encoding
//! - The response object graph (taxonomy tree, filter options, parts)
//! - Key-casing between snake_case and the service's CamelCase
//! - The transport seam and a stateless client pipeline over it

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod key_case;
pub mod models;
pub mod registry;
pub mod schema;
pub mod transport;

pub use client::CatalogClient;
pub use config::{CatalogConfig, ConfigError, DEFAULT_SITE_URL};
pub use domain::{
    encode, encode_part_detail, Filters, KeywordSearchRequest, ParametricFilter,
    PartDetailRequest, PartDetailStyle, RequestShape, SearchOption, Sort, SortDirection,
    SortOption,
};
pub use error::{CoreError, SchemaError, ValidationError};
pub use models::{
    Family, FilterOption, FilterValue, IdTextPair, KeywordSearchResult, LimitedTaxonomy, Part,
    PidVid, PriceBreak,
};
pub use registry::{get_schema, has_schema, list_schemas};
pub use schema::{ErrorReport, Schema, Violation, ViolationKind};
pub use transport::{Endpoint, Transport, TransportError};
