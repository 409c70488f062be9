use serde_json::Value;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::domain::requests::{encode, keyword_search_request_schema};
use crate::domain::{encode_part_detail, KeywordSearchRequest, PartDetailRequest};
use crate::models::{KeywordSearchResult, Part};
use crate::transport::{Endpoint, Transport};
use crate::CoreError;

/// Validates requests, hands their wire form to a [`Transport`], and wraps the
/// responses.
///
/// Holds no state between calls. Invalid requests are rejected before the
/// transport is touched.
#[derive(Debug, Clone)]
pub struct CatalogClient<T> {
    transport: T,
    config: CatalogConfig,
}

impl<T: Transport> CatalogClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, CatalogConfig::default())
    }

    pub fn with_config(transport: T, config: CatalogConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn search(&self, request: &KeywordSearchRequest) -> Result<KeywordSearchResult, CoreError> {
        self.send_search(request.to_wire()?)
    }

    /// Same as [`CatalogClient::search`] for a snake_case request mapping.
    pub fn search_raw(&self, request: &Value) -> Result<KeywordSearchResult, CoreError> {
        self.send_search(encode(keyword_search_request_schema(), request)?)
    }

    pub fn part(&self, request: &PartDetailRequest) -> Result<Part, CoreError> {
        self.send_part(request.to_wire(self.config.part_detail_style)?)
    }

    pub fn part_raw(&self, request: &Value) -> Result<Part, CoreError> {
        self.send_part(encode_part_detail(
            request,
            self.config.part_detail_style,
        )?)
    }

    /// Product page for `part` on the configured site.
    pub fn product_url(&self, part: &Part) -> String {
        part.url_on(&self.config.site_url)
    }

    fn send_search(&self, query: Value) -> Result<KeywordSearchResult, CoreError> {
        debug!(endpoint = %Endpoint::KeywordSearch, "sending keyword search");
        let response = self
            .transport
            .fetch(Endpoint::KeywordSearch, &query)
            .map_err(|err| err.at(Endpoint::KeywordSearch))?;
        KeywordSearchResult::new(response)
    }

    fn send_part(&self, query: Value) -> Result<Part, CoreError> {
        debug!(
            endpoint = %Endpoint::PartDetails,
            style = %self.config.part_detail_style,
            "sending part detail lookup"
        );
        let response = self
            .transport
            .fetch(Endpoint::PartDetails, &query)
            .map_err(|err| err.at(Endpoint::PartDetails))?;
        Ok(Part::try_from(response)?)
    }
}
