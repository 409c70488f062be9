use std::env;

use thiserror::Error;

use crate::domain::PartDetailStyle;
use crate::error::ValidationError;

/// Site that relative product URLs are resolved against by default.
pub const DEFAULT_SITE_URL: &str = "https://www.digikey.com";

pub const SITE_URL_VAR: &str = "DIGIKEY_SITE_URL";
pub const PART_DETAIL_STYLE_VAR: &str = "DIGIKEY_PART_DETAIL_STYLE";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    InvalidValue {
        var: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub site_url: String,
    pub part_detail_style: PartDetailStyle,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            site_url: String::from(DEFAULT_SITE_URL),
            part_detail_style: PartDetailStyle::default(),
        }
    }
}

impl CatalogConfig {
    /// Reads `DIGIKEY_SITE_URL` and `DIGIKEY_PART_DETAIL_STYLE`; unset
    /// variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`CatalogConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(site_url) = lookup(SITE_URL_VAR) {
            let site_url = site_url.trim().trim_end_matches('/');
            if site_url.is_empty() {
                return Err(ConfigError::Empty { var: SITE_URL_VAR });
            }
            config.site_url = site_url.to_owned();
        }

        if let Some(style) = lookup(PART_DETAIL_STYLE_VAR) {
            config.part_detail_style =
                style
                    .parse()
                    .map_err(|source| ConfigError::InvalidValue {
                        var: PART_DETAIL_STYLE_VAR,
                        source,
                    })?;
        }

        Ok(config)
    }
}
