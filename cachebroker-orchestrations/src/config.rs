use crate::names::MAX_CACHE_PREFIX_LEN;
use cachebroker_models::{Catalog, CatalogError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Must provide a non-empty Region")]
    EmptyRegion,

    #[error("Must provide a non-empty CachePrefix")]
    EmptyCachePrefix,

    #[error("CachePrefix '{0}' is longer than {} characters", MAX_CACHE_PREFIX_LEN)]
    CachePrefixTooLong(String),

    #[error("Validating Catalog configuration: {0}")]
    Catalog(#[source] CatalogError),
}

/// Broker settings: naming, user parameter policy and the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BrokerConfig {
    pub region: String,
    pub cache_prefix: String,
    #[serde(default)]
    pub allow_user_provision_parameters: bool,
    #[serde(default)]
    pub allow_user_update_parameters: bool,
    #[serde(default)]
    pub catalog: Catalog,
}

impl BrokerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.is_empty() {
            return Err(ConfigError::EmptyRegion);
        }
        if self.cache_prefix.is_empty() {
            return Err(ConfigError::EmptyCachePrefix);
        }
        if self.cache_prefix.chars().count() > MAX_CACHE_PREFIX_LEN {
            return Err(ConfigError::CachePrefixTooLong(self.cache_prefix.clone()));
        }
        self.catalog.validate().map_err(ConfigError::Catalog)
    }
}
