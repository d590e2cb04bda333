//! The cache cluster broker

use crate::backend::{CacheClusterBackend, ResourceTagger};
use crate::clock::{Clock, SystemClock};
use crate::config::BrokerConfig;
use crate::names;
use cachebroker_models::Catalog;
use std::sync::Arc;

/// Stateless broker translating service instance lifecycle calls into
/// cache cluster calls.
///
/// Nothing about an instance is kept between calls: the cluster itself is
/// the only record, found again through [`CacheBroker::cache_cluster_id`].
/// Concurrent mutations of one instance are not serialized here; the
/// backend is expected to reject or order them.
pub struct CacheBroker {
    pub(crate) region: String,
    pub(crate) cache_prefix: String,
    pub(crate) allow_user_provision_parameters: bool,
    pub(crate) allow_user_update_parameters: bool,
    pub(crate) catalog: Catalog,
    pub(crate) backend: Arc<dyn CacheClusterBackend>,
    pub(crate) tagger: Arc<dyn ResourceTagger>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl CacheBroker {
    pub fn new(
        config: BrokerConfig,
        backend: Arc<dyn CacheClusterBackend>,
        tagger: Arc<dyn ResourceTagger>,
    ) -> Self {
        Self {
            region: config.region,
            cache_prefix: config.cache_prefix,
            allow_user_provision_parameters: config.allow_user_provision_parameters,
            allow_user_update_parameters: config.allow_user_update_parameters,
            catalog: config.catalog,
            backend,
            tagger,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for tag timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Catalog advertised to the platform
    pub fn services(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cache_cluster_id(&self, instance_id: &str) -> String {
        names::cache_cluster_id(&self.cache_prefix, instance_id)
    }
}
