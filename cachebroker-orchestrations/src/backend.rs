//! Capabilities the broker needs from the cache cluster service

use async_trait::async_trait;
use cachebroker_models::{ClusterDetails, ClusterSpec};
use std::collections::BTreeMap;
use thiserror::Error;

/// Failure reported by a backend call
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("elasticache cluster does not exist")]
    NotFound,

    /// Any other backend failure, carried with the backend's own code and message
    #[error("{code}: {message}")]
    Api { code: String, message: String },
}

impl BackendError {
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        BackendError::Api {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Classify a failed backend response; HTTP 404 means the cluster is gone.
    ///
    /// Entry point for adapters over a real cache cluster API: they hand the
    /// HTTP status and the service's error code and message here so the broker
    /// sees `NotFound` the same way it does from [`crate::InMemoryBackend`].
    pub fn from_response(status_code: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        if status_code == 404 {
            BackendError::NotFound
        } else {
            BackendError::api(code, message)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound)
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Lifecycle calls against the managed cache cluster service.
///
/// Implementations must not retry on their own behalf beyond what the
/// underlying client does; the broker surfaces every error as-is.
#[async_trait]
pub trait CacheClusterBackend: Send + Sync {
    async fn describe(&self, cache_cluster_id: &str) -> BackendResult<ClusterDetails>;

    async fn create(&self, cache_cluster_id: &str, spec: &ClusterSpec) -> BackendResult<()>;

    async fn modify(
        &self,
        cache_cluster_id: &str,
        spec: &ClusterSpec,
        apply_immediately: bool,
    ) -> BackendResult<()>;

    async fn delete(&self, cache_cluster_id: &str) -> BackendResult<()>;
}

/// Account lookup and tag attachment, used after a successful modify
#[async_trait]
pub trait ResourceTagger: Send + Sync {
    /// Account that owns the clusters, needed to build resource names
    async fn account_id(&self) -> BackendResult<String>;

    async fn add_tags(&self, resource_name: &str, tags: &BTreeMap<String, String>) -> BackendResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_maps_404_to_not_found() {
        let err = BackendError::from_response(404, "CacheClusterNotFound", "gone");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_response_keeps_code_and_message() {
        let err = BackendError::from_response(400, "InvalidParameterValue", "bad node type");
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "InvalidParameterValue: bad node type");
    }
}
