//! In-memory cache cluster backend
//!
//! Keeps clusters in a map and records every call. Used by tests and by the
//! `simulate` command; status changes only happen through [`InMemoryBackend::settle`]
//! or [`InMemoryBackend::set_status`], so callers drive convergence themselves.

use crate::backend::{BackendError, BackendResult, CacheClusterBackend, ResourceTagger};
use async_trait::async_trait;
use cachebroker_models::{ClusterDetails, ClusterSpec};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

const DEFAULT_ACCOUNT_ID: &str = "000000000000";

/// Backend call as seen by the in-memory backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Describe(String),
    Create { id: String, spec: ClusterSpec },
    Modify { id: String, spec: ClusterSpec, apply_immediately: bool },
    Delete(String),
    AccountId,
    AddTags { resource_name: String, tags: BTreeMap<String, String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOperation {
    Describe,
    Create,
    Modify,
    Delete,
    AccountId,
    AddTags,
}

#[derive(Debug, Default)]
struct MemoryState {
    clusters: BTreeMap<String, ClusterDetails>,
    resource_tags: BTreeMap<String, BTreeMap<String, String>>,
    calls: Vec<BackendCall>,
    failures: HashMap<BackendOperation, BackendError>,
}

impl MemoryState {
    fn record(&mut self, operation: BackendOperation, call: BackendCall) -> BackendResult<()> {
        self.calls.push(call);
        match self.failures.get(&operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Debug)]
pub struct InMemoryBackend {
    account_id: String,
    state: Mutex<MemoryState>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::with_account_id(DEFAULT_ACCOUNT_ID)
    }

    pub fn with_account_id(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Make every later call of `operation` fail with `err`
    pub async fn fail(&self, operation: BackendOperation, err: BackendError) {
        self.state.lock().await.failures.insert(operation, err);
    }

    pub async fn clear_failures(&self) {
        self.state.lock().await.failures.clear();
    }

    /// Seed a cluster directly, bypassing create
    pub async fn insert(&self, details: ClusterDetails) {
        self.state
            .lock()
            .await
            .clusters
            .insert(details.cache_cluster_id.clone(), details);
    }

    /// Force a cluster into `status`; returns false when it does not exist
    pub async fn set_status(&self, cache_cluster_id: &str, status: &str) -> bool {
        match self.state.lock().await.clusters.get_mut(cache_cluster_id) {
            Some(cluster) => {
                cluster.status = status.to_string();
                true
            }
            None => false,
        }
    }

    /// Finish pending work: creating and modifying clusters become
    /// available, deleting clusters disappear
    pub async fn settle(&self) {
        let mut state = self.state.lock().await;
        state.clusters.retain(|_, cluster| cluster.status != "deleting");
        for cluster in state.clusters.values_mut() {
            if cluster.status == "creating" || cluster.status == "modifying" {
                cluster.status = "available".to_string();
            }
        }
    }

    pub async fn cluster(&self, cache_cluster_id: &str) -> Option<ClusterDetails> {
        self.state.lock().await.clusters.get(cache_cluster_id).cloned()
    }

    pub async fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().await.calls.clone()
    }

    pub async fn resource_tags(&self, resource_name: &str) -> Option<BTreeMap<String, String>> {
        self.state.lock().await.resource_tags.get(resource_name).cloned()
    }
}

fn default_port(engine: &str) -> i64 {
    match engine {
        "memcached" => 11211,
        _ => 6379,
    }
}

#[async_trait]
impl CacheClusterBackend for InMemoryBackend {
    async fn describe(&self, cache_cluster_id: &str) -> BackendResult<ClusterDetails> {
        let mut state = self.state.lock().await;
        state.record(
            BackendOperation::Describe,
            BackendCall::Describe(cache_cluster_id.to_string()),
        )?;

        state
            .clusters
            .get(cache_cluster_id)
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    async fn create(&self, cache_cluster_id: &str, spec: &ClusterSpec) -> BackendResult<()> {
        let mut state = self.state.lock().await;
        state.record(
            BackendOperation::Create,
            BackendCall::Create {
                id: cache_cluster_id.to_string(),
                spec: spec.clone(),
            },
        )?;

        if state.clusters.contains_key(cache_cluster_id) {
            return Err(BackendError::api(
                "CacheClusterAlreadyExists",
                format!("Cache cluster {} already exists.", cache_cluster_id),
            ));
        }

        let cluster = ClusterDetails {
            cache_cluster_id: cache_cluster_id.to_string(),
            status: "creating".to_string(),
            endpoint: format!("{}.cache.internal", cache_cluster_id),
            port: spec.port.unwrap_or_else(|| default_port(&spec.engine)),
            engine: spec.engine.clone(),
            engine_version: spec.engine_version.clone().unwrap_or_default(),
            num_cache_nodes: spec.num_cache_nodes.unwrap_or(1),
        };
        state.clusters.insert(cache_cluster_id.to_string(), cluster);
        Ok(())
    }

    async fn modify(
        &self,
        cache_cluster_id: &str,
        spec: &ClusterSpec,
        apply_immediately: bool,
    ) -> BackendResult<()> {
        let mut state = self.state.lock().await;
        state.record(
            BackendOperation::Modify,
            BackendCall::Modify {
                id: cache_cluster_id.to_string(),
                spec: spec.clone(),
                apply_immediately,
            },
        )?;

        let cluster = state
            .clusters
            .get_mut(cache_cluster_id)
            .ok_or(BackendError::NotFound)?;

        if apply_immediately {
            if let Some(version) = &spec.engine_version {
                cluster.engine_version = version.clone();
            }
            if let Some(nodes) = spec.num_cache_nodes {
                cluster.num_cache_nodes = nodes;
            }
        }
        cluster.status = "modifying".to_string();
        Ok(())
    }

    async fn delete(&self, cache_cluster_id: &str) -> BackendResult<()> {
        let mut state = self.state.lock().await;
        state.record(
            BackendOperation::Delete,
            BackendCall::Delete(cache_cluster_id.to_string()),
        )?;

        let cluster = state
            .clusters
            .get_mut(cache_cluster_id)
            .ok_or(BackendError::NotFound)?;
        cluster.status = "deleting".to_string();
        Ok(())
    }
}

#[async_trait]
impl ResourceTagger for InMemoryBackend {
    async fn account_id(&self) -> BackendResult<String> {
        let mut state = self.state.lock().await;
        state.record(BackendOperation::AccountId, BackendCall::AccountId)?;
        Ok(self.account_id.clone())
    }

    async fn add_tags(&self, resource_name: &str, tags: &BTreeMap<String, String>) -> BackendResult<()> {
        let mut state = self.state.lock().await;
        state.record(
            BackendOperation::AddTags,
            BackendCall::AddTags {
                resource_name: resource_name.to_string(),
                tags: tags.clone(),
            },
        )?;

        state
            .resource_tags
            .entry(resource_name.to_string())
            .or_default()
            .extend(tags.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }
}
