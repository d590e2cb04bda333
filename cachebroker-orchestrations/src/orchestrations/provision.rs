//! Provision a cache cluster for a new service instance

use crate::broker::CacheBroker;
use crate::error::{BrokerError, BrokerResult};
use crate::spec_builder::{build_spec, TagAction, TagContext};
use crate::types::{decode_parameters, ProvisionParameters};
use cachebroker_models::{ProvisionDetails, ProvisioningResponse};

impl CacheBroker {
    /// Start creating the cluster and return immediately.
    ///
    /// Backend errors are returned as-is; a missing cluster cannot be
    /// reported here because nothing exists yet.
    pub async fn provision(
        &self,
        instance_id: &str,
        details: &ProvisionDetails,
        accepts_incomplete: bool,
    ) -> BrokerResult<ProvisioningResponse> {
        tracing::debug!(
            instance_id = %instance_id,
            details = ?details,
            accepts_incomplete,
            "provision"
        );

        if !accepts_incomplete {
            return Err(BrokerError::AsyncRequired);
        }

        let parameters: ProvisionParameters = if self.allow_user_provision_parameters {
            decode_parameters(details.parameters.as_ref())?
        } else {
            ProvisionParameters::default()
        };

        let plan = self
            .catalog
            .find_service_plan(&details.plan_id)
            .ok_or_else(|| BrokerError::PlanNotFound(details.plan_id.clone()))?;

        let context = TagContext {
            service_id: &details.service_id,
            plan_id: &details.plan_id,
            organization_id: &details.organization_guid,
            space_id: &details.space_guid,
        };
        let mut spec = build_spec(plan, TagAction::Created, context, self.clock.as_ref());
        parameters.overrides.apply_to(&mut spec);

        let cache_cluster_id = self.cache_cluster_id(instance_id);
        self.backend
            .create(&cache_cluster_id, &spec)
            .await
            .map_err(|e| {
                tracing::error!(cache_cluster_id = %cache_cluster_id, error = %e, "create-cache-cluster failed");
                BrokerError::Backend(e)
            })?;

        tracing::info!("Provisioning cache cluster '{}' for instance {}", cache_cluster_id, instance_id);

        Ok(ProvisioningResponse {
            dashboard_url: None,
            is_async: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::BackendError;
    use crate::error::BrokerError;
    use crate::memory::{BackendCall, BackendOperation};
    use crate::orchestrations::fixtures::{self, CLUSTER_ID, INSTANCE_ID};
    use cachebroker_models::ProvisionDetails;
    use serde_json::json;

    fn details(plan_id: &str) -> ProvisionDetails {
        ProvisionDetails {
            service_id: "svc-redis".to_string(),
            plan_id: plan_id.to_string(),
            organization_guid: "org-1".to_string(),
            space_guid: "space-1".to_string(),
            parameters: None,
        }
    }

    #[tokio::test]
    async fn test_provision_requires_async() {
        let (broker, backend) = fixtures::broker();

        let err = broker.provision(INSTANCE_ID, &details("redis-small"), false).await.unwrap_err();

        assert!(matches!(err, BrokerError::AsyncRequired));
        assert!(backend.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_provision_unknown_plan_names_it() {
        let (broker, backend) = fixtures::broker();

        let err = broker.provision(INSTANCE_ID, &details("p1"), true).await.unwrap_err();

        assert!(matches!(err, BrokerError::PlanNotFound(ref id) if id == "p1"));
        assert!(err.to_string().contains("'p1'"));
        assert!(backend.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_provision_creates_tagged_cluster() {
        let (broker, backend) = fixtures::broker();

        let response = broker.provision(INSTANCE_ID, &details("redis-small"), true).await.unwrap();
        assert!(response.is_async);

        let calls = backend.calls().await;
        assert_eq!(calls.len(), 1);
        let BackendCall::Create { id, spec } = &calls[0] else {
            panic!("expected create, got {:?}", calls[0]);
        };
        assert_eq!(id, CLUSTER_ID);
        assert_eq!(spec.engine, "redis");
        assert_eq!(spec.engine_version.as_deref(), Some("7.1"));
        assert_eq!(spec.cache_instance_class.as_deref(), Some("cache.t3.micro"));
        assert!(spec.port.is_none());
        assert_eq!(spec.tags["Owner"], "Cloud Foundry");
        assert_eq!(spec.tags["Created by"], "AWS ElastiCache Service Broker");
        assert_eq!(spec.tags["Created at"], "09 Mar 24 14:05 +0000");
        assert_eq!(spec.tags["Organization ID"], "org-1");
        assert_eq!(spec.tags["Space ID"], "space-1");

        assert_eq!(backend.cluster(CLUSTER_ID).await.unwrap().status, "creating");
    }

    #[tokio::test]
    async fn test_provision_applies_user_parameters_when_allowed() {
        let (broker, backend) = fixtures::broker();
        let mut details = details("redis-small");
        details.parameters = json!({ "snapshot_retention_limit": 5 }).as_object().cloned();

        broker.provision(INSTANCE_ID, &details, true).await.unwrap();

        let calls = backend.calls().await;
        let BackendCall::Create { spec, .. } = &calls[0] else {
            panic!("expected create");
        };
        assert_eq!(spec.snapshot_retention_limit, Some(5));
    }

    #[tokio::test]
    async fn test_provision_ignores_user_parameters_when_disallowed() {
        let mut config = fixtures::config();
        config.allow_user_provision_parameters = false;
        let (broker, backend) = fixtures::broker_with(config);
        let mut details = details("redis-small");
        details.parameters = json!({ "snapshot_retention_limit": "bogus" }).as_object().cloned();

        broker.provision(INSTANCE_ID, &details, true).await.unwrap();

        let calls = backend.calls().await;
        let BackendCall::Create { spec, .. } = &calls[0] else {
            panic!("expected create");
        };
        assert!(spec.snapshot_retention_limit.is_none());
    }

    #[tokio::test]
    async fn test_provision_rejects_undecodable_parameters() {
        let (broker, backend) = fixtures::broker();
        let mut details = details("redis-small");
        details.parameters = json!({ "auto_minor_version_upgrade": "yes" }).as_object().cloned();

        let err = broker.provision(INSTANCE_ID, &details, true).await.unwrap_err();

        assert!(matches!(err, BrokerError::InvalidParameters(_)));
        assert!(backend.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_provision_propagates_backend_error() {
        let (broker, backend) = fixtures::broker();
        backend
            .fail(BackendOperation::Create, BackendError::api("InsufficientCacheClusterCapacity", "No capacity"))
            .await;

        let err = broker.provision(INSTANCE_ID, &details("redis-small"), true).await.unwrap_err();

        assert_eq!(err.to_string(), "InsufficientCacheClusterCapacity: No capacity");
    }
}
