//! Delete the cache cluster behind a service instance

use crate::broker::CacheBroker;
use crate::error::{BrokerError, BrokerResult};
use cachebroker_models::{AcceptedResponse, DeprovisionDetails};

impl CacheBroker {
    pub async fn deprovision(
        &self,
        instance_id: &str,
        details: &DeprovisionDetails,
        accepts_incomplete: bool,
    ) -> BrokerResult<AcceptedResponse> {
        tracing::debug!(
            instance_id = %instance_id,
            details = ?details,
            accepts_incomplete,
            "deprovision"
        );

        if !accepts_incomplete {
            return Err(BrokerError::AsyncRequired);
        }

        let cache_cluster_id = self.cache_cluster_id(instance_id);
        self.backend
            .delete(&cache_cluster_id)
            .await
            .map_err(|e| {
                tracing::error!(cache_cluster_id = %cache_cluster_id, error = %e, "delete-cache-cluster failed");
                BrokerError::for_existing_instance(e)
            })?;

        tracing::info!("Deleting cache cluster '{}'", cache_cluster_id);

        Ok(AcceptedResponse { is_async: true })
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::BackendError;
    use crate::error::BrokerError;
    use crate::memory::{BackendCall, BackendOperation};
    use crate::orchestrations::fixtures::{self, CLUSTER_ID, INSTANCE_ID};
    use cachebroker_models::{ClusterDetails, DeprovisionDetails};

    #[tokio::test]
    async fn test_deprovision_requires_async() {
        let (broker, backend) = fixtures::broker();

        let err = broker
            .deprovision(INSTANCE_ID, &DeprovisionDetails::default(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, BrokerError::AsyncRequired));
        assert!(backend.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_deprovision_missing_cluster_does_not_exist() {
        let (broker, _backend) = fixtures::broker();

        let err = broker
            .deprovision(INSTANCE_ID, &DeprovisionDetails::default(), true)
            .await
            .unwrap_err();

        assert!(matches!(err, BrokerError::InstanceDoesNotExist));
        assert_eq!(err.to_string(), "instance does not exist");
    }

    #[tokio::test]
    async fn test_deprovision_deletes_cluster() {
        let (broker, backend) = fixtures::broker();
        backend
            .insert(ClusterDetails {
                cache_cluster_id: CLUSTER_ID.to_string(),
                status: "available".to_string(),
                engine: "redis".to_string(),
                ..Default::default()
            })
            .await;

        let response = broker
            .deprovision(INSTANCE_ID, &DeprovisionDetails::default(), true)
            .await
            .unwrap();

        assert!(response.is_async);
        assert_eq!(backend.calls().await, vec![BackendCall::Delete(CLUSTER_ID.to_string())]);
        assert_eq!(backend.cluster(CLUSTER_ID).await.unwrap().status, "deleting");
    }

    #[tokio::test]
    async fn test_deprovision_propagates_backend_error() {
        let (broker, backend) = fixtures::broker();
        backend
            .fail(BackendOperation::Delete, BackendError::api("InvalidCacheClusterState", "Snapshotting"))
            .await;

        let err = broker
            .deprovision(INSTANCE_ID, &DeprovisionDetails::default(), true)
            .await
            .unwrap_err();

        assert!(matches!(err, BrokerError::Backend(_)));
    }
}
