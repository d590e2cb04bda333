//! Report the state of the last lifecycle operation on an instance

use crate::broker::CacheBroker;
use crate::error::{BrokerError, BrokerResult};
use crate::status::classify;
use cachebroker_models::LastOperationResponse;

impl CacheBroker {
    /// Describe the cluster and classify its current status.
    ///
    /// The state is always recomputed from the backend; nothing is remembered
    /// from the operation that was started.
    pub async fn last_operation(&self, instance_id: &str) -> BrokerResult<LastOperationResponse> {
        tracing::debug!(instance_id = %instance_id, "last-operation");

        let cache_cluster_id = self.cache_cluster_id(instance_id);
        let cluster = self
            .backend
            .describe(&cache_cluster_id)
            .await
            .map_err(BrokerError::for_existing_instance)?;

        let state = classify(&cluster.status);
        tracing::debug!(
            cache_cluster_id = %cache_cluster_id,
            status = %cluster.status,
            state = %state,
            "last-operation classified"
        );

        Ok(LastOperationResponse {
            state,
            description: format!(
                "Cache Cluster Instance '{}' status is '{}'",
                cache_cluster_id, cluster.status
            ),
        })
    }
}
