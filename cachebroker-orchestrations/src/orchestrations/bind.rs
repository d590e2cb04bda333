//! Bind and unbind applications to a cache cluster

use crate::broker::CacheBroker;
use crate::error::{BrokerError, BrokerResult};
use cachebroker_models::{BindDetails, BindingResponse, Credentials, UnbindDetails};

impl CacheBroker {
    /// Hand out the cluster's endpoint; binding creates nothing on the backend
    pub async fn bind(
        &self,
        instance_id: &str,
        binding_id: &str,
        details: &BindDetails,
    ) -> BrokerResult<BindingResponse> {
        tracing::debug!(
            instance_id = %instance_id,
            binding_id = %binding_id,
            details = ?details,
            "bind"
        );

        let service = self
            .catalog
            .find_service(&details.service_id)
            .ok_or_else(|| BrokerError::ServiceNotFound(details.service_id.clone()))?;

        if !service.bindable {
            return Err(BrokerError::InstanceNotBindable);
        }

        let cache_cluster_id = self.cache_cluster_id(instance_id);
        let cluster = self
            .backend
            .describe(&cache_cluster_id)
            .await
            .map_err(BrokerError::for_existing_instance)?;

        Ok(BindingResponse {
            credentials: Credentials {
                host: cluster.endpoint,
                port: cluster.port,
                name: cache_cluster_id,
            },
        })
    }

    /// Nothing was created by bind, so there is nothing to remove
    pub async fn unbind(
        &self,
        instance_id: &str,
        binding_id: &str,
        details: &UnbindDetails,
    ) -> BrokerResult<()> {
        tracing::debug!(
            instance_id = %instance_id,
            binding_id = %binding_id,
            details = ?details,
            "unbind"
        );

        Ok(())
    }
}
