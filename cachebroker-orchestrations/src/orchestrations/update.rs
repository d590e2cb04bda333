//! Update the cache cluster behind a service instance

use crate::broker::CacheBroker;
use crate::error::{BrokerError, BrokerResult};
use crate::spec_builder::{build_spec, TagAction, TagContext};
use crate::tagging::tag_cache_cluster;
use crate::types::{decode_parameters, UpdateParameters};
use cachebroker_models::{AcceptedResponse, UpdateDetails};

impl CacheBroker {
    /// Modify the cluster to match the requested plan.
    ///
    /// Organization and space are not supplied on update, so only the
    /// service and plan tags are refreshed. Tagging happens after the
    /// modification succeeded and never changes the result.
    pub async fn update(
        &self,
        instance_id: &str,
        details: &UpdateDetails,
        accepts_incomplete: bool,
    ) -> BrokerResult<AcceptedResponse> {
        tracing::debug!(
            instance_id = %instance_id,
            details = ?details,
            accepts_incomplete,
            "update"
        );

        if !accepts_incomplete {
            return Err(BrokerError::AsyncRequired);
        }

        let parameters: UpdateParameters = if self.allow_user_update_parameters {
            decode_parameters(details.parameters.as_ref())?
        } else {
            UpdateParameters::default()
        };

        let service = self
            .catalog
            .find_service(&details.service_id)
            .ok_or_else(|| BrokerError::ServiceNotFound(details.service_id.clone()))?;

        if !service.plan_updateable {
            return Err(BrokerError::InstanceNotUpdateable);
        }

        let plan = self
            .catalog
            .find_service_plan(&details.plan_id)
            .ok_or_else(|| BrokerError::PlanNotFound(details.plan_id.clone()))?;

        let context = TagContext {
            service_id: &details.service_id,
            plan_id: &details.plan_id,
            ..Default::default()
        };
        let mut spec = build_spec(plan, TagAction::Updated, context, self.clock.as_ref());
        parameters.overrides.apply_to(&mut spec);

        let cache_cluster_id = self.cache_cluster_id(instance_id);
        self.backend
            .modify(&cache_cluster_id, &spec, parameters.apply_immediately)
            .await
            .map_err(|e| {
                tracing::error!(cache_cluster_id = %cache_cluster_id, error = %e, "modify-cache-cluster failed");
                BrokerError::for_existing_instance(e)
            })?;

        tracing::info!(
            "Modifying cache cluster '{}' (apply immediately: {})",
            cache_cluster_id,
            parameters.apply_immediately
        );

        tag_cache_cluster(self.tagger.as_ref(), &self.region, &cache_cluster_id, &spec.tags).await;

        Ok(AcceptedResponse { is_async: true })
    }
}
