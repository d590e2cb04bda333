//! Best-effort tag attachment after a cluster modification

use crate::backend::{BackendResult, ResourceTagger};
use crate::names;
use std::collections::BTreeMap;

/// Attach `tags` to the cluster, logging instead of failing.
///
/// Tags are advisory: the caller's outcome never depends on this step.
pub(crate) async fn tag_cache_cluster(
    tagger: &dyn ResourceTagger,
    region: &str,
    cache_cluster_id: &str,
    tags: &BTreeMap<String, String>,
) {
    if tags.is_empty() {
        return;
    }

    match add_tags(tagger, region, cache_cluster_id, tags).await {
        Ok(resource_name) => {
            tracing::debug!(resource_name = %resource_name, count = tags.len(), "add-tags-to-resource");
        }
        Err(e) => {
            tracing::warn!(
                cache_cluster_id = %cache_cluster_id,
                error = %e,
                "Failed to tag cache cluster, continuing"
            );
        }
    }
}

async fn add_tags(
    tagger: &dyn ResourceTagger,
    region: &str,
    cache_cluster_id: &str,
    tags: &BTreeMap<String, String>,
) -> BackendResult<String> {
    let account_id = tagger.account_id().await?;
    let resource_name = names::cache_cluster_resource_name(region, &account_id, cache_cluster_id);
    tagger.add_tags(&resource_name, tags).await?;
    Ok(resource_name)
}
