//! Name constants and cache cluster identifier derivation

/// Longest cache cluster identifier the backend accepts
pub const MAX_CACHE_CLUSTER_ID_LEN: usize = 20;

/// Longest cache prefix that still leaves the separator and one instance
/// character inside [`MAX_CACHE_CLUSTER_ID_LEN`]
pub const MAX_CACHE_PREFIX_LEN: usize = MAX_CACHE_CLUSTER_ID_LEN - 2;

/// Tag keys and fixed tag values attached to every cluster
pub mod tags {
    pub const OWNER: &str = "Owner";

    /// Ownership marker, identical on every cluster the broker touches
    pub const OWNER_VALUE: &str = "Cloud Foundry";

    /// Value of the `<action> by` tag
    pub const BROKER_NAME: &str = "AWS ElastiCache Service Broker";

    pub const SERVICE_ID: &str = "Service ID";
    pub const PLAN_ID: &str = "Plan ID";
    pub const ORGANIZATION_ID: &str = "Organization ID";
    pub const SPACE_ID: &str = "Space ID";

    /// chrono rendering of RFC 822 with a numeric zone, e.g. `02 Jan 06 15:04 -0700`
    pub const TIMESTAMP_FORMAT: &str = "%d %b %y %H:%M %z";
}

/// Derive the backend cache cluster identifier for a service instance.
///
/// The result is `<prefix>-<instance id without hyphens>` cut to
/// [`MAX_CACHE_CLUSTER_ID_LEN`] characters. The cut is unconditional, so two
/// instance ids that agree on their first `20 - prefix.len() - 1` characters
/// (after hyphen stripping) map to the same cluster. Existing clusters were
/// named this way, so the collision is kept rather than fixed.
pub fn cache_cluster_id(prefix: &str, instance_id: &str) -> String {
    let stripped = instance_id.replace('-', "");
    format!("{}-{}", prefix, stripped)
        .chars()
        .take(MAX_CACHE_CLUSTER_ID_LEN)
        .collect()
}

/// Fully qualified resource name of a cache cluster, used for tagging
pub fn cache_cluster_resource_name(region: &str, account_id: &str, cache_cluster_id: &str) -> String {
    format!(
        "arn:aws:elasticache:{}:{}:cluster:{}",
        region, account_id, cache_cluster_id
    )
}
