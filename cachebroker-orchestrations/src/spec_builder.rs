//! Translate a service plan into a cache cluster spec and tag set

use crate::clock::Clock;
use crate::names::tags;
use cachebroker_models::{ClusterSpec, ServicePlan};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// Lifecycle action recorded in the `<action> by` / `<action> at` tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    Created,
    Updated,
}

impl TagAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagAction::Created => "Created",
            TagAction::Updated => "Updated",
        }
    }
}

impl fmt::Display for TagAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform identifiers copied into tags; empty values are left out
#[derive(Debug, Clone, Copy, Default)]
pub struct TagContext<'a> {
    pub service_id: &'a str,
    pub plan_id: &'a str,
    pub organization_id: &'a str,
    pub space_id: &'a str,
}

/// Build the spec for `plan`, tagged with `action` at the clock's current time
pub fn build_spec(
    plan: &ServicePlan,
    action: TagAction,
    context: TagContext<'_>,
    clock: &dyn Clock,
) -> ClusterSpec {
    let mut spec = cluster_spec_from_plan(plan);
    spec.tags = cache_tags(action, context, clock.now());
    spec
}

/// Copy the plan's set properties; empty strings, zeros and empty lists are skipped
pub fn cluster_spec_from_plan(plan: &ServicePlan) -> ClusterSpec {
    let properties = &plan.elasticache_properties;

    ClusterSpec {
        engine: properties.engine.clone(),
        engine_version: non_empty(&properties.engine_version),
        cache_instance_class: non_empty(&properties.cache_instance_class),
        num_cache_nodes: positive(properties.num_cache_nodes),
        port: positive(properties.port),
        cache_subnet_group_name: non_empty(&properties.cache_subnet_group_name),
        cache_security_groups: if properties.cache_security_groups.is_empty() {
            None
        } else {
            Some(properties.cache_security_groups.clone())
        },
        ..Default::default()
    }
}

pub fn cache_tags(
    action: TagAction,
    context: TagContext<'_>,
    now: DateTime<Utc>,
) -> BTreeMap<String, String> {
    let mut cache_tags = BTreeMap::new();

    cache_tags.insert(tags::OWNER.to_string(), tags::OWNER_VALUE.to_string());
    cache_tags.insert(format!("{} by", action), tags::BROKER_NAME.to_string());
    cache_tags.insert(
        format!("{} at", action),
        now.format(tags::TIMESTAMP_FORMAT).to_string(),
    );

    let optional = [
        (tags::SERVICE_ID, context.service_id),
        (tags::PLAN_ID, context.plan_id),
        (tags::ORGANIZATION_ID, context.organization_id),
        (tags::SPACE_ID, context.space_id),
    ];
    for (key, value) in optional {
        if !value.is_empty() {
            cache_tags.insert(key.to_string(), value.to_string());
        }
    }

    cache_tags
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn positive(value: i64) -> Option<i64> {
    (value > 0).then_some(value)
}
