//! Shared setup for orchestration tests

use crate::broker::CacheBroker;
use crate::clock::FixedClock;
use crate::config::BrokerConfig;
use crate::memory::InMemoryBackend;
use cachebroker_models::{CacheProperties, Catalog, Service, ServicePlan};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

pub const INSTANCE_ID: &str = "8d5a6c2e-1f3b-4e2a-9c7d-0b1a2c3d4e5f";
pub const CLUSTER_ID: &str = "cf-8d5a6c2e1f3b4e2a9";
pub const ACCOUNT_ID: &str = "123456789012";

pub fn catalog() -> Catalog {
    Catalog {
        services: vec![
            Service {
                id: "svc-redis".to_string(),
                name: "redis".to_string(),
                description: "Redis clusters".to_string(),
                bindable: true,
                plan_updateable: true,
                plans: vec![ServicePlan {
                    id: "redis-small".to_string(),
                    name: "small".to_string(),
                    description: "Single small node".to_string(),
                    free: Some(false),
                    elasticache_properties: CacheProperties {
                        engine: "redis".to_string(),
                        engine_version: "7.1".to_string(),
                        cache_instance_class: "cache.t3.micro".to_string(),
                        num_cache_nodes: 1,
                        ..Default::default()
                    },
                }],
                ..Default::default()
            },
            Service {
                id: "svc-frozen".to_string(),
                name: "frozen".to_string(),
                description: "Neither updateable nor bindable".to_string(),
                bindable: false,
                plan_updateable: false,
                plans: vec![ServicePlan {
                    id: "frozen-small".to_string(),
                    name: "small".to_string(),
                    description: "Small".to_string(),
                    free: None,
                    elasticache_properties: CacheProperties {
                        engine: "memcached".to_string(),
                        ..Default::default()
                    },
                }],
                ..Default::default()
            },
        ],
    }
}

pub fn config() -> BrokerConfig {
    BrokerConfig {
        region: "us-east-1".to_string(),
        cache_prefix: "cf".to_string(),
        allow_user_provision_parameters: true,
        allow_user_update_parameters: true,
        catalog: catalog(),
    }
}

pub fn broker_with(config: BrokerConfig) -> (CacheBroker, Arc<InMemoryBackend>) {
    let backend = Arc::new(InMemoryBackend::with_account_id(ACCOUNT_ID));
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap());
    let broker = CacheBroker::new(config, backend.clone(), backend.clone()).with_clock(Arc::new(clock));
    (broker, backend)
}

pub fn broker() -> (CacheBroker, Arc<InMemoryBackend>) {
    broker_with(config())
}
