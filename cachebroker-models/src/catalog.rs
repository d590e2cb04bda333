//! Service catalog offered by the broker

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Must provide a non-empty {0}")]
    Empty(&'static str),

    #[error("Validating Services[{index}] configuration: {source}")]
    Service {
        index: usize,
        source: Box<CatalogError>,
    },

    #[error("Validating Plans[{index}] configuration: {source}")]
    Plan {
        index: usize,
        source: Box<CatalogError>,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub bindable: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub plan_updateable: bool,
    #[serde(default)]
    pub plans: Vec<ServicePlan>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServicePlan {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free: Option<bool>,
    pub elasticache_properties: CacheProperties,
}

/// Backend settings carried by a plan.
///
/// Empty strings and zero numbers mean "not set".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheProperties {
    pub engine: String,
    #[serde(default)]
    pub engine_version: String,
    #[serde(default)]
    pub cache_instance_class: String,
    #[serde(default)]
    pub num_cache_nodes: i64,
    #[serde(default)]
    pub port: i64,
    #[serde(default)]
    pub cache_subnet_group_name: String,
    #[serde(default)]
    pub cache_security_groups: Vec<String>,
}

impl Catalog {
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (index, service) in self.services.iter().enumerate() {
            service.validate().map_err(|e| CatalogError::Service {
                index,
                source: Box::new(e),
            })?;
        }
        Ok(())
    }

    pub fn find_service(&self, service_id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == service_id)
    }

    /// Plan ids are unique across services, so the lookup spans the whole catalog
    pub fn find_service_plan(&self, plan_id: &str) -> Option<&ServicePlan> {
        self.services
            .iter()
            .flat_map(|service| service.plans.iter())
            .find(|plan| plan.id == plan_id)
    }
}

impl Service {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.is_empty() {
            return Err(CatalogError::Empty("Service ID"));
        }
        if self.name.is_empty() {
            return Err(CatalogError::Empty("Service Name"));
        }
        if self.description.is_empty() {
            return Err(CatalogError::Empty("Service Description"));
        }
        for (index, plan) in self.plans.iter().enumerate() {
            plan.validate().map_err(|e| CatalogError::Plan {
                index,
                source: Box::new(e),
            })?;
        }
        Ok(())
    }
}

impl ServicePlan {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.is_empty() {
            return Err(CatalogError::Empty("Service Plan ID"));
        }
        if self.name.is_empty() {
            return Err(CatalogError::Empty("Service Plan Name"));
        }
        if self.description.is_empty() {
            return Err(CatalogError::Empty("Service Plan Description"));
        }
        if self.elasticache_properties.engine.is_empty() {
            return Err(CatalogError::Empty("Engine"));
        }
        Ok(())
    }
}
