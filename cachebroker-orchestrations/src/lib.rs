//! Cachebroker Orchestrations - service broker lifecycle on top of managed cache clusters
//!
//! This crate turns service instance operations (provision, update,
//! deprovision, bind, unbind, last operation) into calls against a
//! [`CacheClusterBackend`], and maps cluster status back into
//! [`cachebroker_models::OperationState`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cachebroker_orchestrations::{BrokerConfig, CacheBroker, InMemoryBackend};
//!
//! # async fn example(config: BrokerConfig) -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(InMemoryBackend::new());
//! let broker = CacheBroker::new(config, backend.clone(), backend);
//!
//! let status = broker.last_operation("8d5a6c2e-1f3b-4e2a-9c7d-0b1a2c3d4e5f").await?;
//! println!("{}: {}", status.state, status.description);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod broker;
pub mod clock;
pub mod config;
pub mod error;
pub mod memory;
pub mod names;
pub mod spec_builder;
pub mod status;
pub mod types;

mod orchestrations;
mod tagging;

// Re-export key types for convenience
pub use backend::{BackendError, BackendResult, CacheClusterBackend, ResourceTagger};
pub use broker::CacheBroker;
pub use config::{BrokerConfig, ConfigError};
pub use error::{BrokerError, BrokerResult};
pub use memory::InMemoryBackend;
pub use types::{ClusterOverrides, ProvisionParameters, UpdateParameters};
