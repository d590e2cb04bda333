use anyhow::{Context, Result};
use cachebroker_orchestrations::BrokerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of the broker config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub log_level: String,
    pub username: String,
    pub password: String,
    pub elasticache_config: BrokerConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate().context("Validating config contents")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_level.is_empty() {
            anyhow::bail!("Must provide a non-empty LogLevel");
        }
        if log_filter(&self.log_level).is_none() {
            anyhow::bail!("Invalid log level: {}", self.log_level);
        }
        if self.username.is_empty() {
            anyhow::bail!("Must provide a non-empty Username");
        }
        if self.password.is_empty() {
            anyhow::bail!("Must provide a non-empty Password");
        }

        self.elasticache_config
            .validate()
            .context("Validating ElastiCache configuration")?;

        Ok(())
    }
}

/// Map a configured log level onto a tracing filter directive
pub fn log_filter(log_level: &str) -> Option<&'static str> {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => Some("debug"),
        "INFO" => Some("info"),
        "ERROR" | "FATAL" => Some("error"),
        _ => None,
    }
}
