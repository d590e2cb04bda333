use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;

use cli::{Args, Mode};
use config::Config;

/// Initialize tracing with two outputs:
/// 1. Console output (stderr) - keeps stdout for command output
/// 2. File output (~/.cachebroker/broker.log)
fn initialize_tracing(log_level: &str) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let level = config::log_filter(log_level).unwrap_or("info");

    // RUST_LOG wins over the configured level
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            format!(
                "{level},cachebroker_server={level},cachebroker_orchestrations={level}",
                level = level
            )
            .into()
        });

    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let log_dir = PathBuf::from(home).join(".cachebroker");
    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::never(&log_dir, "broker.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Dropping the guard stops file logging, so it lives for the whole process
    std::mem::forget(guard);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::load(&args.config)?;

    initialize_tracing(&config.log_level)?;
    tracing::debug!("Loaded config from {}", args.config.display());

    match args.mode {
        Mode::CheckConfig => {
            commands::catalog::run_check_config(&config)
        }
        Mode::Catalog { output } => {
            commands::catalog::run_catalog(&config.elasticache_config.catalog, &output)
        }
        Mode::Identifier { instance_id } => {
            commands::catalog::run_identifier(&config, &instance_id)
        }
        Mode::Simulate { plan, instance_id, parameters } => {
            commands::simulate::run_simulate(config, plan, instance_id, parameters).await
        }
    }
}
