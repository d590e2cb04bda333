use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cachebroker - service broker for managed cache clusters
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Location of the broker config file
    #[arg(short, long, env = "CACHEBROKER_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Validate the config file and exit
    CheckConfig,

    /// Show the service catalog
    Catalog {
        /// Output format
        #[arg(short, long, default_value = "table")]
        output: String,
    },

    /// Print the cache cluster identifier for a service instance
    Identifier {
        /// Service instance ID as sent by the platform
        instance_id: String,
    },

    /// Run a full instance lifecycle against an in-memory backend
    Simulate {
        /// Plan to provision
        #[arg(long)]
        plan: String,

        /// Service instance ID (default: random UUID)
        #[arg(long)]
        instance_id: Option<String>,

        /// JSON object passed as provision parameters
        #[arg(long)]
        parameters: Option<String>,
    },
}
