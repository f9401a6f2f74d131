//! Raistrix CLI
//!
//! A command-line tool for validating entrypoint definitions and
//! registering them with the Raistrix registry.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{configure, register, validate};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Raistrix entrypoint registry CLI
#[derive(Parser)]
#[command(name = "raistrix")]
#[command(author, version, about = "CLI for registering API entrypoints with Raistrix", long_about = None)]
pub struct Cli {
    /// API key (can also be set via RAISTRIX_API_KEY env var)
    #[arg(long, env = "RAISTRIX_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Project ID from the raistrix.com dashboard
    #[arg(long, env = "RAISTRIX_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Registry endpoint URL
    #[arg(long, env = "RAISTRIX_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "RAISTRIX_REQUEST_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Output format (table or json)
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register the entrypoints defined in a JSON file
    Register {
        /// JSON file holding one entrypoint object or an array of them
        file: PathBuf,
    },

    /// Validate entrypoint definitions without contacting the registry
    Validate {
        /// JSON file holding one entrypoint object or an array of them
        file: PathBuf,
    },

    /// Save credentials and defaults to the CLI config file
    Configure,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    // validate needs no credentials; a broken config file only loses its defaults
    let file_config = match cli.command {
        Commands::Validate { .. } => config::CliConfig::load().unwrap_or_else(|e| {
            warn!("Ignoring config file: {:#}", e);
            config::CliConfig::default()
        }),
        _ => config::CliConfig::load()?,
    };
    let format = cli
        .format
        .or_else(|| file_config.default_format())
        .unwrap_or_default();

    match &cli.command {
        Commands::Register { file } => {
            let client_config = file_config.resolve(&cli);
            register::register_file(client_config, file, format).await?;
        }
        Commands::Validate { file } => {
            validate::validate_file(file, format)?;
        }
        Commands::Configure => {
            configure::save_config(file_config, &cli, format)?;
        }
    }

    Ok(())
}
