//! Configuration management for the CLI

use anyhow::{Context, Result};
use clap::ValueEnum;
use raistrix_sdk::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output::OutputFormat;
use crate::Cli;

/// CLI configuration file contents
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CliConfig {
    /// API key used when no flag or env var is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Default project ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Registry endpoint URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
}

impl CliConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a file, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config file")
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Output format stored in the file, if it names a known one
    pub fn default_format(&self) -> Option<OutputFormat> {
        self.default_format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f, true).ok())
    }

    /// Merge flags and env vars over the file; flags win
    pub fn resolve(&self, cli: &Cli) -> ClientConfig {
        let api_key = cli.api_key.clone().or_else(|| self.api_key.clone());
        let project_id = cli.project_id.clone().or_else(|| self.project_id.clone());

        let mut config =
            ClientConfig::new(api_key.unwrap_or_default(), project_id.unwrap_or_default());
        if let Some(endpoint) = cli.endpoint.clone().or_else(|| self.endpoint.clone()) {
            config = config.with_endpoint(endpoint);
        }
        if let Some(secs) = cli.timeout {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        config
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("raistrix").join("config.json"))
    }
}
