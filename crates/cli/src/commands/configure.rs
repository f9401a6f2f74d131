//! Configure command

use anyhow::Result;
use clap::ValueEnum;
use serde_json::json;

use crate::config::CliConfig;
use crate::output::{mask_secret, print_info, print_json, print_success, OutputFormat};
use crate::Cli;

/// Merge the given flags into the config file and save it
pub fn save_config(mut file_config: CliConfig, cli: &Cli, format: OutputFormat) -> Result<()> {
    merge_flags(&mut file_config, cli);
    let path = file_config.save()?;

    match format {
        OutputFormat::Json => {
            print_json(&json!({
                "path": path.display().to_string(),
                "projectId": file_config.project_id,
                "endpoint": file_config.endpoint,
                "defaultFormat": file_config.default_format,
            }))?;
        }
        OutputFormat::Table => {
            print_success(&format!("Configuration saved to {}", path.display()));
            if let Some(api_key) = &file_config.api_key {
                print_info(&format!("API key: {}", mask_secret(api_key)));
            }
            if let Some(project_id) = &file_config.project_id {
                print_info(&format!("Project ID: {}", project_id));
            }
            if let Some(endpoint) = &file_config.endpoint {
                print_info(&format!("Endpoint: {}", endpoint));
            }
        }
    }

    Ok(())
}

fn merge_flags(file_config: &mut CliConfig, cli: &Cli) {
    if let Some(api_key) = &cli.api_key {
        file_config.api_key = Some(api_key.clone());
    }
    if let Some(project_id) = &cli.project_id {
        file_config.project_id = Some(project_id.clone());
    }
    if let Some(endpoint) = &cli.endpoint {
        file_config.endpoint = Some(endpoint.clone());
    }
    if let Some(format) = cli.format {
        file_config.default_format = format
            .to_possible_value()
            .map(|value| value.get_name().to_string());
    }
}
