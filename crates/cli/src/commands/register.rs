//! Register command

use anyhow::Result;
use raistrix_sdk::{ClientConfig, SyncClient};
use serde_json::json;
use std::path::Path;
use tracing::debug;

use super::{entrypoint_rows, read_entrypoint_file, EntrypointFile};
use crate::output::{
    format_timestamp, print_info, print_json, print_success, print_table, print_warning,
    OutputFormat,
};

/// Validate the file's entrypoints and sync them to the registry
pub async fn register_file(config: ClientConfig, file: &Path, format: OutputFormat) -> Result<()> {
    let mut client = SyncClient::new(config)?;
    debug!(url = %client.entrypoints_url(), file = %file.display(), "Registering entrypoints");

    let result = match read_entrypoint_file(file)? {
        EntrypointFile::Single(draft) => client.register_entrypoint(draft).await?,
        EntrypointFile::Many(drafts) => client.register_entrypoints(drafts).await?,
    };

    match format {
        OutputFormat::Json => {
            print_json(&json!({
                "projectId": client.project_id(),
                "entrypoints": client.entrypoints(),
                "result": result,
            }))?;
        }
        OutputFormat::Table => {
            print_table(entrypoint_rows(client.entrypoints()));
            println!();

            let count = client.entrypoints().len();
            if result.success {
                print_success(&format!(
                    "{} entrypoint(s) synced to project {}",
                    count,
                    client.project_id()
                ));
            } else {
                print_warning("Registry accepted the request but did not report success");
            }
            print_info(&format!("Synced at {}", format_timestamp(&result.created_at)));
        }
    }

    Ok(())
}
