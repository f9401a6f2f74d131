//! Validate command

use anyhow::Result;
use raistrix_sdk::validate_entrypoints;
use serde_json::json;
use std::path::Path;

use super::{entrypoint_rows, read_entrypoint_file};
use crate::output::{print_json, print_success, print_table, OutputFormat};

/// Check every entrypoint in a file without contacting the registry
pub fn validate_file(file: &Path, format: OutputFormat) -> Result<()> {
    let drafts = read_entrypoint_file(file)?.into_drafts();
    let descriptors = validate_entrypoints(&drafts)?;

    match format {
        OutputFormat::Json => {
            print_json(&json!({
                "valid": true,
                "entrypoints": descriptors,
            }))?;
        }
        OutputFormat::Table => {
            print_table(entrypoint_rows(&descriptors));
            println!();
            print_success(&format!(
                "{} entrypoint(s) in {} are valid",
                descriptors.len(),
                file.display()
            ));
        }
    }

    Ok(())
}
