//! CLI subcommands

pub mod configure;
pub mod register;
pub mod validate;

use anyhow::{Context, Result};
use raistrix_sdk::{EntrypointDescriptor, EntrypointDraft};
use serde::Deserialize;
use std::path::Path;
use tabled::Tabled;

use crate::output::color_method;

/// Contents of an entrypoint definition file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EntrypointFile {
    Many(Vec<EntrypointDraft>),
    Single(EntrypointDraft),
}

impl EntrypointFile {
    pub fn into_drafts(self) -> Vec<EntrypointDraft> {
        match self {
            EntrypointFile::Many(drafts) => drafts,
            EntrypointFile::Single(draft) => vec![draft],
        }
    }
}

/// Read and parse an entrypoint definition file
pub fn read_entrypoint_file(path: &Path) -> Result<EntrypointFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read entrypoint file {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse entrypoint file {}", path.display()))
}

/// Row for entrypoints table
#[derive(Tabled)]
pub struct EntrypointRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Request Fields")]
    request_fields: usize,
    #[tabled(rename = "Response Fields")]
    response_fields: usize,
}

pub fn entrypoint_rows(entrypoints: &[EntrypointDescriptor]) -> Vec<EntrypointRow> {
    entrypoints
        .iter()
        .map(|e| EntrypointRow {
            name: e.name.clone(),
            method: color_method(e.method),
            path: e.path.clone(),
            description: truncate(&e.description, 40),
            request_fields: e.schema.request.len(),
            response_fields: e.schema.response.len(),
        })
        .collect()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max - 3).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_single_and_many() {
        let mut single = tempfile::NamedTempFile::new().unwrap();
        write!(single, r#"{{"name":"a","method":"GET"}}"#).unwrap();
        let drafts = read_entrypoint_file(single.path()).unwrap().into_drafts();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].name.as_deref(), Some("a"));

        let mut many = tempfile::NamedTempFile::new().unwrap();
        write!(many, r#"[{{"name":"a"}},{{"name":"b"}}]"#).unwrap();
        let drafts = read_entrypoint_file(many.path()).unwrap().into_drafts();
        assert_eq!(drafts.len(), 2);
    }

    #[test]
    fn test_read_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = read_entrypoint_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse entrypoint file"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a fairly long description", 10), "a fairl...");
    }
}
