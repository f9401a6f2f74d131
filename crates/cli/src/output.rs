//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use raistrix_sdk::HttpMethod;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print rows as a rounded table
pub fn print_table<T: Tabled>(rows: Vec<T>) {
    if rows.is_empty() {
        println!("{}", "No entrypoints found".yellow());
        return;
    }
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Color an HTTP method by how it affects server state
pub fn color_method(method: HttpMethod) -> String {
    let label = method.as_str();
    match method {
        HttpMethod::Get => label.green().to_string(),
        HttpMethod::Post => label.blue().to_string(),
        HttpMethod::Put | HttpMethod::Patch => label.yellow().to_string(),
        HttpMethod::Delete => label.red().to_string(),
    }
}

/// Format an RFC 3339 timestamp, falling back to the raw text
pub fn format_timestamp(ts: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(ts) {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        ts.to_string()
    }
}

/// Mask all but the last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 4 {
        "*".repeat(secret.chars().count())
    } else {
        format!("****{}", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2025-01-01T00:00:00Z"), "2025-01-01 00:00:00");
        assert_eq!(format_timestamp("not a time"), "not a time");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefgh"), "****efgh");
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn test_color_method_keeps_label() {
        colored::control::set_override(false);
        assert_eq!(color_method(HttpMethod::Delete), "DELETE");
        colored::control::unset_override();
    }
}
