//! Output formatting utilities

use crate::error::CliResult;
use charter_types::PolicyMessage;
use colored::*;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Row for a violation or warning listing
#[derive(Tabled)]
pub struct MessageRow {
    #[tabled(rename = "Level")]
    pub level: String,
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Message")]
    pub message: String,
}

impl MessageRow {
    pub fn violation(message: &PolicyMessage) -> Self {
        Self {
            level: "violation".into(),
            id: message.id.clone(),
            message: message.message.clone(),
        }
    }

    pub fn warning(message: &PolicyMessage) -> Self {
        Self {
            level: "warning".into(),
            id: message.id.clone(),
            message: message.message.clone(),
        }
    }
}

/// Violations then warnings, as table rows.
pub fn message_rows(violations: &[PolicyMessage], warnings: &[PolicyMessage]) -> Vec<MessageRow> {
    violations
        .iter()
        .map(MessageRow::violation)
        .chain(warnings.iter().map(MessageRow::warning))
        .collect()
}

/// Print table rows, or a dimmed placeholder when empty
pub fn print_table<T: Tabled>(rows: Vec<T>) {
    if rows.is_empty() {
        println!("{}", "No results".dimmed());
    } else {
        println!("{}", Table::new(rows));
    }
}

/// Print a single item in a machine-readable format. Table falls back to JSON.
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(data)?);
        }
    }
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a failure message
pub fn print_failure(message: &str) {
    println!("{} {}", "✗".red(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}
