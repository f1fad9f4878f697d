//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use fm_core::{Config, CoreError};
use fm_db::DuckDbConnector;
use serde::Serialize;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load configuration from `--config`, or from `./foreman.yml` when present.
///
/// Without either, built-in defaults apply.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    if let Some(path) = &global.config {
        return Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config from {path}"));
    }
    match Config::load_from_dir(Path::new(".")) {
        Ok(config) => Ok(config),
        Err(CoreError::ConfigNotFound { .. }) => {
            log::debug!("No foreman.yml found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).context("Failed to load foreman.yml"),
    }
}

/// Open the database named by `--database`, FOREMAN_DATABASE, or the config.
pub(crate) fn open_connector(global: &GlobalArgs, config: &Config) -> Result<DuckDbConnector> {
    let path = config.resolve_database_path(global.database.as_deref());
    if path == ":memory:" {
        log::warn!("Using an in-memory database; nothing will be persisted");
    }
    log::debug!("Opening database at {path}");
    DuckDbConnector::new(&path).with_context(|| format!("Failed to open database: {path}"))
}

/// Load configuration and open the database in one step.
pub(crate) fn connect(global: &GlobalArgs) -> Result<(Config, DuckDbConnector)> {
    let config = load_config(global)?;
    let db = open_connector(global, &config)?;
    Ok((config, db))
}

/// Print any serializable value as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize JSON output")?;
    println!("{output}");
    Ok(())
}

/// Calculate column widths for table output.
fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.len());
            }
        }
    }
    widths
}

/// Print rows as an aligned text table.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("(0 rows)");
        return;
    }

    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  "));

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  "));
    }
}

/// Render an optional value, `-` when absent.
pub(crate) fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Render a list as comma-separated text, `-` when empty.
pub(crate) fn join_or_dash<T: ToString>(items: &[T]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
