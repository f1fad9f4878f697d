//! Init command implementation - creates the database and applies migrations

use anyhow::{Context, Result};
use fm_db::migration::current_version;

use crate::cli::GlobalArgs;
use crate::commands::common;

/// Execute the init command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let (config, db) = common::connect(global)?;
    let version = db
        .with_connection(current_version)
        .context("Failed to read schema version")?;
    let path = config.resolve_database_path(global.database.as_deref());

    if global.json {
        return common::print_json(&serde_json::json!({
            "name": config.name,
            "database": path,
            "schema_version": version,
        }));
    }
    println!("Initialized '{}' at {path} (schema version {version})", config.name);
    Ok(())
}
