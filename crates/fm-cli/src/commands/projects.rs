//! Project lookup.

use anyhow::{Context, Result};
use fm_db::ProjectsConnector;

use crate::cli::{GlobalArgs, ProjectsArgs, ProjectsCommands};
use crate::commands::common;

/// Execute the projects command.
pub(crate) async fn execute(args: &ProjectsArgs, global: &GlobalArgs) -> Result<()> {
    let (_, db) = common::connect(global)?;

    match &args.command {
        ProjectsCommands::List => {
            let projects = db.get_projects().await.context("Failed to list projects")?;
            if global.json {
                return common::print_json(&projects);
            }
            let rows: Vec<Vec<String>> = projects
                .iter()
                .map(|p| vec![p.id.to_string(), p.name.clone()])
                .collect();
            common::print_table(&["id", "name"], &rows);
            Ok(())
        }
        ProjectsCommands::Find { name, no_create } => {
            let Some(id) = db
                .find_project_id(name, !no_create)
                .await
                .with_context(|| format!("Failed to find project '{name}'"))?
            else {
                anyhow::bail!("Project '{name}' not found");
            };
            if global.json {
                return common::print_json(&serde_json::json!({ "id": id }));
            }
            println!("{id}");
            Ok(())
        }
    }
}
