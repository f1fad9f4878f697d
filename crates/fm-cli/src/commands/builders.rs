//! Builder lookup, master links, and descriptive info.

use anyhow::{Context, Result};
use fm_core::BuilderRecord;
use fm_db::BuildersConnector;

use crate::cli::{BuildersArgs, BuildersCommands, GlobalArgs};
use crate::commands::common::{self, join_or_dash, or_dash};

/// Execute the builders command.
pub(crate) async fn execute(args: &BuildersArgs, global: &GlobalArgs) -> Result<()> {
    let (_, db) = common::connect(global)?;

    match &args.command {
        BuildersCommands::List { master, project } => {
            let builders = db
                .get_builders(*master, *project)
                .await
                .context("Failed to list builders")?;
            print_builders(&builders, global.json)
        }
        BuildersCommands::Show { id } => {
            let Some(builder) = db
                .get_builder(*id)
                .await
                .context("Failed to load builder")?
            else {
                anyhow::bail!("Builder {id} not found");
            };
            print_builders(std::slice::from_ref(&builder), global.json)
        }
        BuildersCommands::Find { name, no_create } => {
            let id = db
                .find_builder_id(name, !no_create)
                .await
                .with_context(|| format!("Failed to find builder '{name}'"))?;
            match id {
                Some(id) => print_id(id, global.json),
                None => anyhow::bail!("Builder '{name}' not found"),
            }
        }
        BuildersCommands::AddMaster {
            builderid,
            masterid,
        } => {
            db.add_builder_master(*builderid, *masterid)
                .await
                .with_context(|| format!("Failed to link builder {builderid} to master {masterid}"))?;
            println!("Linked builder {builderid} to master {masterid}");
            Ok(())
        }
        BuildersCommands::RemoveMaster {
            builderid,
            masterid,
        } => {
            db.remove_builder_master(*builderid, *masterid)
                .await
                .with_context(|| {
                    format!("Failed to unlink builder {builderid} from master {masterid}")
                })?;
            println!("Unlinked builder {builderid} from master {masterid}");
            Ok(())
        }
        BuildersCommands::UpdateInfo {
            id,
            description,
            project,
            tags,
        } => {
            db.update_builder_info(*id, description.as_deref(), *project, tags)
                .await
                .with_context(|| format!("Failed to update builder {id}"))?;
            println!("Updated builder {id}");
            Ok(())
        }
    }
}

fn print_id(id: i64, json: bool) -> Result<()> {
    if json {
        return common::print_json(&serde_json::json!({ "id": id }));
    }
    println!("{id}");
    Ok(())
}

fn print_builders(builders: &[BuilderRecord], json: bool) -> Result<()> {
    if json {
        return common::print_json(builders);
    }
    let rows: Vec<Vec<String>> = builders
        .iter()
        .map(|b| {
            vec![
                b.id.to_string(),
                b.name.clone(),
                or_dash(b.projectid),
                join_or_dash(&b.masterids),
                join_or_dash(&b.tags),
                or_dash(b.description.as_deref()),
            ]
        })
        .collect();
    common::print_table(
        &["id", "name", "project", "masters", "tags", "description"],
        &rows,
    );
    Ok(())
}
