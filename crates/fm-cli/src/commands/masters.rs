//! Master lookup and active/inactive state.

use anyhow::{Context, Result};
use fm_core::MasterRecord;
use fm_db::MastersConnector;

use crate::cli::{GlobalArgs, MastersArgs, MastersCommands};
use crate::commands::common;

/// Execute the masters command.
pub(crate) async fn execute(args: &MastersArgs, global: &GlobalArgs) -> Result<()> {
    let (config, db) = common::connect(global)?;

    match &args.command {
        MastersCommands::List => {
            let masters = db.get_masters().await.context("Failed to list masters")?;
            print_masters(&masters, global.json)
        }
        MastersCommands::Show { id } => {
            let Some(master) = db.get_master(*id).await.context("Failed to load master")? else {
                anyhow::bail!("Master {id} not found");
            };
            print_masters(std::slice::from_ref(&master), global.json)
        }
        MastersCommands::Find { name } => {
            let Some(name) = name.as_deref().or(config.master.name.as_deref()) else {
                anyhow::bail!("No master name given and master.name is not set in foreman.yml");
            };
            let id = db
                .find_master_id(name)
                .await
                .with_context(|| format!("Failed to find master '{name}'"))?;
            if global.json {
                return common::print_json(&serde_json::json!({ "id": id }));
            }
            println!("{id}");
            Ok(())
        }
        MastersCommands::Activate { id } => set_state(&db, *id, true, global.json).await,
        MastersCommands::Deactivate { id } => set_state(&db, *id, false, global.json).await,
    }
}

async fn set_state<C: MastersConnector>(db: &C, id: i64, active: bool, json: bool) -> Result<()> {
    let state = if active { "active" } else { "inactive" };
    let changed = db
        .set_master_state(id, active)
        .await
        .with_context(|| format!("Failed to mark master {id} {state}"))?;

    if json {
        return common::print_json(&serde_json::json!({ "id": id, "changed": changed }));
    }
    if changed {
        println!("Master {id} is now {state}");
    } else {
        println!("Master {id} unchanged");
    }
    Ok(())
}

fn print_masters(masters: &[MasterRecord], json: bool) -> Result<()> {
    if json {
        return common::print_json(masters);
    }
    let rows: Vec<Vec<String>> = masters
        .iter()
        .map(|m| {
            vec![
                m.id.to_string(),
                m.name.clone(),
                if m.active { "yes" } else { "no" }.to_string(),
                m.last_active.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]
        })
        .collect();
    common::print_table(&["id", "name", "active", "last_active"], &rows);
    Ok(())
}
