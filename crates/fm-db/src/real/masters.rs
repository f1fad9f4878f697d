//! Masters on DuckDB.

use super::{find_id_by_name, next_id, optional, DuckDbConnector};
use crate::error::DbResult;
use crate::traits::{check_name, MastersConnector};
use async_trait::async_trait;
use duckdb::Connection;
use fm_core::{epoch_to_datetime, name_hash, MasterRecord};

fn find_master_id(conn: &Connection, name: &str, now: i64) -> DbResult<i64> {
    check_name("master", name)?;
    if let Some(id) = find_id_by_name(conn, "masters", name)? {
        return Ok(id);
    }
    let id = next_id(conn, "masters")?;
    conn.execute(
        "INSERT INTO masters (id, name, name_hash, active, last_active) VALUES (?, ?, ?, 0, ?)",
        duckdb::params![id, name, name_hash(name), now],
    )?;
    log::debug!("Created master '{name}' with id {id}");
    Ok(id)
}

fn set_master_state(conn: &Connection, masterid: i64, active: bool, now: i64) -> DbResult<bool> {
    let was_active: Option<i64> = optional(conn.query_row(
        "SELECT active FROM masters WHERE id = ?",
        duckdb::params![masterid],
        |row| row.get(0),
    ))?;
    let Some(was_active) = was_active else {
        return Ok(false);
    };
    let was_active = was_active != 0;

    if active {
        conn.execute(
            "UPDATE masters SET active = 1, last_active = ? WHERE id = ?",
            duckdb::params![now, masterid],
        )?;
    } else {
        let released = conn.execute(
            "DELETE FROM scheduler_masters WHERE masterid = ?",
            duckdb::params![masterid],
        )?;
        if released > 0 {
            log::debug!("Master {masterid} released {released} scheduler(s)");
        }
        conn.execute(
            "UPDATE masters SET active = 0 WHERE id = ?",
            duckdb::params![masterid],
        )?;
    }

    let changed = was_active != active;
    if changed {
        log::info!(
            "Master {masterid} is now {}",
            if active { "active" } else { "inactive" }
        );
    }
    Ok(changed)
}

fn load_masters(conn: &Connection, masterid: Option<i64>) -> DbResult<Vec<MasterRecord>> {
    let map_row = |row: &duckdb::Row<'_>| -> duckdb::Result<(i64, String, i64, i64)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    };
    let select = "SELECT id, name, active, last_active FROM masters";
    let rows: Vec<(i64, String, i64, i64)> = match masterid {
        Some(id) => {
            let mut stmt = conn.prepare(&format!("{select} WHERE id = ?"))?;
            let rows = stmt
                .query_map(duckdb::params![id], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
        None => {
            let mut stmt = conn.prepare(&format!("{select} ORDER BY id"))?;
            let rows = stmt
                .query_map([], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
    };

    rows.into_iter()
        .map(|(id, name, active, last_active)| -> DbResult<MasterRecord> {
            Ok(MasterRecord {
                id,
                name,
                active: active != 0,
                last_active: epoch_to_datetime(last_active)?,
            })
        })
        .collect()
}

#[async_trait]
impl MastersConnector for DuckDbConnector {
    async fn find_master_id(&self, name: &str) -> DbResult<i64> {
        let now = self.now();
        self.transaction(|conn| find_master_id(conn, name, now))
    }

    async fn set_master_state(&self, masterid: i64, active: bool) -> DbResult<bool> {
        let now = self.now();
        self.transaction(|conn| set_master_state(conn, masterid, active, now))
    }

    async fn get_master(&self, masterid: i64) -> DbResult<Option<MasterRecord>> {
        let masters = self.with_connection(|conn| load_masters(conn, Some(masterid)))?;
        Ok(masters.into_iter().next())
    }

    async fn get_masters(&self) -> DbResult<Vec<MasterRecord>> {
        self.with_connection(|conn| load_masters(conn, None))
    }
}
