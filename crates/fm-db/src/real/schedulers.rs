//! Scheduler claims on DuckDB.

use super::{find_id_by_name, next_id, optional, require_row, row_exists, DuckDbConnector};
use crate::error::{DbError, DbResult};
use crate::traits::{check_name, SchedulersConnector};
use async_trait::async_trait;
use duckdb::Connection;
use fm_core::{name_hash, SchedulerRecord};

fn find_scheduler_id(conn: &Connection, name: &str) -> DbResult<i64> {
    check_name("scheduler", name)?;
    if let Some(id) = find_id_by_name(conn, "schedulers", name)? {
        return Ok(id);
    }
    let id = next_id(conn, "schedulers")?;
    conn.execute(
        "INSERT INTO schedulers (id, name, name_hash, enabled) VALUES (?, ?, ?, 1)",
        duckdb::params![id, name, name_hash(name)],
    )?;
    log::debug!("Created scheduler '{name}' with id {id}");
    Ok(id)
}

fn set_scheduler_master(
    conn: &Connection,
    schedulerid: i64,
    masterid: Option<i64>,
) -> DbResult<()> {
    if !row_exists(conn, "schedulers", schedulerid)? {
        return Err(DbError::NotFound {
            kind: "scheduler",
            id: schedulerid,
        });
    }

    let Some(masterid) = masterid else {
        conn.execute(
            "DELETE FROM scheduler_masters WHERE schedulerid = ?",
            duckdb::params![schedulerid],
        )?;
        return Ok(());
    };

    require_row(conn, "masters", "master", masterid)?;
    let holder: Option<i64> = optional(conn.query_row(
        "SELECT masterid FROM scheduler_masters WHERE schedulerid = ?",
        duckdb::params![schedulerid],
        |row| row.get(0),
    ))?;
    match holder {
        Some(current) if current == masterid => Ok(()),
        Some(current) => Err(DbError::Conflict(format!(
            "scheduler {schedulerid} is already claimed by master {current}"
        ))),
        None => {
            conn.execute(
                "INSERT INTO scheduler_masters (schedulerid, masterid) VALUES (?, ?)",
                duckdb::params![schedulerid, masterid],
            )?;
            Ok(())
        }
    }
}

fn get_scheduler(conn: &Connection, schedulerid: i64) -> DbResult<Option<SchedulerRecord>> {
    optional(conn.query_row(
        "SELECT s.id, s.name, s.enabled, sm.masterid
         FROM schedulers s
         LEFT JOIN scheduler_masters sm ON sm.schedulerid = s.id
         WHERE s.id = ?",
        duckdb::params![schedulerid],
        |row| {
            Ok(SchedulerRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                enabled: row.get::<_, i64>(2)? != 0,
                masterid: row.get(3)?,
            })
        },
    ))
}

#[async_trait]
impl SchedulersConnector for DuckDbConnector {
    async fn find_scheduler_id(&self, name: &str) -> DbResult<i64> {
        self.transaction(|conn| find_scheduler_id(conn, name))
    }

    async fn set_scheduler_master(
        &self,
        schedulerid: i64,
        masterid: Option<i64>,
    ) -> DbResult<()> {
        self.transaction(|conn| set_scheduler_master(conn, schedulerid, masterid))
    }

    async fn get_scheduler(&self, schedulerid: i64) -> DbResult<Option<SchedulerRecord>> {
        self.with_connection(|conn| get_scheduler(conn, schedulerid))
    }
}
