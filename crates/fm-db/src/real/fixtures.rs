//! Fixture loading on DuckDB.

use super::{next_id, DuckDbConnector};
use crate::error::DbResult;
use crate::fixtures::{FixtureLoader, Row};
use async_trait::async_trait;
use duckdb::Connection;
use fm_core::name_hash;

fn insert_row(conn: &Connection, row: &Row) -> DbResult<()> {
    match row {
        Row::Project(p) => {
            conn.execute(
                "INSERT INTO projects (id, name, name_hash) VALUES (?, ?, ?)",
                duckdb::params![p.id, p.name, name_hash(&p.name)],
            )?;
        }
        Row::Builder(b) => {
            conn.execute(
                "INSERT INTO builders (id, name, name_hash, description, projectid) VALUES (?, ?, ?, ?, ?)",
                duckdb::params![b.id, b.name, name_hash(&b.name), b.description, b.projectid],
            )?;
        }
        Row::Master(m) => {
            conn.execute(
                "INSERT INTO masters (id, name, name_hash, active, last_active) VALUES (?, ?, ?, ?, ?)",
                duckdb::params![m.id, m.name, name_hash(&m.name), i64::from(m.active), m.last_active],
            )?;
        }
        Row::BuilderMaster(bm) => {
            let id = next_id(conn, "builder_masters")?;
            conn.execute(
                "INSERT INTO builder_masters (id, builderid, masterid) VALUES (?, ?, ?)",
                duckdb::params![id, bm.builderid, bm.masterid],
            )?;
        }
        Row::Tag(t) => {
            conn.execute(
                "INSERT INTO tags (id, name, name_hash) VALUES (?, ?, ?)",
                duckdb::params![t.id, t.name, name_hash(&t.name)],
            )?;
        }
        Row::BuilderTag(bt) => {
            let id = next_id(conn, "builders_tags")?;
            conn.execute(
                "INSERT INTO builders_tags (id, builderid, tagid) VALUES (?, ?, ?)",
                duckdb::params![id, bt.builderid, bt.tagid],
            )?;
        }
        Row::Scheduler(s) => {
            conn.execute(
                "INSERT INTO schedulers (id, name, name_hash, enabled) VALUES (?, ?, ?, ?)",
                duckdb::params![s.id, s.name, name_hash(&s.name), i64::from(s.enabled)],
            )?;
        }
        Row::SchedulerMaster(sm) => {
            conn.execute(
                "INSERT INTO scheduler_masters (schedulerid, masterid) VALUES (?, ?)",
                duckdb::params![sm.schedulerid, sm.masterid],
            )?;
        }
    }
    Ok(())
}

#[async_trait]
impl FixtureLoader for DuckDbConnector {
    async fn insert_test_data(&self, rows: &[Row]) -> DbResult<()> {
        self.transaction(|conn| rows.iter().try_for_each(|row| insert_row(conn, row)))
    }
}
