//! Tags on DuckDB.

use super::{find_id_by_name, next_id, DuckDbConnector};
use crate::error::DbResult;
use crate::traits::{check_name, TagsConnector};
use async_trait::async_trait;
use duckdb::Connection;
use fm_core::name_hash;

pub(super) fn find_tag_id(conn: &Connection, name: &str) -> DbResult<i64> {
    check_name("tag", name)?;
    if let Some(id) = find_id_by_name(conn, "tags", name)? {
        return Ok(id);
    }
    let id = next_id(conn, "tags")?;
    conn.execute(
        "INSERT INTO tags (id, name, name_hash) VALUES (?, ?, ?)",
        duckdb::params![id, name, name_hash(name)],
    )?;
    log::debug!("Created tag '{name}' with id {id}");
    Ok(id)
}

#[async_trait]
impl TagsConnector for DuckDbConnector {
    async fn find_tag_id(&self, name: &str) -> DbResult<i64> {
        self.transaction(|conn| find_tag_id(conn, name))
    }
}
