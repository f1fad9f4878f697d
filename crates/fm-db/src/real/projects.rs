//! Projects on DuckDB.

use super::{find_id_by_name, next_id, optional, DuckDbConnector};
use crate::error::DbResult;
use crate::traits::{check_name, ProjectsConnector};
use async_trait::async_trait;
use duckdb::Connection;
use fm_core::{name_hash, ProjectRecord};

fn find_project_id(conn: &Connection, name: &str, auto_create: bool) -> DbResult<Option<i64>> {
    check_name("project", name)?;
    if let Some(id) = find_id_by_name(conn, "projects", name)? {
        return Ok(Some(id));
    }
    if !auto_create {
        return Ok(None);
    }
    let id = next_id(conn, "projects")?;
    conn.execute(
        "INSERT INTO projects (id, name, name_hash) VALUES (?, ?, ?)",
        duckdb::params![id, name, name_hash(name)],
    )?;
    log::debug!("Created project '{name}' with id {id}");
    Ok(Some(id))
}

fn get_project(conn: &Connection, projectid: i64) -> DbResult<Option<ProjectRecord>> {
    optional(conn.query_row(
        "SELECT id, name FROM projects WHERE id = ?",
        duckdb::params![projectid],
        |row| {
            Ok(ProjectRecord {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    ))
}

fn get_projects(conn: &Connection) -> DbResult<Vec<ProjectRecord>> {
    let mut stmt = conn.prepare("SELECT id, name FROM projects ORDER BY id")?;
    let projects = stmt
        .query_map([], |row| {
            Ok(ProjectRecord {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(projects)
}

#[async_trait]
impl ProjectsConnector for DuckDbConnector {
    async fn find_project_id(&self, name: &str, auto_create: bool) -> DbResult<Option<i64>> {
        self.transaction(|conn| find_project_id(conn, name, auto_create))
    }

    async fn get_project(&self, projectid: i64) -> DbResult<Option<ProjectRecord>> {
        self.with_connection(|conn| get_project(conn, projectid))
    }

    async fn get_projects(&self) -> DbResult<Vec<ProjectRecord>> {
        self.with_connection(get_projects)
    }
}
