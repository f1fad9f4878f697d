//! Builders on DuckDB.

use super::tags::find_tag_id;
use super::{find_id_by_name, next_id, require_row, row_exists, DuckDbConnector};
use crate::error::{DbError, DbResult};
use crate::traits::{check_name, BuildersConnector};
use async_trait::async_trait;
use duckdb::Connection;
use fm_core::{name_hash, BuilderRecord};
use std::collections::{BTreeSet, HashMap};

/// Which builders to load.
#[derive(Debug, Default, Clone, Copy)]
struct BuilderFilter {
    builderid: Option<i64>,
    masterid: Option<i64>,
    projectid: Option<i64>,
}

fn find_builder_id(conn: &Connection, name: &str, auto_create: bool) -> DbResult<Option<i64>> {
    check_name("builder", name)?;
    if let Some(id) = find_id_by_name(conn, "builders", name)? {
        return Ok(Some(id));
    }
    if !auto_create {
        return Ok(None);
    }
    let id = next_id(conn, "builders")?;
    conn.execute(
        "INSERT INTO builders (id, name, name_hash) VALUES (?, ?, ?)",
        duckdb::params![id, name, name_hash(name)],
    )?;
    log::debug!("Created builder '{name}' with id {id}");
    Ok(Some(id))
}

fn add_builder_master(conn: &Connection, builderid: i64, masterid: i64) -> DbResult<()> {
    require_row(conn, "builders", "builder", builderid)?;
    require_row(conn, "masters", "master", masterid)?;

    let existing: i64 = conn.query_row(
        "SELECT COUNT(*) FROM builder_masters WHERE builderid = ? AND masterid = ?",
        duckdb::params![builderid, masterid],
        |row| row.get(0),
    )?;
    if existing > 0 {
        return Ok(());
    }

    let id = next_id(conn, "builder_masters")?;
    conn.execute(
        "INSERT INTO builder_masters (id, builderid, masterid) VALUES (?, ?, ?)",
        duckdb::params![id, builderid, masterid],
    )?;
    Ok(())
}

fn remove_builder_master(conn: &Connection, builderid: i64, masterid: i64) -> DbResult<()> {
    conn.execute(
        "DELETE FROM builder_masters WHERE builderid = ? AND masterid = ?",
        duckdb::params![builderid, masterid],
    )?;
    Ok(())
}

fn load_builders(conn: &Connection, filter: BuilderFilter) -> DbResult<Vec<BuilderRecord>> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut params: Vec<i64> = Vec::new();
    if let Some(id) = filter.builderid {
        clauses.push("b.id = ?");
        params.push(id);
    }
    if let Some(id) = filter.masterid {
        clauses.push("b.id IN (SELECT builderid FROM builder_masters WHERE masterid = ?)");
        params.push(id);
    }
    if let Some(id) = filter.projectid {
        clauses.push("b.projectid = ?");
        params.push(id);
    }
    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let mut stmt = conn.prepare(&format!(
        "SELECT b.id, b.name, b.description, b.projectid FROM builders b{where_sql} ORDER BY b.id"
    ))?;
    let mut builders = stmt
        .query_map(duckdb::params_from_iter(params), |row| {
            Ok(BuilderRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                projectid: row.get(3)?,
                masterids: Vec::new(),
                tags: Vec::new(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    if builders.is_empty() {
        return Ok(builders);
    }

    let mut masterids = load_master_links(conn, filter.builderid)?;
    let mut tags = load_tag_names(conn, filter.builderid)?;

    for builder in &mut builders {
        if let Some(mut ids) = masterids.remove(&builder.id) {
            ids.sort_unstable();
            ids.dedup();
            builder.masterids = ids;
        }
        if let Some(mut names) = tags.remove(&builder.id) {
            names.sort();
            names.dedup();
            builder.tags = names;
        }
    }
    Ok(builders)
}

/// Load master ids, grouped by builder.
fn load_master_links(
    conn: &Connection,
    builderid: Option<i64>,
) -> DbResult<HashMap<i64, Vec<i64>>> {
    let select = "SELECT builderid, masterid FROM builder_masters";
    let pairs: Vec<(i64, i64)> = match builderid {
        Some(id) => {
            let mut stmt = conn.prepare(&format!("{select} WHERE builderid = ?"))?;
            let rows = stmt
                .query_map(duckdb::params![id], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
        None => {
            let mut stmt = conn.prepare(select)?;
            let rows = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
    };

    let mut grouped: HashMap<i64, Vec<i64>> = HashMap::new();
    for (builder, master) in pairs {
        grouped.entry(builder).or_default().push(master);
    }
    Ok(grouped)
}

fn load_tag_names(
    conn: &Connection,
    builderid: Option<i64>,
) -> DbResult<HashMap<i64, Vec<String>>> {
    let base = "SELECT bt.builderid, t.name FROM builders_tags bt JOIN tags t ON t.id = bt.tagid";
    let pairs: Vec<(i64, String)> = match builderid {
        Some(id) => {
            let mut stmt = conn.prepare(&format!("{base} WHERE bt.builderid = ?"))?;
            let rows = stmt
                .query_map(duckdb::params![id], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
        None => {
            let mut stmt = conn.prepare(base)?;
            let rows = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
    };

    let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
    for (builder, name) in pairs {
        grouped.entry(builder).or_default().push(name);
    }
    Ok(grouped)
}

fn update_builder_info(
    conn: &Connection,
    builderid: i64,
    description: Option<&str>,
    projectid: Option<i64>,
    tags: &[String],
) -> DbResult<()> {
    if !row_exists(conn, "builders", builderid)? {
        return Err(DbError::NotFound {
            kind: "builder",
            id: builderid,
        });
    }
    if let Some(projectid) = projectid {
        require_row(conn, "projects", "project", projectid)?;
    }

    conn.execute(
        "UPDATE builders SET description = ?, projectid = ? WHERE id = ?",
        duckdb::params![description, projectid, builderid],
    )?;

    let mut wanted = BTreeSet::new();
    for tag in tags {
        wanted.insert(find_tag_id(conn, tag)?);
    }

    let current: BTreeSet<i64> = {
        let mut stmt = conn.prepare("SELECT tagid FROM builders_tags WHERE builderid = ?")?;
        let rows = stmt
            .query_map(duckdb::params![builderid], |row| row.get::<_, i64>(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;
        rows
    };

    // Diff rather than delete-all/re-insert, and insert before deleting:
    // DuckDB checks unique indexes eagerly within a transaction, so neither a
    // link key nor a freed row id may be reused before commit.
    for added in wanted.difference(&current) {
        let id = next_id(conn, "builders_tags")?;
        conn.execute(
            "INSERT INTO builders_tags (id, builderid, tagid) VALUES (?, ?, ?)",
            duckdb::params![id, builderid, added],
        )?;
    }
    for stale in current.difference(&wanted) {
        conn.execute(
            "DELETE FROM builders_tags WHERE builderid = ? AND tagid = ?",
            duckdb::params![builderid, stale],
        )?;
    }
    Ok(())
}

#[async_trait]
impl BuildersConnector for DuckDbConnector {
    async fn find_builder_id(&self, name: &str, auto_create: bool) -> DbResult<Option<i64>> {
        self.transaction(|conn| find_builder_id(conn, name, auto_create))
    }

    async fn add_builder_master(&self, builderid: i64, masterid: i64) -> DbResult<()> {
        self.transaction(|conn| add_builder_master(conn, builderid, masterid))
    }

    async fn remove_builder_master(&self, builderid: i64, masterid: i64) -> DbResult<()> {
        self.transaction(|conn| remove_builder_master(conn, builderid, masterid))
    }

    async fn get_builder(&self, builderid: i64) -> DbResult<Option<BuilderRecord>> {
        let filter = BuilderFilter {
            builderid: Some(builderid),
            ..BuilderFilter::default()
        };
        let builders = self.with_connection(|conn| load_builders(conn, filter))?;
        Ok(builders.into_iter().next())
    }

    async fn get_builders(
        &self,
        masterid: Option<i64>,
        projectid: Option<i64>,
    ) -> DbResult<Vec<BuilderRecord>> {
        let filter = BuilderFilter {
            builderid: None,
            masterid,
            projectid,
        };
        self.with_connection(|conn| load_builders(conn, filter))
    }

    async fn update_builder_info(
        &self,
        builderid: i64,
        description: Option<&str>,
        projectid: Option<i64>,
        tags: &[String],
    ) -> DbResult<()> {
        self.transaction(|conn| update_builder_info(conn, builderid, description, projectid, tags))
    }
}
