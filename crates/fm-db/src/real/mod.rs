//! DuckDB connector backend
//!
//! [`DuckDbConnector`] owns a single DuckDB [`Connection`] behind a mutex.
//! Every connector operation runs as one transaction on that connection, so
//! find-or-create and read-modify-write sequences cannot interleave.

mod builders;
mod fixtures;
mod masters;
mod projects;
mod schedulers;
mod tags;

use crate::error::{DbError, DbResult};
use crate::migration::run_migrations;
use crate::traits::Connector;
use duckdb::Connection;
use fm_core::{name_hash, Clock, SystemClock};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Connector backed by a migrated DuckDB database.
pub struct DuckDbConnector {
    conn: Mutex<Connection>,
    clock: Arc<dyn Clock>,
}

impl DuckDbConnector {
    /// Create an in-memory database with all migrations applied.
    pub fn open_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Self::from_connection(conn)
    }

    /// Open (or create) the database at `path` and run pending migrations.
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Self::from_connection(conn)
    }

    /// Open from a path string (handles the `:memory:` special case).
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::open_memory()
        } else {
            Self::open(Path::new(path))
        }
    }

    fn from_connection(conn: Connection) -> DbResult<Self> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used to stamp `last_active`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run `body` against the raw connection, outside any transaction.
    pub fn with_connection<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.conn.lock()?;
        body(&conn)
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
    /// error.
    pub fn transaction<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.conn.lock()?;
        conn.execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;

        let result = body(&conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = conn.execute_batch("COMMIT") {
                    let _ = conn.execute_batch("ROLLBACK");
                    return Err(DbError::TransactionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                let _ = conn.execute_batch("ROLLBACK");
            }
        }
        result
    }

    fn now(&self) -> i64 {
        self.clock.now()
    }
}

impl Connector for DuckDbConnector {
    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

/// Map "no rows" to `None`.
fn optional<T>(result: duckdb::Result<T>) -> DbResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Next free id in `table`: one past the largest, or 1 when empty.
fn next_id(conn: &Connection, table: &str) -> DbResult<i64> {
    let id: i64 = conn.query_row(
        &format!("SELECT COALESCE(MAX(id), 0) + 1 FROM {table}"),
        [],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Look up a row id through the table's `name_hash` index.
fn find_id_by_name(conn: &Connection, table: &str, name: &str) -> DbResult<Option<i64>> {
    optional(conn.query_row(
        &format!("SELECT id FROM {table} WHERE name_hash = ?"),
        duckdb::params![name_hash(name)],
        |row| row.get(0),
    ))
}

fn row_exists(conn: &Connection, table: &str, id: i64) -> DbResult<bool> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE id = ?"),
        duckdb::params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Fail with a constraint violation unless row `id` exists in `table`.
fn require_row(conn: &Connection, table: &str, kind: &str, id: i64) -> DbResult<()> {
    if row_exists(conn, table, id)? {
        Ok(())
    } else {
        Err(DbError::ConstraintViolation(format!(
            "{kind} {id} does not exist"
        )))
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
