//! In-memory connector backend
//!
//! [`FakeConnector`] keeps every table in ordered maps behind a mutex. It
//! enforces the same uniqueness and existence rules as the DuckDB schema and
//! connectors, and applies each operation to a scratch copy that only
//! replaces the live tables on success, so a failed operation leaves no
//! partial writes.

mod builders;
mod fixtures;
mod masters;
mod projects;
mod schedulers;
mod tags;

use crate::error::{DbError, DbResult};
use crate::fixtures::{Builder, Master, Project, Scheduler, Tag};
use crate::traits::Connector;
use fm_core::{Clock, SystemClock};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

/// The fake's tables. Rows reuse the fixture types, which mirror the schema
/// one-to-one.
#[derive(Debug, Default, Clone)]
struct FakeTables {
    projects: BTreeMap<i64, Project>,
    builders: BTreeMap<i64, Builder>,
    masters: BTreeMap<i64, Master>,
    /// `(builderid, masterid)`
    builder_masters: BTreeSet<(i64, i64)>,
    tags: BTreeMap<i64, Tag>,
    /// `(builderid, tagid)`
    builders_tags: BTreeSet<(i64, i64)>,
    schedulers: BTreeMap<i64, Scheduler>,
    /// `schedulerid -> masterid`
    scheduler_masters: BTreeMap<i64, i64>,
}

/// Connector backed by in-process tables.
#[derive(Debug)]
pub struct FakeConnector {
    tables: Mutex<FakeTables>,
    clock: Arc<dyn Clock>,
}

impl Default for FakeConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeConnector {
    /// Create an empty fake store using the system clock.
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(FakeTables::default()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to stamp `last_active`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Apply `body` to a scratch copy of the tables, keeping the result only
    /// if it succeeds.
    fn transaction<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&mut FakeTables) -> DbResult<T>,
    {
        let mut tables = self.tables.lock()?;
        let mut scratch = tables.clone();
        let result = body(&mut scratch)?;
        *tables = scratch;
        Ok(result)
    }

    fn read<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&FakeTables) -> DbResult<T>,
    {
        let tables = self.tables.lock()?;
        body(&tables)
    }

    fn now(&self) -> i64 {
        self.clock.now()
    }
}

impl Connector for FakeConnector {
    fn db_type(&self) -> &'static str {
        "fake"
    }
}

/// Next free id in a table: one past the largest, or 1 when empty.
fn next_id<V>(table: &BTreeMap<i64, V>) -> i64 {
    table.keys().next_back().map_or(1, |id| id + 1)
}

/// Rows that carry a unique name.
trait Named {
    fn name(&self) -> &str;
}

macro_rules! impl_named {
    ($($row:ty),* $(,)?) => {
        $(
            impl Named for $row {
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )*
    };
}

impl_named!(Project, Builder, Master, Tag, Scheduler);

/// Find a row id by exact (case-sensitive) name.
fn find_id_by_name<V: Named>(table: &BTreeMap<i64, V>, name: &str) -> Option<i64> {
    table
        .iter()
        .find(|(_, row)| row.name() == name)
        .map(|(id, _)| *id)
}

/// Insert a named fixture row, enforcing the primary key and the unique
/// name the schema declares.
fn insert_named<V: Named>(table: &mut BTreeMap<i64, V>, kind: &str, id: i64, row: V) -> DbResult<()> {
    if table.contains_key(&id) {
        return Err(DbError::ConstraintViolation(format!(
            "duplicate {kind} id {id}"
        )));
    }
    if find_id_by_name(table, row.name()).is_some() {
        return Err(DbError::ConstraintViolation(format!(
            "duplicate {kind} name '{}'",
            row.name()
        )));
    }
    table.insert(id, row);
    Ok(())
}

/// Fail with a constraint violation unless `id` is a key of `table`.
fn require_row<V>(table: &BTreeMap<i64, V>, kind: &str, id: i64) -> DbResult<()> {
    if table.contains_key(&id) {
        Ok(())
    } else {
        Err(DbError::ConstraintViolation(format!(
            "{kind} {id} does not exist"
        )))
    }
}

#[cfg(test)]
#[path = "fake_test.rs"]
mod tests;
