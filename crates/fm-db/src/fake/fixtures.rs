//! Fixture loading in memory.

use super::{insert_named, FakeConnector, FakeTables};
use crate::error::{DbError, DbResult};
use crate::fixtures::{FixtureLoader, Row};
use async_trait::async_trait;

impl FakeTables {
    fn insert_row(&mut self, row: &Row) -> DbResult<()> {
        match row {
            Row::Project(p) => insert_named(&mut self.projects, "project", p.id, p.clone()),
            Row::Builder(b) => insert_named(&mut self.builders, "builder", b.id, b.clone()),
            Row::Master(m) => insert_named(&mut self.masters, "master", m.id, m.clone()),
            Row::Tag(t) => insert_named(&mut self.tags, "tag", t.id, t.clone()),
            Row::Scheduler(s) => insert_named(&mut self.schedulers, "scheduler", s.id, s.clone()),
            Row::BuilderMaster(bm) => {
                if self.builder_masters.insert((bm.builderid, bm.masterid)) {
                    Ok(())
                } else {
                    Err(duplicate_link("builder_masters", bm.builderid, bm.masterid))
                }
            }
            Row::BuilderTag(bt) => {
                if self.builders_tags.insert((bt.builderid, bt.tagid)) {
                    Ok(())
                } else {
                    Err(duplicate_link("builders_tags", bt.builderid, bt.tagid))
                }
            }
            Row::SchedulerMaster(sm) => {
                if self.scheduler_masters.contains_key(&sm.schedulerid) {
                    return Err(duplicate_link(
                        "scheduler_masters",
                        sm.schedulerid,
                        sm.masterid,
                    ));
                }
                self.scheduler_masters.insert(sm.schedulerid, sm.masterid);
                Ok(())
            }
        }
    }
}

fn duplicate_link(table: &str, left: i64, right: i64) -> DbError {
    DbError::ConstraintViolation(format!("duplicate {table} row ({left}, {right})"))
}

#[async_trait]
impl FixtureLoader for FakeConnector {
    async fn insert_test_data(&self, rows: &[Row]) -> DbResult<()> {
        self.transaction(|tables| rows.iter().try_for_each(|row| tables.insert_row(row)))
    }
}
