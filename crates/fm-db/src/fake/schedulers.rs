//! Scheduler claims in memory.

use super::{find_id_by_name, next_id, require_row, FakeConnector};
use crate::error::{DbError, DbResult};
use crate::fixtures::Scheduler;
use crate::traits::{check_name, SchedulersConnector};
use async_trait::async_trait;
use fm_core::SchedulerRecord;

#[async_trait]
impl SchedulersConnector for FakeConnector {
    async fn find_scheduler_id(&self, name: &str) -> DbResult<i64> {
        self.transaction(|tables| {
            check_name("scheduler", name)?;
            if let Some(id) = find_id_by_name(&tables.schedulers, name) {
                return Ok(id);
            }
            let id = next_id(&tables.schedulers);
            tables.schedulers.insert(id, Scheduler::new(id).name(name));
            Ok(id)
        })
    }

    async fn set_scheduler_master(
        &self,
        schedulerid: i64,
        masterid: Option<i64>,
    ) -> DbResult<()> {
        self.transaction(|tables| {
            if !tables.schedulers.contains_key(&schedulerid) {
                return Err(DbError::NotFound {
                    kind: "scheduler",
                    id: schedulerid,
                });
            }
            let Some(masterid) = masterid else {
                tables.scheduler_masters.remove(&schedulerid);
                return Ok(());
            };
            require_row(&tables.masters, "master", masterid)?;
            match tables.scheduler_masters.get(&schedulerid) {
                Some(current) if *current == masterid => Ok(()),
                Some(current) => Err(DbError::Conflict(format!(
                    "scheduler {schedulerid} is already claimed by master {current}"
                ))),
                None => {
                    tables.scheduler_masters.insert(schedulerid, masterid);
                    Ok(())
                }
            }
        })
    }

    async fn get_scheduler(&self, schedulerid: i64) -> DbResult<Option<SchedulerRecord>> {
        self.read(|tables| {
            Ok(tables.schedulers.get(&schedulerid).map(|s| SchedulerRecord {
                id: s.id,
                name: s.name.clone(),
                enabled: s.enabled,
                masterid: tables.scheduler_masters.get(&s.id).copied(),
            }))
        })
    }
}
