//! Masters in memory.

use super::{find_id_by_name, next_id, FakeConnector};
use crate::error::DbResult;
use crate::fixtures::Master;
use crate::traits::{check_name, MastersConnector};
use async_trait::async_trait;
use fm_core::{epoch_to_datetime, MasterRecord};

fn to_record(master: &Master) -> DbResult<MasterRecord> {
    Ok(MasterRecord {
        id: master.id,
        name: master.name.clone(),
        active: master.active,
        last_active: epoch_to_datetime(master.last_active)?,
    })
}

#[async_trait]
impl MastersConnector for FakeConnector {
    async fn find_master_id(&self, name: &str) -> DbResult<i64> {
        let now = self.now();
        self.transaction(|tables| {
            check_name("master", name)?;
            if let Some(id) = find_id_by_name(&tables.masters, name) {
                return Ok(id);
            }
            let id = next_id(&tables.masters);
            let master = Master::new(id).name(name).active(false).last_active(now);
            tables.masters.insert(id, master);
            Ok(id)
        })
    }

    async fn set_master_state(&self, masterid: i64, active: bool) -> DbResult<bool> {
        let now = self.now();
        self.transaction(|tables| {
            let Some(master) = tables.masters.get_mut(&masterid) else {
                return Ok(false);
            };
            let was_active = master.active;
            master.active = active;
            if active {
                master.last_active = now;
            } else {
                tables.scheduler_masters.retain(|_, m| *m != masterid);
            }
            Ok(was_active != active)
        })
    }

    async fn get_master(&self, masterid: i64) -> DbResult<Option<MasterRecord>> {
        self.read(|tables| tables.masters.get(&masterid).map(to_record).transpose())
    }

    async fn get_masters(&self) -> DbResult<Vec<MasterRecord>> {
        self.read(|tables| tables.masters.values().map(to_record).collect())
    }
}
