//! Scheduler claim behaviour.

use fm_core::SchedulerRecord;
use fm_db::fixtures::{Master, Scheduler, SchedulerMaster};
use fm_db::{Connector, DbError, FixtureLoader};

async fn get<C: Connector>(db: &C, id: i64) -> SchedulerRecord {
    let scheduler = db.get_scheduler(id).await.unwrap().unwrap();
    scheduler.validate().unwrap();
    scheduler
}

pub async fn find_scheduler_id_new<C: Connector + FixtureLoader>(db: &C) {
    let id = db.find_scheduler_id("nightly").await.unwrap();
    assert_eq!(
        get(db, id).await,
        SchedulerRecord {
            id,
            name: "nightly".to_string(),
            enabled: true,
            masterid: None,
        }
    );
    assert_eq!(db.find_scheduler_id("nightly").await.unwrap(), id);
}

pub async fn set_scheduler_master_claim_and_release<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Master::new(7).into(), Scheduler::new(21).into()])
        .await
        .unwrap();

    db.set_scheduler_master(21, Some(7)).await.unwrap();
    assert_eq!(get(db, 21).await.masterid, Some(7));

    // reclaiming by the same master is a no-op
    db.set_scheduler_master(21, Some(7)).await.unwrap();
    assert_eq!(get(db, 21).await.masterid, Some(7));

    db.set_scheduler_master(21, None).await.unwrap();
    assert_eq!(get(db, 21).await.masterid, None);
}

pub async fn set_scheduler_master_conflict<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[
        Master::new(7).into(),
        Master::new(8).into(),
        Scheduler::new(21).into(),
        SchedulerMaster::new(21, 7).into(),
    ])
    .await
    .unwrap();
    let result = db.set_scheduler_master(21, Some(8)).await;
    assert!(matches!(result, Err(DbError::Conflict(_))));
    assert_eq!(get(db, 21).await.masterid, Some(7));
}

pub async fn set_scheduler_master_unknown_scheduler<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Master::new(7).into()]).await.unwrap();
    let result = db.set_scheduler_master(21, Some(7)).await;
    assert!(matches!(
        result,
        Err(DbError::NotFound {
            kind: "scheduler",
            id: 21
        })
    ));
}

pub async fn set_scheduler_master_unknown_master<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Scheduler::new(21).into()]).await.unwrap();
    let result = db.set_scheduler_master(21, Some(7)).await;
    assert!(matches!(result, Err(DbError::ConstraintViolation(_))));
    assert_eq!(get(db, 21).await.masterid, None);
}

pub async fn get_scheduler_missing<C: Connector + FixtureLoader>(db: &C) {
    assert_eq!(db.get_scheduler(21).await.unwrap(), None);
}
