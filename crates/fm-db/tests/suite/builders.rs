//! Builders connector behaviour.

use crate::common::{bare_builder, strings};
use fm_core::BuilderRecord;
use fm_db::fixtures::{Builder, BuilderMaster, Master, Project, Row};
use fm_db::{Connector, DbError, FixtureLoader};

fn verify(builders: &[BuilderRecord]) {
    for builder in builders {
        builder.validate().unwrap();
    }
}

async fn get<C: Connector>(db: &C, id: i64) -> BuilderRecord {
    let builder = db.get_builder(id).await.unwrap().unwrap();
    builder.validate().unwrap();
    builder
}

/// Builders 7, 8, 9 on masters 3 and 4: 7 -> [3], 8 -> [3, 4], 9 -> [].
fn three_builders() -> Vec<Row> {
    vec![
        Builder::new(7).name("some:builder").into(),
        Builder::new(8).name("other:builder").into(),
        Builder::new(9).name("third:builder").into(),
        Master::new(3).name("m1").into(),
        Master::new(4).name("m2").into(),
        BuilderMaster::new(7, 3).into(),
        BuilderMaster::new(8, 3).into(),
        BuilderMaster::new(8, 4).into(),
    ]
}

// ── find_builder_id ────────────────────────────────────────────────────

pub async fn find_builder_id_new<C: Connector + FixtureLoader>(db: &C) {
    let id = db.find_builder_id("some:builder", true).await.unwrap().unwrap();
    assert_eq!(get(db, id).await, bare_builder(id, "some:builder"));
}

pub async fn find_builder_id_new_no_auto_create<C: Connector + FixtureLoader>(db: &C) {
    let id = db.find_builder_id("some:builder", false).await.unwrap();
    assert_eq!(id, None);
    assert!(db.get_builders(None, None).await.unwrap().is_empty());
}

pub async fn find_builder_id_exists<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Builder::new(7).name("some:builder").into()])
        .await
        .unwrap();
    let id = db.find_builder_id("some:builder", true).await.unwrap();
    assert_eq!(id, Some(7));
    assert_eq!(db.get_builders(None, None).await.unwrap().len(), 1);
}

pub async fn find_builder_id_exists_no_auto_create<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Builder::new(7).name("some:builder").into()])
        .await
        .unwrap();
    let id = db.find_builder_id("some:builder", false).await.unwrap();
    assert_eq!(id, Some(7));
}

pub async fn find_builder_id_is_case_sensitive<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Builder::new(7).name("some:builder").into()])
        .await
        .unwrap();
    let id = db.find_builder_id("some:Builder", true).await.unwrap().unwrap();
    assert_ne!(id, 7);
    assert_eq!(get(db, id).await.name, "some:Builder");
}

pub async fn find_builder_id_new_id_follows_fixtures<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Builder::new(7).name("some:builder").into()])
        .await
        .unwrap();
    let id = db.find_builder_id("another:builder", true).await.unwrap();
    assert_eq!(id, Some(8));
}

pub async fn find_builder_id_rejects_empty_name<C: Connector + FixtureLoader>(db: &C) {
    let result = db.find_builder_id("", true).await;
    assert!(matches!(result, Err(DbError::ConstraintViolation(_))));
}

// ── builder/master links ───────────────────────────────────────────────

pub async fn add_builder_master<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[
        Builder::new(7).into(),
        Master::new(9).name("abc").into(),
        Master::new(10).name("def").into(),
        BuilderMaster::new(7, 10).into(),
    ])
    .await
    .unwrap();
    db.add_builder_master(7, 9).await.unwrap();
    assert_eq!(
        get(db, 7).await,
        BuilderRecord {
            masterids: vec![9, 10],
            ..bare_builder(7, "some:builder")
        }
    );
}

pub async fn add_builder_master_already_present<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[
        Builder::new(7).into(),
        Master::new(9).name("abc").into(),
        Master::new(10).name("def").into(),
        BuilderMaster::new(7, 9).into(),
    ])
    .await
    .unwrap();
    db.add_builder_master(7, 9).await.unwrap();
    assert_eq!(
        get(db, 7).await,
        BuilderRecord {
            masterids: vec![9],
            ..bare_builder(7, "some:builder")
        }
    );
}

pub async fn add_builder_master_unknown_master<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Builder::new(7).into()]).await.unwrap();
    let result = db.add_builder_master(7, 9).await;
    assert!(matches!(result, Err(DbError::ConstraintViolation(_))));
    assert_eq!(get(db, 7).await.masterids, Vec::<i64>::new());
}

pub async fn add_builder_master_unknown_builder<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Master::new(9).into()]).await.unwrap();
    let result = db.add_builder_master(7, 9).await;
    assert!(matches!(result, Err(DbError::ConstraintViolation(_))));
}

pub async fn remove_builder_master<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[
        Builder::new(7).into(),
        Master::new(9).name("some:master").into(),
        Master::new(10).name("other:master").into(),
        BuilderMaster::new(7, 9).into(),
        BuilderMaster::new(7, 10).into(),
    ])
    .await
    .unwrap();
    db.remove_builder_master(7, 9).await.unwrap();
    assert_eq!(
        get(db, 7).await,
        BuilderRecord {
            masterids: vec![10],
            ..bare_builder(7, "some:builder")
        }
    );
}

pub async fn remove_builder_master_missing_link<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[
        Builder::new(7).into(),
        Master::new(9).into(),
        Master::new(10).into(),
        BuilderMaster::new(7, 10).into(),
    ])
    .await
    .unwrap();
    db.remove_builder_master(7, 9).await.unwrap();
    assert_eq!(get(db, 7).await.masterids, vec![10]);
}

// ── get_builder / get_builders ─────────────────────────────────────────

pub async fn get_builder_no_masters<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Builder::new(7).name("some:builder").into()])
        .await
        .unwrap();
    assert_eq!(get(db, 7).await, bare_builder(7, "some:builder"));
}

pub async fn get_builder_with_masters<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[
        Builder::new(7).name("some:builder").into(),
        Master::new(3).name("m1").into(),
        Master::new(4).name("m2").into(),
        BuilderMaster::new(7, 3).into(),
        BuilderMaster::new(7, 4).into(),
    ])
    .await
    .unwrap();
    assert_eq!(
        get(db, 7).await,
        BuilderRecord {
            masterids: vec![3, 4],
            ..bare_builder(7, "some:builder")
        }
    );
}

pub async fn get_builder_missing<C: Connector + FixtureLoader>(db: &C) {
    assert_eq!(db.get_builder(7).await.unwrap(), None);
}

pub async fn get_builders<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&three_builders()).await.unwrap();
    let builders = db.get_builders(None, None).await.unwrap();
    verify(&builders);
    assert_eq!(
        builders,
        vec![
            BuilderRecord {
                masterids: vec![3],
                ..bare_builder(7, "some:builder")
            },
            BuilderRecord {
                masterids: vec![3, 4],
                ..bare_builder(8, "other:builder")
            },
            bare_builder(9, "third:builder"),
        ]
    );
}

pub async fn get_builders_masterid<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&three_builders()).await.unwrap();
    let builders = db.get_builders(Some(3), None).await.unwrap();
    verify(&builders);
    assert_eq!(
        builders,
        vec![
            BuilderRecord {
                masterids: vec![3],
                ..bare_builder(7, "some:builder")
            },
            BuilderRecord {
                masterids: vec![3, 4],
                ..bare_builder(8, "other:builder")
            },
        ]
    );
}

pub async fn get_builders_unknown_masterid<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&three_builders()).await.unwrap();
    assert!(db.get_builders(Some(99), None).await.unwrap().is_empty());
}

fn projects_fixture() -> Vec<Row> {
    vec![
        Project::new(201).name("p201").into(),
        Project::new(202).name("p202").into(),
        Builder::new(101).name("b101").into(),
        Builder::new(102).name("b102").projectid(201).into(),
        Builder::new(103).name("b103").projectid(201).into(),
        Builder::new(104).name("b104").projectid(202).into(),
        Master::new(3).name("m1").into(),
        Master::new(4).name("m2").into(),
        BuilderMaster::new(101, 3).into(),
        BuilderMaster::new(102, 3).into(),
        BuilderMaster::new(103, 4).into(),
        BuilderMaster::new(104, 4).into(),
    ]
}

pub async fn get_builders_projectid<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&projects_fixture()).await.unwrap();
    let builders = db.get_builders(None, Some(201)).await.unwrap();
    verify(&builders);
    assert_eq!(
        builders,
        vec![
            BuilderRecord {
                projectid: Some(201),
                masterids: vec![3],
                ..bare_builder(102, "b102")
            },
            BuilderRecord {
                projectid: Some(201),
                masterids: vec![4],
                ..bare_builder(103, "b103")
            },
        ]
    );
}

pub async fn get_builders_masterid_and_projectid<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&projects_fixture()).await.unwrap();
    let builders = db.get_builders(Some(4), Some(201)).await.unwrap();
    verify(&builders);
    let ids: Vec<i64> = builders.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![103]);
}

pub async fn get_builders_empty<C: Connector + FixtureLoader>(db: &C) {
    assert_eq!(db.get_builders(None, None).await.unwrap(), vec![]);
}

// ── update_builder_info ────────────────────────────────────────────────

pub async fn update_builder_info<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[
        Project::new(123).name("fake_project123").into(),
        Project::new(124).name("fake_project124").into(),
        Builder::new(7).name("some:builder7").into(),
        Builder::new(8).name("some:builder8").into(),
    ])
    .await
    .unwrap();

    let description = "a string which describe the builder";
    db.update_builder_info(7, Some(description), Some(123), &strings(&["cat1", "cat2"]))
        .await
        .unwrap();
    db.update_builder_info(8, Some(description), Some(124), &[])
        .await
        .unwrap();

    assert_eq!(
        get(db, 7).await,
        BuilderRecord {
            description: Some(description.to_string()),
            projectid: Some(123),
            tags: strings(&["cat1", "cat2"]),
            ..bare_builder(7, "some:builder7")
        }
    );
    assert_eq!(
        get(db, 8).await,
        BuilderRecord {
            description: Some(description.to_string()),
            projectid: Some(124),
            ..bare_builder(8, "some:builder8")
        }
    );
}

pub async fn update_builder_info_tags_case<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[
        Project::new(107).name("fake_project").into(),
        Builder::new(7).name("some:builder7").projectid(107).into(),
    ])
    .await
    .unwrap();

    db.update_builder_info(7, Some("builder_desc"), Some(107), &strings(&["Cat", "cat"]))
        .await
        .unwrap();
    assert_eq!(
        get(db, 7).await,
        BuilderRecord {
            description: Some("builder_desc".to_string()),
            projectid: Some(107),
            tags: strings(&["Cat", "cat"]),
            ..bare_builder(7, "some:builder7")
        }
    );
}

pub async fn update_builder_info_replaces_tags<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Builder::new(7).into()]).await.unwrap();

    db.update_builder_info(7, None, None, &strings(&["a", "b"]))
        .await
        .unwrap();
    db.update_builder_info(7, None, None, &strings(&["b", "c"]))
        .await
        .unwrap();
    assert_eq!(get(db, 7).await.tags, strings(&["b", "c"]));

    db.update_builder_info(7, None, None, &[]).await.unwrap();
    assert_eq!(get(db, 7).await.tags, Vec::<String>::new());
}

pub async fn update_builder_info_duplicate_tags_collapse<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Builder::new(7).into()]).await.unwrap();
    db.update_builder_info(7, None, None, &strings(&["x", "x", "y"]))
        .await
        .unwrap();
    assert_eq!(get(db, 7).await.tags, strings(&["x", "y"]));
}

pub async fn update_builder_info_shares_tags<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[
        Builder::new(7).name("b7").into(),
        Builder::new(8).name("b8").into(),
    ])
    .await
    .unwrap();
    db.update_builder_info(7, None, None, &strings(&["linux"]))
        .await
        .unwrap();
    db.update_builder_info(8, None, None, &strings(&["linux"]))
        .await
        .unwrap();
    db.update_builder_info(7, None, None, &[]).await.unwrap();

    assert_eq!(get(db, 7).await.tags, Vec::<String>::new());
    assert_eq!(get(db, 8).await.tags, strings(&["linux"]));
}

pub async fn update_builder_info_clears_fields<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[
        Project::new(1).into(),
        Builder::new(7).description("old").projectid(1).into(),
    ])
    .await
    .unwrap();
    db.update_builder_info(7, None, None, &[]).await.unwrap();
    assert_eq!(get(db, 7).await, bare_builder(7, "some:builder"));
}

pub async fn update_builder_info_missing_builder<C: Connector + FixtureLoader>(db: &C) {
    let result = db.update_builder_info(7, Some("desc"), None, &[]).await;
    assert!(matches!(
        result,
        Err(DbError::NotFound {
            kind: "builder",
            id: 7
        })
    ));
}

pub async fn update_builder_info_unknown_project_is_atomic<C: Connector + FixtureLoader>(
    db: &C,
) {
    db.insert_test_data(&[Builder::new(7).into()]).await.unwrap();
    let result = db
        .update_builder_info(7, Some("desc"), Some(55), &strings(&["t"]))
        .await;
    assert!(matches!(result, Err(DbError::ConstraintViolation(_))));
    assert_eq!(get(db, 7).await, bare_builder(7, "some:builder"));
}

pub async fn update_builder_info_keeps_master_links<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[
        Builder::new(7).into(),
        Master::new(3).into(),
        BuilderMaster::new(7, 3).into(),
    ])
    .await
    .unwrap();
    db.update_builder_info(7, Some("desc"), None, &strings(&["t"]))
        .await
        .unwrap();
    assert_eq!(get(db, 7).await.masterids, vec![3]);
}
