//! Tags connector behaviour.

use fm_db::fixtures::Tag;
use fm_db::{Connector, DbError, FixtureLoader};

pub async fn find_tag_id_new<C: Connector + FixtureLoader>(db: &C) {
    let first = db.find_tag_id("linux").await.unwrap();
    let second = db.find_tag_id("windows").await.unwrap();
    assert_ne!(first, second);
    assert_eq!(db.find_tag_id("linux").await.unwrap(), first);
}

pub async fn find_tag_id_exists<C: Connector + FixtureLoader>(db: &C) {
    db.insert_test_data(&[Tag::new(5, "linux").into()])
        .await
        .unwrap();
    assert_eq!(db.find_tag_id("linux").await.unwrap(), 5);
    assert_eq!(db.find_tag_id("arm").await.unwrap(), 6);
}

pub async fn find_tag_id_is_case_sensitive<C: Connector + FixtureLoader>(db: &C) {
    let lower = db.find_tag_id("cat").await.unwrap();
    let upper = db.find_tag_id("Cat").await.unwrap();
    assert_ne!(lower, upper);
}

pub async fn find_tag_id_rejects_empty_name<C: Connector + FixtureLoader>(db: &C) {
    let result = db.find_tag_id("").await;
    assert!(matches!(result, Err(DbError::ConstraintViolation(_))));
}
