//! Shared helpers for connector tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use fm_core::{epoch_to_datetime, BuilderRecord, ManualClock, MasterRecord};
use fm_db::{DuckDbConnector, FakeConnector};
use std::sync::Arc;

/// The time every test connector's clock is frozen at.
pub const SOMETIME: i64 = 1_348_971_992;

/// An earlier time used for pre-existing `last_active` values.
pub const OTHERTIME: i64 = 1_008_971_992;

pub fn fake() -> FakeConnector {
    FakeConnector::new().with_clock(Arc::new(ManualClock::new(SOMETIME)))
}

pub fn real() -> DuckDbConnector {
    DuckDbConnector::open_memory()
        .unwrap()
        .with_clock(Arc::new(ManualClock::new(SOMETIME)))
}

pub fn dt(seconds: i64) -> DateTime<Utc> {
    epoch_to_datetime(seconds).unwrap()
}

/// A builder record with no description, project, masters, or tags.
pub fn bare_builder(id: i64, name: &str) -> BuilderRecord {
    BuilderRecord {
        id,
        name: name.to_string(),
        description: None,
        projectid: None,
        masterids: vec![],
        tags: vec![],
    }
}

pub fn master(id: i64, name: &str, active: bool, last_active: i64) -> MasterRecord {
    MasterRecord {
        id,
        name: name.to_string(),
        active,
        last_active: dt(last_active),
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
