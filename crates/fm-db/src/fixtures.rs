//! Typed fixture rows for seeding a connector.
//!
//! Each row type mirrors one table and carries the same defaults on every
//! backend, so a test can describe its starting state once and load it into
//! either the DuckDB or the fake connector:
//!
//! ```
//! use fm_db::fixtures::{Builder, BuilderMaster, Master, Row};
//!
//! let rows: Vec<Row> = vec![
//!     Builder::new(7).into(),
//!     Master::new(9).name("abc").into(),
//!     BuilderMaster::new(7, 9).into(),
//! ];
//! assert_eq!(rows.len(), 3);
//! ```
//!
//! Rows are inserted verbatim: explicit ids, no existence checks.

use crate::error::DbResult;
use async_trait::async_trait;

/// Default `last_active` for fixture masters.
pub const DEFAULT_LAST_ACTIVE: i64 = 9998;

/// A `projects` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

impl Project {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: format!("fake_project-{id}"),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A `builders` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub projectid: Option<i64>,
}

impl Builder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: "some:builder".to_string(),
            description: None,
            projectid: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn projectid(mut self, projectid: i64) -> Self {
        self.projectid = Some(projectid);
        self
    }
}

/// A `masters` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Master {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub last_active: i64,
}

impl Master {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: format!("master-{id}"),
            active: true,
            last_active: DEFAULT_LAST_ACTIVE,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn last_active(mut self, seconds: i64) -> Self {
        self.last_active = seconds;
        self
    }
}

/// A `builder_masters` link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderMaster {
    pub builderid: i64,
    pub masterid: i64,
}

impl BuilderMaster {
    pub fn new(builderid: i64, masterid: i64) -> Self {
        Self {
            builderid,
            masterid,
        }
    }
}

/// A `tags` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl Tag {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A `builders_tags` link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderTag {
    pub builderid: i64,
    pub tagid: i64,
}

impl BuilderTag {
    pub fn new(builderid: i64, tagid: i64) -> Self {
        Self { builderid, tagid }
    }
}

/// A `schedulers` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduler {
    pub id: i64,
    pub name: String,
    pub enabled: bool,
}

impl Scheduler {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: format!("scheduler-{id}"),
            enabled: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A `scheduler_masters` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerMaster {
    pub schedulerid: i64,
    pub masterid: i64,
}

impl SchedulerMaster {
    pub fn new(schedulerid: i64, masterid: i64) -> Self {
        Self {
            schedulerid,
            masterid,
        }
    }
}

/// Any fixture row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Project(Project),
    Builder(Builder),
    Master(Master),
    BuilderMaster(BuilderMaster),
    Tag(Tag),
    BuilderTag(BuilderTag),
    Scheduler(Scheduler),
    SchedulerMaster(SchedulerMaster),
}

macro_rules! impl_row_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Row {
                fn from(row: $variant) -> Self {
                    Row::$variant(row)
                }
            }
        )*
    };
}

impl_row_from!(
    Project,
    Builder,
    Master,
    BuilderMaster,
    Tag,
    BuilderTag,
    Scheduler,
    SchedulerMaster,
);

/// Backends that can be seeded with fixture rows.
#[async_trait]
pub trait FixtureLoader: Send + Sync {
    /// Insert `rows` in order, exactly as given.
    async fn insert_test_data(&self, rows: &[Row]) -> DbResult<()>;
}
