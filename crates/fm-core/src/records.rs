//! Records returned by the connector layer.
//!
//! These are the shapes every backend must produce. Each record can check
//! its own invariants with `validate()`, which the connector conformance
//! suite runs on everything a backend hands back.

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A builder together with its master links and tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderRecord {
    /// Builder id
    pub id: i64,

    /// Builder name (case-sensitive, unique)
    pub name: String,

    /// Free-form description, if one has been set
    pub description: Option<String>,

    /// Owning project, if any
    pub projectid: Option<i64>,

    /// Ids of the masters this builder is configured on, ascending
    pub masterids: Vec<i64>,

    /// Tag names, sorted
    pub tags: Vec<String>,
}

impl BuilderRecord {
    /// Check the record's invariants.
    pub fn validate(&self) -> CoreResult<()> {
        check_identity("builder", self.id, &self.name)?;
        if let Some(projectid) = self.projectid {
            if projectid <= 0 {
                return Err(invalid("builder", self.id, "projectid must be positive"));
            }
        }
        if !is_strictly_ascending(&self.masterids) {
            return Err(invalid(
                "builder",
                self.id,
                "masterids must be ascending and free of duplicates",
            ));
        }
        if self.masterids.iter().any(|id| *id <= 0) {
            return Err(invalid("builder", self.id, "masterids must be positive"));
        }
        if !is_strictly_ascending(&self.tags) {
            return Err(invalid(
                "builder",
                self.id,
                "tags must be sorted and free of duplicates",
            ));
        }
        if self.tags.iter().any(String::is_empty) {
            return Err(invalid("builder", self.id, "tags must not be empty"));
        }
        Ok(())
    }
}

/// A master and its liveness state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterRecord {
    /// Master id
    pub id: i64,

    /// Master name (case-sensitive, unique)
    pub name: String,

    /// Whether the master is currently marked active
    pub active: bool,

    /// Last time the master was marked active (or created)
    pub last_active: DateTime<Utc>,
}

impl MasterRecord {
    /// Check the record's invariants.
    pub fn validate(&self) -> CoreResult<()> {
        check_identity("master", self.id, &self.name)
    }
}

/// A project that builders can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project id
    pub id: i64,

    /// Project name
    pub name: String,
}

impl ProjectRecord {
    /// Check the record's invariants.
    pub fn validate(&self) -> CoreResult<()> {
        check_identity("project", self.id, &self.name)
    }
}

/// A scheduler and the master currently running it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerRecord {
    /// Scheduler id
    pub id: i64,

    /// Scheduler name
    pub name: String,

    /// Whether the scheduler is enabled
    pub enabled: bool,

    /// Master that has claimed this scheduler
    pub masterid: Option<i64>,
}

impl SchedulerRecord {
    /// Check the record's invariants.
    pub fn validate(&self) -> CoreResult<()> {
        check_identity("scheduler", self.id, &self.name)?;
        match self.masterid {
            Some(id) if id <= 0 => Err(invalid("scheduler", self.id, "masterid must be positive")),
            _ => Ok(()),
        }
    }
}

fn check_identity(kind: &'static str, id: i64, name: &str) -> CoreResult<()> {
    if id <= 0 {
        return Err(invalid(kind, id, "id must be positive"));
    }
    if name.is_empty() {
        return Err(invalid(kind, id, "name must not be empty"));
    }
    Ok(())
}

fn invalid(kind: &'static str, id: i64, reason: &str) -> CoreError {
    CoreError::InvalidRecord {
        kind,
        id,
        reason: reason.to_string(),
    }
}

fn is_strictly_ascending<T: Ord>(items: &[T]) -> bool {
    items.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
