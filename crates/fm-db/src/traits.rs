//! Connector trait definitions
//!
//! Every backend implements all of these with identical observable
//! behaviour; the conformance suite in `tests/` holds them to it.

use crate::error::DbResult;
use async_trait::async_trait;
use fm_core::{BuilderRecord, MasterRecord, ProjectRecord, SchedulerRecord};

/// Builders: find-or-create by name, master links, descriptive info.
#[async_trait]
pub trait BuildersConnector: Send + Sync {
    /// Return the id of the builder called `name`.
    ///
    /// A missing builder is created when `auto_create` is set; otherwise
    /// `None` is returned.
    async fn find_builder_id(&self, name: &str, auto_create: bool) -> DbResult<Option<i64>>;

    /// Link a builder to a master. Linking twice is a no-op.
    async fn add_builder_master(&self, builderid: i64, masterid: i64) -> DbResult<()>;

    /// Unlink a builder from a master. Unlinking a missing link is a no-op.
    async fn remove_builder_master(&self, builderid: i64, masterid: i64) -> DbResult<()>;

    /// Fetch a single builder, or `None` if it does not exist.
    async fn get_builder(&self, builderid: i64) -> DbResult<Option<BuilderRecord>>;

    /// List builders ordered by id, optionally restricted to those linked
    /// to `masterid` and/or owned by `projectid`.
    async fn get_builders(
        &self,
        masterid: Option<i64>,
        projectid: Option<i64>,
    ) -> DbResult<Vec<BuilderRecord>>;

    /// Overwrite description and project and replace the tag set.
    async fn update_builder_info(
        &self,
        builderid: i64,
        description: Option<&str>,
        projectid: Option<i64>,
        tags: &[String],
    ) -> DbResult<()>;
}

/// Masters: find-or-create by name and active/inactive state.
#[async_trait]
pub trait MastersConnector: Send + Sync {
    /// Return the id of the master called `name`, creating it (inactive,
    /// `last_active` = now) if needed.
    async fn find_master_id(&self, name: &str) -> DbResult<i64>;

    /// Mark a master active or inactive.
    ///
    /// Returns `true` only if the state actually changed; a missing master
    /// yields `false`. Activation refreshes `last_active`; deactivation
    /// releases every scheduler the master held.
    async fn set_master_state(&self, masterid: i64, active: bool) -> DbResult<bool>;

    /// Fetch a single master, or `None` if it does not exist.
    async fn get_master(&self, masterid: i64) -> DbResult<Option<MasterRecord>>;

    /// List all masters ordered by id.
    async fn get_masters(&self) -> DbResult<Vec<MasterRecord>>;
}

/// Tags attached to builders.
#[async_trait]
pub trait TagsConnector: Send + Sync {
    /// Return the id of the tag called `name`, creating it if needed.
    async fn find_tag_id(&self, name: &str) -> DbResult<i64>;
}

/// Projects that group builders.
#[async_trait]
pub trait ProjectsConnector: Send + Sync {
    /// Return the id of the project called `name`, creating it when
    /// `auto_create` is set.
    async fn find_project_id(&self, name: &str, auto_create: bool) -> DbResult<Option<i64>>;

    /// Fetch a single project.
    async fn get_project(&self, projectid: i64) -> DbResult<Option<ProjectRecord>>;

    /// List all projects ordered by id.
    async fn get_projects(&self) -> DbResult<Vec<ProjectRecord>>;
}

/// Scheduler ownership by masters.
#[async_trait]
pub trait SchedulersConnector: Send + Sync {
    /// Return the id of the scheduler called `name`, creating it (enabled)
    /// if needed.
    async fn find_scheduler_id(&self, name: &str) -> DbResult<i64>;

    /// Claim a scheduler for a master, or release it with `None`.
    ///
    /// Claiming a scheduler already held by a different master is a
    /// [`DbError::Conflict`](crate::DbError::Conflict).
    async fn set_scheduler_master(&self, schedulerid: i64, masterid: Option<i64>)
        -> DbResult<()>;

    /// Fetch a single scheduler.
    async fn get_scheduler(&self, schedulerid: i64) -> DbResult<Option<SchedulerRecord>>;
}

/// The full connector surface a backend offers.
pub trait Connector:
    BuildersConnector + MastersConnector + TagsConnector + ProjectsConnector + SchedulersConnector
{
    /// Backend identifier for logging
    fn db_type(&self) -> &'static str;
}

/// Reject names that can never be stored.
pub(crate) fn check_name(kind: &str, name: &str) -> crate::error::DbResult<()> {
    if name.is_empty() {
        return Err(crate::error::DbError::ConstraintViolation(format!(
            "{kind} name must not be empty"
        )));
    }
    Ok(())
}
