//! fm-db - Connector layer for Foreman
//!
//! This crate provides the connector traits for builders, masters, tags,
//! projects, and schedulers, together with two interchangeable backends:
//! [`DuckDbConnector`] over a migrated DuckDB schema and [`FakeConnector`]
//! over in-process tables.

pub mod ddl;
pub mod error;
pub mod fake;
pub mod fixtures;
pub mod migration;
pub mod real;
pub mod traits;

pub use error::{DbError, DbResult};
pub use fake::FakeConnector;
pub use fixtures::{FixtureLoader, Row};
pub use real::DuckDbConnector;
pub use traits::{
    BuildersConnector, Connector, MastersConnector, ProjectsConnector, SchedulersConnector,
    TagsConnector,
};
