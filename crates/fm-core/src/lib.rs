//! fm-core - Core library for Foreman
//!
//! This crate provides the record types returned by the connector layer,
//! configuration parsing for `foreman.yml`, the clock abstraction used for
//! master heartbeats, and the name hashing shared by every backend.

pub mod clock;
pub mod config;
pub mod error;
pub mod name_hash;
pub mod records;

pub use clock::{epoch_to_datetime, Clock, ManualClock, SystemClock};
pub use config::{Config, DatabaseConfig, MasterConfig};
pub use error::{CoreError, CoreResult};
pub use name_hash::name_hash;
pub use records::{BuilderRecord, MasterRecord, ProjectRecord, SchedulerRecord};
