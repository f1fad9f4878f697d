//! CLI command implementations

pub(crate) mod builders;
pub(crate) mod common;
pub(crate) mod init;
pub(crate) mod masters;
pub(crate) mod projects;
