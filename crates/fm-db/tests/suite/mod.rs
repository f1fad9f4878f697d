//! Behavioural tests every connector backend must pass.
//!
//! Each test is a generic async function over the connector; the
//! `conformance_suite!` macro in `conformance.rs` instantiates all of them
//! once per backend.

pub mod builders;
pub mod schedulers;
pub mod tags;
