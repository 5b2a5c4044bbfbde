//! Common test utilities for pds-site CLI tests.
//!
//! - `TestEnv`: isolated project and home directories plus a CLI runner
//! - Fixtures: a minimal site with one vendor package

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
