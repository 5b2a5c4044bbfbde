//! Presentation Layer
//!
//! - `cli` - argument parsing (clap)
//! - `factory` - wires use cases to their infrastructure

pub mod cli;
pub mod factory;

pub use cli::{Cli, Commands};
