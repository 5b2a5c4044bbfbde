//! Application Layer
//!
//! Use cases that orchestrate domain logic and infrastructure.
//!
//! - `build` - assemble the distribution tree
//! - `harness` - run access-flow scenarios against a browser

pub mod build;
pub mod harness;

pub use build::{AssetBuilder, BuildOptions, BuildReport};
pub use harness::{HarnessReport, ScenarioOutcome, ScenarioRunner, StepRegistry};
