//! Access-flow harness
//!
//! Scenarios are lists of typed steps. The [`StepRegistry`] binds each step id
//! to a handler; the [`ScenarioRunner`] drives a browser through them and
//! records one outcome per scenario.

mod loader;
mod registry;
mod runner;
mod steps;

pub use loader::{load_scenarios, parse_scenarios, ScenarioFile};
pub use registry::{StepContext, StepError, StepHandler, StepRegistry};
pub use runner::{HarnessReport, ScenarioOutcome, ScenarioReport, ScenarioRunner};
pub use steps::url_matches;
