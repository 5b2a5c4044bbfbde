//! pds-site - asset builder and access-flow harness for the library login site
//!
//! The builder assembles `dist/{css,images,javascripts}` from the project's
//! assets and its vendor packages. The harness drives a browser through
//! login and proxy-denial scenarios with credentials from a secrets file.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod telemetry;

// Re-exports for convenience
pub use application::{AssetBuilder, BuildOptions, BuildReport, HarnessReport, ScenarioRunner, StepRegistry};
pub use config::Config;
pub use domain::{AssetKind, BuildPhase, Campus, Scenario, Step, StepId, VendorPackage};
pub use error::{PdsError, PdsResult};
