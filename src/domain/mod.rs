//! Domain Layer
//!
//! Pure types for the asset build and the access-flow harness.
//!
//! ## Structure
//!
//! - `asset` / `vendor` / `manifest` / `build_phase` - asset build model
//! - `credential` / `step` / `scenario` - harness model
//! - `ports/` - Interface definitions for infrastructure
//!
//! Nothing in this layer touches the file system or network directly; all I/O
//! goes through the traits in `ports`.

pub mod asset;
pub mod build_phase;
pub mod credential;
pub mod manifest;
pub mod ports;
pub mod scenario;
pub mod step;
pub mod vendor;

pub use asset::AssetKind;
pub use build_phase::BuildPhase;
pub use credential::Credential;
pub use manifest::{BuildAction, BuildInstruction, BuildManifest};
pub use scenario::{Campus, Preconditions, Scenario};
pub use step::{IdentityProvider, LoginProfile, Step, StepId};
pub use vendor::VendorPackage;
