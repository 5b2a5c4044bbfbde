//! Asset build use case

mod options;
mod plan;
mod result;
mod use_case;

pub use options::BuildOptions;
pub use plan::{bundle_config, plan_manifest};
pub use result::{BuildReport, DistFile};
pub use use_case::AssetBuilder;
