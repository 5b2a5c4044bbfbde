//! Configuration module for pds-site
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PDS_*)
//! 3. Project config (pds.toml)
//! 4. User config (~/.config/pds-site/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{ConfigWarning, LoadedConfig, PROJECT_CONFIG_FILE};
pub use types::{
    BuildSection, Config, HarnessSection, ImageStaging, OutputSection, VendorEntry, Verbosity,
};
