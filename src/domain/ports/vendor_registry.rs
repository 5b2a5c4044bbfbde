//! Vendor registry port
//!
//! Maps a vendor package's logical name to its stylesheets directory.

use std::path::PathBuf;

use crate::domain::vendor::VendorPackage;
use crate::error::{PdsError, PdsResult};

pub trait VendorRegistry {
    /// Stylesheets directory registered for `name`
    fn stylesheets_dir(&self, name: &str) -> Option<PathBuf>;

    /// All registered names, sorted
    fn names(&self) -> Vec<String>;

    /// Resolve a single package; an unregistered name is fatal.
    fn resolve(&self, name: &str) -> PdsResult<VendorPackage> {
        self.stylesheets_dir(name)
            .map(|dir| VendorPackage::new(name, dir))
            .ok_or_else(|| PdsError::UnknownVendor {
                name: name.to_string(),
                known: self.names().join(", "),
            })
    }

    /// Resolve packages in the given order, stopping at the first unknown name
    fn resolve_all(&self, names: &[String]) -> PdsResult<Vec<VendorPackage>> {
        names.iter().map(|name| self.resolve(name)).collect()
    }
}
