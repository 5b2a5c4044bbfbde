//! Vendor asset packages
//!
//! A vendor package is registered by its stylesheets directory; its images and
//! scripts live in sibling directories by convention.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// A resolved vendor package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorPackage {
    name: String,
    stylesheets_dir: PathBuf,
}

impl VendorPackage {
    pub fn new(name: impl Into<String>, stylesheets_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            stylesheets_dir: stylesheets_dir.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stylesheets_dir(&self) -> &Path {
        &self.stylesheets_dir
    }

    /// `<stylesheets_dir>/..`
    pub fn base_dir(&self) -> PathBuf {
        self.stylesheets_dir.join("..")
    }

    /// `<stylesheets_dir>/../images`
    pub fn images_dir(&self) -> PathBuf {
        self.base_dir().join("images")
    }

    /// `<stylesheets_dir>/../javascripts`
    pub fn javascripts_dir(&self) -> PathBuf {
        self.base_dir().join("javascripts")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sibling_dirs_follow_relative_convention() {
        let vendor = VendorPackage::new("bootstrap", "/gems/bootstrap/assets/stylesheets");
        assert_eq!(
            vendor.images_dir(),
            PathBuf::from("/gems/bootstrap/assets/stylesheets/../images")
        );
        assert_eq!(
            vendor.javascripts_dir(),
            PathBuf::from("/gems/bootstrap/assets/stylesheets/../javascripts")
        );
    }

    proptest! {
        #[test]
        fn resolution_is_deterministic(segments in prop::collection::vec("[a-z][a-z0-9_-]{0,8}", 1..5)) {
            let dir: PathBuf = segments.iter().collect();
            let first = VendorPackage::new("v", dir.clone());
            let second = VendorPackage::new("v", dir.clone());

            prop_assert_eq!(first.images_dir(), second.images_dir());
            prop_assert_eq!(first.images_dir(), dir.join("..").join("images"));
            prop_assert_eq!(first.javascripts_dir(), dir.join("..").join("javascripts"));
        }
    }
}
