//! Build options
//!
//! Fully resolved before the builder is constructed; the builder never
//! changes them.

use std::path::{Component, Path, PathBuf};

use crate::config::{BuildSection, ImageStaging};
use crate::domain::asset::AssetKind;
use crate::domain::ports::OutputStyle;
use crate::domain::vendor::VendorPackage;
use crate::error::{PdsError, PdsResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub project_root: PathBuf,
    pub assets_dir: PathBuf,
    pub dist_dir: PathBuf,
    pub sass_dir: PathBuf,
    pub css_dir: PathBuf,
    pub vendors: Vec<String>,
    pub image_staging: ImageStaging,
    pub compile_stylesheets: bool,
    pub output_style: OutputStyle,
    /// Explicit script search paths; empty derives project-then-vendors
    pub search_paths: Vec<PathBuf>,
}

impl BuildOptions {
    pub fn from_section(project_root: impl Into<PathBuf>, section: &BuildSection) -> Self {
        Self {
            project_root: project_root.into(),
            assets_dir: section.assets_dir.clone(),
            dist_dir: section.dist_dir.clone(),
            sass_dir: section.sass_dir.clone(),
            css_dir: section.css_dir.clone(),
            vendors: section.vendors.clone(),
            image_staging: section.image_staging,
            compile_stylesheets: section.compile_stylesheets,
            output_style: section.output_style,
            search_paths: section.search_paths.clone(),
        }
    }

    fn rooted(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Local working assets tree
    pub fn assets_root(&self) -> PathBuf {
        self.rooted(&self.assets_dir)
    }

    /// Distribution tree
    pub fn dist_root(&self) -> PathBuf {
        self.rooted(&self.dist_dir)
    }

    pub fn sass_root(&self) -> PathBuf {
        self.assets_root().join(&self.sass_dir)
    }

    /// Where compiled CSS lands in the working tree
    pub fn css_root(&self) -> PathBuf {
        self.assets_root().join(&self.css_dir)
    }

    /// `assets/<kind>`; stylesheets map to the compiled CSS directory
    pub fn assets_dir_for(&self, kind: AssetKind) -> PathBuf {
        match kind {
            AssetKind::Stylesheets => self.css_root(),
            other => self.assets_root().join(other.dir_name()),
        }
    }

    /// `dist/<kind>`
    pub fn dist_dir_for(&self, kind: AssetKind) -> PathBuf {
        self.dist_root().join(kind.dir_name())
    }

    /// Explicit search paths, rooted at the project
    pub fn explicit_search_paths(&self) -> Vec<PathBuf> {
        self.search_paths.iter().map(|p| self.rooted(p)).collect()
    }

    /// Reject a distribution tree whose reset would remove sources
    ///
    /// The dist root may not be, or enclose, the project root, the assets
    /// tree, or a vendor package; nor may it sit inside the assets tree.
    pub fn check_dist_root(&self, vendors: &[VendorPackage]) -> PdsResult<()> {
        let dist_root = self.dist_root();
        let dist = normalized(&dist_root);
        let assets = normalized(&self.assets_root());
        let unsafe_dist = |message: String| PdsError::InvalidConfig {
            file: dist_root.clone(),
            message,
        };

        let mut protected = vec![
            ("the project root".to_string(), normalized(&self.project_root)),
            ("the assets directory".to_string(), assets.clone()),
        ];
        protected.extend(vendors.iter().map(|v| {
            (format!("vendor package '{}'", v.name()), normalized(&v.base_dir()))
        }));

        for (what, path) in &protected {
            if path.starts_with(&dist) {
                return Err(unsafe_dist(format!(
                    "distribution directory would overwrite {what} ({})",
                    path.display()
                )));
            }
        }
        if dist.starts_with(&assets) {
            return Err(unsafe_dist(format!(
                "distribution directory lies inside the assets directory ({})",
                assets.display()
            )));
        }
        Ok(())
    }
}

/// Absolute, with `.` and `..` resolved lexically; the path need not exist
fn normalized(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
