//! Build results

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::build_phase::BuildPhase;
use crate::domain::manifest::BuildManifest;
use crate::domain::vendor::VendorPackage;

/// One published file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistFile {
    /// Relative to the distribution root
    pub path: PathBuf,
    pub hash: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub phase: BuildPhase,
    pub dist_root: PathBuf,
    pub vendors: Vec<VendorPackage>,
    pub manifest: BuildManifest,
    pub files: Vec<DistFile>,
    pub stylesheets_compiled: usize,
    pub scripts_bundled: usize,
    pub duration_ms: u64,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

impl BuildReport {
    /// Published files under one `dist/` subdirectory
    pub fn files_in(&self, dir: &str) -> impl Iterator<Item = &DistFile> + '_ {
        let dir = dir.to_string();
        self.files
            .iter()
            .filter(move |f| f.path.starts_with(&dir))
    }
}
