//! Script bundler port

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::asset::AssetKind;
use crate::error::PdsResult;

/// Everything a bundler needs, fixed at construction.
///
/// `search_paths` order is resolution precedence: on a name collision the
/// first registered path wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleConfig {
    pub search_paths: Vec<PathBuf>,
    pub output_root: PathBuf,
    pub project_root: PathBuf,
    pub kinds: Vec<AssetKind>,
}

impl BundleConfig {
    /// Same configuration writing somewhere else
    pub fn with_output_root(&self, output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            ..self.clone()
        }
    }

    /// Directory holding entry points of `kind`
    pub fn entry_dir(&self, kind: AssetKind) -> PathBuf {
        self.project_root.join(kind.dir_name())
    }

    /// Directory bundles of `kind` are written to
    pub fn output_dir(&self, kind: AssetKind) -> PathBuf {
        self.output_root.join(kind.dir_name())
    }
}

pub trait ScriptBundler {
    /// Bundle every entry point of the configured kinds into
    /// `config.output_root`, returning written files.
    fn bundle(&self, config: &BundleConfig) -> PdsResult<Vec<PathBuf>>;

    /// Locate a logical module name on the search paths
    fn resolve(&self, config: &BundleConfig, name: &str) -> Option<PathBuf>;
}

/// Candidate file names for a logical script name
pub fn candidates(name: &str) -> Vec<String> {
    let name = name.trim();
    if Path::new(name).extension().is_some_and(|ext| ext == "js") {
        vec![name.to_string()]
    } else {
        vec![format!("{}.js", name), format!("{}/index.js", name)]
    }
}
