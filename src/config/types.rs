//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::ports::OutputStyle;
use crate::domain::scenario::Campus;
use crate::error::PdsResult;

use super::loader::{self, ConfigWarning, LoadedConfig};

/// Where vendor images are staged before publishing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImageStaging {
    /// Into `assets/images`, published with local images
    #[default]
    #[serde(alias = "working-tree")]
    WorkingTree,
    /// Straight into `dist/images`
    #[serde(alias = "dist")]
    Distribution,
}

impl FromStr for ImageStaging {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "working_tree" | "assets" => Ok(ImageStaging::WorkingTree),
            "distribution" | "dist" => Ok(ImageStaging::Distribution),
            other => Err(format!(
                "unknown image staging '{}' (expected working-tree or dist)",
                other
            )),
        }
    }
}

/// `[build]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// Relative to `assets_dir`
    #[serde(default = "default_sass_dir")]
    pub sass_dir: PathBuf,

    /// Relative to `assets_dir`
    #[serde(default = "default_css_dir")]
    pub css_dir: PathBuf,

    /// Vendor packages, in staging and search order
    #[serde(default)]
    pub vendors: Vec<String>,

    #[serde(default)]
    pub image_staging: ImageStaging,

    #[serde(default = "default_true")]
    pub compile_stylesheets: bool,

    #[serde(default)]
    pub output_style: OutputStyle,

    /// Explicit script search paths; empty means project first, then vendors
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            dist_dir: default_dist_dir(),
            sass_dir: default_sass_dir(),
            css_dir: default_css_dir(),
            vendors: Vec::new(),
            image_staging: ImageStaging::default(),
            compile_stylesheets: true,
            output_style: OutputStyle::default(),
            search_paths: Vec::new(),
        }
    }
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_sass_dir() -> PathBuf {
    PathBuf::from("sass")
}

fn default_css_dir() -> PathBuf {
    PathBuf::from("css")
}

fn default_true() -> bool {
    true
}

/// `[registry.<name>]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorEntry {
    pub stylesheets_dir: PathBuf,
}

/// `[harness]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessSection {
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,

    /// Top-level key of the credentials file to read under
    #[serde(default)]
    pub environment: Option<String>,

    /// Where this run is happening from
    #[serde(default)]
    pub campus: Option<Campus>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HarnessSection {
    fn default() -> Self {
        Self {
            credentials_file: default_credentials_file(),
            environment: None,
            campus: None,
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_credentials_file() -> PathBuf {
    PathBuf::from("config/credentials.yml")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    10
}

fn default_user_agent() -> String {
    format!("pds-site/{}", env!("CARGO_PKG_VERSION"))
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Raise to at least the level implied by `-v` flags
    pub fn with_flags(self, count: u8) -> Self {
        let from_flags = match count {
            0 => Verbosity::Quiet,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        };
        self.max(from_flags)
    }

    /// `tracing` filter directive for this level
    pub fn filter_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// `[output]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub build: BuildSection,

    /// Vendor packages by logical name
    #[serde(default)]
    pub registry: BTreeMap<String, VendorEntry>,

    #[serde(default)]
    pub harness: HarnessSection,

    #[serde(default)]
    pub output: OutputSection,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PdsResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PdsResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Explicit file, project config, user config, or defaults, then env
    pub fn discover(project_root: &Path, explicit: Option<&Path>) -> PdsResult<LoadedConfig> {
        loader::discover(project_root, explicit)
    }

    /// Apply environment variable overrides (PDS_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }
}
