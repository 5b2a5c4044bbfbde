//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PdsError, PdsResult};

use super::types::{Config, ImageStaging, Verbosity};

/// Project config file name, looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "pds.toml";

/// An unknown key found while loading a config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// A configuration together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// `None` when only defaults (plus env) apply
    pub source: Option<PathBuf>,
}

/// Parse `path`, collecting unknown keys instead of rejecting them
pub fn load_with_warnings(path: &Path) -> PdsResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut ignored = Vec::new();
    let config: Config =
        serde_ignored::deserialize(toml::de::Deserializer::new(&content), |key_path| {
            ignored.push(key_path.to_string());
        })
        .map_err(|e| PdsError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let warnings = ignored
        .iter()
        .map(|key_path| {
            let key = key_path.rsplit('.').next().unwrap_or(key_path);
            ConfigWarning {
                key: key.to_string(),
                file: path.to_path_buf(),
                line: line_of(&content, key),
                suggestion: suggest_key(key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the configuration for a run.
///
/// An explicit path must exist. Otherwise the project config wins over the
/// user config. A file that exists but does not parse is an error rather than
/// a silent fallback to defaults.
pub fn discover(project_root: &Path, explicit: Option<&Path>) -> PdsResult<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project_config = project_root.join(PROJECT_CONFIG_FILE);
            if project_config.exists() {
                Some(project_config)
            } else {
                user_config_path().filter(|p| p.exists())
            }
        }
    };

    let (config, warnings) = match &candidate {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading configuration");
            load_with_warnings(path)?
        }
        None => (Config::default(), Vec::new()),
    };

    Ok(LoadedConfig {
        config: with_env_overrides(config, |key| std::env::var(key).ok()),
        warnings,
        source: candidate,
    })
}

/// Apply environment variable overrides (PDS_* prefix)
///
/// `lookup` abstracts the environment so overrides can be exercised without
/// mutating the process environment.
pub fn with_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(dir) = lookup("PDS_ASSETS_DIR") {
        config.build.assets_dir = PathBuf::from(dir);
    }

    if let Some(dir) = lookup("PDS_DIST_DIR") {
        config.build.dist_dir = PathBuf::from(dir);
    }

    // PDS_VENDORS (comma-separated, ordered)
    if let Some(vendors) = lookup("PDS_VENDORS") {
        let parsed: Vec<String> = vendors
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !parsed.is_empty() {
            config.build.vendors = parsed;
        }
    }

    if let Some(staging) = lookup("PDS_IMAGE_STAGING") {
        match staging.parse::<ImageStaging>() {
            Ok(staging) => config.build.image_staging = staging,
            Err(e) => tracing::warn!("ignoring PDS_IMAGE_STAGING: {}", e),
        }
    }

    if let Some(val) = lookup("PDS_COMPILE_STYLESHEETS") {
        config.build.compile_stylesheets = val.to_lowercase() != "false" && val != "0";
    }

    if let Some(file) = lookup("PDS_CREDENTIALS_FILE") {
        config.harness.credentials_file = PathBuf::from(file);
    }

    if let Some(env) = lookup("PDS_CREDENTIALS_ENV") {
        config.harness.environment = Some(env).filter(|e| !e.is_empty());
    }

    if let Some(campus) = lookup("PDS_CAMPUS") {
        match campus.parse() {
            Ok(campus) => config.harness.campus = Some(campus),
            Err(e) => tracing::warn!("ignoring PDS_CAMPUS: {}", e),
        }
    }

    if let Some(verbosity) = lookup("PDS_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    config
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pds-site").join("config.toml"))
}

/// First line mentioning `key`, 1-based
fn line_of(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .enumerate()
        .find_map(|(i, line)| line.contains(key).then_some(i + 1))
}

/// Every key the config schema knows, for typo suggestions
const KNOWN_KEYS: &[&str] = &[
    "build",
    "assets_dir",
    "dist_dir",
    "sass_dir",
    "css_dir",
    "vendors",
    "image_staging",
    "compile_stylesheets",
    "output_style",
    "search_paths",
    "registry",
    "stylesheets_dir",
    "harness",
    "credentials_file",
    "environment",
    "campus",
    "timeout_secs",
    "max_redirects",
    "user_agent",
    "output",
    "verbosity",
];

/// Closest known key within two edits
fn suggest_key(unknown: &str) -> Option<String> {
    KNOWN_KEYS
        .iter()
        .map(|known| (edit_distance(unknown, known), *known))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, known)| known.to_string())
}

/// Levenshtein distance over chars, single-row
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b.len()]
}
