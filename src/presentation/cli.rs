//! CLI Argument Parsing
//!
//! Global flags (`--json`, `--verbose`, `--config`, `--project`) are inherited
//! by all subcommands. Flags override environment variables, which override
//! configuration files.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, ImageStaging};
use crate::domain::ports::OutputStyle;
use crate::domain::scenario::Campus;

/// pds-site - library login site assets and access checks
#[derive(Parser, Debug)]
#[command(name = "pds-site")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./pds.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project root
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub project: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile stylesheets, bundle scripts and publish dist/
    Build(BuildArgs),

    /// Resolve configured vendor packages and print their paths
    Vendors,

    /// Run access-flow scenarios from a YAML file
    Scenarios(ScenarioArgs),
}

impl Commands {
    /// Name used in JSON events
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Build(_) => "build",
            Commands::Vendors => "vendors",
            Commands::Scenarios(_) => "scenarios",
        }
    }
}

#[derive(clap::Args, Debug, Default)]
pub struct BuildArgs {
    /// Distribution directory
    #[arg(long)]
    pub dist: Option<PathBuf>,

    /// Vendor package to include (repeatable; replaces the configured list)
    #[arg(long = "vendor")]
    pub vendors: Vec<String>,

    /// Where vendor images are staged: working-tree or dist
    #[arg(long)]
    pub image_staging: Option<ImageStaging>,

    /// Publish existing assets/css instead of compiling stylesheets
    #[arg(long)]
    pub no_compile: bool,

    /// Compressed CSS output
    #[arg(long)]
    pub compressed: bool,
}

impl BuildArgs {
    /// Apply flags on top of a resolved configuration
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(dist) = &self.dist {
            config.build.dist_dir = dist.clone();
        }
        if !self.vendors.is_empty() {
            config.build.vendors = self.vendors.clone();
        }
        if let Some(staging) = self.image_staging {
            config.build.image_staging = staging;
        }
        if self.no_compile {
            config.build.compile_stylesheets = false;
        }
        if self.compressed {
            config.build.output_style = OutputStyle::Compressed;
        }
        config
    }
}

#[derive(clap::Args, Debug)]
pub struct ScenarioArgs {
    /// Scenario file
    pub file: PathBuf,

    /// Where this run happens from: on or off
    #[arg(long)]
    pub campus: Option<Campus>,

    /// Only run scenarios whose name contains this text
    #[arg(long)]
    pub scenario: Option<String>,

    /// Credentials file
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Top-level key of the credentials file
    #[arg(long)]
    pub environment: Option<String>,

    /// Keep cookies between scenarios unless a scenario asks to be logged out
    #[arg(long)]
    pub share_session: bool,
}

impl ScenarioArgs {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(campus) = self.campus {
            config.harness.campus = Some(campus);
        }
        if let Some(file) = &self.credentials {
            config.harness.credentials_file = file.clone();
        }
        if let Some(env) = &self.environment {
            config.harness.environment = Some(env.clone());
        }
        config
    }
}
