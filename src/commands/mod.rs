//! Command handlers
//!
//! Each handler returns `Ok(false)` when it ran to completion but the outcome
//! is a failure (for example a failed scenario), so the exit code reflects it
//! without an error message.

mod build;
mod scenarios;
mod vendors;

use std::path::PathBuf;

use anyhow::Result;

use pds_site::config::{Config, Verbosity};
use pds_site::presentation::{Cli, Commands};

use crate::ui::output::Icons;

/// What every command needs
pub struct Context {
    pub project_root: PathBuf,
    pub config: Config,
    pub json: bool,
    pub verbosity: Verbosity,
    pub icons: Icons,
}

impl Context {
    /// Human output allowed
    pub fn chatty(&self) -> bool {
        !self.json && self.verbosity > Verbosity::Quiet
    }
}

pub fn dispatch(cli: Cli) -> Result<bool> {
    let loaded = match Config::discover(&cli.project, cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            pds_site::telemetry::init(Verbosity::Normal.with_flags(cli.verbose));
            return Err(e.into());
        }
    };

    let verbosity = loaded.config.output.verbosity.with_flags(cli.verbose);
    pds_site::telemetry::init(verbosity);

    if let Some(source) = &loaded.source {
        tracing::debug!(config = %source.display(), "configuration loaded");
    }
    for warning in &loaded.warnings {
        match &warning.suggestion {
            Some(suggestion) => tracing::warn!(
                file = %warning.file.display(),
                line = warning.line,
                "unknown config key '{}'; did you mean '{}'?",
                warning.key,
                suggestion
            ),
            None => tracing::warn!(
                file = %warning.file.display(),
                line = warning.line,
                "unknown config key '{}'",
                warning.key
            ),
        }
    }

    let ctx = Context {
        project_root: cli.project,
        config: loaded.config,
        json: cli.json,
        verbosity,
        icons: Icons::detect(),
    };

    match cli.command {
        Commands::Build(args) => build::cmd_build(&ctx, &args),
        Commands::Vendors => vendors::cmd_vendors(&ctx),
        Commands::Scenarios(args) => scenarios::cmd_scenarios(&ctx, &args),
    }
}
