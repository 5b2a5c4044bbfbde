//! pds-site CLI
//!
//! Usage: pds-site <COMMAND>
//!
//! Commands:
//!   build      Compile stylesheets, bundle scripts and publish dist/
//!   vendors    Resolve configured vendor packages
//!   scenarios  Run access-flow scenarios

use std::process::ExitCode;

use clap::Parser;

use pds_site::presentation::Cli;

mod commands;
mod ui;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;
    let command = cli.command.name();

    match commands::dispatch(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            ui::print_error(command, &err, json);
            ExitCode::FAILURE
        }
    }
}
