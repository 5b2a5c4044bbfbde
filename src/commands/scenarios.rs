//! `scenarios` command

use std::time::Instant;

use anyhow::{Context as _, Result};

use pds_site::application::harness::{load_scenarios, ScenarioRunner, StepRegistry};
use pds_site::presentation::cli::ScenarioArgs;
use pds_site::presentation::factory::{create_browser, create_credential_source};

use super::Context;
use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, ScenarioEvent, StartEvent};
use crate::ui::output::{render_scenario, render_summary};

const COMMAND: &str = "scenarios";

pub fn cmd_scenarios(ctx: &Context, args: &ScenarioArgs) -> Result<bool> {
    let started = Instant::now();
    let config = args.apply(ctx.config.clone());

    let file = if args.file.is_absolute() {
        args.file.clone()
    } else {
        ctx.project_root.join(&args.file)
    };
    let mut scenarios = load_scenarios(&file)?;
    if let Some(filter) = &args.scenario {
        scenarios.retain(|s| s.name.contains(filter.as_str()));
        if scenarios.is_empty() {
            anyhow::bail!("no scenario in {} matches '{}'", file.display(), filter);
        }
    }

    let credentials = create_credential_source(&ctx.project_root, &config.harness);
    let mut browser = create_browser(&config.harness).context("cannot start browser")?;
    let registry = StepRegistry::standard();
    let runner = ScenarioRunner::new(&registry)
        .with_campus(config.harness.campus)
        .reset_between_scenarios(!args.share_session);

    if ctx.json {
        emit_event(&StartEvent::new(COMMAND))?;
    }
    tracing::info!(
        file = %file.display(),
        scenarios = scenarios.len(),
        campus = ?config.harness.campus,
        "running scenarios"
    );

    let report = runner.run_all(&mut browser, &credentials, &scenarios, |result| {
        if ctx.json {
            if let Err(e) = emit_event(&ScenarioEvent::new(COMMAND, result)) {
                tracing::warn!(error = %e, "cannot write scenario event");
            }
        } else if ctx.chatty() || result.outcome.is_failed() {
            print!("{}", render_scenario(&ctx.icons, result));
        }
    });

    let success = report.is_success();
    if ctx.json {
        let complete = if success {
            CompleteEvent::success(COMMAND)
        } else {
            CompleteEvent::failure(COMMAND)
        };
        emit_event(&complete.with_duration(started.elapsed().as_millis() as u64))?;
    } else if ctx.chatty() || !success {
        print!("{}", render_summary(&report));
    }
    Ok(success)
}
