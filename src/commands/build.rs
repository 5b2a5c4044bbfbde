//! `build` command

use anyhow::Result;

use pds_site::presentation::cli::BuildArgs;
use pds_site::presentation::factory::create_asset_builder;

use super::Context;
use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, DataEvent, PhaseEvent, StartEvent};
use crate::ui::output::{render_build, render_phase};

const COMMAND: &str = "build";

pub fn cmd_build(ctx: &Context, args: &BuildArgs) -> Result<bool> {
    let config = args.apply(ctx.config.clone());
    let builder = create_asset_builder(&ctx.project_root, &config);

    if ctx.json {
        emit_event(&StartEvent::new(COMMAND))?;
    }

    let report = builder.run(|phase| {
        if ctx.json {
            if let Err(e) = emit_event(&PhaseEvent::new(COMMAND, phase)) {
                tracing::warn!(error = %e, "cannot write phase event");
            }
        } else if ctx.chatty() && !phase.is_terminal() {
            println!("{}", render_phase(&ctx.icons, phase));
        }
    })?;

    if ctx.json {
        emit_event(&DataEvent::new(COMMAND, &report))?;
        emit_event(&CompleteEvent::success(COMMAND).with_duration(report.duration_ms))?;
    } else if ctx.chatty() {
        print!(
            "{}",
            render_build(
                &ctx.icons,
                &report,
                ctx.verbosity >= pds_site::config::Verbosity::Verbose
            )
        );
    }
    Ok(true)
}
