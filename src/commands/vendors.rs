//! `vendors` command

use anyhow::Result;
use serde_json::json;

use pds_site::presentation::factory::create_asset_builder;

use super::Context;
use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, DataEvent, StartEvent};
use crate::ui::output::render_vendors;

const COMMAND: &str = "vendors";

pub fn cmd_vendors(ctx: &Context) -> Result<bool> {
    let vendors = create_asset_builder(&ctx.project_root, &ctx.config).vendors()?;

    if ctx.json {
        emit_event(&StartEvent::new(COMMAND))?;
        let listed: Vec<_> = vendors
            .iter()
            .map(|v| {
                json!({
                    "name": v.name(),
                    "stylesheets": v.stylesheets_dir(),
                    "images": v.images_dir(),
                    "javascripts": v.javascripts_dir(),
                })
            })
            .collect();
        emit_event(&DataEvent::new(COMMAND, json!({ "vendors": listed })))?;
        emit_event(&CompleteEvent::success(COMMAND))?;
    } else {
        print!("{}", render_vendors(&vendors));
    }
    Ok(true)
}
