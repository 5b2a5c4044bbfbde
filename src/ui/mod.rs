//! User-facing output
//!
//! - `json` - NDJSON events for `--json`
//! - `output` - human-readable rendering
//! - `terminal` - capability detection

pub mod json;
pub mod output;
pub mod terminal;

use crate::ui::json::events::{CompleteEvent, ErrorEvent};
use crate::ui::output::{error_code, error_help, render_error, Icons};

/// Report a command failure on the channel the user asked for
pub fn print_error(command: &str, err: &anyhow::Error, json: bool) {
    if json {
        let event = ErrorEvent::new(command, error_code(err), format!("{:#}", err))
            .with_help(error_help(err));
        let _ = json::emit_event(&event);
        let _ = json::emit_event(&CompleteEvent::failure(command));
        return;
    }
    eprint!("{}", render_error(&Icons::detect(), err));
}
