//! NDJSON output
//!
//! One JSON object per line on stdout. Logs go to stderr, so the stream stays
//! machine-readable.
//!
//! ```ignore
//! emit_event(&StartEvent::new("build"))?;
//! emit_event(&CompleteEvent::success("build").with_duration(12))?;
//! ```

pub mod events;

use serde::Serialize;
use std::io::{self, Write};

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &impl Serialize) -> io::Result<()> {
    let line = serde_json::to_string(event).map_err(io::Error::other)?;
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Write a typed event to stdout.
pub fn emit_event(event: &impl Serialize) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, event)?;
    out.flush()
}
