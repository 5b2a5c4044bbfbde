//! Logging bootstrap for the binary
//!
//! Events go to stderr so `--json` output on stdout stays parseable.
//! `RUST_LOG` takes precedence over the verbosity flags.

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Filter for the given verbosity, unless `RUST_LOG` is set
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,pds_site={}",
            verbosity.filter_directive()
        ))
    })
}

/// Install the global subscriber
///
/// Calling this twice is harmless; the first subscriber stays.
pub fn init(verbosity: Verbosity) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(verbosity >= Verbosity::Debug)
        .without_time()
        .try_init();
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
