//! Diagnostics for the plugins
//!
//! Nagios reads the first line of stdout, so everything here goes to stderr.
//! The filter is read from `NRPE_PLUGINS_LOG` (same syntax as `RUST_LOG`)
//! and defaults to `warn`.

use std::io;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "NRPE_PLUGINS_LOG";

/// Install the global subscriber. Calling this more than once is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
