//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with session output. The filter is
//! read from `PENNYWISE_LOG` (for example `PENNYWISE_LOG=pennywise=debug`).

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "PENNYWISE_LOG";

const DEFAULT_FILTER: &str = "pennywise=warn";

static INIT: Once = Once::new();

/// Install the global subscriber; later calls do nothing
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr);

        // A subscriber set elsewhere (e.g. by a test harness) wins
        let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
    });
}
