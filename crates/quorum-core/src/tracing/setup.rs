//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "QUORUM_LOG";

/// Filter used when `QUORUM_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "quorum_core=info,quorum_analysis=info";

/// Initialize the quorum tracing/logging system.
///
/// Reads `QUORUM_LOG` for per-crate log levels, e.g.
/// `QUORUM_LOG=quorum_analysis::mixture=debug,quorum_core=warn`.
///
/// Idempotent: later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A subscriber may already be installed by the host application.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
