//! Tracing setup: structured JSON logging with per-stage spans and events.

pub mod events;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use medcot_core::config::ObservabilityConfig;

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "MEDCOT_LOG";

static INIT: Once = Once::new();

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects `MEDCOT_LOG` for filtering and defaults to `info`. Only the
/// first call in a process installs a subscriber.
pub fn init_tracing() {
    install(EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info")));
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter));
}

/// Initialize from configuration. `MEDCOT_LOG` still wins when set.
/// Does nothing when tracing is disabled.
pub fn init_from_config(config: &ObservabilityConfig) {
    if !config.tracing_enabled {
        return;
    }
    install(
        EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
    );
}

fn install(filter: EnvFilter) {
    INIT.call_once(|| {
        // Another subscriber may already be installed by the host application.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init();
    });
}
