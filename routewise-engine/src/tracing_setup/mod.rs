//! Tracing setup: subscriber initialisation and structured events.

pub mod events;

use tracing_subscriber::EnvFilter;

use routewise_core::config::LoggingConfig;

/// Environment variable holding an `EnvFilter` directive. Takes precedence
/// over the configured level.
pub const LOG_ENV_VAR: &str = "ROUTEWISE_LOG";

/// Initialize tracing with the default logging section: JSON lines at `info`,
/// or whatever `ROUTEWISE_LOG` says.
pub fn init_tracing() -> bool {
    init_from_config(&LoggingConfig::default())
}

/// Initialize tracing from the engine's logging section.
///
/// Returns false if a global subscriber was already installed.
pub fn init_from_config(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);
    if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
