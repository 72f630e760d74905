//! Diagnostic logging for the gridscout binary.
//!
//! The engine crates log through the `log` facade. The binary installs a
//! `tracing-subscriber` formatter with the `log` bridge so those records
//! reach standard error. Standard output stays reserved for JSON.

use tracing_subscriber::{EnvFilter, fmt};

use crate::CliError;

/// Environment variable holding the log filter, e.g. `gridscout_budget=debug`.
pub const LOG_ENV: &str = "GRIDSCOUT_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the process-wide log subscriber.
///
/// The filter is read from [`LOG_ENV`]. A missing or malformed value falls
/// back to warnings only.
///
/// # Errors
/// Returns [`CliError::Logging`] when a subscriber or `log` logger is already
/// installed.
pub fn init_logging() -> Result<(), CliError> {
    let spec = std::env::var(LOG_ENV).ok();
    fmt()
        .with_env_filter(log_filter(spec.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(CliError::Logging)
}

/// Build the filter for `spec`, defaulting to warnings.
#[must_use]
pub(crate) fn log_filter(spec: Option<&str>) -> EnvFilter {
    spec.map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
