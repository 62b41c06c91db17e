use thiserror::Error;
use tracing_subscriber::{
    EnvFilter,
    filter::ParseError,
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::{LogConfig, LogFormat};

/// Target prefix of every record this crate emits
const CRATE_TARGET: &str = "library_lending";

/// Filter used when `RUST_LOG` is not set
#[must_use]
pub fn default_directive(config: &LogConfig, verbose: bool) -> String {
    let level = if verbose { "debug" } else { config.level.as_str() };
    format!("{CRATE_TARGET}={level}")
}

/// Failure to set up the global subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured level is not a valid filter directive
    #[error("Invalid log level in configuration: {0}")]
    Filter(#[from] ParseError),
    /// Another global subscriber is already installed
    #[error("Failed to install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Filter built from the configured level, ignoring `RUST_LOG`
///
/// # Errors
///
/// Returns the parse error when `[log] level` is not a valid level or
/// directive list.
pub fn configured_filter(config: &LogConfig, verbose: bool) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(default_directive(config, verbose))
}

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence over the configured level when it parses.
///
/// # Errors
///
/// Returns `Filter` if the configured level does not parse and `Init` if a
/// global subscriber is already installed.
pub fn init_logging(config: &LogConfig, verbose: bool) -> Result<(), LoggingError> {
    let configured = configured_filter(config, verbose)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or(configured);
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false).json())
            .try_init()?,
    }
    Ok(())
}
