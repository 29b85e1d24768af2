//! Log subscriber initialization.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Error type for logging setup.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log level '{level}': {message}")]
    InvalidLevel {
        /// Configured level.
        level: String,
        /// Parser message.
        message: String,
    },
    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; the configured level becomes the default
/// directive for this crate. `format` selects JSON or human-readable output.
///
/// # Errors
///
/// Returns an error for an unparseable level or if a subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let directive = format!("analysis_engine={}", config.level)
        .parse()
        .map_err(|e: tracing_subscriber::filter::ParseError| LoggingError::InvalidLevel {
            level: config.level.clone(),
            message: e.to_string(),
        })?;
    let filter = EnvFilter::from_default_env().add_directive(directive);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(config.include_spans)
        .with_file(config.include_spans)
        .with_line_number(config.include_spans);

    let result = if config.format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}
