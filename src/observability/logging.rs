//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber used by the binary
//! - Pick JSON or pretty output from configuration
//!
//! # Design Decisions
//! - Filter comes from config, then `RUST_LOG`, then a default that lets
//!   bridged records through
//! - Initialization happens once; a second call reports the error

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::{LogFormat, LoggerConfig};
use crate::sink::tracing::TARGET;

/// Build the filter for `config`.
pub fn env_filter(config: &LoggerConfig) -> EnvFilter {
    match &config.filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("info,{TARGET}={}", config.level.as_str()))),
    }
}

/// Install the global subscriber.
pub fn init_logging(config: &LoggerConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
    }
}
