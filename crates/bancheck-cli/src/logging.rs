//! Tracing subscriber setup
//!
//! Log lines go to stderr so stdout stays reserved for reports. `RUST_LOG`
//! takes precedence over the `-v` count; `BANCHECK_LOG_FORMAT=json` switches
//! to one JSON object per event.

use crate::config::{CliConfig, Verbosity};
use tracing_subscriber::EnvFilter;

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Compact,
    /// JSON objects
    Json,
}

impl LogFormat {
    /// Read the format from `BANCHECK_LOG_FORMAT`
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("BANCHECK_LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Parse a format name; unknown names fall back to compact
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Compact
        }
    }
}

/// Build the filter from `RUST_LOG`, or from the verbosity when unset
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()))
}

/// Install the global subscriber; a second call is a no-op
pub fn init(config: &CliConfig) {
    let filter = env_filter(config.verbosity);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = match LogFormat::from_env() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder
            .compact()
            .with_ansi(config.color.should_color())
            .without_time()
            .try_init(),
    };
    if installed.is_ok() {
        tracing::debug!(verbosity = ?config.verbosity, "logging initialized");
    }
}
