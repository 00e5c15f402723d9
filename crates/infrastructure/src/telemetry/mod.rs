//! Logging initialization
//!
//! Installs a `tracing` subscriber with an [`EnvFilter`] and either
//! human-readable or JSON output on stderr.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Telemetry errors
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Offending directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already installed
    #[error("Failed to initialize telemetry: {0}")]
    Init(String),
}

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Configuration for logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "transit_skill_server=debug,tower_http=info")
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_filter() -> String {
    "info,tower_http=info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            log_format: LogFormat::default(),
        }
    }
}

impl TelemetryConfig {
    /// Build the filter, preferring `RUST_LOG`
    fn env_filter(&self) -> Result<EnvFilter, TelemetryError> {
        EnvFilter::try_from_default_env().or_else(|_| {
            EnvFilter::try_new(&self.log_filter).map_err(|e| TelemetryError::InvalidFilter {
                filter: self.log_filter.clone(),
                reason: e.to_string(),
            })
        })
    }
}

/// Initialize logging with the given configuration
///
/// Must be called once per process; a second call fails with
/// [`TelemetryError::Init`].
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let registry = tracing_subscriber::registry().with(config.env_filter()?);

    let result = match config.log_format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(format = ?config.log_format, "Telemetry initialized");
    Ok(())
}
