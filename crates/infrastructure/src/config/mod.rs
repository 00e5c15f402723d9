//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `skill`: application identity and home station
//!
//! The departure provider settings come from `integration_transit` and the
//! logging settings from [`crate::telemetry`].

mod server;
mod skill;

use std::{fmt, path::Path};

use integration_transit::TransitConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use server::ServerConfig;
pub use skill::SkillConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "TRANSIT_SKILL";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were loaded but are not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application environment (development or production)
///
/// Controls validation strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - identity check optional
    #[default]
    Development,
    /// Production environment - identity check required
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Skill configuration
    #[serde(default)]
    pub skill: SkillConfig,

    /// Departure provider configuration
    #[serde(default)]
    pub transit: TransitConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (or `config.toml`) and environment
    ///
    /// Environment variables override file values, e.g.
    /// `TRANSIT_SKILL_SKILL__HOME_STATION=Garching`.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Self::environment_source())
    }

    fn environment_source() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Check values that deserialize fine but cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.skill.home_station.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "skill.home_station must not be empty".to_string(),
            ));
        }

        self.transit
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("transit: {e}")))?;

        if self.server.max_body_size_json_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_size_json_bytes must be greater than 0".to_string(),
            ));
        }

        let has_application_id = self
            .skill
            .application_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty());
        if self.environment == Environment::Production && !has_application_id {
            return Err(ConfigError::Invalid(
                "skill.application_id is required in production".to_string(),
            ));
        }

        Ok(())
    }
}
