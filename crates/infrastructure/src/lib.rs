//! Infrastructure layer - Adapters for external systems
//!
//! Implements the departure port over the provider process and owns
//! configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;
mod wiring;

pub use adapters::*;
pub use config::{AppConfig, ConfigError, Environment, ServerConfig, SkillConfig};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
pub use wiring::build_skill_service;
