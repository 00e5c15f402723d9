//! Departure provider configuration

use serde::{Deserialize, Serialize};

/// Configuration for the external departure provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Provider executable, looked up in `PATH` when not absolute
    #[serde(default = "default_command")]
    pub command: String,

    /// Fixed arguments placed before the station name
    #[serde(default)]
    pub args: Vec<String>,

    /// Maximum time a single lookup may take, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of bytes read from the provider's stdout
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,
}

fn default_command() -> String {
    "mvg_json".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_max_output_bytes() -> usize {
    64 * 1024
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
            timeout_secs: default_timeout_secs(),
            max_output_bytes: default_max_output_bytes(),
        }
    }
}

impl TransitConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 2,
            max_output_bytes: 4 * 1024,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.command.trim().is_empty() {
            return Err("command must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_output_bytes == 0 {
            return Err("max_output_bytes must be greater than 0".to_string());
        }

        Ok(())
    }
}
