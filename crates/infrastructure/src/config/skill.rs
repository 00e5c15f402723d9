//! Skill behaviour configuration.

use application::{DEFAULT_HOME_STATION, SkillServiceConfig};
use serde::{Deserialize, Serialize};

/// Skill configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Expected application id of incoming requests
    ///
    /// Requests for any other application are rejected when set.
    #[serde(default)]
    pub application_id: Option<String>,

    /// Station used for "next local train" questions
    #[serde(default = "default_home_station")]
    pub home_station: String,
}

fn default_home_station() -> String {
    DEFAULT_HOME_STATION.to_string()
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            application_id: None,
            home_station: default_home_station(),
        }
    }
}

impl SkillConfig {
    /// Convert to the service settings
    #[must_use]
    pub fn to_service_config(&self) -> SkillServiceConfig {
        SkillServiceConfig {
            application_id: self
                .application_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(ToString::to_string),
            home_station: self.home_station.trim().to_string(),
        }
    }
}
