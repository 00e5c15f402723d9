//! Service construction from configuration

use std::sync::Arc;

use application::{SkillService, error::ApplicationError, ports::DeparturePort};
use tracing::info;

use crate::{adapters::DepartureAdapter, config::AppConfig};

/// Build the skill service backed by the configured provider process
pub fn build_skill_service(config: &AppConfig) -> Result<SkillService, ApplicationError> {
    let departures: Arc<dyn DeparturePort> =
        Arc::new(DepartureAdapter::from_config(&config.transit)?);
    let service_config = config.skill.to_service_config();

    info!(
        provider = %config.transit.command,
        timeout_secs = config.transit.timeout_secs,
        home_station = %service_config.home_station,
        identity_check = service_config.application_id.is_some(),
        "Skill service configured"
    );

    Ok(SkillService::new(departures, service_config))
}
