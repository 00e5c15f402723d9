//! Application services - Use case implementations

pub mod intent_handlers;
pub mod response_builder;
mod skill_service;

pub use intent_handlers::{
    format_departure_result, local_departures, lookup_failure_response, station_departures,
    welcome_response,
};
pub use response_builder::{build_envelope, build_speechlet_response};
pub use skill_service::{DEFAULT_HOME_STATION, SkillService, SkillServiceConfig};
