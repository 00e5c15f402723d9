//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement the
//! outbound ports; the transports drive the inbound one.

mod departure_port;
mod skill_handler;

#[cfg(test)]
pub use departure_port::MockDeparturePort;
pub use departure_port::DeparturePort;
pub use skill_handler::SkillRequestHandler;
