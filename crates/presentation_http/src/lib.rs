//! Transit skill HTTP presentation layer
//!
//! Long-running HTTP transport: decodes skill requests, hands them to the
//! [`application::SkillRequestHandler`] and encodes the envelope.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{REQUEST_ID_HEADER, RequestIdLayer};
pub use routes::{create_app, create_router};
pub use state::AppState;
