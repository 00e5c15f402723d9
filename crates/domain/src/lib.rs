//! Domain layer for the transit skill
//!
//! Contains the wire-level model of the voice platform (inbound skill
//! requests, outbound response envelopes), the departure data produced by
//! the transit provider, and domain errors. This layer performs no I/O.

pub mod departures;
pub mod errors;
pub mod request;
pub mod response;

pub use departures::{Departure, DepartureBoard};
pub use errors::DomainError;
pub use request::{
    Application, Intent, IntentRequest, LaunchRequest, RequestBody, Session, SessionEndedRequest,
    SessionStartedRequest, SkillRequest, Slot, User,
};
pub use response::{
    Card, CardType, OutputSpeech, Reprompt, ResponseEnvelope, SessionAttributes, SpeechType,
    SpeechletResponse,
};
