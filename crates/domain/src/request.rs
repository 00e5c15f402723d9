//! Inbound skill requests
//!
//! Typed representation of the JSON document the voice platform posts for
//! every user turn: a [`Session`] plus one of the lifecycle [`RequestBody`]
//! variants.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{errors::DomainError, response::SessionAttributes};

/// A complete inbound request: session context plus the lifecycle request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequest {
    /// Protocol version sent by the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Conversational session this turn belongs to
    pub session: Session,
    /// The lifecycle request itself
    pub request: RequestBody,
}

impl SkillRequest {
    /// Create a request from its parts
    #[must_use]
    pub fn new(session: Session, request: RequestBody) -> Self {
        Self {
            version: Some("1.0".to_string()),
            session,
            request,
        }
    }

    /// Decode and validate a request from raw JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, DomainError> {
        let request: Self = serde_json::from_slice(bytes)
            .map_err(|e| DomainError::MalformedRequest(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    /// Check the fields serde cannot enforce on its own
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.session.session_id.trim().is_empty() {
            return Err(DomainError::missing_field("session.sessionId"));
        }
        if self.request.request_id().trim().is_empty() {
            return Err(DomainError::missing_field("request.requestId"));
        }
        Ok(())
    }
}

/// Conversational context spanning one or more turns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Whether this turn opened the session
    #[serde(rename = "new", alias = "isNew")]
    pub is_new: bool,
    /// Platform-assigned session identifier
    pub session_id: String,
    /// The application the request is addressed to
    pub application: Application,
    /// Opaque attributes round-tripped into the response envelope
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: SessionAttributes,
    /// The user talking to the device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Session {
    /// Create a continuing (not new) session
    #[must_use]
    pub fn new(session_id: impl Into<String>, application_id: impl Into<String>) -> Self {
        Self {
            is_new: false,
            session_id: session_id.into(),
            application: Application {
                id: application_id.into(),
            },
            attributes: SessionAttributes::new(),
            user: None,
        }
    }

    /// Mark whether the session was just opened
    #[must_use]
    pub fn with_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    /// Attach session attributes
    #[must_use]
    pub fn with_attributes(mut self, attributes: SessionAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Identifier of the application this session belongs to
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application.id
    }
}

/// Identity of the voice application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Application identifier assigned by the platform
    #[serde(rename = "applicationId", alias = "id")]
    pub id: String,
}

/// The platform user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Platform-scoped user identifier
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Lifecycle stage of a request, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RequestBody {
    /// A new session was opened
    SessionStartedRequest(SessionStartedRequest),
    /// The user opened the skill without asking anything specific
    LaunchRequest(LaunchRequest),
    /// The user asked for something the skill understands
    IntentRequest(IntentRequest),
    /// The session was closed by the user or the platform
    SessionEndedRequest(SessionEndedRequest),
}

impl RequestBody {
    /// Identifier of this request
    #[must_use]
    pub fn request_id(&self) -> &str {
        match self {
            Self::SessionStartedRequest(r) => &r.request_id,
            Self::LaunchRequest(r) => &r.request_id,
            Self::IntentRequest(r) => &r.request_id,
            Self::SessionEndedRequest(r) => &r.request_id,
        }
    }

    /// Wire name of the request type
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SessionStartedRequest(_) => "SessionStartedRequest",
            Self::LaunchRequest(_) => "LaunchRequest",
            Self::IntentRequest(_) => "IntentRequest",
            Self::SessionEndedRequest(_) => "SessionEndedRequest",
        }
    }
}

/// Sent when a session is opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartedRequest {
    /// Request identifier
    pub request_id: String,
    /// When the platform issued the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Sent when the skill is opened without an intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    /// Request identifier
    pub request_id: String,
    /// When the platform issued the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Locale of the device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl LaunchRequest {
    /// Create a launch request
    #[must_use]
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: None,
            locale: None,
        }
    }
}

/// Sent when the user's utterance was mapped to an intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    /// Request identifier
    pub request_id: String,
    /// When the platform issued the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Locale of the device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// The recognised intent
    pub intent: Intent,
}

impl IntentRequest {
    /// Create an intent request
    #[must_use]
    pub fn new(request_id: impl Into<String>, intent: Intent) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: None,
            locale: None,
            intent,
        }
    }
}

/// Sent when the session ends for a reason other than `shouldEndSession`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedRequest {
    /// Request identifier
    pub request_id: String,
    /// When the platform issued the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Why the session ended (e.g. `USER_INITIATED`, `EXCEEDED_MAX_REPROMPTS`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A recognised intent with its named slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Intent name, e.g. `NextTrain`
    pub name: String,
    /// Extracted slot values keyed by slot name
    #[serde(default, deserialize_with = "null_as_default")]
    pub slots: BTreeMap<String, Slot>,
}

impl Intent {
    /// Create an intent without slots
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: BTreeMap::new(),
        }
    }

    /// Add a slot with a value
    #[must_use]
    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.slots.insert(
            name.clone(),
            Slot {
                name: Some(name),
                value: Some(value.into()),
            },
        );
        self
    }

    /// Add a slot that was declared but not filled
    #[must_use]
    pub fn with_empty_slot(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.slots.insert(
            name.clone(),
            Slot {
                name: Some(name),
                value: None,
            },
        );
        self
    }

    /// Whether a slot key is present, filled or not
    #[must_use]
    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// The trimmed value of a slot, if it is present and non-blank
    #[must_use]
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .and_then(|slot| slot.value.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// A named parameter extracted from the utterance
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Slot {
    /// Slot name as declared in the interaction model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Recognised value, absent when the user did not fill the slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTENT_JSON: &str = r#"{
        "version": "1.0",
        "session": {
            "new": true,
            "sessionId": "SessionId.abc",
            "application": { "applicationId": "amzn1.echo-sdk-ams.app.test" },
            "attributes": {},
            "user": { "userId": "amzn1.account.user" }
        },
        "request": {
            "type": "IntentRequest",
            "requestId": "EdwRequestId.1",
            "timestamp": "2016-03-11T16:30:00Z",
            "locale": "en-US",
            "intent": {
                "name": "NextTrain",
                "slots": {
                    "Station": { "name": "Station", "value": "Marienplatz" },
                    "Destination": { "name": "Destination" }
                }
            }
        }
    }"#;

    #[test]
    fn parses_intent_request() {
        let request = SkillRequest::from_json(INTENT_JSON.as_bytes()).unwrap();
        assert!(request.session.is_new);
        assert_eq!(request.session.session_id, "SessionId.abc");
        assert_eq!(request.session.application_id(), "amzn1.echo-sdk-ams.app.test");
        assert_eq!(request.request.request_id(), "EdwRequestId.1");
        assert_eq!(request.request.kind(), "IntentRequest");

        let RequestBody::IntentRequest(intent_request) = request.request else {
            unreachable!("Expected IntentRequest");
        };
        let intent = intent_request.intent;
        assert_eq!(intent.name, "NextTrain");
        assert_eq!(intent.slot_value("Station"), Some("Marienplatz"));
        assert!(intent.has_slot("Destination"));
        assert_eq!(intent.slot_value("Destination"), None);
    }

    #[test]
    fn accepts_alternative_field_names() {
        let json = r#"{
            "session": {
                "isNew": false,
                "sessionId": "s-1",
                "application": { "id": "app-1" }
            },
            "request": { "type": "LaunchRequest", "requestId": "r-1" }
        }"#;
        let request = SkillRequest::from_json(json.as_bytes()).unwrap();
        assert!(!request.session.is_new);
        assert_eq!(request.session.application_id(), "app-1");
        assert!(request.session.attributes.is_empty());
        assert!(matches!(request.request, RequestBody::LaunchRequest(_)));
    }

    #[test]
    fn null_attributes_and_slots_default_to_empty() {
        let json = r#"{
            "session": {
                "new": false,
                "sessionId": "s-1",
                "application": { "applicationId": "app-1" },
                "attributes": null
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "r-1",
                "intent": { "name": "NextLocalTrain", "slots": null }
            }
        }"#;
        let request = SkillRequest::from_json(json.as_bytes()).unwrap();
        assert!(request.session.attributes.is_empty());
        let RequestBody::IntentRequest(intent_request) = request.request else {
            unreachable!("Expected IntentRequest");
        };
        assert!(intent_request.intent.slots.is_empty());
    }

    #[test]
    fn session_ended_request_carries_reason() {
        let json = r#"{
            "session": {
                "new": false,
                "sessionId": "s-1",
                "application": { "applicationId": "app-1" }
            },
            "request": {
                "type": "SessionEndedRequest",
                "requestId": "r-9",
                "reason": "USER_INITIATED"
            }
        }"#;
        let request = SkillRequest::from_json(json.as_bytes()).unwrap();
        let RequestBody::SessionEndedRequest(ended) = request.request else {
            unreachable!("Expected SessionEndedRequest");
        };
        assert_eq!(ended.reason.as_deref(), Some("USER_INITIATED"));
    }

    #[test]
    fn missing_session_is_malformed() {
        let json = r#"{ "request": { "type": "LaunchRequest", "requestId": "r-1" } }"#;
        let err = SkillRequest::from_json(json.as_bytes()).unwrap_err();
        assert!(matches!(err, DomainError::MalformedRequest(_)));
    }

    #[test]
    fn unknown_request_type_is_malformed() {
        let json = r#"{
            "session": { "new": false, "sessionId": "s", "application": { "applicationId": "a" } },
            "request": { "type": "AudioPlayerRequest", "requestId": "r" }
        }"#;
        let err = SkillRequest::from_json(json.as_bytes()).unwrap_err();
        assert!(matches!(err, DomainError::MalformedRequest(_)));
    }

    #[test]
    fn intent_request_without_intent_is_malformed() {
        let json = r#"{
            "session": { "new": false, "sessionId": "s", "application": { "applicationId": "a" } },
            "request": { "type": "IntentRequest", "requestId": "r" }
        }"#;
        assert!(SkillRequest::from_json(json.as_bytes()).is_err());
    }

    #[test]
    fn blank_ids_are_malformed() {
        let blank_session = SkillRequest::new(
            Session::new("  ", "app"),
            RequestBody::LaunchRequest(LaunchRequest::new("r-1")),
        );
        assert!(blank_session.validate().is_err());

        let blank_request = SkillRequest::new(
            Session::new("s-1", "app"),
            RequestBody::LaunchRequest(LaunchRequest::new("")),
        );
        assert!(blank_request.validate().is_err());
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = SkillRequest::from_json(b"not json").unwrap_err();
        assert!(err.to_string().starts_with("Malformed request"));
    }

    #[test]
    fn slot_value_trims_and_rejects_blank() {
        let intent = Intent::new("NextTrain")
            .with_slot("Station", "  Freimann ")
            .with_slot("Destination", "   ");
        assert_eq!(intent.slot_value("Station"), Some("Freimann"));
        assert_eq!(intent.slot_value("Destination"), None);
        assert!(intent.has_slot("Destination"));
        assert!(!intent.has_slot("Platform"));
    }

    #[test]
    fn serializes_with_wire_names() {
        let request = SkillRequest::new(
            Session::new("s-1", "app-1").with_new(true),
            RequestBody::IntentRequest(IntentRequest::new(
                "r-1",
                Intent::new("NextTrain").with_slot("Station", "Garching"),
            )),
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["session"]["new"], true);
        assert_eq!(json["session"]["sessionId"], "s-1");
        assert_eq!(json["session"]["application"]["applicationId"], "app-1");
        assert_eq!(json["request"]["type"], "IntentRequest");
        assert_eq!(json["request"]["requestId"], "r-1");
        assert_eq!(
            json["request"]["intent"]["slots"]["Station"]["value"],
            "Garching"
        );
    }
}
