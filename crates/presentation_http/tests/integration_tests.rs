//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use application::{
    SkillService, SkillServiceConfig, error::ApplicationError, ports::DeparturePort,
};
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use domain::{Departure, DepartureBoard, ResponseEnvelope};
use presentation_http::{ErrorResponse, create_app, state::AppState};
use serde_json::{Value, json};

const APP_ID: &str = "amzn1.echo-sdk-ams.app.transit";

/// Departure port that counts lookups and answers from a fixed board
struct CountingDeparturePort {
    calls: AtomicUsize,
    stations: std::sync::Mutex<Vec<String>>,
    fail: bool,
}

impl CountingDeparturePort {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            stations: std::sync::Mutex::new(Vec::new()),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn stations(&self) -> Vec<String> {
        self.stations.lock().expect("lock").clone()
    }
}

#[async_trait]
impl DeparturePort for CountingDeparturePort {
    async fn departures(&self, station: &str) -> Result<DepartureBoard, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.stations.lock().expect("lock").push(station.to_string());

        if self.fail {
            return Err(ApplicationError::LookupFailure(
                "Departure provider timed out after 5 seconds".to_string(),
            ));
        }

        Ok(DepartureBoard::new(
            station,
            vec![
                Departure::new("U3", "Fürstenried West", 8),
                Departure::new("U6", "Klinikum Großhadern", 3),
            ],
        ))
    }
}

fn server_with(port: Arc<CountingDeparturePort>, application_id: Option<&str>) -> TestServer {
    let service = SkillService::new(
        port,
        SkillServiceConfig {
            application_id: application_id.map(ToString::to_string),
            ..SkillServiceConfig::default()
        },
    );
    let app = create_app(AppState::new(Arc::new(service)), 256 * 1024);
    TestServer::new(app).expect("Failed to create test server")
}

fn skill_request(request: Value, is_new: bool) -> Value {
    json!({
        "version": "1.0",
        "session": {
            "new": is_new,
            "sessionId": "SessionId.test",
            "application": { "applicationId": APP_ID },
            "attributes": { "visits": 2 },
            "user": { "userId": "amzn1.account.test" }
        },
        "request": request
    })
}

fn intent(name: &str, slots: Value) -> Value {
    skill_request(
        json!({
            "type": "IntentRequest",
            "requestId": "EdwRequestId.1",
            "intent": { "name": name, "slots": slots }
        }),
        false,
    )
}

#[tokio::test]
async fn health_returns_ok() {
    let server = server_with(Arc::new(CountingDeparturePort::new()), None);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn launch_returns_welcome_envelope() {
    let port = Arc::new(CountingDeparturePort::new());
    let server = server_with(Arc::clone(&port), None);

    let response = server
        .post("/v1/skill")
        .json(&skill_request(
            json!({ "type": "LaunchRequest", "requestId": "EdwRequestId.0" }),
            true,
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let envelope: ResponseEnvelope = response.json();
    assert_eq!(envelope.version, "0.1");
    assert_eq!(envelope.response.card.title, "SessionSpeechlet - Welcome");
    assert!(!envelope.response.should_end_session);
    assert_eq!(envelope.session_attributes["visits"], 2);
    assert_eq!(port.calls(), 0);
}

#[tokio::test]
async fn next_train_answers_with_soonest_departure() {
    let port = Arc::new(CountingDeparturePort::new());
    let server = server_with(Arc::clone(&port), None);

    let response = server
        .post("/v1/skill")
        .json(&intent(
            "NextTrain",
            json!({ "Station": { "name": "Station", "value": "Marienplatz" } }),
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body["response"]["outputSpeech"]["text"],
        "The next train at Marienplatz is the U6 to Klinikum Großhadern and leaves in 3 minutes."
    );
    assert_eq!(body["response"]["outputSpeech"]["type"], "PlainText");
    assert_eq!(body["response"]["card"]["type"], "Simple");
    assert_eq!(body["response"]["shouldEndSession"], true);
    assert_eq!(port.calls(), 1);
    assert_eq!(port.stations(), ["Marienplatz"]);
}

#[tokio::test]
async fn destination_is_refused_without_lookup() {
    let port = Arc::new(CountingDeparturePort::new());
    let server = server_with(Arc::clone(&port), None);

    let response = server
        .post("/v1/skill")
        .json(&intent(
            "NextTrain",
            json!({
                "Station": { "name": "Station", "value": "Marienplatz" },
                "Destination": { "name": "Destination", "value": "Garching" }
            }),
        ))
        .await;

    let body: Value = response.json();
    assert_eq!(
        body["response"]["outputSpeech"]["text"],
        "I cannot yet handle destinations. Try simply asking for the next train!"
    );
    assert_eq!(body["response"]["shouldEndSession"], false);
    assert_eq!(port.calls(), 0);
}

#[tokio::test]
async fn local_train_uses_home_station() {
    let port = Arc::new(CountingDeparturePort::new());
    let server = server_with(Arc::clone(&port), None);

    server
        .post("/v1/skill")
        .json(&intent("NextLocalTrain", json!({})))
        .await;

    assert_eq!(port.stations(), ["Freimann"]);
}

#[tokio::test]
async fn lookup_failure_is_spoken_apology() {
    let port = Arc::new(CountingDeparturePort::failing());
    let server = server_with(Arc::clone(&port), None);

    let response = server
        .post("/v1/skill")
        .json(&intent("NextLocalTrain", Value::Null))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body["response"]["outputSpeech"]["text"],
        "I could not receive information from the transit system, please try again later."
    );
    assert_eq!(body["response"]["shouldEndSession"], true);
}

#[tokio::test]
async fn unknown_intent_is_unprocessable() {
    let server = server_with(Arc::new(CountingDeparturePort::new()), None);

    let response = server
        .post("/v1/skill")
        .json(&intent("Unknown", json!({})))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "invalid_intent");
}

#[tokio::test]
async fn session_ended_has_no_content() {
    let server = server_with(Arc::new(CountingDeparturePort::new()), None);

    let response = server
        .post("/v1/skill")
        .json(&skill_request(
            json!({
                "type": "SessionEndedRequest",
                "requestId": "EdwRequestId.9",
                "reason": "USER_INITIATED"
            }),
            false,
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let server = server_with(Arc::new(CountingDeparturePort::new()), None);

    let response = server.post("/v1/skill").text("{ not json").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "malformed_request");
}

#[tokio::test]
async fn missing_session_is_bad_request() {
    let server = server_with(Arc::new(CountingDeparturePort::new()), None);

    let response = server
        .post("/v1/skill")
        .json(&json!({ "request": { "type": "LaunchRequest", "requestId": "r-1" } }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn foreign_application_is_forbidden() {
    let port = Arc::new(CountingDeparturePort::new());
    let server = server_with(Arc::clone(&port), Some("amzn1.echo-sdk-ams.app.other"));

    let response = server
        .post("/v1/skill")
        .json(&intent(
            "NextTrain",
            json!({ "Station": { "name": "Station", "value": "Marienplatz" } }),
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "identity_mismatch");
    assert!(!body.error.contains("amzn1.echo-sdk-ams.app.other"));
    assert_eq!(port.calls(), 0);
}

#[tokio::test]
async fn matching_application_is_accepted() {
    let server = server_with(Arc::new(CountingDeparturePort::new()), Some(APP_ID));

    let response = server
        .post("/v1/skill")
        .json(&intent("NextLocalTrain", json!({})))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let server = server_with(Arc::new(CountingDeparturePort::new()), None);

    let response = server.get("/health").await;

    let header = response
        .headers()
        .get("x-request-id")
        .expect("request id header");
    assert!(uuid::Uuid::parse_str(header.to_str().expect("ascii")).is_ok());
}

#[tokio::test]
async fn skill_echoes_caller_request_id() {
    let server = server_with(Arc::new(CountingDeparturePort::new()), None);

    let response = server
        .post("/v1/skill")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("0190b6c4-7d3a-7cc0-9a4e-2b1f0c8d9e10"),
        )
        .json(&intent("NextLocalTrain", json!({})))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .expect("request id header")
            .to_str()
            .expect("ascii"),
        "0190b6c4-7d3a-7cc0-9a4e-2b1f0c8d9e10"
    );
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let service = SkillService::new(
        Arc::new(CountingDeparturePort::new()),
        SkillServiceConfig::default(),
    );
    let app = create_app(AppState::new(Arc::new(service)), 64);
    let server = TestServer::new(app).expect("Failed to create test server");

    let response = server
        .post("/v1/skill")
        .json(&intent("NextLocalTrain", json!({})))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
}
