//! Skill service
//!
//! Routes a request by lifecycle stage and intent name, runs the matching
//! handler and wraps its answer into the envelope.

use std::{panic::AssertUnwindSafe, sync::Arc};

use async_trait::async_trait;
use domain::{
    IntentRequest, RequestBody, ResponseEnvelope, Session, SessionEndedRequest, SkillRequest,
    SpeechletResponse,
};
use futures::FutureExt;
use tracing::{debug, error, info, instrument, warn};

use super::{
    intent_handlers::{
        NEXT_LOCAL_TRAIN_INTENT, NEXT_TRAIN_INTENT, local_departures, lookup_failure_response,
        station_departures, welcome_response,
    },
    response_builder::build_envelope,
};
use crate::{
    error::ApplicationError,
    ports::{DeparturePort, SkillRequestHandler},
};

/// Default home station for `NextLocalTrain`
pub const DEFAULT_HOME_STATION: &str = "Freimann";

/// Settings of the skill service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillServiceConfig {
    /// Expected application id; the identity check is skipped when unset
    pub application_id: Option<String>,
    /// Station queried by `NextLocalTrain`
    pub home_station: String,
}

impl Default for SkillServiceConfig {
    fn default() -> Self {
        Self {
            application_id: None,
            home_station: DEFAULT_HOME_STATION.to_string(),
        }
    }
}

/// Request router and session lifecycle controller
pub struct SkillService {
    departures: Arc<dyn DeparturePort>,
    config: SkillServiceConfig,
}

impl std::fmt::Debug for SkillService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SkillService {
    /// Create a new skill service
    pub fn new(departures: Arc<dyn DeparturePort>, config: SkillServiceConfig) -> Self {
        if config.application_id.is_none() {
            warn!("No application id configured, identity check disabled");
        }
        Self { departures, config }
    }

    /// Service settings
    pub const fn config(&self) -> &SkillServiceConfig {
        &self.config
    }

    /// Reject sessions addressed to another application
    pub fn verify_application(&self, session: &Session) -> Result<(), ApplicationError> {
        let actual = session.application_id();
        debug!(application_id = %actual, "Checking application id");

        match &self.config.application_id {
            Some(expected) if expected != actual => Err(ApplicationError::IdentityMismatch {
                expected: expected.clone(),
                actual: actual.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Route one request
    ///
    /// Returns `None` for turns without content (session start and end).
    #[instrument(
        skip(self, request),
        fields(
            request_id = %request.request.request_id(),
            session_id = %request.session.session_id,
            kind = request.request.kind()
        )
    )]
    pub async fn handle(
        &self,
        request: SkillRequest,
    ) -> Result<Option<ResponseEnvelope>, ApplicationError> {
        request.validate()?;
        self.verify_application(&request.session)?;

        let SkillRequest {
            session, request, ..
        } = request;

        if session.is_new {
            on_session_started(request.request_id(), &session);
        }

        let speechlet = match request {
            RequestBody::SessionStartedRequest(started) => {
                if !session.is_new {
                    on_session_started(&started.request_id, &session);
                }
                return Ok(None);
            },
            RequestBody::SessionEndedRequest(ended) => {
                on_session_ended(&ended, &session);
                return Ok(None);
            },
            RequestBody::LaunchRequest(launch) => {
                info!(
                    request_id = %launch.request_id,
                    session_id = %session.session_id,
                    "Launch"
                );
                welcome_response()
            },
            RequestBody::IntentRequest(intent_request) => {
                Self::recover(self.dispatch_intent(&intent_request, &session)).await?
            },
        };

        Ok(Some(build_envelope(session.attributes, speechlet)))
    }

    async fn dispatch_intent(
        &self,
        intent_request: &IntentRequest,
        session: &Session,
    ) -> Result<SpeechletResponse, ApplicationError> {
        let intent = &intent_request.intent;
        info!(
            request_id = %intent_request.request_id,
            session_id = %session.session_id,
            intent = %intent.name,
            "Intent"
        );

        match intent.name.as_str() {
            NEXT_TRAIN_INTENT => station_departures(intent, self.departures.as_ref()).await,
            NEXT_LOCAL_TRAIN_INTENT => {
                local_departures(self.departures.as_ref(), &self.config.home_station).await
            },
            other => Err(ApplicationError::InvalidIntent(other.to_string())),
        }
    }

    /// Degrade handler faults and panics into the spoken apology
    async fn recover<F>(handler: F) -> Result<SpeechletResponse, ApplicationError>
    where
        F: Future<Output = Result<SpeechletResponse, ApplicationError>>,
    {
        match AssertUnwindSafe(handler).catch_unwind().await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) if e.is_hard_failure() => Err(e),
            Ok(Err(e)) => {
                warn!(error = %e, "Intent handler failed, answering with apology");
                Ok(lookup_failure_response())
            },
            Err(_) => {
                error!("Intent handler panicked, answering with apology");
                Ok(lookup_failure_response())
            },
        }
    }
}

#[async_trait]
impl SkillRequestHandler for SkillService {
    async fn handle(
        &self,
        request: SkillRequest,
    ) -> Result<Option<ResponseEnvelope>, ApplicationError> {
        Self::handle(self, request).await
    }
}

fn on_session_started(request_id: &str, session: &Session) {
    info!(
        %request_id,
        session_id = %session.session_id,
        "Session started"
    );
}

fn on_session_ended(ended: &SessionEndedRequest, session: &Session) {
    info!(
        request_id = %ended.request_id,
        session_id = %session.session_id,
        reason = ended.reason.as_deref().unwrap_or("unknown"),
        "Session ended"
    );
}
