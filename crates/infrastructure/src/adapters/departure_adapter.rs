//! Departure adapter - Implements DeparturePort using integration_transit

use std::sync::Arc;

use application::{error::ApplicationError, ports::DeparturePort};
use async_trait::async_trait;
use domain::{Departure, DepartureBoard};
use integration_transit::{
    DepartureClient, DepartureResponse, ProcessDepartureClient, TransitConfig, TransitError,
};
use tracing::{debug, instrument, warn};

/// Adapter for the external departure provider
pub struct DepartureAdapter {
    client: Arc<dyn DepartureClient>,
}

impl std::fmt::Debug for DepartureAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepartureAdapter")
            .field("client", &"DepartureClient")
            .finish()
    }
}

impl DepartureAdapter {
    /// Create an adapter over an existing client
    pub fn new(client: Arc<dyn DepartureClient>) -> Self {
        Self { client }
    }

    /// Create an adapter that runs the configured provider process
    ///
    /// # Errors
    ///
    /// Returns an error if the provider configuration is invalid.
    pub fn from_config(config: &TransitConfig) -> Result<Self, ApplicationError> {
        let client = ProcessDepartureClient::new(config.clone())
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Convert a provider response to the domain board
    fn convert_response(response: DepartureResponse) -> DepartureBoard {
        let mut board = DepartureBoard {
            station: response.station,
            departures: response
                .departures
                .into_iter()
                .map(|d| Departure::new(d.line, d.destination, d.minutes))
                .collect(),
        };
        board.departures.sort_by_key(|d| d.minutes);
        board
    }

    fn map_error(station: &str, error: &TransitError) -> ApplicationError {
        warn!(
            %station,
            error = %error,
            retryable = error.is_retryable(),
            "Departure provider failed"
        );
        ApplicationError::LookupFailure(error.to_string())
    }
}

#[async_trait]
impl DeparturePort for DepartureAdapter {
    #[instrument(skip(self))]
    async fn departures(&self, station: &str) -> Result<DepartureBoard, ApplicationError> {
        let response = self
            .client
            .fetch_departures(station)
            .await
            .map_err(|e| Self::map_error(station, &e))?;

        let board = Self::convert_response(response);
        debug!(
            resolved = ?board.station,
            count = board.departures.len(),
            "Departure board built"
        );
        Ok(board)
    }
}
