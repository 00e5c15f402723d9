//! Process-based departure client
//!
//! Runs the provider executable once per lookup with the station name as
//! its argument and decodes the JSON it prints on stdout.

use std::{process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::{io::AsyncReadExt, process::Command};
use tracing::{debug, instrument, warn};

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::models::DepartureResponse;

/// Upper bound for captured provider diagnostics
const STDERR_LIMIT: u64 = 4 * 1024;

/// Trait for departure provider clients
#[async_trait]
pub trait DepartureClient: Send + Sync {
    /// Fetch upcoming departures for a station, soonest first
    async fn fetch_departures(&self, station: &str) -> Result<DepartureResponse, TransitError>;
}

/// Departure client that shells out to the provider executable
#[derive(Debug, Clone)]
pub struct ProcessDepartureClient {
    config: TransitConfig,
}

impl ProcessDepartureClient {
    /// Create a new process departure client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: TransitConfig) -> Result<Self, TransitError> {
        config.validate().map_err(TransitError::ConfigurationError)?;
        Ok(Self { config })
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &TransitConfig {
        &self.config
    }

    /// Reject station names the provider would misread
    fn validate_station(station: &str) -> Result<&str, TransitError> {
        let station = station.trim();
        if station.is_empty() {
            return Err(TransitError::InvalidStation(
                "station name is empty".to_string(),
            ));
        }
        if station.starts_with('-') {
            return Err(TransitError::InvalidStation(format!(
                "station name must not start with '-': {station}"
            )));
        }
        if station.chars().any(char::is_control) {
            return Err(TransitError::InvalidStation(
                "station name contains control characters".to_string(),
            ));
        }
        Ok(station)
    }

    fn command(&self, station: &str) -> Command {
        let mut cmd = Command::new(&self.config.command);
        cmd.args(&self.config.args)
            .arg(station)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// Run the provider and collect its stdout
    async fn run(&self, station: &str) -> Result<Vec<u8>, TransitError> {
        let mut cmd = self.command(station);
        debug!(?cmd, "Running departure provider");

        let mut child = cmd.spawn().map_err(|e| TransitError::SpawnFailed {
            command: self.config.command.clone(),
            reason: e.to_string(),
        })?;

        let stdout = child.stdout.take().ok_or_else(|| TransitError::SpawnFailed {
            command: self.config.command.clone(),
            reason: "stdout not captured".to_string(),
        })?;
        let stderr = child.stderr.take();

        let limit = self.config.max_output_bytes;
        let mut output = Vec::new();
        let mut bounded = stdout.take(u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1));
        let read_stdout = bounded.read_to_end(&mut output);
        let read_stderr = async {
            let mut diagnostics = Vec::new();
            if let Some(stderr) = stderr {
                // Diagnostics only; a read error just leaves them incomplete
                let _ = stderr.take(STDERR_LIMIT).read_to_end(&mut diagnostics).await;
            }
            diagnostics
        };
        let (read, diagnostics) = tokio::join!(read_stdout, read_stderr);

        if let Err(e) = read {
            warn!(error = %e, "Failed to read departure provider output");
            return Err(TransitError::NoOutput);
        }
        if output.len() > limit {
            return Err(TransitError::OutputTooLarge { limit });
        }

        let diagnostics = String::from_utf8_lossy(&diagnostics);
        let diagnostics = diagnostics.trim();
        match child.wait().await {
            Ok(status) if !status.success() => warn!(
                %status,
                stderr = %diagnostics,
                "Departure provider exited with failure"
            ),
            Ok(_) => {},
            Err(e) => warn!(error = %e, "Failed to wait for departure provider"),
        }

        Ok(output)
    }

    /// Decode the provider output into a sorted response
    fn parse_response(output: &[u8]) -> Result<DepartureResponse, TransitError> {
        if output.trim_ascii().is_empty() {
            return Err(TransitError::NoOutput);
        }

        let mut response: DepartureResponse = serde_json::from_slice(output)
            .map_err(|e| TransitError::ParseError(e.to_string()))?;
        response.sort_departures();
        Ok(response)
    }
}

#[async_trait]
impl DepartureClient for ProcessDepartureClient {
    #[instrument(skip(self))]
    async fn fetch_departures(&self, station: &str) -> Result<DepartureResponse, TransitError> {
        let station = Self::validate_station(station)?;
        let timeout_secs = self.config.timeout_secs;

        let output = tokio::time::timeout(Duration::from_secs(timeout_secs), self.run(station))
            .await
            .map_err(|_| TransitError::Timeout { timeout_secs })??;

        let response = Self::parse_response(&output)?;
        debug!(
            resolved = ?response.station,
            count = response.departures.len(),
            "Departures received from provider"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = TransitConfig {
            timeout_secs: 0,
            ..TransitConfig::default()
        };
        assert!(matches!(
            ProcessDepartureClient::new(config),
            Err(TransitError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_validate_station() {
        assert_eq!(
            ProcessDepartureClient::validate_station("  Marienplatz ").unwrap(),
            "Marienplatz"
        );
        assert!(ProcessDepartureClient::validate_station("").is_err());
        assert!(ProcessDepartureClient::validate_station("   ").is_err());
        assert!(ProcessDepartureClient::validate_station("--help").is_err());
        assert!(ProcessDepartureClient::validate_station("Garching\nrm").is_err());
        assert!(ProcessDepartureClient::validate_station("Münchner Freiheit").is_ok());
    }

    #[test]
    fn test_parse_response_sorts() {
        let json = r#"{ "station": "Freimann", "result_sorted": [
            { "line": "U6", "destination": "Klinikum Großhadern", "minutes": 9 },
            { "line": "U6", "destination": "Garching-Forschungszentrum", "minutes": 2 }
        ] }"#;
        let response = ProcessDepartureClient::parse_response(json.as_bytes()).unwrap();
        assert_eq!(response.departures[0].minutes, 2);
        assert_eq!(response.departures[1].minutes, 9);
        assert_eq!(response.departures[1].destination, "Klinikum Großhadern");
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(matches!(
            ProcessDepartureClient::parse_response(b" \n"),
            Err(TransitError::NoOutput)
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            ProcessDepartureClient::parse_response(b"Station not found"),
            Err(TransitError::ParseError(_))
        ));
    }

    #[test]
    fn test_command_passes_station_last() {
        let client = ProcessDepartureClient::new(TransitConfig {
            command: "python3".to_string(),
            args: vec!["mvg_json.py".to_string()],
            ..TransitConfig::default()
        })
        .unwrap();
        let cmd = client.command("Marienplatz");
        let args: Vec<_> = cmd.as_std().get_args().collect();
        assert_eq!(args, ["mvg_json.py", "Marienplatz"]);
        assert_eq!(cmd.as_std().get_program(), "python3");
    }
}
