//! Departure data
//!
//! The result of a departure lookup for one station, as consumed by the
//! intent handlers.

use serde::{Deserialize, Serialize};

/// Upcoming departures at a station, soonest first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepartureBoard {
    /// Resolved station name (absent when the provider could not resolve it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    /// Departures ordered by ascending `minutes`
    #[serde(default)]
    pub departures: Vec<Departure>,
}

impl DepartureBoard {
    /// Create a board, ordering the departures soonest first
    #[must_use]
    pub fn new(station: impl Into<String>, mut departures: Vec<Departure>) -> Self {
        departures.sort_by_key(|d| d.minutes);
        Self {
            station: Some(station.into()),
            departures,
        }
    }

    /// The station name, if present and non-blank
    #[must_use]
    pub fn station_name(&self) -> Option<&str> {
        self.station
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The soonest departure
    #[must_use]
    pub fn next_departure(&self) -> Option<&Departure> {
        self.departures.first()
    }
}

/// A single upcoming departure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    /// Line name, e.g. `U6` or `S1`
    pub line: String,
    /// Final destination of the vehicle
    pub destination: String,
    /// Minutes until departure
    pub minutes: i64,
}

impl Departure {
    /// Create a departure
    #[must_use]
    pub fn new(line: impl Into<String>, destination: impl Into<String>, minutes: i64) -> Self {
        Self {
            line: line.into(),
            destination: destination.into(),
            minutes,
        }
    }
}
