//! Departure provider data models
//!
//! Typed representation of the JSON document the provider prints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Provider answer for one station
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepartureResponse {
    /// Resolved station name, absent or empty when the station is unknown
    #[serde(default)]
    pub station: Option<String>,
    /// Upcoming departures, soonest first once sorted by the client
    #[serde(default, rename = "result_sorted", alias = "departures")]
    pub departures: Vec<DepartureEntry>,
}

impl DepartureResponse {
    /// Order departures by ascending minutes, keeping provider order for ties
    pub fn sort_departures(&mut self) {
        self.departures.sort_by_key(|d| d.minutes);
    }
}

/// One upcoming departure as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartureEntry {
    /// Line name (e.g. `U6`)
    pub line: String,
    /// Final destination
    pub destination: String,
    /// Minutes until departure
    pub minutes: i64,
}

impl fmt::Display for DepartureEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4} min  {:<5} {}", self.minutes, self.line, self.destination)
    }
}
