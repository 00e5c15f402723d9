//! Departure lookup port
//!
//! Defines the interface for fetching upcoming departures at a station.
//! Adapters in the infrastructure layer implement this port on top of the
//! external transit data provider.

use async_trait::async_trait;
use domain::DepartureBoard;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for departure lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeparturePort: Send + Sync {
    /// Fetch the upcoming departures at `station`, soonest first
    ///
    /// A provider that gave no usable answer is reported as
    /// [`ApplicationError::LookupFailure`].
    async fn departures(&self, station: &str) -> Result<DepartureBoard, ApplicationError>;
}
