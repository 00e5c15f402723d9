//! Departure provider integration for the transit skill
//!
//! Departure times come from an external command-line provider (`mvg_json`
//! by default) that takes a station name as its only argument and prints a
//! JSON document with the resolved station and its upcoming departures.
//!
//! # Architecture
//!
//! [`DepartureClient`] defines the lookup interface and is implemented by
//! [`ProcessDepartureClient`], which runs one provider process per query
//! under a timeout and an output size limit.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{DepartureClient, ProcessDepartureClient, TransitConfig};
//!
//! let client = ProcessDepartureClient::new(TransitConfig::default())?;
//! let response = client.fetch_departures("Marienplatz").await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{DepartureClient, ProcessDepartureClient};
pub use config::TransitConfig;
pub use error::TransitError;
pub use models::{DepartureEntry, DepartureResponse};
