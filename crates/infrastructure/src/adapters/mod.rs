//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod departure_adapter;

pub use departure_adapter::DepartureAdapter;
