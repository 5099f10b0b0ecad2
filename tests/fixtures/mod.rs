//! Test fixtures for itinerary-planner.
//!
//! Provides realistic test data including:
//! - Real Manhattan / Brooklyn points of interest (from OpenStreetMap)
//! - Deterministic stand-ins for the external collaborators

pub mod manhattan_locations;
pub mod collaborators;

pub use manhattan_locations::*;
