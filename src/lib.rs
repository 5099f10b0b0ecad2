//! itinerary-planner core
//!
//! Clusters candidate points of interest around a starting location, orders
//! each cluster into a visitable route, and keeps the routes that fit a time
//! budget.

pub mod error;
pub mod model;
pub mod geo;
pub mod haversine;
pub mod traits;
pub mod cluster;
pub mod sequencer;
pub mod budget;
pub mod navigation;
pub mod planner;
pub mod places;
pub mod google;
pub mod trip;
