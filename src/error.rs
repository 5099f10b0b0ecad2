//! Error types shared across the planner.

use thiserror::Error;

/// Failure reported by an external collaborator (routing, geocoding, places,
/// image search, narration).
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service responded with status {status}")]
    Status { status: u16 },

    /// The service answered but had nothing for this request.
    #[error("service returned no results")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

/// Reasons the budgeter refuses to turn a cluster into an itinerary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BudgetRejection {
    #[error("a route needs at least two points")]
    TooFewPoints,

    #[error("no route segments could be computed")]
    NoSegments,

    #[error("total time {total:.1} min exceeds limit {limit:.1} min")]
    OverBudget { total: f64, limit: f64 },
}

/// Why a cluster was left out of the planner's result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("cluster has fewer than two points")]
    TooFewPoints,

    #[error("no route segments could be computed")]
    NoSegments,

    #[error(transparent)]
    Budget(#[from] BudgetRejection),
}

/// Operation-level failure of [`crate::planner::Planner::optimize_routes`].
///
/// Zero surviving itineraries is not an error; it is `Ok(vec![])`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("origin coordinates are missing or invalid")]
    MissingOrigin,
}

/// Failure of the end-to-end trip pipeline.
#[derive(Debug, Error)]
pub enum TripError {
    #[error("could not resolve a starting location: {0}")]
    StartUnresolved(#[source] CollaboratorError),

    #[error("no address given and current location not requested")]
    NoStartRequested,

    #[error(transparent)]
    Plan(#[from] PlanError),
}
