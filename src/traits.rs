//! Contracts for the external collaborators the planner depends on.
//!
//! The planner never retries or caches. A failed call skips the item or
//! substitutes a placeholder.

use crate::error::CollaboratorError;
use crate::geo::Coordinate;
use crate::model::CandidatePoint;
use crate::places::RawPlace;

/// Raw routing answer for a single origin/destination pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Computes the travel cost of a single leg.
pub trait RouteProvider {
    fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, CollaboratorError>;
}

/// Resolves a free-form address to coordinates.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, CollaboratorError>;
}

/// Reports the caller's current location.
pub trait LocationProvider {
    fn current_location(&self) -> Result<Coordinate, CollaboratorError>;
}

/// Finds raw place records near a centre point.
pub trait PlaceSearch {
    /// `keywords` are place types, already expanded from user categories.
    fn search_nearby(
        &self,
        keywords: &[String],
        center: Coordinate,
        radius_m: f64,
        max_results: usize,
    ) -> Result<Vec<RawPlace>, CollaboratorError>;
}

/// Looks up a representative image for a place.
pub trait ImageFinder {
    /// `Ok(None)` when the search succeeded but found nothing.
    fn find_representative_image(&self, query: &str) -> Result<Option<String>, CollaboratorError>;
}

/// Produces a display name and description for a cluster of places.
///
/// `points` are the places to be visited. The starting point is never among
/// them, so a narrator sees only the stops it is naming.
pub trait ClusterNarrator {
    fn cluster_name(&self, points: &[&CandidatePoint]) -> Result<String, CollaboratorError>;

    fn cluster_description(&self, points: &[&CandidatePoint]) -> Result<String, CollaboratorError>;
}

/// Image finder that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageFinder for NoImages {
    fn find_representative_image(&self, _query: &str) -> Result<Option<String>, CollaboratorError> {
        Ok(None)
    }
}

/// Narrator built from the place names alone, for use without a text
/// generation service.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNarrator;

impl PlainNarrator {
    fn place_names<'a>(points: &[&'a CandidatePoint]) -> Vec<&'a str> {
        points
            .iter()
            .filter_map(|point| point.name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .collect()
    }
}

impl ClusterNarrator for PlainNarrator {
    fn cluster_name(&self, points: &[&CandidatePoint]) -> Result<String, CollaboratorError> {
        let names = Self::place_names(points);
        match names.as_slice() {
            [] => Err(CollaboratorError::EmptyResponse),
            [only] => Ok(only.to_string()),
            [first, rest @ ..] => Ok(format!("{} and {} more", first, rest.len())),
        }
    }

    fn cluster_description(&self, points: &[&CandidatePoint]) -> Result<String, CollaboratorError> {
        let names = Self::place_names(points);
        if names.is_empty() {
            return Err(CollaboratorError::EmptyResponse);
        }
        Ok(format!("A route through {}.", names.join(", ")))
    }
}
