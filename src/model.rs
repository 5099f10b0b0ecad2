//! Records flowing through the planner: candidate points in, itineraries out.

use serde::{Deserialize, Serialize};

use crate::geo::{Coordinate, TransportMode};

/// Display name given to the synthetic starting point.
pub const STARTING_POINT_NAME: &str = "Your Starting Location";

/// Wheelchair accessibility flags reported for a place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessibility {
    pub parking: bool,
    pub entrance: bool,
    pub restroom: bool,
    pub seating: bool,
}

impl Accessibility {
    /// True when at least one of the four flags is set.
    pub fn any(&self) -> bool {
        self.parking || self.entrance || self.restroom || self.seating
    }
}

/// A point of interest that may be visited.
///
/// Coordinates are optional because place lookups do not always return them;
/// points without both are dropped before clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePoint {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// `None` when the place does not publish opening hours.
    pub open_now: Option<bool>,
    pub next_closing_time: Option<String>,
    /// `None` for the synthetic starting point.
    pub accessibility: Option<Accessibility>,
}

impl CandidatePoint {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: Some(name.into()),
            latitude: Some(latitude),
            longitude: Some(longitude),
            open_now: None,
            next_closing_time: None,
            accessibility: Some(Accessibility::default()),
        }
    }

    /// The user's origin, with no opening or accessibility data.
    pub fn starting_point(origin: Coordinate) -> Self {
        Self {
            name: Some(STARTING_POINT_NAME.to_string()),
            latitude: Some(origin.lat),
            longitude: Some(origin.lon),
            open_now: None,
            next_closing_time: None,
            accessibility: None,
        }
    }
}

/// One end of a route segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: Option<String>,
    pub coordinate: Coordinate,
}

/// A directed leg between two consecutive points of a route.
///
/// Distance is in kilometres and duration in minutes, both rounded to two
/// decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub from: Waypoint,
    pub to: Waypoint,
    pub distance_km: f64,
    pub duration_min: f64,
    pub mode: TransportMode,
}

/// One leg as presented to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Origin")]
    pub origin: String,
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Estimated Travel Distance (km)")]
    pub distance_km: f64,
    #[serde(rename = "Estimated Travel Time (min)")]
    pub duration_min: f64,
    #[serde(rename = "Mode of Transport")]
    pub mode: TransportMode,
    #[serde(rename = "Google Maps Link")]
    pub navigation_link: Option<String>,
    #[serde(rename = "Image URL")]
    pub image_url: Option<String>,
}

/// A surviving cluster turned into a visitable route group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(rename = "Cluster ID")]
    pub cluster_id: usize,
    #[serde(rename = "Cluster Name")]
    pub name: String,
    #[serde(rename = "Cluster Description")]
    pub description: String,
    #[serde(rename = "Estimated Travel Distance (km)")]
    pub travel_distance_km: f64,
    #[serde(rename = "Estimated Travel Time (min)")]
    pub travel_time_min: f64,
    #[serde(rename = "Total Estimated Time (min)")]
    pub total_time_min: f64,
    #[serde(rename = "Route")]
    pub route: Vec<RouteEntry>,
}

/// Pretty-printed JSON array of itineraries.
pub fn itineraries_to_json(itineraries: &[Itinerary]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(itineraries)
}

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
