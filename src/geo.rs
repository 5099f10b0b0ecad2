//! Coordinate handling and distance-based transport-mode selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::CandidatePoint;

/// Upper bound (km) for preferring walking.
pub const WALKING_MAX_KM: f64 = 1.5;

/// Upper bound (km) for preferring bicycling.
pub const BICYCLING_MAX_KM: f64 = 5.0;

/// Default per-axis tolerance in degrees (~1.1 km) for proximity checks.
pub const DEFAULT_TOLERANCE_DEG: f64 = 0.01;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a coordinate only when both parts are present and finite.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some(Self { lat, lon }),
            _ => None,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Extract the coordinates of a candidate point, if it has usable ones.
pub fn parse_coordinate(point: &CandidatePoint) -> Option<Coordinate> {
    Coordinate::from_parts(point.latitude, point.longitude)
}

/// How a leg is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Walking => "walking",
            TransportMode::Bicycling => "bicycling",
            TransportMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modes used when the caller allows none.
pub const DEFAULT_MODES: &[TransportMode] = &[TransportMode::Driving];

/// Pick a transport mode for a leg of `distance_km`.
///
/// Short legs prefer walking, medium legs bicycling and long legs transit,
/// each only if allowed. Otherwise driving if allowed, else the first
/// allowed mode. An empty `allowed` slice means driving only.
pub fn select_transport_mode(distance_km: f64, allowed: &[TransportMode]) -> TransportMode {
    let allowed = if allowed.is_empty() { DEFAULT_MODES } else { allowed };

    let preferred = if distance_km <= WALKING_MAX_KM {
        TransportMode::Walking
    } else if distance_km <= BICYCLING_MAX_KM {
        TransportMode::Bicycling
    } else {
        TransportMode::Transit
    };

    if allowed.contains(&preferred) {
        preferred
    } else if allowed.contains(&TransportMode::Driving) {
        TransportMode::Driving
    } else {
        allowed[0]
    }
}

/// True when `current` lies within `tolerance_deg` of `target` on both axes.
pub fn is_within_tolerance(current: Coordinate, target: Coordinate, tolerance_deg: f64) -> bool {
    (current.lat - target.lat).abs() <= tolerance_deg
        && (current.lon - target.lon).abs() <= tolerance_deg
}
