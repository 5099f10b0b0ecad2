//! Path-style map navigation links.

use crate::geo::{Coordinate, TransportMode};

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir";

/// Build a directions link visiting `locations` in order.
///
/// Each location becomes one path component; the travel mode is the first of
/// `modes`, or driving when none is given. Returns `None` for fewer than two
/// locations.
pub fn build_navigation_link(locations: &[Coordinate], modes: &[TransportMode]) -> Option<String> {
    if locations.len() < 2 {
        return None;
    }

    let path = locations
        .iter()
        .map(Coordinate::to_string)
        .collect::<Vec<_>>()
        .join("/");
    let mode = modes.first().copied().unwrap_or(TransportMode::Driving);

    Some(format!("{}/{}/?travelmode={}", DIRECTIONS_BASE_URL, path, mode))
}
