//! Real Manhattan / Brooklyn points of interest for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap.

use itinerary_planner::geo::Coordinate;
use itinerary_planner::model::CandidatePoint;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn candidate(&self) -> CandidatePoint {
        CandidatePoint::new(self.name, self.lat, self.lng)
    }
}

/// Upper East Side origin used throughout the tests.
pub const ORIGIN: Location = Location::new("164 E 87th St", 40.78, -73.95);

// ============================================================================
// Museum Mile / Central Park
// ============================================================================

pub const MUSEUM_MILE: &[Location] = &[
    Location::new("The Metropolitan Museum of Art", 40.7794366, -73.9632440),
    Location::new("Solomon R. Guggenheim Museum", 40.7829796, -73.9589706),
    Location::new("Neue Galerie", 40.7813020, -73.9602360),
    Location::new("Cooper Hewitt", 40.7843364, -73.9578430),
    Location::new("Jewish Museum", 40.7853770, -73.9571270),
    Location::new("American Museum of Natural History", 40.7813241, -73.9739882),
    Location::new("Belvedere Castle", 40.7794020, -73.9690650),
    Location::new("Bethesda Fountain", 40.7740185, -73.9708180),
];

// ============================================================================
// Midtown
// ============================================================================

pub const MIDTOWN: &[Location] = &[
    Location::new("Empire State Building", 40.7484405, -73.9856644),
    Location::new("Bryant Park", 40.7535965, -73.9832326),
    Location::new("Grand Central Terminal", 40.7527262, -73.9772294),
    Location::new("Rockefeller Center", 40.7587402, -73.9786736),
    Location::new("Museum of Modern Art", 40.7614327, -73.9776216),
    Location::new("Times Square", 40.7579747, -73.9855426),
];

// ============================================================================
// Lower Manhattan / Brooklyn
// ============================================================================

pub const DOWNTOWN: &[Location] = &[
    Location::new("One World Observatory", 40.7133182, -74.0133795),
    Location::new("9/11 Memorial", 40.7114840, -74.0124720),
    Location::new("Charging Bull", 40.7055537, -74.0134436),
    Location::new("Battery Park", 40.7033127, -74.0170268),
    Location::new("Brooklyn Bridge", 40.7060855, -73.9968643),
    Location::new("Brooklyn Bridge Park", 40.7003100, -73.9966460),
];

pub fn all_locations() -> Vec<Location> {
    let mut all = Vec::with_capacity(MUSEUM_MILE.len() + MIDTOWN.len() + DOWNTOWN.len());
    all.extend_from_slice(MUSEUM_MILE);
    all.extend_from_slice(MIDTOWN);
    all.extend_from_slice(DOWNTOWN);
    all
}

/// Candidate points for the first `count` locations.
pub fn sample_candidates(count: usize) -> Vec<CandidatePoint> {
    all_locations()
        .iter()
        .take(count)
        .map(Location::candidate)
        .collect()
}

/// One candidate from each neighbourhood, and a few more uptown.
pub fn five_candidates() -> Vec<CandidatePoint> {
    vec![
        MUSEUM_MILE[0].candidate(),
        MUSEUM_MILE[1].candidate(),
        MUSEUM_MILE[2].candidate(),
        MIDTOWN[0].candidate(),
        DOWNTOWN[0].candidate(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_in_nyc_area() {
        for loc in all_locations() {
            assert!(loc.lat > 40.69 && loc.lat < 40.80, "{} lat out of range: {}", loc.name, loc.lat);
            assert!(loc.lng > -74.03 && loc.lng < -73.94, "{} lng out of range: {}", loc.name, loc.lng);
        }
    }
}
