//! Offline leg estimates from straight-line distance.
//!
//! Each leg is priced as great-circle kilometres at a fixed speed, which needs
//! no network and undercounts street detours.

use crate::error::CollaboratorError;
use crate::geo::Coordinate;
use crate::traits::{RouteLeg, RouteProvider};

/// Assumed city driving speed.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in kilometres.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Haversine-based route provider.
///
/// Estimates each leg from straight-line distance and an assumed speed.
#[derive(Debug, Clone)]
pub struct HaversineRouter {
    /// Assumed average travel speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineRouter {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineRouter {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Whole seconds needed to cover `km` at the configured speed.
    fn km_to_seconds(&self, km: f64) -> f64 {
        let hours = km / self.speed_kmh;
        (hours * 3600.0).round()
    }
}

impl RouteProvider for HaversineRouter {
    fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, CollaboratorError> {
        if self.speed_kmh.is_nan() || self.speed_kmh <= 0.0 {
            return Err(CollaboratorError::Unavailable(format!(
                "invalid speed {} km/h",
                self.speed_kmh
            )));
        }

        let km = haversine_km(origin, destination);
        Ok(RouteLeg {
            distance_meters: (km * 1000.0).round(),
            duration_seconds: self.km_to_seconds(km),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_length_leg() {
        let router = HaversineRouter::default();
        let met = Coordinate::new(40.7794, -73.9632);
        let leg = router.compute_route(met, met).expect("leg");
        assert_eq!(leg.distance_meters, 0.0);
        assert_eq!(leg.duration_seconds, 0.0);
    }

    #[test]
    fn test_manhattan_to_boston() {
        // Great-circle distance is a little over 300 km.
        let km = haversine_km(Coordinate::new(40.71, -74.01), Coordinate::new(42.36, -71.06));
        assert!((295.0..315.0).contains(&km), "unexpected distance {}", km);
    }

    #[test]
    fn test_leg_cost_ignores_direction() {
        let router = HaversineRouter::default();
        let uptown = Coordinate::new(40.78, -73.95);
        let midtown = Coordinate::new(40.7484, -73.9857);

        let south = router.compute_route(uptown, midtown).expect("southbound");
        let north = router.compute_route(midtown, uptown).expect("northbound");
        assert_eq!(south, north);
    }

    #[test]
    fn test_duration_follows_speed() {
        let walking_pace = HaversineRouter::new(5.0);
        assert_eq!(walking_pace.km_to_seconds(1.0), 720.0);
        assert_eq!(HaversineRouter::default().km_to_seconds(2.0), 180.0);
    }

    #[test]
    fn test_non_positive_speed_is_unavailable() {
        let point = Coordinate::new(40.78, -73.95);
        for speed in [0.0, -10.0, f64::NAN] {
            let err = HaversineRouter::new(speed).compute_route(point, point);
            assert!(matches!(err, Err(CollaboratorError::Unavailable(_))));
        }
    }
}
