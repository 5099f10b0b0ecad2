//! Deterministic stand-ins for routing, image, narration and location services.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use itinerary_planner::error::CollaboratorError;
use itinerary_planner::geo::Coordinate;
use itinerary_planner::haversine::HaversineRouter;
use itinerary_planner::model::CandidatePoint;
use itinerary_planner::places::{LocalizedText, RawLocation, RawPlace};
use itinerary_planner::traits::{
    ClusterNarrator, Geocoder, ImageFinder, LocationProvider, PlaceSearch, RouteLeg, RouteProvider,
};

/// Shared log of routed (origin, destination) pairs.
pub type CallLog = Rc<RefCell<Vec<(Coordinate, Coordinate)>>>;

/// Haversine router that records every call and can fail chosen destinations.
pub struct RecordingRouter {
    inner: HaversineRouter,
    calls: CallLog,
    fail_to: Vec<Coordinate>,
}

impl RecordingRouter {
    pub fn with_log() -> (Self, CallLog) {
        let calls = CallLog::default();
        let router = Self {
            inner: HaversineRouter::default(),
            calls: Rc::clone(&calls),
            fail_to: Vec::new(),
        };
        (router, calls)
    }

    pub fn failing_to(mut self, destination: Coordinate) -> Self {
        self.fail_to.push(destination);
        self
    }
}

impl RouteProvider for RecordingRouter {
    fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, CollaboratorError> {
        self.calls.borrow_mut().push((origin, destination));
        if self.fail_to.contains(&destination) {
            return Err(CollaboratorError::Status { status: 503 });
        }
        self.inner.compute_route(origin, destination)
    }
}

/// Haversine router that records when each call arrives.
#[derive(Default)]
pub struct TimedRouter {
    inner: HaversineRouter,
    pub arrivals: RefCell<Vec<Instant>>,
}

impl RouteProvider for TimedRouter {
    fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, CollaboratorError> {
        self.arrivals.borrow_mut().push(Instant::now());
        self.inner.compute_route(origin, destination)
    }
}

/// Every leg costs the same.
pub struct FixedRouter {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl RouteProvider for FixedRouter {
    fn compute_route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<RouteLeg, CollaboratorError> {
        Ok(RouteLeg {
            distance_meters: self.distance_meters,
            duration_seconds: self.duration_seconds,
        })
    }
}

/// Routing service that is always down.
pub struct FailingRouter;

impl RouteProvider for FailingRouter {
    fn compute_route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<RouteLeg, CollaboratorError> {
        Err(CollaboratorError::Unavailable("routing offline".to_string()))
    }
}

/// Image URL derived from the query.
pub struct SlugImages;

impl ImageFinder for SlugImages {
    fn find_representative_image(&self, query: &str) -> Result<Option<String>, CollaboratorError> {
        let slug = query.to_lowercase().replace(' ', "-");
        Ok(Some(format!("https://img.example/{}.jpg", slug)))
    }
}

/// Image search that is always down.
pub struct FailingImages;

impl ImageFinder for FailingImages {
    fn find_representative_image(&self, _query: &str) -> Result<Option<String>, CollaboratorError> {
        Err(CollaboratorError::Status { status: 403 })
    }
}

/// Narrator returning the same text for every cluster.
pub struct CannedNarrator {
    pub name: &'static str,
    pub description: &'static str,
}

impl ClusterNarrator for CannedNarrator {
    fn cluster_name(&self, _points: &[&CandidatePoint]) -> Result<String, CollaboratorError> {
        Ok(self.name.to_string())
    }

    fn cluster_description(&self, _points: &[&CandidatePoint]) -> Result<String, CollaboratorError> {
        Ok(self.description.to_string())
    }
}

/// Location services backed by fixed answers.
#[derive(Default)]
pub struct StubLocator {
    pub current: Option<Coordinate>,
    pub geocoded: Option<Coordinate>,
    pub places: Vec<RawPlace>,
    pub searched_types: RefCell<Vec<String>>,
}

impl Geocoder for StubLocator {
    fn geocode(&self, _address: &str) -> Result<Coordinate, CollaboratorError> {
        self.geocoded.ok_or(CollaboratorError::EmptyResponse)
    }
}

impl LocationProvider for StubLocator {
    fn current_location(&self) -> Result<Coordinate, CollaboratorError> {
        self.current
            .ok_or_else(|| CollaboratorError::Unavailable("no geolocation".to_string()))
    }
}

impl PlaceSearch for StubLocator {
    fn search_nearby(
        &self,
        keywords: &[String],
        _center: Coordinate,
        _radius_m: f64,
        max_results: usize,
    ) -> Result<Vec<RawPlace>, CollaboratorError> {
        self.searched_types.borrow_mut().extend_from_slice(keywords);
        Ok(self.places.iter().take(max_results).cloned().collect())
    }
}

/// A raw place record as the nearby-search service would return it.
pub fn raw_place(id: &str, name: &str, lat: f64, lng: f64) -> RawPlace {
    RawPlace {
        id: Some(id.to_string()),
        display_name: Some(LocalizedText {
            text: Some(name.to_string()),
            language_code: Some("en".to_string()),
        }),
        location: Some(RawLocation {
            latitude: Some(lat),
            longitude: Some(lng),
        }),
        ..RawPlace::default()
    }
}
