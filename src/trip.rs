//! End-to-end trip planning: resolve the start, find nearby places and hand
//! them to the [`Planner`].

use tracing::{info, warn};

use crate::error::TripError;
use crate::geo::{is_within_tolerance, Coordinate};
use crate::google::GoogleClient;
use crate::model::Itinerary;
use crate::places::{expand_keywords, normalize_places};
use crate::planner::{PlanOptions, Planner, TripBudget};
use crate::traits::{ClusterNarrator, Geocoder, ImageFinder, LocationProvider, PlaceSearch, RouteProvider};

/// Default search radius in metres.
pub const DEFAULT_RADIUS_M: f64 = 30_000.0;

/// Default cap on places fetched per trip.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// One trip request.
#[derive(Debug, Clone)]
pub struct TripQuery {
    /// Address to start from, used unless `use_current_location` is set.
    pub address: Option<String>,
    pub use_current_location: bool,
    /// Place categories (e.g. "attraction", "food") or raw place types.
    pub keywords: Vec<String>,
    pub radius_m: f64,
    /// Keep only places with a wheelchair-accessible feature.
    pub accessible_only: bool,
    pub max_results: usize,
    pub budget: TripBudget,
}

impl Default for TripQuery {
    fn default() -> Self {
        Self {
            address: None,
            use_current_location: false,
            keywords: Vec::new(),
            radius_m: DEFAULT_RADIUS_M,
            accessible_only: false,
            max_results: DEFAULT_MAX_RESULTS,
            budget: TripBudget::default(),
        }
    }
}

/// Combines location services with a [`Planner`].
#[derive(Debug, Clone)]
pub struct TripPlanner<C, R, I, N> {
    locator: C,
    planner: Planner<R, I, N>,
}

impl<N: ClusterNarrator> TripPlanner<GoogleClient, GoogleClient, GoogleClient, N> {
    /// Use one Google client for every lookup, with `narrator` for naming.
    pub fn google(client: GoogleClient, narrator: N, options: PlanOptions) -> Self {
        let planner = Planner::new(client.clone(), client.clone(), narrator, options);
        Self::new(client, planner)
    }
}

impl<C, R, I, N> TripPlanner<C, R, I, N>
where
    C: Geocoder + LocationProvider + PlaceSearch,
    R: RouteProvider,
    I: ImageFinder,
    N: ClusterNarrator,
{
    pub fn new(locator: C, planner: Planner<R, I, N>) -> Self {
        Self { locator, planner }
    }

    pub fn locator(&self) -> &C {
        &self.locator
    }

    pub fn planner(&self) -> &Planner<R, I, N> {
        &self.planner
    }

    /// Current location when requested, otherwise the geocoded address.
    pub fn resolve_start(&self, query: &TripQuery) -> Result<Coordinate, TripError> {
        let resolved = if query.use_current_location {
            self.locator.current_location()
        } else if let Some(address) = query.address.as_deref() {
            self.locator.geocode(address)
        } else {
            return Err(TripError::NoStartRequested);
        };

        resolved.map_err(TripError::StartUnresolved)
    }

    /// Resolve the start, search nearby places and plan route groups.
    ///
    /// A failed place search plans over zero candidates rather than failing.
    pub fn plan_trip(&self, query: &TripQuery) -> Result<Vec<Itinerary>, TripError> {
        let start = self.resolve_start(query)?;

        let place_types = expand_keywords(query.keywords.as_slice());
        let raw = self
            .locator
            .search_nearby(&place_types, start, query.radius_m, query.max_results)
            .unwrap_or_else(|err| {
                warn!(error = %err, "place search failed");
                Vec::new()
            });
        let candidates = normalize_places(&raw, query.accessible_only);

        info!(
            %start,
            place_types = place_types.len(),
            candidates = candidates.len(),
            "planning trip"
        );

        Ok(self.planner.optimize_routes(Some(start), &candidates, &query.budget)?)
    }

    /// True when the current location is within `tolerance_deg` of `target`
    /// on both axes. Any lookup failure counts as "not there".
    pub fn is_user_at_location(&self, target: Coordinate, tolerance_deg: f64) -> bool {
        match self.locator.current_location() {
            Ok(current) => is_within_tolerance(current, target, tolerance_deg),
            Err(err) => {
                warn!(error = %err, "current location unavailable");
                false
            }
        }
    }
}
