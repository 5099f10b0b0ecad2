//! Route-group planner: clusters candidates, routes each cluster from the
//! starting point and keeps the clusters that fit the time budget.

use std::ptr;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::budget::{aggregate, RouteTotals};
use crate::cluster::{cluster, ClusterOptions};
use crate::error::{PlanError, SkipReason};
use crate::geo::{Coordinate, TransportMode};
use crate::model::{round_to, CandidatePoint, Itinerary, RouteEntry, RouteSegment};
use crate::navigation::build_navigation_link;
use crate::sequencer::{compute_segments, Pacer, DEFAULT_ROUTE_DELAY};
use crate::traits::{ClusterNarrator, ImageFinder, RouteProvider};

/// Name used when the narrator fails or returns nothing.
pub const UNNAMED_CLUSTER: &str = "Unnamed Cluster";

/// Description used when the narrator fails or returns nothing.
pub const NO_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub cluster: ClusterOptions,
    /// Blocking pause between consecutive routing calls of one run, across
    /// cluster boundaries.
    pub route_delay: Duration,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            cluster: ClusterOptions::default(),
            route_delay: DEFAULT_ROUTE_DELAY,
        }
    }
}

/// Caller limits for one planning request.
#[derive(Debug, Clone)]
pub struct TripBudget {
    /// Upper bound on travel plus dwell time, in minutes.
    pub time_limit_min: f64,
    /// Maximum number of route groups.
    pub max_groups: usize,
    /// Time spent at each point, starting point included, in minutes.
    pub visit_minutes: f64,
    /// Allowed transport modes. Empty means driving only.
    pub modes: Vec<TransportMode>,
}

impl Default for TripBudget {
    fn default() -> Self {
        Self {
            time_limit_min: 500.0,
            max_groups: 5,
            visit_minutes: 0.0,
            modes: vec![TransportMode::Driving],
        }
    }
}

/// Plans route groups with injected collaborators.
///
/// Holds no state between calls; every [`Planner::optimize_routes`] call is
/// independent.
#[derive(Debug, Clone)]
pub struct Planner<R, I, N> {
    router: R,
    images: I,
    narrator: N,
    options: PlanOptions,
}

impl<R, I, N> Planner<R, I, N>
where
    R: RouteProvider,
    I: ImageFinder,
    N: ClusterNarrator,
{
    pub fn new(router: R, images: I, narrator: N, options: PlanOptions) -> Self {
        Self {
            router,
            images,
            narrator,
            options,
        }
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn options(&self) -> &PlanOptions {
        &self.options
    }

    /// Build itineraries for the clusters of `places` that fit `budget`.
    ///
    /// Fails only when `origin` is absent or not finite. Any per-cluster
    /// failure drops that cluster; zero survivors is `Ok(vec![])`.
    pub fn optimize_routes(
        &self,
        origin: Option<Coordinate>,
        places: &[CandidatePoint],
        budget: &TripBudget,
    ) -> Result<Vec<Itinerary>, PlanError> {
        let origin = origin
            .and_then(|c| Coordinate::from_parts(Some(c.lat), Some(c.lon)))
            .ok_or(PlanError::MissingOrigin)?;
        let start = CandidatePoint::starting_point(origin);

        let clusters = cluster(places, budget.max_groups, &self.options.cluster);
        let cluster_count = clusters.len();

        let mut pacer = Pacer::new(self.options.route_delay);
        let mut itineraries = Vec::with_capacity(cluster_count);
        for (cluster_id, group) in clusters {
            match self.plan_cluster(cluster_id, group, &start, budget, &mut pacer) {
                Ok(itinerary) => itineraries.push(itinerary),
                Err(reason) => debug!(cluster_id, %reason, "skipping cluster"),
            }
        }

        info!(
            candidates = places.len(),
            clusters = cluster_count,
            itineraries = itineraries.len(),
            "optimized routes"
        );

        Ok(itineraries)
    }

    fn plan_cluster<'a>(
        &self,
        cluster_id: usize,
        mut group: Vec<&'a CandidatePoint>,
        start: &'a CandidatePoint,
        budget: &TripBudget,
        pacer: &mut Pacer,
    ) -> Result<Itinerary, SkipReason> {
        if group.len() < 2 {
            return Err(SkipReason::TooFewPoints);
        }
        if !group.iter().any(|point| ptr::eq(*point, start)) {
            group.insert(0, start);
        }

        let segments = compute_segments(&group, &budget.modes, &self.router, pacer);
        if segments.is_empty() {
            return Err(SkipReason::NoSegments);
        }

        let totals = aggregate(&segments, budget.visit_minutes, group.len(), budget.time_limit_min)?;

        let route = segments.iter().map(|segment| self.route_entry(segment)).collect();
        let visits: Vec<&CandidatePoint> = group
            .iter()
            .copied()
            .filter(|point| !ptr::eq(*point, start))
            .collect();

        Ok(self.itinerary(cluster_id, &visits, totals, route))
    }

    fn itinerary(
        &self,
        cluster_id: usize,
        visits: &[&CandidatePoint],
        totals: RouteTotals,
        route: Vec<RouteEntry>,
    ) -> Itinerary {
        Itinerary {
            cluster_id,
            name: self.cluster_name(visits),
            description: self.cluster_description(visits),
            travel_distance_km: round_to(totals.travel_distance_km, 1),
            travel_time_min: round_to(totals.travel_time_min, 1),
            total_time_min: round_to(totals.total_time_min, 1),
            route,
        }
    }

    fn route_entry(&self, segment: &RouteSegment) -> RouteEntry {
        RouteEntry {
            name: segment.to.name.clone(),
            origin: segment.from.coordinate.to_string(),
            destination: segment.to.coordinate.to_string(),
            distance_km: round_to(segment.distance_km, 1),
            duration_min: round_to(segment.duration_min, 1),
            mode: segment.mode,
            navigation_link: build_navigation_link(
                &[segment.from.coordinate, segment.to.coordinate],
                &[segment.mode],
            ),
            image_url: segment.to.name.as_deref().and_then(|name| self.image_for(name)),
        }
    }

    fn image_for(&self, name: &str) -> Option<String> {
        if name.trim().is_empty() {
            return None;
        }
        match self.images.find_representative_image(name) {
            Ok(url) => url,
            Err(err) => {
                warn!(place = name, error = %err, "image lookup failed");
                None
            }
        }
    }

    fn cluster_name(&self, visits: &[&CandidatePoint]) -> String {
        match self.narrator.cluster_name(visits) {
            Ok(name) if !name.trim().is_empty() => name.trim().to_string(),
            Ok(_) => UNNAMED_CLUSTER.to_string(),
            Err(err) => {
                warn!(error = %err, "cluster naming failed");
                UNNAMED_CLUSTER.to_string()
            }
        }
    }

    fn cluster_description(&self, visits: &[&CandidatePoint]) -> String {
        let text = match self.narrator.cluster_description(visits) {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "cluster description failed");
                return NO_DESCRIPTION.to_string();
            }
        };

        match text.trim().lines().next().map(str::trim) {
            Some(line) if !line.is_empty() => line.to_string(),
            _ => NO_DESCRIPTION.to_string(),
        }
    }
}
