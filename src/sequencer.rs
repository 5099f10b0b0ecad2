//! Turns an ordered list of points into routed segments.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::geo::{parse_coordinate, select_transport_mode, TransportMode};
use crate::model::{round_to, CandidatePoint, RouteSegment, Waypoint};
use crate::traits::{RouteLeg, RouteProvider};

/// Pause between consecutive routing calls.
pub const DEFAULT_ROUTE_DELAY: Duration = Duration::from_secs(1);

/// Blocking pause between routing calls, shared by every cluster of one
/// planning run.
#[derive(Debug, Clone)]
pub struct Pacer {
    delay: Duration,
    last_call: Option<Instant>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_call: None,
        }
    }

    /// Sleep `delay` unless this is the first call, then record the call.
    pub fn wait(&mut self) {
        if self.last_call.is_some() && !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.last_call = Some(Instant::now());
    }

    pub fn last_call(&self) -> Option<Instant> {
        self.last_call
    }
}

/// Route each consecutive pair of `points`, in the given order.
///
/// Points without coordinates are skipped. Fewer than two usable points
/// yields no segments. A failed or malformed leg is left out and the
/// remaining pairs are still routed, so the result may be partial.
///
/// Every routing call goes through `pacer`, so the pause also separates the
/// last call of one cluster from the first call of the next.
pub fn compute_segments<R>(
    points: &[&CandidatePoint],
    modes: &[TransportMode],
    router: &R,
    pacer: &mut Pacer,
) -> Vec<RouteSegment>
where
    R: RouteProvider + ?Sized,
{
    let waypoints: Vec<Waypoint> = points
        .iter()
        .filter_map(|point| {
            parse_coordinate(point).map(|coordinate| Waypoint {
                name: point.name.clone(),
                coordinate,
            })
        })
        .collect();

    if waypoints.len() < 2 {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(waypoints.len() - 1);
    for pair in waypoints.windows(2) {
        pacer.wait();

        let (from, to) = (&pair[0], &pair[1]);
        let leg = match router.compute_route(from.coordinate, to.coordinate) {
            Ok(leg) => leg,
            Err(err) => {
                warn!(origin = %from.coordinate, destination = %to.coordinate, error = %err, "skipping leg");
                continue;
            }
        };

        if !is_well_formed(&leg) {
            warn!(origin = %from.coordinate, destination = %to.coordinate, ?leg, "skipping malformed leg");
            continue;
        }

        let distance_km = round_to(leg.distance_meters / 1000.0, 2);
        let duration_min = round_to(leg.duration_seconds / 60.0, 2);
        segments.push(RouteSegment {
            from: from.clone(),
            to: to.clone(),
            distance_km,
            duration_min,
            mode: select_transport_mode(distance_km, modes),
        });
    }

    debug!(
        legs = waypoints.len() - 1,
        routed = segments.len(),
        "computed route segments"
    );

    segments
}

fn is_well_formed(leg: &RouteLeg) -> bool {
    leg.distance_meters.is_finite()
        && leg.duration_seconds.is_finite()
        && leg.distance_meters >= 0.0
        && leg.duration_seconds >= 0.0
}
