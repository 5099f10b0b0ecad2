//! Aggregates segment costs and enforces the caller's time budget.

use crate::error::BudgetRejection;
use crate::model::RouteSegment;

/// Aggregate cost of a routed cluster. Minutes and kilometres, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteTotals {
    pub travel_distance_km: f64,
    pub travel_time_min: f64,
    pub dwell_time_min: f64,
    pub total_time_min: f64,
}

/// Sum `segments` and add dwell time for every point, starting point included.
///
/// Rejects clusters with fewer than two points, with no routed segments, or
/// whose total time exceeds `time_limit_min`. A total exactly at the limit is
/// accepted.
pub fn aggregate(
    segments: &[RouteSegment],
    dwell_per_location_min: f64,
    point_count: usize,
    time_limit_min: f64,
) -> Result<RouteTotals, BudgetRejection> {
    if point_count < 2 {
        return Err(BudgetRejection::TooFewPoints);
    }
    if segments.is_empty() {
        return Err(BudgetRejection::NoSegments);
    }

    let travel_distance_km: f64 = segments.iter().map(|s| s.distance_km).sum();
    let travel_time_min: f64 = segments.iter().map(|s| s.duration_min).sum();
    let dwell_time_min = dwell_per_location_min * point_count as f64;
    let total_time_min = travel_time_min + dwell_time_min;

    if total_time_min > time_limit_min {
        return Err(BudgetRejection::OverBudget {
            total: total_time_min,
            limit: time_limit_min,
        });
    }

    Ok(RouteTotals {
        travel_distance_km,
        travel_time_min,
        dwell_time_min,
        total_time_min,
    })
}
