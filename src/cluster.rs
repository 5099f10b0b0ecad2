//! Spatial clustering of candidate points.
//!
//! Latitude and longitude are treated as planar coordinates, which is an
//! acceptable approximation at city scale. Partitioning is Lloyd's k-means
//! with k-means++ seeding from a fixed seed.

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::geo::parse_coordinate;
use crate::model::CandidatePoint;

/// Iteration cap for the refinement loop.
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Seed used when the caller does not choose one.
pub const DEFAULT_SEED: u64 = 0x5eed;

#[derive(Debug, Clone)]
pub struct ClusterOptions {
    /// Maximum number of assign/update rounds.
    pub max_iterations: usize,
    /// Seed for centroid initialisation.
    pub seed: u64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: DEFAULT_SEED,
        }
    }
}

/// Cluster id to the points assigned to it. Ids carry no ordering meaning.
pub type Clusters<'a> = BTreeMap<usize, Vec<&'a CandidatePoint>>;

type Point2 = [f64; 2];

/// Partition `points` into at most `max_groups` geographic clusters.
///
/// Points without valid coordinates are ignored; every other point lands in
/// exactly one cluster. Returns an empty map when no point is usable or
/// `max_groups` is zero.
pub fn cluster<'a>(
    points: &'a [CandidatePoint],
    max_groups: usize,
    options: &ClusterOptions,
) -> Clusters<'a> {
    let (valid, coords): (Vec<&CandidatePoint>, Vec<Point2>) = points
        .iter()
        .filter_map(|point| parse_coordinate(point).map(|c| (point, [c.lat, c.lon])))
        .unzip();

    if valid.is_empty() {
        return Clusters::new();
    }

    let k = max_groups.min(valid.len());
    if k < 1 {
        return Clusters::new();
    }

    let labels = kmeans(&coords, k, options);

    let mut clusters = Clusters::new();
    for (point, label) in valid.into_iter().zip(labels) {
        clusters.entry(label).or_default().push(point);
    }

    debug!(
        points = coords.len(),
        requested = k,
        produced = clusters.len(),
        "clustered candidate points"
    );

    clusters
}

/// Run k-means and return the label of each input point.
///
/// Labels always refer to the nearest final centroid.
fn kmeans(coords: &[Point2], k: usize, options: &ClusterOptions) -> Vec<usize> {
    let mut rng = SmallRng::seed_from_u64(options.seed);
    let mut centers = seed_centers(coords, k, &mut rng);
    let mut labels = assign(coords, &centers);

    for _ in 0..options.max_iterations {
        update_centers(coords, &labels, &mut centers);
        let next = assign(coords, &centers);
        if next == labels {
            break;
        }
        labels = next;
    }

    labels
}

/// k-means++ initialisation: each new centre is drawn with probability
/// proportional to its squared distance from the nearest chosen centre.
fn seed_centers(coords: &[Point2], k: usize, rng: &mut SmallRng) -> Vec<Point2> {
    let mut centers = Vec::with_capacity(k);
    centers.push(coords[rng.random_range(0..coords.len())]);

    while centers.len() < k {
        let weights: Vec<f64> = coords
            .iter()
            .map(|c| nearest(c, &centers).1)
            .collect();
        let total: f64 = weights.iter().sum();

        let next = if total > 0.0 {
            let mut target = rng.random::<f64>() * total;
            let mut chosen = weights.iter().rposition(|w| *w > 0.0).unwrap_or(0);
            for (i, w) in weights.iter().enumerate() {
                if target < *w {
                    chosen = i;
                    break;
                }
                target -= w;
            }
            chosen
        } else {
            // All remaining points coincide with a centre.
            rng.random_range(0..coords.len())
        };

        centers.push(coords[next]);
    }

    centers
}

/// Nearest-centre search is the only parallel step; clusters, routing and
/// collaborator calls stay sequential.
fn assign(coords: &[Point2], centers: &[Point2]) -> Vec<usize> {
    coords.par_iter().map(|c| nearest(c, centers).0).collect()
}

fn update_centers(coords: &[Point2], labels: &[usize], centers: &mut [Point2]) {
    let mut sums = vec![[0.0, 0.0]; centers.len()];
    let mut counts = vec![0usize; centers.len()];
    for (c, &label) in coords.iter().zip(labels) {
        sums[label][0] += c[0];
        sums[label][1] += c[1];
        counts[label] += 1;
    }
    for (j, center) in centers.iter_mut().enumerate() {
        // Empty clusters keep their previous centre.
        if counts[j] > 0 {
            let n = counts[j] as f64;
            *center = [sums[j][0] / n, sums[j][1] / n];
        }
    }
}

/// Index of and squared distance to the nearest centre.
fn nearest(c: &Point2, centers: &[Point2]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (j, ctr) in centers.iter().enumerate() {
        let dist = (c[0] - ctr[0]).powi(2) + (c[1] - ctr[1]).powi(2);
        if dist < best.1 {
            best = (j, dist);
        }
    }
    best
}
