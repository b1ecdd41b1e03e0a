//! Proximity grouping of resolved points and ordering of the groups.

use crate::haversine::distance_km;
use crate::resolver::ResolvedPoint;
use crate::traits::Coordinate;

/// Default grouping radius in kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 3.0;

/// A non-empty group of nearby points. The first point is the seed.
#[derive(Debug, Clone)]
pub struct Cluster<D> {
    points: Vec<ResolvedPoint<D>>,
}

impl<D> Cluster<D> {
    fn seeded(seed: ResolvedPoint<D>) -> Self {
        Self { points: vec![seed] }
    }

    pub fn seed(&self) -> &ResolvedPoint<D> {
        &self.points[0]
    }

    pub fn points(&self) -> &[ResolvedPoint<D>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<ResolvedPoint<D>> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Clusters are built non-empty, so this is always false.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Greedy radius grouping in input order.
///
/// Each unvisited point seeds a cluster and claims every later unvisited
/// point within `radius_km` of the seed. Members are compared to the seed
/// only, so a cluster is not the transitive closure of its neighbours and
/// the result depends on input order.
pub fn cluster<D>(points: Vec<ResolvedPoint<D>>, radius_km: f64) -> Vec<Cluster<D>> {
    let coordinates: Vec<Coordinate> = points.iter().map(|p| p.coordinate).collect();
    let mut assignment: Vec<Option<usize>> = vec![None; points.len()];
    let mut cluster_count = 0;

    for seed in 0..coordinates.len() {
        if assignment[seed].is_some() {
            continue;
        }
        assignment[seed] = Some(cluster_count);

        for candidate in seed + 1..coordinates.len() {
            if assignment[candidate].is_none()
                && distance_km(coordinates[seed], coordinates[candidate]) <= radius_km
            {
                assignment[candidate] = Some(cluster_count);
            }
        }
        cluster_count += 1;
    }

    let mut clusters: Vec<Cluster<D>> = Vec::with_capacity(cluster_count);
    for (point, slot) in points.into_iter().zip(assignment) {
        // Every point was assigned above; seeds come first in input order.
        let Some(index) = slot else { continue };
        match clusters.get_mut(index) {
            Some(existing) => existing.points.push(point),
            None => clusters.push(Cluster::seeded(point)),
        }
    }

    tracing::debug!(
        points = coordinates.len(),
        clusters = clusters.len(),
        radius_km,
        "clustered resolved points"
    );

    clusters
}

/// Orders clusters by seed distance from `origin`, nearest first.
///
/// The sort is stable: clusters at equal distance keep their relative order.
pub fn sequence<D>(clusters: Vec<Cluster<D>>, origin: Coordinate) -> Vec<Cluster<D>> {
    let mut keyed: Vec<(f64, Cluster<D>)> = clusters
        .into_iter()
        .map(|cluster| (distance_km(origin, cluster.seed().coordinate), cluster))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, cluster)| cluster).collect()
}
