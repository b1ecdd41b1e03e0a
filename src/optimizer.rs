//! Visiting order inside one cluster.

use crate::cluster::Cluster;
use crate::resolver::ResolvedPoint;
use crate::traits::{Coordinate, RouteOptimizer};

/// Orders one cluster's points with an external optimizer.
///
/// The sub-problem is `[chain_in, points.., chain_out?]` with the first
/// position fixed, and the last one fixed when `chain_out` is given. Any
/// optimizer failure keeps the cluster's input order.
#[derive(Debug, Clone)]
pub struct IntraClusterOptimizer<O> {
    optimizer: O,
}

impl<O: RouteOptimizer> IntraClusterOptimizer<O> {
    pub fn new(optimizer: O) -> Self {
        Self { optimizer }
    }

    pub fn optimize<D>(
        &self,
        cluster: Cluster<D>,
        chain_in: Coordinate,
        chain_out: Option<Coordinate>,
    ) -> Vec<ResolvedPoint<D>> {
        let points = cluster.into_points();
        if points.len() <= 1 {
            return points;
        }

        let mut coordinates = Vec::with_capacity(points.len() + 2);
        coordinates.push(chain_in);
        coordinates.extend(points.iter().map(|p| p.coordinate));
        coordinates.extend(chain_out);

        let order = match self.optimizer.optimize(&coordinates, true, chain_out.is_some()) {
            Ok(order) => order,
            Err(err) => {
                tracing::warn!(points = points.len(), error = %err, "cluster optimization failed, keeping input order");
                return points;
            }
        };

        match cluster_order(&order, points.len(), chain_out.is_some()) {
            Some(order) => reorder(points, &order),
            None => {
                tracing::warn!(points = points.len(), ?order, "optimizer returned an invalid order, keeping input order");
                points
            }
        }
    }
}

/// Maps an order over the padded coordinate list back to cluster indices.
///
/// Returns `None` unless `order` is a permutation of the padded positions
/// that starts at the chain-in point (and ends at chain-out when present).
fn cluster_order(order: &[usize], points: usize, has_chain_out: bool) -> Option<Vec<usize>> {
    let total = points + 1 + usize::from(has_chain_out);
    if order.len() != total || order.first() != Some(&0) {
        return None;
    }
    if has_chain_out && order.last() != Some(&(total - 1)) {
        return None;
    }

    let mut seen = vec![false; total];
    for &index in order {
        if index >= total || seen[index] {
            return None;
        }
        seen[index] = true;
    }

    Some(
        order
            .iter()
            .filter(|&&index| index >= 1 && index <= points)
            .map(|&index| index - 1)
            .collect(),
    )
}

fn reorder<D>(points: Vec<ResolvedPoint<D>>, order: &[usize]) -> Vec<ResolvedPoint<D>> {
    let mut slots: Vec<Option<ResolvedPoint<D>>> = points.into_iter().map(Some).collect();
    order.iter().filter_map(|&index| slots[index].take()).collect()
}
