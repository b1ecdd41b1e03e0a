//! Route planning service: resolve, cluster, sequence, optimize, assemble.

use std::sync::Arc;

use crate::cache::CoordinateCache;
use crate::cancel::CancellationToken;
use crate::cluster::{Cluster, cluster, sequence};
use crate::config::PlannerConfig;
use crate::error::{ConfigError, PlanError};
use crate::map_link::GoogleMapsLinkExtractor;
use crate::nominatim::NominatimGeocoder;
use crate::optimizer::IntraClusterOptimizer;
use crate::osrm::OsrmTripOptimizer;
use crate::plan::{FinalStop, RoutePlan};
use crate::resolver::{CoordinateResolver, ResolvedPoint};
use crate::traits::{Coordinate, Destination, DestinationSource, Geocoder, MapLinkExtractor, RouteOptimizer};

/// A computed plan plus what was left out of it.
#[derive(Debug, Clone)]
pub struct RouteOutcome<D: Destination> {
    pub plan: RoutePlan<D>,
    /// Destinations that could not be placed on the map, in source order.
    pub unresolved: Vec<D::Id>,
    /// False when a final address was given but could not be geocoded; the
    /// plan then ends at its last delivery.
    pub final_destination_resolved: bool,
}

impl<D: Destination> RouteOutcome<D> {
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}

pub struct RoutePlanner<S, E, G, O> {
    source: S,
    resolver: CoordinateResolver<E, G>,
    optimizer: IntraClusterOptimizer<O>,
    radius_km: f64,
    pool: rayon::ThreadPool,
}

/// Planner wired to Google Maps links, Nominatim and OSRM.
pub type HttpRoutePlanner<S> = RoutePlanner<S, GoogleMapsLinkExtractor, NominatimGeocoder, OsrmTripOptimizer>;

impl<S: DestinationSource> HttpRoutePlanner<S> {
    pub fn from_config(
        source: S,
        cache: Arc<CoordinateCache>,
        config: &PlannerConfig,
    ) -> Result<Self, ConfigError> {
        let geocoder = NominatimGeocoder::new(config.nominatim.clone())?;
        let optimizer = OsrmTripOptimizer::new(config.osrm.clone())?;
        RoutePlanner::new(source, GoogleMapsLinkExtractor::new(), geocoder, optimizer, cache, config)
    }
}

impl<S, E, G, O> RoutePlanner<S, E, G, O>
where
    S: DestinationSource,
    E: MapLinkExtractor + Sync,
    G: Geocoder + Sync,
    O: RouteOptimizer,
{
    pub fn new(
        source: S,
        extractor: E,
        geocoder: G,
        optimizer: O,
        cache: Arc<CoordinateCache>,
        config: &PlannerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_concurrency)
            .thread_name(|i| format!("geocode-{}", i))
            .build()?;

        Ok(Self {
            source,
            resolver: CoordinateResolver::new(extractor, geocoder, cache),
            optimizer: IntraClusterOptimizer::new(optimizer),
            radius_km: config.radius_km,
            pool,
        })
    }

    pub fn cache(&self) -> &Arc<CoordinateCache> {
        self.resolver.cache()
    }

    /// Plans the route for `date` from `origin`, ending at `final_address`
    /// when given.
    #[tracing::instrument(level = "info", skip(self, cancel))]
    pub fn compute_route(
        &self,
        date: i64,
        origin: Coordinate,
        final_address: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<RouteOutcome<S::Destination>, PlanError> {
        if !origin.is_finite() {
            return Err(PlanError::InvalidOrigin {
                lon: origin.lon,
                lat: origin.lat,
            });
        }
        if cancel.is_cancelled() {
            return Err(PlanError::Cancelled);
        }

        let destinations = self.source.destinations_for_day(date)?;
        if destinations.is_empty() {
            tracing::info!("no destinations scheduled");
            return Err(PlanError::NothingToPlan { unresolved: 0 });
        }

        // Addresses are cache keys as given; only blank ones are dropped.
        let final_address = final_address.filter(|a| !a.trim().is_empty());
        let batch = self
            .resolver
            .resolve_all(&destinations, final_address, &self.pool, cancel)?;

        let mut points = Vec::with_capacity(destinations.len());
        let mut unresolved = Vec::new();
        for (destination, coordinate) in destinations.into_iter().zip(batch.coordinates) {
            match coordinate {
                Some(coordinate) => points.push(ResolvedPoint {
                    destination,
                    coordinate,
                }),
                None => {
                    tracing::warn!(destination = destination.name(), "destination could not be resolved");
                    unresolved.push(destination.id().clone());
                }
            }
        }

        if points.is_empty() {
            return Err(PlanError::NothingToPlan {
                unresolved: unresolved.len(),
            });
        }

        let final_stop = match (final_address, batch.extra) {
            (Some(address), Some(coordinate)) => Some(FinalStop {
                address: address.to_string(),
                coordinate,
            }),
            (Some(address), None) => {
                tracing::warn!(address, "final address could not be resolved, route ends at last delivery");
                None
            }
            (None, _) => None,
        };
        let final_destination_resolved = final_address.is_none() || final_stop.is_some();

        let clusters = sequence(cluster(points, self.radius_km), origin);
        let plan = assemble(clusters, origin, final_stop, &self.optimizer, cancel)?;

        tracing::info!(
            stops = plan.len(),
            unresolved = unresolved.len(),
            estimated_km = plan.estimated_distance_km(),
            "route computed"
        );

        Ok(RouteOutcome {
            plan,
            unresolved,
            final_destination_resolved,
        })
    }
}

/// Walks sequenced clusters, chaining each cluster's last stop into the
/// next optimization call.
///
/// Only the last cluster is pinned to the final stop. Optimization calls
/// run one at a time since each depends on where the previous one ended.
pub fn assemble<D, O: RouteOptimizer>(
    clusters: Vec<Cluster<D>>,
    origin: Coordinate,
    final_stop: Option<FinalStop>,
    optimizer: &IntraClusterOptimizer<O>,
    cancel: &CancellationToken,
) -> Result<RoutePlan<D>, PlanError> {
    if clusters.is_empty() {
        return Err(PlanError::NothingToPlan { unresolved: 0 });
    }

    let mut plan = RoutePlan::start(origin);
    let mut current = origin;
    let last = clusters.len() - 1;

    for (index, cluster) in clusters.into_iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(PlanError::Cancelled);
        }

        let chain_out = if index == last {
            final_stop.as_ref().map(|stop| stop.coordinate)
        } else {
            None
        };

        tracing::debug!(cluster = index, size = cluster.len(), "optimizing cluster");
        for point in optimizer.optimize(cluster, current, chain_out) {
            current = point.coordinate;
            plan.push_destination(point);
        }
    }

    if let Some(final_stop) = final_stop {
        plan.finish(final_stop);
    }
    Ok(plan)
}
