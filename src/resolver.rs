//! Destination -> coordinate resolution.
//!
//! Map links are tried first since they are free to parse; free-text
//! addresses go through the shared cache and then the geocoder.

use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;

use crate::cache::CoordinateCache;
use crate::cancel::CancellationToken;
use crate::error::PlanError;
use crate::traits::{Coordinate, Destination, Geocoder, MapLinkExtractor};

/// A destination paired with the coordinate it resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPoint<D> {
    pub destination: D,
    pub coordinate: Coordinate,
}

/// Output of a batch resolution, index-aligned with the input destinations.
#[derive(Debug, Clone, Default)]
pub struct BatchResolution {
    pub coordinates: Vec<Option<Coordinate>>,
    /// Resolution of the extra address passed alongside the batch.
    pub extra: Option<Coordinate>,
}

#[derive(Debug)]
pub struct CoordinateResolver<E, G> {
    extractor: E,
    geocoder: G,
    cache: Arc<CoordinateCache>,
}

impl<E, G> CoordinateResolver<E, G>
where
    E: MapLinkExtractor,
    G: Geocoder,
{
    pub fn new(extractor: E, geocoder: G, cache: Arc<CoordinateCache>) -> Self {
        Self {
            extractor,
            geocoder,
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<CoordinateCache> {
        &self.cache
    }

    /// Resolves one destination, calling the geocoder on a cache miss.
    pub fn resolve<D: Destination>(&self, destination: &D) -> Option<Coordinate> {
        if let Some(coordinate) = self.from_link(destination) {
            return Some(coordinate);
        }
        destination.address().and_then(|address| self.resolve_address(address))
    }

    /// Cached geocoding of a free-text address.
    ///
    /// A geocoder error is logged and not cached, so the address is retried
    /// by the next run.
    pub fn resolve_address(&self, address: &str) -> Option<Coordinate> {
        if let Some(outcome) = self.cache.get(address) {
            tracing::debug!(address, hit = outcome.is_some(), "geocode cache hit");
            return outcome;
        }

        tracing::debug!(address, "geocode cache miss");
        match self.geocoder.geocode(address) {
            Ok(outcome) => self.cache.insert(address, outcome),
            Err(err) => {
                tracing::warn!(address, error = %err, "geocoding failed");
                None
            }
        }
    }

    /// Resolves a whole day of destinations plus one optional extra address.
    ///
    /// Distinct cache-miss addresses are geocoded in parallel on `pool`, so
    /// the pool size bounds the number of concurrent geocoder calls.
    pub fn resolve_all<D>(
        &self,
        destinations: &[D],
        extra_address: Option<&str>,
        pool: &rayon::ThreadPool,
        cancel: &CancellationToken,
    ) -> Result<BatchResolution, PlanError>
    where
        D: Destination,
        E: Sync,
        G: Sync,
    {
        let link_hits: Vec<Option<Coordinate>> =
            destinations.iter().map(|d| self.from_link(d)).collect();

        let mut seen = HashSet::new();
        let pending: Vec<&str> = destinations
            .iter()
            .zip(&link_hits)
            .filter(|(_, hit)| hit.is_none())
            .filter_map(|(d, _)| d.address())
            .chain(extra_address)
            .filter(|address| !self.cache.contains(address))
            .filter(|address| seen.insert(*address))
            .collect();

        if !pending.is_empty() {
            tracing::debug!(count = pending.len(), "geocoding uncached addresses");
            pool.install(|| {
                pending.par_iter().for_each(|address| {
                    if cancel.is_cancelled() {
                        return;
                    }
                    self.resolve_address(address);
                });
            });
        }

        if cancel.is_cancelled() {
            return Err(PlanError::Cancelled);
        }

        // Everything reachable is cached now; never call the geocoder again
        // here, an address whose lookup errored stays unresolved this run.
        let cached = |address: &str| self.cache.get(address).flatten();
        let coordinates = destinations
            .iter()
            .zip(link_hits)
            .map(|(d, hit)| hit.or_else(|| d.address().and_then(cached)))
            .collect();

        Ok(BatchResolution {
            coordinates,
            extra: extra_address.and_then(cached),
        })
    }

    fn from_link<D: Destination>(&self, destination: &D) -> Option<Coordinate> {
        destination
            .map_link()
            .and_then(|link| self.extractor.extract(link))
    }
}
