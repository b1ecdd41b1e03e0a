//! Destination records and in-process stand-ins for the external services.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use route_planner::cancel::CancellationToken;

use route_planner::error::{GeocodeError, OptimizeError};
use route_planner::haversine::distance_km;
use route_planner::traits::{Coordinate, Destination, Geocoder, RouteOptimizer};

use super::porto_alegre_locations::Location;

/// Builder for test destinations with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct TestDestination {
    pub id: String,
    pub name: String,
    pub map_link: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl TestDestination {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            map_link: None,
            address: None,
            phone: None,
        }
    }

    /// Destination carrying a Google Maps link to `location`.
    pub fn at(id: &str, location: &Location) -> Self {
        Self::new(id).named(location.name).link(&location.maps_link())
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn link(mut self, link: &str) -> Self {
        self.map_link = Some(link.to_string());
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }
}

impl Destination for TestDestination {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn map_link(&self) -> Option<&str> {
        self.map_link.as_deref()
    }

    fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

/// Geocoder backed by a fixed address table. Counts calls.
#[derive(Debug, Clone, Default)]
pub struct TableGeocoder {
    known: HashMap<String, Coordinate>,
    pub calls: Arc<AtomicUsize>,
}

impl TableGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: &str, location: &Location) -> Self {
        self.known.insert(address.to_string(), location.coordinate());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for TableGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.known.get(address).copied())
    }
}

/// Geocoder that answers every address after a delay, tracking how many
/// lookups overlap.
#[derive(Debug, Clone)]
pub struct SlowGeocoder {
    delay: Duration,
    answer: Coordinate,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    pub calls: Arc<AtomicUsize>,
}

impl SlowGeocoder {
    pub fn new(delay: Duration, location: &Location) -> Self {
        Self {
            delay,
            answer: location.coordinate(),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Highest number of lookups observed running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for SlowGeocoder {
    fn geocode(&self, _address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(self.delay);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Some(self.answer))
    }
}

/// Optimizer that cancels the run on its first call and otherwise keeps
/// input order.
#[derive(Debug, Clone)]
pub struct CancellingOptimizer {
    token: CancellationToken,
    pub calls: Arc<AtomicUsize>,
}

impl CancellingOptimizer {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RouteOptimizer for CancellingOptimizer {
    fn optimize(&self, coordinates: &[Coordinate], _: bool, _: bool) -> Result<Vec<usize>, OptimizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.token.cancel();
        Ok((0..coordinates.len()).collect())
    }
}

/// Optimizer that always fails, like an unreachable routing service.
#[derive(Debug, Clone, Default)]
pub struct FailingOptimizer {
    pub calls: Arc<AtomicUsize>,
}

impl RouteOptimizer for FailingOptimizer {
    fn optimize(&self, _: &[Coordinate], _: bool, _: bool) -> Result<Vec<usize>, OptimizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(OptimizeError::Rejected {
            code: "NoRoute".to_string(),
        })
    }
}

/// One recorded optimization request.
#[derive(Debug, Clone)]
pub struct OptimizeRequest {
    pub coordinates: Vec<Coordinate>,
    pub fixed_source: bool,
    pub fixed_destination: bool,
}

/// Greedy nearest-neighbour ordering by straight-line distance.
///
/// Keeps the first position first and, when the destination is fixed, the
/// last position last. Records every request.
#[derive(Debug, Clone, Default)]
pub struct NearestNeighborOptimizer {
    pub requests: Arc<Mutex<Vec<OptimizeRequest>>>,
}

impl NearestNeighborOptimizer {
    pub fn recorded(&self) -> Vec<OptimizeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl RouteOptimizer for NearestNeighborOptimizer {
    fn optimize(
        &self,
        coordinates: &[Coordinate],
        fixed_source: bool,
        fixed_destination: bool,
    ) -> Result<Vec<usize>, OptimizeError> {
        self.requests.lock().unwrap().push(OptimizeRequest {
            coordinates: coordinates.to_vec(),
            fixed_source,
            fixed_destination,
        });

        let n = coordinates.len();
        let end = if fixed_destination { n - 1 } else { n };
        let mut remaining: Vec<usize> = (1..end).collect();
        let mut order = vec![0];
        let mut current = coordinates[0];

        while !remaining.is_empty() {
            let (pos, _) = remaining
                .iter()
                .enumerate()
                .map(|(pos, &i)| (pos, distance_km(current, coordinates[i])))
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .unwrap();
            let next = remaining.remove(pos);
            current = coordinates[next];
            order.push(next);
        }

        if fixed_destination {
            order.push(n - 1);
        }
        Ok(order)
    }
}
