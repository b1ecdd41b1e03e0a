//! OSRM HTTP adapter for per-cluster visiting order (trip service).

use serde::{Deserialize, Serialize};

use crate::error::OptimizeError;
use crate::traits::{Coordinate, RouteOptimizer};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmTripOptimizer {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmTripOptimizer {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn trip_url(&self, coordinates: &[Coordinate], fixed_source: bool, fixed_destination: bool) -> String {
        let coords = coordinates
            .iter()
            .map(|c| format!("{:.6},{:.6}", c.lon, c.lat))
            .collect::<Vec<_>>()
            .join(";");

        // OSRM only serves open trips when both ends are fixed; otherwise ask
        // for a round trip and ignore the closing leg.
        let roundtrip = !(fixed_source && fixed_destination);
        let source = if fixed_source { "first" } else { "any" };
        let destination = if fixed_destination { "last" } else { "any" };

        format!(
            "{}/trip/v1/{}/{}?roundtrip={}&source={}&destination={}&overview=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords,
            roundtrip,
            source,
            destination
        )
    }
}

impl RouteOptimizer for OsrmTripOptimizer {
    fn optimize(
        &self,
        coordinates: &[Coordinate],
        fixed_source: bool,
        fixed_destination: bool,
    ) -> Result<Vec<usize>, OptimizeError> {
        if coordinates.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.trip_url(coordinates, fixed_source, fixed_destination);
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmTripResponse>())?;

        if body.code != "Ok" {
            return Err(OptimizeError::Rejected { code: body.code });
        }

        visiting_order(&body.waypoints, coordinates.len())
    }
}

/// Turns per-input `waypoint_index` values into input indices in visit order.
fn visiting_order(waypoints: &[OsrmWaypoint], expected: usize) -> Result<Vec<usize>, OptimizeError> {
    if waypoints.len() != expected {
        return Err(OptimizeError::Malformed(format!(
            "expected {} waypoints, got {}",
            expected,
            waypoints.len()
        )));
    }
    if waypoints.iter().any(|w| w.trips_index != 0) {
        return Err(OptimizeError::Malformed("response split into several trips".to_string()));
    }

    let mut order: Vec<Option<usize>> = vec![None; expected];
    for (input_index, waypoint) in waypoints.iter().enumerate() {
        match order.get_mut(waypoint.waypoint_index) {
            Some(slot) if slot.is_none() => *slot = Some(input_index),
            _ => {
                return Err(OptimizeError::Malformed(format!(
                    "invalid waypoint_index {}",
                    waypoint.waypoint_index
                )));
            }
        }
    }

    order
        .into_iter()
        .map(|slot| slot.ok_or_else(|| OptimizeError::Malformed("gap in waypoint order".to_string())))
        .collect()
}

#[derive(Debug, Deserialize)]
struct OsrmTripResponse {
    code: String,
    #[serde(default)]
    waypoints: Vec<OsrmWaypoint>,
}

#[derive(Debug, Deserialize)]
struct OsrmWaypoint {
    waypoint_index: usize,
    #[serde(default)]
    trips_index: usize,
}
