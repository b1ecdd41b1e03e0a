//! Core domain traits for the route planner.
//!
//! These are intentionally minimal. Host applications implement them for
//! their own destination records and external services.

use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{GeocodeError, OptimizeError, SourceError};

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A geographic position in decimal degrees.
///
/// No range validation is applied: whatever the extractor or geocoder
/// produced is carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

/// A delivery destination for a selected day.
///
/// Contact details and other business fields are opaque to the planner and
/// travel along with the record.
pub trait Destination {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Human readable name shown next to the stop number.
    fn name(&self) -> &str;

    /// Map link as pasted by the user (e.g. a Google Maps URL).
    fn map_link(&self) -> Option<&str>;

    /// Free-text street address.
    fn address(&self) -> Option<&str>;
}

/// Supplies the destinations scheduled for a day.
pub trait DestinationSource {
    type Destination: Destination;

    /// `date` is a unix timestamp truncated to the day.
    fn destinations_for_day(&self, date: i64) -> Result<Vec<Self::Destination>, SourceError>;
}

/// Pulls a coordinate out of a provider-specific map link.
pub trait MapLinkExtractor {
    fn extract(&self, link: &str) -> Option<Coordinate>;
}

/// Resolves free-text addresses to coordinates.
///
/// `Ok(None)` means the service answered but found nothing; that answer is
/// cached. `Err` means the call itself failed and is not cached.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError>;
}

/// Computes a visiting order for a short list of coordinates.
///
/// Returns the visiting order as indices into `coordinates`.
pub trait RouteOptimizer {
    fn optimize(
        &self,
        coordinates: &[Coordinate],
        fixed_source: bool,
        fixed_destination: bool,
    ) -> Result<Vec<usize>, OptimizeError>;
}
