//! Process-lifetime memo of address lookups.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::traits::Coordinate;

/// Address string -> geocoding outcome.
///
/// Negative outcomes (`None`) are stored as well so an address that the
/// geocoder cannot place is asked about only once. There is no eviction and
/// no expiry. The first write for a key wins.
#[derive(Debug, Default)]
pub struct CoordinateCache {
    entries: RwLock<HashMap<String, Option<Coordinate>>>,
}

impl CoordinateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` on a miss, `Some(outcome)` on a hit.
    pub fn get(&self, address: &str) -> Option<Option<Coordinate>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(address).copied()
    }

    /// Stores `outcome` unless the key is already present, and returns the
    /// value that ends up cached.
    pub fn insert(&self, address: &str, outcome: Option<Coordinate>) -> Option<Coordinate> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        *entries.entry(address.to_string()).or_insert(outcome)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.get(address).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
