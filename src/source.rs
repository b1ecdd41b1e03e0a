//! In-memory destination source.

use std::collections::HashMap;

use crate::error::SourceError;
use crate::traits::{Destination, DestinationSource};

/// Destinations keyed by day. Days without entries yield an empty list.
#[derive(Debug, Clone)]
pub struct InMemorySource<D> {
    days: HashMap<i64, Vec<D>>,
}

impl<D> Default for InMemorySource<D> {
    fn default() -> Self {
        Self {
            days: HashMap::new(),
        }
    }
}

impl<D> InMemorySource<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, date: i64, destinations: Vec<D>) -> Self {
        self.days.insert(date, destinations);
        self
    }

    pub fn insert(&mut self, date: i64, destination: D) {
        self.days.entry(date).or_default().push(destination);
    }
}

impl<D> DestinationSource for InMemorySource<D>
where
    D: Destination + Clone,
{
    type Destination = D;

    fn destinations_for_day(&self, date: i64) -> Result<Vec<D>, SourceError> {
        Ok(self.days.get(&date).cloned().unwrap_or_default())
    }
}
