//! Assembled route plans and manual reordering.

use serde::Serialize;

use crate::error::ReorderRejected;
use crate::haversine::path_length_km;
use crate::resolver::ResolvedPoint;
use crate::traits::Coordinate;

/// The final stop of a route, resolved from a free-text address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalStop {
    pub address: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteStop<D> {
    Origin(Coordinate),
    Destination(ResolvedPoint<D>),
    FinalDestination(FinalStop),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Origin,
    Destination,
    Final,
}

impl<D> RouteStop<D> {
    pub fn kind(&self) -> StopKind {
        match self {
            RouteStop::Origin(_) => StopKind::Origin,
            RouteStop::Destination(_) => StopKind::Destination,
            RouteStop::FinalDestination(_) => StopKind::Final,
        }
    }

    /// Origin and final destination never move.
    pub fn is_anchor(&self) -> bool {
        !matches!(self, RouteStop::Destination(_))
    }

    pub fn coordinate(&self) -> Coordinate {
        match self {
            RouteStop::Origin(coordinate) => *coordinate,
            RouteStop::Destination(point) => point.coordinate,
            RouteStop::FinalDestination(stop) => stop.coordinate,
        }
    }

    pub fn destination(&self) -> Option<&D> {
        match self {
            RouteStop::Destination(point) => Some(&point.destination),
            _ => None,
        }
    }
}

/// Ordered stops: origin first, optional final destination last.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan<D> {
    stops: Vec<RouteStop<D>>,
}

impl<D> RoutePlan<D> {
    pub(crate) fn start(origin: Coordinate) -> Self {
        Self {
            stops: vec![RouteStop::Origin(origin)],
        }
    }

    pub(crate) fn push_destination(&mut self, point: ResolvedPoint<D>) {
        self.stops.push(RouteStop::Destination(point));
    }

    pub(crate) fn finish(&mut self, final_stop: FinalStop) {
        self.stops.push(RouteStop::FinalDestination(final_stop));
    }

    pub fn stops(&self) -> &[RouteStop<D>] {
        &self.stops
    }

    /// Stops with their position, for numbered rendering.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &RouteStop<D>)> {
        self.stops.iter().enumerate()
    }

    pub fn destinations(&self) -> impl Iterator<Item = &ResolvedPoint<D>> {
        self.stops.iter().filter_map(|stop| match stop {
            RouteStop::Destination(point) => Some(point),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn origin(&self) -> Option<Coordinate> {
        match self.stops.first() {
            Some(RouteStop::Origin(coordinate)) => Some(*coordinate),
            _ => None,
        }
    }

    pub fn has_final_destination(&self) -> bool {
        matches!(self.stops.last(), Some(RouteStop::FinalDestination(_)))
    }

    /// Straight-line length of the route in its current order.
    pub fn estimated_distance_km(&self) -> f64 {
        path_length_km(self.stops.iter().map(RouteStop::coordinate))
    }

    /// Moves the stop at `from` to position `to`.
    ///
    /// Declined, with the plan untouched, when either position holds an
    /// anchor or lies outside the plan.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), ReorderRejected> {
        let len = self.stops.len();
        for index in [from, to] {
            match self.stops.get(index) {
                None => return Err(ReorderRejected::OutOfBounds { index, len }),
                Some(stop) if stop.is_anchor() => return Err(ReorderRejected::AnchorMove { index }),
                Some(_) => {}
            }
        }

        if from != to {
            let stop = self.stops.remove(from);
            self.stops.insert(to, stop);
        }
        Ok(())
    }
}
