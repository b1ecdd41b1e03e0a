//! Great-circle distance between coordinates.
//!
//! Straight-line only: ignores roads, so it is used for grouping and
//! ordering decisions, never reported as driving distance.

use crate::traits::Coordinate;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Total length of a polyline through `points`, in order.
pub fn path_length_km(points: impl IntoIterator<Item = Coordinate>) -> f64 {
    let mut total = 0.0;
    let mut prev: Option<Coordinate> = None;
    for point in points {
        if let Some(prev) = prev {
            total += distance_km(prev, point);
        }
        prev = Some(point);
    }
    total
}
