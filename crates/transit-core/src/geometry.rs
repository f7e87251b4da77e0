//! Planar distance and bearing on raw degree coordinates.
//!
//! No projection is applied: one degree of longitude and one degree of
//! latitude count the same. Good enough at city scale near the data's
//! reference latitude, wrong anywhere else.

use std::f64::consts::PI;

use crate::constants::EARTH_RADIUS_METERS;
use crate::types::Coordinate;

/// Euclidean distance between two coordinates, in degrees.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Bearing from `from` to `to` in degrees, [0, 360).
///
/// Takes `atan2(dx, dy)`, so 0 points along +y (north) and 90 along +x
/// (east). Identical points give 0.
pub fn bearing(from: Coordinate, to: Coordinate) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let bearing = dx.atan2(dy) * 180.0 / PI;
    (bearing + 360.0) % 360.0
}

/// Great-circle distance in meters between two lon/lat coordinates.
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let dlat = (b.y - a.y).to_radians();
    let dlon = (b.x - a.x).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}
