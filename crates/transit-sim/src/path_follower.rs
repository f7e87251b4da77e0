//! Moves a position one tick along a route path.
//!
//! The follower snaps to the nearest path vertex, heads for the vertex after
//! it (wrapping to the first), and moves a fixed distance derived from speed.
//! The step is not clamped at the target, so at high speed a vehicle can
//! overshoot and oscillate around a vertex.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use transit_core::constants::{METERS_PER_DEGREE, TICK_INTERVAL_SECS};
use transit_core::{Coordinate, Path};

/// Parameters converting a speed into a per-tick displacement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Seconds of simulated travel per tick.
    pub tick_interval_secs: f64,
    /// Degree-to-meter conversion used for the step size.
    pub meters_per_degree: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: TICK_INTERVAL_SECS,
            meters_per_degree: METERS_PER_DEGREE,
        }
    }
}

/// Per-tick displacement in coordinate degrees for a speed in km/h.
///
/// Matches the historical feed: km/h is divided by meters-per-degree as if
/// it were m/s, then by 3600. Callers depend on the resulting pace.
pub fn step_degrees(speed_kmh: f64, motion: &MotionConfig) -> f64 {
    (speed_kmh / motion.meters_per_degree) / 3600.0 * motion.tick_interval_secs
}

/// Index of the path vertex closest to `current`. First minimum wins.
pub fn nearest_vertex(current: Coordinate, path: &Path) -> usize {
    let mut min_dist = f64::INFINITY;
    let mut closest = 0;

    for (i, vertex) in path.vertices().iter().enumerate() {
        let dist = current.distance_to(vertex);
        if dist < min_dist {
            min_dist = dist;
            closest = i;
        }
    }
    closest
}

/// Index of the vertex the follower is heading for from `current`.
pub fn target_vertex(current: Coordinate, path: &Path) -> usize {
    path.next_index(nearest_vertex(current, path))
}

/// Position after one tick at `speed_kmh` along `path`.
///
/// On a single-vertex path the position is returned unchanged, even when
/// it is off the vertex; the vehicle is not pulled toward it.
pub fn advance(current: Coordinate, path: &Path, speed_kmh: f64, motion: &MotionConfig) -> Coordinate {
    // A lone vertex has no segment to follow.
    if path.len() == 1 {
        return current;
    }

    let target = path.vertices()[target_vertex(current, path)];
    if target == current {
        return current;
    }

    let from = DVec2::from(current);
    let direction = (DVec2::from(target) - from).normalize();
    let step = step_degrees(speed_kmh, motion);

    Coordinate::from(from + direction * step)
}
