//! Short lookahead of future vehicle positions.
//!
//! Prediction reuses the path follower read-only: it never writes to the
//! store, and the same start, path and speed always give the same points.

use rand::Rng;

use transit_core::constants::*;
use transit_core::enums::EntityKind;
use transit_core::state::TrackingReport;
use transit_core::{Coordinate, Path, Result, TransitError};

use crate::path_follower::{advance, MotionConfig};
use crate::store::TransitStore;

/// The next `horizon` positions from `start` at constant `speed_kmh`.
pub fn predict(
    start: Coordinate,
    path: &Path,
    speed_kmh: f64,
    horizon: usize,
    motion: &MotionConfig,
) -> Vec<Coordinate> {
    let mut positions = Vec::with_capacity(horizon);
    let mut current = start;
    for _ in 0..horizon {
        current = advance(current, path, speed_kmh, motion);
        positions.push(current);
    }
    positions
}

/// Build a tracking report for one vehicle from the store's current view.
///
/// A vehicle whose route has vanished still gets a report, with no
/// predicted positions. `eta_next_stop` and `route_progress` are display
/// filler drawn from `rng`.
pub fn track_vehicle<R: Rng>(
    store: &dyn TransitStore,
    vehicle_id: &str,
    horizon: usize,
    motion: &MotionConfig,
    rng: &mut R,
) -> Result<TrackingReport> {
    let vehicle = store
        .get_vehicle(vehicle_id)?
        .ok_or_else(|| TransitError::not_found(EntityKind::Vehicle, vehicle_id))?;

    let state = &vehicle.state;
    let predicted_positions = match store.get_path(&vehicle.route_id)? {
        Some(path) => predict(state.position, &path, state.speed, horizon, motion),
        None => Vec::new(),
    };

    Ok(TrackingReport {
        vehicle_id: vehicle.id.clone(),
        current_position: state.position,
        speed: state.speed,
        bearing: state.bearing,
        predicted_positions,
        eta_next_stop: rng.gen_range(ETA_NEXT_STOP_MIN..=ETA_NEXT_STOP_MAX),
        route_progress: rng.gen_range(ROUTE_PROGRESS_MIN..ROUTE_PROGRESS_MAX),
    })
}
