//! One simulation tick for one vehicle.
//!
//! Moves the vehicle along its path, points it at its direction of travel,
//! and perturbs speed and occupancy within fixed bands.

use chrono::{DateTime, Utc};
use rand::Rng;

use transit_core::constants::*;
use transit_core::enums::EntityKind;
use transit_core::geometry::bearing;
use transit_core::model::{Vehicle, VehicleState};
use transit_core::{Path, Result, TransitError};

use crate::path_follower::{advance, MotionConfig};
use crate::store::TransitStore;

/// Compute the state following `state` after one tick on `path`.
///
/// Speed does a bounded random walk (x0.8 to x1.2 per tick) with no floor,
/// so it may drift toward zero over a long run. Occupancy never drops
/// below zero and saturates at `u32::MAX`.
///
/// Panics if `state.speed * 1.2` is not finite; `update_vehicle` rejects
/// such states first.
pub fn next_state<R: Rng>(
    state: &VehicleState,
    path: &Path,
    motion: &MotionConfig,
    rng: &mut R,
    now: DateTime<Utc>,
) -> VehicleState {
    let position = advance(state.position, path, state.speed, motion);
    let new_bearing = bearing(state.position, position);

    let base = state.speed.max(0.0);
    let speed = rng.gen_range(base * SPEED_JITTER_MIN..=base * SPEED_JITTER_MAX);
    let delta = rng.gen_range(OCCUPANCY_DELTA_MIN..=OCCUPANCY_DELTA_MAX);
    let occupancy = state.occupancy.saturating_add_signed(delta);

    VehicleState {
        position,
        bearing: new_bearing,
        speed,
        occupancy,
        timestamp: now,
    }
}

/// Resolve the vehicle's path, compute its next state and write it back.
///
/// The path is looked up fresh each call. A route that no longer exists
/// yields `NotFound`; store faults pass through as `TransitError::Store`.
/// A speed whose jitter band is not finite yields `InvalidSpeed` and the
/// stored state is left untouched.
pub fn update_vehicle<R: Rng>(
    store: &dyn TransitStore,
    vehicle: &Vehicle,
    motion: &MotionConfig,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<VehicleState> {
    let path = store
        .get_path(&vehicle.route_id)?
        .ok_or_else(|| TransitError::not_found(EntityKind::Route, vehicle.route_id.as_str()))?;

    let speed = vehicle.state.speed;
    if !(speed.max(0.0) * SPEED_JITTER_MAX).is_finite() {
        return Err(TransitError::InvalidSpeed {
            vehicle_id: vehicle.id.clone(),
            speed,
        });
    }

    let state = next_state(&vehicle.state, &path, motion, rng, now);
    store.write_vehicle_state(&vehicle.id, &state)?;
    Ok(state)
}
