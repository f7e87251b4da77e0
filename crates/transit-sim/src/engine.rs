//! Tick engine. Advances every active vehicle once per tick.
//!
//! `TickEngine` owns the simulation RNG and tick counter and talks to the
//! store through `TransitStore`. It is headless and clock-agnostic: callers
//! pass the wall-clock time for each tick, which keeps tests deterministic.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use transit_core::{Result, SimTime, TransitError};

use crate::path_follower::MotionConfig;
use crate::store::TransitStore;
use crate::updater;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub motion: MotionConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            motion: MotionConfig::default(),
        }
    }
}

/// What happened to the fleet during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub updated: usize,
    /// Vehicles whose route (or record) could not be resolved.
    pub skipped: usize,
    /// Vehicles whose read or write failed in the store, or whose state
    /// could not be advanced.
    pub failed: usize,
}

/// Drives the position updater across the fleet.
pub struct TickEngine<R = ChaCha8Rng> {
    store: Arc<dyn TransitStore>,
    motion: MotionConfig,
    time: SimTime,
    rng: R,
}

impl TickEngine<ChaCha8Rng> {
    /// Create an engine seeded from `config`.
    pub fn new(store: Arc<dyn TransitStore>, config: SimConfig) -> Self {
        Self::with_rng(store, config.motion, ChaCha8Rng::seed_from_u64(config.seed))
    }
}

impl<R: Rng> TickEngine<R> {
    /// Create an engine with a caller-supplied random source.
    pub fn with_rng(store: Arc<dyn TransitStore>, motion: MotionConfig, rng: R) -> Self {
        Self {
            store,
            motion,
            time: SimTime::default(),
            rng,
        }
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    /// Advance every active vehicle by one tick.
    ///
    /// Only a failure to list the fleet is returned as an error. Each
    /// vehicle is otherwise independent: a missing route or a failed write
    /// is logged, counted and skipped, and the vehicle is retried on the
    /// next tick.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<TickReport> {
        let vehicles = self.store.list_active_vehicles()?;
        let mut report = TickReport {
            tick: self.time.tick + 1,
            ..Default::default()
        };

        for vehicle in &vehicles {
            match updater::update_vehicle(
                self.store.as_ref(),
                vehicle,
                &self.motion,
                &mut self.rng,
                now,
            ) {
                Ok(_) => report.updated += 1,
                Err(err @ TransitError::NotFound { .. }) => {
                    warn!(vehicle_id = %vehicle.id, route_id = %vehicle.route_id, "skipping vehicle: {err}");
                    report.skipped += 1;
                }
                Err(err) => {
                    error!(vehicle_id = %vehicle.id, "vehicle update failed: {err}");
                    report.failed += 1;
                }
            }
        }

        self.time.advance(self.motion.tick_interval_secs);
        debug!(
            tick = report.tick,
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed,
            "tick complete"
        );
        Ok(report)
    }
}
