//! Application state shared between the drivers and the query service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use transit_sim::seed::{seed_store, SeedSummary};
use transit_sim::{InMemoryStore, MetricsCollector, TransitStore};

use crate::config::AppConfig;
use crate::error::Result;

/// Commands sent to a periodic driver thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    /// Stop at the next wait. An in-flight tick finishes first.
    Shutdown,
}

/// Handles to everything the drivers and the service share.
///
/// The store and metrics are `Arc`s: the tick driver writes vehicle state,
/// the metrics driver writes counters, and request handlers read both.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn TransitStore>,
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    /// Fresh state over an empty in-memory store.
    pub fn new(config: AppConfig, now: DateTime<Utc>) -> Self {
        Self::with_store(config, Arc::new(InMemoryStore::new()), now)
    }

    pub fn with_store(config: AppConfig, store: Arc<dyn TransitStore>, now: DateTime<Utc>) -> Self {
        Self {
            config,
            store,
            metrics: Arc::new(MetricsCollector::new(now)),
        }
    }

    /// Seed the store with the demo network if it is empty.
    pub fn seed(&self, now: DateTime<Utc>) -> Result<SeedSummary> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let summary = seed_store(self.store.as_ref(), &mut rng, now)?;
        self.metrics
            .set_active_vehicles(self.store.count_active_vehicles()?);
        Ok(summary)
    }

    /// Seed for an auxiliary RNG stream, so the drivers and the service
    /// don't replay the tick engine's sequence.
    pub fn derived_seed(&self, stream: u64) -> u64 {
        self.config.seed.wrapping_add(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_seed() {
        let state = AppState::new(AppConfig::default(), Utc::now());
        let summary = state.seed(Utc::now()).unwrap();
        assert_eq!(summary.stops, 8);
        assert_eq!(summary.routes, 3);
        assert_eq!(summary.vehicles, 6);
        assert_eq!(state.metrics.snapshot().unwrap().active_vehicles, 6);

        let again = state.seed(Utc::now()).unwrap();
        assert!(again.is_empty());
    }
}
