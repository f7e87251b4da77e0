//! Process-wide aggregate counters.
//!
//! Counters are atomics so request handlers and the metrics driver can
//! bump them without coordination. Readers get a `MetricsSnapshot` copy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::Rng;

use transit_core::constants::{METRICS_QUERY_JITTER, METRICS_REQUEST_JITTER};
use transit_core::state::{format_uptime, MetricsSnapshot};
use transit_core::{Result, StoreError};

use crate::store::TransitStore;

#[derive(Debug)]
pub struct MetricsCollector {
    api_requests: AtomicU64,
    database_queries: AtomicU64,
    active_vehicles: AtomicU64,
    started_at: DateTime<Utc>,
    last_update: Mutex<DateTime<Utc>>,
}

impl MetricsCollector {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            api_requests: AtomicU64::new(0),
            database_queries: AtomicU64::new(0),
            active_vehicles: AtomicU64::new(0),
            started_at,
            last_update: Mutex::new(started_at),
        }
    }

    pub fn record_request(&self) {
        self.api_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_queries(&self, count: u64) {
        self.database_queries.fetch_add(count, Ordering::Relaxed);
    }

    pub fn set_active_vehicles(&self, count: u64) {
        self.active_vehicles.store(count, Ordering::Relaxed);
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Uptime at `now`, formatted as "H:MM:SS".
    pub fn uptime(&self, now: DateTime<Utc>) -> String {
        format_uptime((now - self.started_at).num_seconds())
    }

    pub fn touch(&self, now: DateTime<Utc>) -> Result<()> {
        let mut last = self
            .last_update
            .lock()
            .map_err(|_| StoreError::Poisoned("metrics"))?;
        *last = now;
        Ok(())
    }

    pub fn snapshot(&self) -> Result<MetricsSnapshot> {
        let last_update = *self
            .last_update
            .lock()
            .map_err(|_| StoreError::Poisoned("metrics"))?;
        Ok(MetricsSnapshot {
            api_requests: self.api_requests.load(Ordering::Relaxed),
            database_queries: self.database_queries.load(Ordering::Relaxed),
            active_vehicles: self.active_vehicles.load(Ordering::Relaxed),
            started_at: self.started_at,
            last_update,
        })
    }

    /// Periodic refresh: recount active vehicles and stamp `last_update`.
    ///
    /// Also grows the request/query counters by a small random amount so
    /// the dashboard looks busy; those increments are simulated traffic.
    pub fn refresh<R: Rng>(
        &self,
        store: &dyn TransitStore,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<MetricsSnapshot> {
        let active = store.count_active_vehicles()?;
        self.set_active_vehicles(active);
        self.touch(now)?;

        let (req_lo, req_hi) = METRICS_REQUEST_JITTER;
        let (query_lo, query_hi) = METRICS_QUERY_JITTER;
        self.api_requests
            .fetch_add(rng.gen_range(req_lo..=req_hi), Ordering::Relaxed);
        self.record_queries(rng.gen_range(query_lo..=query_hi));

        self.snapshot()
    }
}
