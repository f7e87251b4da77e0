//! Query service: the calls an HTTP layer would expose.
//!
//! Every call counts as one API request; calls that touch the store also
//! count their store queries. Handlers only take short read locks and never
//! wait on a tick in progress, so a tracking report may be a tick behind.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::error;

use transit_core::enums::{EntityKind, HealthStatus};
use transit_core::model::{BusStop, Route, Vehicle};
use transit_core::state::{AdvancedMetrics, HealthReport, RouteOptimization, TrackingReport};
use transit_core::{Coordinate, Result, StoreError, TransitError};
use transit_sim::optimizer::optimize_route;
use transit_sim::{track_vehicle, MetricsCollector, MotionConfig, TransitStore};

use crate::state::AppState;

pub const ROOT_MESSAGE: &str = "NagaraTrack Lite API - Advanced Bus Tracking System";

pub struct TransitService {
    store: Arc<dyn TransitStore>,
    metrics: Arc<MetricsCollector>,
    motion: MotionConfig,
    prediction_horizon: usize,
    rng: Mutex<ChaCha8Rng>,
}

impl TransitService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            metrics: state.metrics.clone(),
            motion: state.config.motion(),
            prediction_horizon: state.config.prediction_horizon,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(state.derived_seed(3))),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> Result<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| StoreError::Poisoned("service rng"))?;
        Ok(f(&mut *rng))
    }

    fn request(&self, queries: u64) {
        self.metrics.record_request();
        if queries > 0 {
            self.metrics.record_queries(queries);
        }
    }

    pub fn root(&self) -> &'static str {
        self.request(0);
        ROOT_MESSAGE
    }

    pub fn stops(&self, limit: usize) -> Result<Vec<BusStop>> {
        self.request(1);
        self.store.list_stops(limit)
    }

    /// Stops within `radius_m` meters of (`lng`, `lat`), nearest first.
    pub fn nearby_stops(&self, lng: f64, lat: f64, radius_m: f64) -> Result<Vec<BusStop>> {
        self.request(1);
        self.store.stops_near(Coordinate::new(lng, lat), radius_m)
    }

    pub fn routes(&self) -> Result<Vec<Route>> {
        self.request(1);
        self.store.list_routes()
    }

    /// Simulated optimization of one route; see `transit_sim::optimizer`.
    pub fn optimize_route(&self, route_id: &str) -> Result<RouteOptimization> {
        self.request(1);
        let route = self
            .store
            .get_route(route_id)?
            .ok_or_else(|| TransitError::not_found(EntityKind::Route, route_id))?;
        self.with_rng(|rng| optimize_route(&route, rng))
    }

    pub fn vehicles(&self, route_id: Option<&str>) -> Result<Vec<Vehicle>> {
        self.request(1);
        self.store.list_vehicles(route_id)
    }

    /// Current position plus predicted path for one vehicle.
    pub fn track_vehicle(&self, vehicle_id: &str) -> Result<TrackingReport> {
        self.request(1);
        let store = self.store.as_ref();
        let (motion, horizon) = (self.motion, self.prediction_horizon);
        self.with_rng(|rng| track_vehicle(store, vehicle_id, horizon, &motion, rng))?
    }

    /// Health summary. Store failures produce an unhealthy report rather
    /// than an error.
    pub fn health(&self) -> HealthReport {
        self.request(0);
        match self.collect_health() {
            Ok(report) => report,
            Err(err) => {
                error!("health check failed: {err}");
                HealthReport::unhealthy(err.to_string(), Utc::now())
            }
        }
    }

    fn collect_health(&self) -> Result<HealthReport> {
        let started = Instant::now();
        self.store.count_vehicles()?;
        let response_ms = started.elapsed().as_secs_f64() * 1000.0;

        let total_routes = self.store.count_routes()?;
        let total_stops = self.store.count_stops()?;
        let active_vehicles = self.store.count_active_vehicles()?;

        let now = Utc::now();
        let snapshot = self.metrics.snapshot()?;
        let advanced_metrics = self.with_rng(|rng| AdvancedMetrics {
            requests_per_minute: snapshot.api_requests,
            database_queries_per_minute: snapshot.database_queries,
            average_vehicle_speed: rng.gen_range(25.0..35.0),
            system_load: rng.gen_range(0.2..0.8),
            memory_usage: rng.gen_range(0.4..0.7),
            cache_hit_rate: rng.gen_range(0.85..0.95),
            network_latency: rng.gen_range(10.0..50.0),
        })?;

        Ok(HealthReport {
            status: HealthStatus::Healthy,
            database_connected: true,
            api_response_time: response_ms,
            active_vehicles,
            total_routes,
            total_stops,
            system_uptime: self.metrics.uptime(now),
            last_update: snapshot.last_update,
            advanced_metrics: Some(advanced_metrics),
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn seeded_service() -> (AppState, TransitService) {
        let state = AppState::new(AppConfig::default(), Utc::now());
        state.seed(Utc::now()).unwrap();
        let service = TransitService::new(&state);
        (state, service)
    }

    #[test]
    fn test_root_counts_request_only() {
        let (state, service) = seeded_service();
        assert_eq!(service.root(), ROOT_MESSAGE);
        let snapshot = state.metrics.snapshot().unwrap();
        assert_eq!(snapshot.api_requests, 1);
        assert_eq!(snapshot.database_queries, 0);
    }

    #[test]
    fn test_stops_and_routes() {
        let (state, service) = seeded_service();
        assert_eq!(service.stops(100).unwrap().len(), 8);
        assert_eq!(service.stops(2).unwrap().len(), 2);
        assert_eq!(service.routes().unwrap().len(), 3);

        let snapshot = state.metrics.snapshot().unwrap();
        assert_eq!(snapshot.api_requests, 3);
        assert_eq!(snapshot.database_queries, 3);
    }

    #[test]
    fn test_nearby_stops() {
        let (_state, service) = seeded_service();
        let near = service.nearby_stops(72.8347, 18.9218, 1000.0).unwrap();
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].stop_id, "GTW007");
        assert!(service.nearby_stops(0.0, 0.0, 1000.0).unwrap().is_empty());
    }

    #[test]
    fn test_vehicles_filtered_by_route() {
        let (_state, service) = seeded_service();
        let routes = service.routes().unwrap();
        assert_eq!(service.vehicles(None).unwrap().len(), 6);
        let on_first = service.vehicles(Some(&routes[0].id)).unwrap();
        assert_eq!(on_first.len(), 2);
        assert!(on_first.iter().all(|v| v.route_id == routes[0].id));
    }

    #[test]
    fn test_track_vehicle_uses_configured_horizon() {
        let (state, service) = seeded_service();
        let before = serde_json::to_string(&state.store.list_vehicles(None).unwrap()).unwrap();
        let vehicle = service.vehicles(None).unwrap().remove(0);

        let report = service.track_vehicle(&vehicle.id).unwrap();
        assert_eq!(report.predicted_positions.len(), 5);
        assert_eq!(report.current_position, vehicle.state.position);

        let after = serde_json::to_string(&state.store.list_vehicles(None).unwrap()).unwrap();
        assert_eq!(before, after);

        assert!(service.track_vehicle("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_optimize_route() {
        let (_state, service) = seeded_service();
        let route = service.routes().unwrap().remove(0);
        let result = service.optimize_route(&route.id).unwrap();
        assert_eq!(result.route_id, route.id);
        assert!(result.optimization_applied);
        assert!(service.optimize_route("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_health_report() {
        let (_state, service) = seeded_service();
        let report = service.health();
        assert_eq!(report.status, HealthStatus::Healthy);
        assert!(report.database_connected);
        assert_eq!(report.active_vehicles, 6);
        assert_eq!(report.total_routes, 3);
        assert_eq!(report.total_stops, 8);
        assert!(report.api_response_time >= 0.0);
        assert!(report.error.is_none());

        let advanced = report.advanced_metrics.unwrap();
        assert!((25.0..35.0).contains(&advanced.average_vehicle_speed));
        assert!((0.85..0.95).contains(&advanced.cache_hit_rate));
        assert!(advanced.requests_per_minute >= 1);
    }
}
