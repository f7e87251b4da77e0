//! Read-only report views handed to callers of the query service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::HealthStatus;
use crate::types::Coordinate;

/// Live position of a vehicle plus a short lookahead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingReport {
    pub vehicle_id: String,
    pub current_position: Coordinate,
    /// km/h.
    pub speed: f64,
    /// Degrees, [0, 360).
    pub bearing: f64,
    /// Future positions, one per tick, from repeated path following.
    pub predicted_positions: Vec<Coordinate>,
    /// Minutes. Cosmetic: drawn at random, not derived from the path.
    pub eta_next_stop: u32,
    /// Fraction of the route completed. Cosmetic: drawn at random.
    pub route_progress: f64,
}

/// Output of the simulated route optimizer. Nothing here reflects real
/// traffic; the numbers are jitter presented for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOptimization {
    pub route_id: String,
    pub original_coordinates: Vec<Coordinate>,
    pub optimized_coordinates: Vec<Coordinate>,
    /// Minutes.
    pub time_saved: u32,
    pub traffic_score: f64,
    pub optimization_applied: bool,
}

/// Point-in-time copy of the aggregate counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub api_requests: u64,
    pub database_queries: u64,
    pub active_vehicles: u64,
    pub started_at: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
}

/// Extra figures in the health report. Only the two counters are real;
/// the rest are simulated display values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedMetrics {
    pub requests_per_minute: u64,
    pub database_queries_per_minute: u64,
    pub average_vehicle_speed: f64,
    pub system_load: f64,
    pub memory_usage: f64,
    pub cache_hit_rate: f64,
    pub network_latency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub database_connected: bool,
    /// Milliseconds spent on a probe query.
    pub api_response_time: f64,
    pub active_vehicles: u64,
    pub total_routes: u64,
    pub total_stops: u64,
    /// "H:MM:SS", with a "N day(s), " prefix past 24 hours.
    pub system_uptime: String,
    pub last_update: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_metrics: Option<AdvancedMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    /// Report for a store that could not be reached.
    pub fn unhealthy(error: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            database_connected: false,
            api_response_time: 0.0,
            active_vehicles: 0,
            total_routes: 0,
            total_stops: 0,
            system_uptime: "0:00:00".to_string(),
            last_update: now,
            advanced_metrics: None,
            error: Some(error.into()),
        }
    }
}

/// Format an uptime in whole seconds as "H:MM:SS", or "N day(s), H:MM:SS".
pub fn format_uptime(total_secs: i64) -> String {
    let total_secs = total_secs.max(0);
    let days = total_secs / 86_400;
    let rem = total_secs % 86_400;
    let hours = rem / 3600;
    let minutes = (rem % 3600) / 60;
    let seconds = rem % 60;

    let clock = format!("{hours}:{minutes:02}:{seconds:02}");
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}
