//! Simulation constants and tuning parameters.

// --- Motion ---

/// Approximate meters per degree at the equator.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Seconds between position ticks. Also scales the per-tick step size.
pub const TICK_INTERVAL_SECS: f64 = 2.0;

/// Back-off after a failed tick (vehicle listing failed).
pub const TICK_ERROR_BACKOFF_SECS: f64 = 5.0;

/// Speed perturbation band, as multiples of the previous speed.
pub const SPEED_JITTER_MIN: f64 = 0.8;
pub const SPEED_JITTER_MAX: f64 = 1.2;

/// Occupancy change per tick, inclusive.
pub const OCCUPANCY_DELTA_MIN: i32 = -2;
pub const OCCUPANCY_DELTA_MAX: i32 = 3;

// --- Prediction ---

/// Number of predicted positions in a tracking report.
pub const PREDICTION_HORIZON: usize = 5;

/// Cosmetic ETA to next stop, minutes (inclusive).
pub const ETA_NEXT_STOP_MIN: u32 = 3;
pub const ETA_NEXT_STOP_MAX: u32 = 12;

/// Cosmetic route progress fraction.
pub const ROUTE_PROGRESS_MIN: f64 = 0.1;
pub const ROUTE_PROGRESS_MAX: f64 = 0.9;

// --- Metrics ---

/// Seconds between aggregate metric refreshes.
pub const METRICS_INTERVAL_SECS: f64 = 30.0;

/// Back-off after a failed metrics refresh.
pub const METRICS_ERROR_BACKOFF_SECS: f64 = 60.0;

/// Simulated request/query growth per refresh (inclusive).
pub const METRICS_REQUEST_JITTER: (u64, u64) = (1, 5);
pub const METRICS_QUERY_JITTER: (u64, u64) = (2, 8);

// --- Route optimization (cosmetic) ---

/// Max per-axis jitter applied to interior route vertices, degrees.
pub const OPTIMIZE_JITTER_DEG: f64 = 0.001;

/// Optimized travel time as a fraction of the scheduled time.
pub const OPTIMIZE_TIME_FACTOR_MIN: f64 = 0.85;
pub const OPTIMIZE_TIME_FACTOR_MAX: f64 = 0.95;

pub const TRAFFIC_SCORE_MIN: f64 = 0.6;
pub const TRAFFIC_SCORE_MAX: f64 = 1.0;

// --- Queries ---

pub const DEFAULT_STOP_LIMIT: usize = 100;

/// Default radius for nearby-stop queries, meters.
pub const DEFAULT_NEARBY_RADIUS_METERS: f64 = 1000.0;

/// Mean earth radius, meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

// --- Seeding ---

pub const VEHICLES_PER_ROUTE: usize = 2;

/// Seeded vehicle speed range, km/h.
pub const SEED_SPEED_MIN: f64 = 15.0;
pub const SEED_SPEED_MAX: f64 = 45.0;

/// Seeded occupancy range (inclusive).
pub const SEED_OCCUPANCY_MIN: u32 = 5;
pub const SEED_OCCUPANCY_MAX: u32 = 50;

/// Seeded delay range, minutes (inclusive).
pub const SEED_DELAY_MIN: i32 = -2;
pub const SEED_DELAY_MAX: i32 = 8;
