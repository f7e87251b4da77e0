//! Application configuration.
//!
//! Read from an optional TOML file; every field has a default, so an empty
//! file (or no file) gives the stock simulation.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use transit_core::constants::*;
use transit_sim::{MotionConfig, SimConfig};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seed for the simulation RNG.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Seconds between position ticks. Also scales the step size.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: f64,

    /// Wait after a tick whose fleet listing failed.
    #[serde(default = "default_tick_backoff")]
    pub tick_error_backoff_secs: f64,

    /// Seconds between aggregate metric refreshes.
    #[serde(default = "default_metrics_interval")]
    pub metrics_interval_secs: f64,

    /// Wait after a failed metrics refresh.
    #[serde(default = "default_metrics_backoff")]
    pub metrics_error_backoff_secs: f64,

    #[serde(default = "default_meters_per_degree")]
    pub meters_per_degree: f64,

    /// Positions returned by a tracking request.
    #[serde(default = "default_prediction_horizon")]
    pub prediction_horizon: usize,

    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Stop after this many seconds; run until the drivers exit when unset.
    #[serde(default)]
    pub run_for_secs: Option<f64>,
}

fn default_seed() -> u64 {
    42
}

fn default_tick_interval() -> f64 {
    TICK_INTERVAL_SECS
}

fn default_tick_backoff() -> f64 {
    TICK_ERROR_BACKOFF_SECS
}

fn default_metrics_interval() -> f64 {
    METRICS_INTERVAL_SECS
}

fn default_metrics_backoff() -> f64 {
    METRICS_ERROR_BACKOFF_SECS
}

fn default_meters_per_degree() -> f64 {
    METERS_PER_DEGREE
}

fn default_prediction_horizon() -> usize {
    PREDICTION_HORIZON
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            tick_interval_secs: default_tick_interval(),
            tick_error_backoff_secs: default_tick_backoff(),
            metrics_interval_secs: default_metrics_interval(),
            metrics_error_backoff_secs: default_metrics_backoff(),
            meters_per_degree: default_meters_per_degree(),
            prediction_horizon: default_prediction_horizon(),
            log_filter: default_log_filter(),
            run_for_secs: None,
        }
    }
}

impl AppConfig {
    /// Load from `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("tick_interval_secs", self.tick_interval_secs),
            ("tick_error_backoff_secs", self.tick_error_backoff_secs),
            ("metrics_interval_secs", self.metrics_interval_secs),
            ("metrics_error_backoff_secs", self.metrics_error_backoff_secs),
            ("meters_per_degree", self.meters_per_degree),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(AppError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if let Some(secs) = self.run_for_secs {
            if !(secs.is_finite() && secs >= 0.0) {
                return Err(AppError::InvalidConfig(format!(
                    "run_for_secs must be non-negative, got {secs}"
                )));
            }
        }
        Ok(())
    }

    pub fn motion(&self) -> MotionConfig {
        MotionConfig {
            tick_interval_secs: self.tick_interval_secs,
            meters_per_degree: self.meters_per_degree,
        }
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            motion: self.motion(),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.tick_interval_secs)
    }

    pub fn tick_error_backoff(&self) -> Duration {
        Duration::from_secs_f64(self.tick_error_backoff_secs)
    }

    pub fn metrics_interval(&self) -> Duration {
        Duration::from_secs_f64(self.metrics_interval_secs)
    }

    pub fn metrics_error_backoff(&self) -> Duration {
        Duration::from_secs_f64(self.metrics_error_backoff_secs)
    }
}
