//! Enumerations shared across the simulator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operational status of a vehicle. Only `Active` vehicles are ticked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    #[default]
    Active,
    Maintenance,
    Offline,
}

/// Overall health as reported by the health check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    #[default]
    Healthy,
    Unhealthy,
}

/// Kind of record a lookup failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Stop,
    Route,
    Vehicle,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Stop => "stop",
            EntityKind::Route => "route",
            EntityKind::Vehicle => "vehicle",
        };
        f.write_str(name)
    }
}
