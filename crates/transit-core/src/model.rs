//! Stop, route and vehicle records as held by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::VehicleStatus;
use crate::types::{Coordinate, Path};

/// A bus stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusStop {
    pub id: String,
    /// Human-facing stop code, e.g. "CST001". Routes reference stops by this.
    pub stop_id: String,
    pub name: String,
    pub location: Coordinate,
    pub code: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_true")]
    pub accessibility: bool,
}

/// A bus route and its geographic shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub name: String,
    /// Display color, "#RRGGBB".
    pub color: String,
    pub description: String,
    pub coordinates: Path,
    /// Stop codes served, in order.
    #[serde(default)]
    pub stops: Vec<String>,
    /// Scheduled length in km.
    #[serde(default)]
    pub distance: f64,
    /// Scheduled end-to-end time in minutes.
    #[serde(default)]
    pub estimated_time: u32,
}

/// The part of a vehicle the simulator evolves each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    #[serde(rename = "location")]
    pub position: Coordinate,
    /// Degrees, [0, 360).
    pub bearing: f64,
    /// km/h.
    pub speed: f64,
    /// Passenger count.
    pub occupancy: u32,
    pub timestamp: DateTime<Utc>,
}

/// A vehicle record: identity, route assignment and current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub route_id: String,
    pub vehicle_number: String,
    #[serde(flatten)]
    pub state: VehicleState,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default)]
    pub next_stop: String,
    /// Minutes behind schedule; negative when early.
    #[serde(default)]
    pub delay: i32,
}

impl Vehicle {
    pub fn is_active(&self) -> bool {
        self.status == VehicleStatus::Active
    }
}

fn default_true() -> bool {
    true
}
