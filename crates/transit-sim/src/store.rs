//! Store abstraction the simulator reads from and writes to.
//!
//! The simulator only needs a handful of simple queries; `TransitStore`
//! captures them so the document store stays swappable. `InMemoryStore`
//! is the bundled implementation.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use transit_core::enums::EntityKind;
use transit_core::geometry::haversine_meters;
use transit_core::model::{BusStop, Route, Vehicle, VehicleState};
use transit_core::{Coordinate, Path, Result, StoreError, TransitError};

/// Queries the simulator and query service run against the backing store.
pub trait TransitStore: Send + Sync {
    /// Stops in insertion order, at most `limit`.
    fn list_stops(&self, limit: usize) -> Result<Vec<BusStop>>;

    /// Stops within `radius_m` meters of `center`, nearest first.
    fn stops_near(&self, center: Coordinate, radius_m: f64) -> Result<Vec<BusStop>> {
        let mut hits: Vec<(f64, BusStop)> = self
            .list_stops(usize::MAX)?
            .into_iter()
            .map(|stop| (haversine_meters(center, stop.location), stop))
            .filter(|(d, _)| *d <= radius_m)
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(hits.into_iter().map(|(_, stop)| stop).collect())
    }

    fn list_routes(&self) -> Result<Vec<Route>>;

    fn get_route(&self, route_id: &str) -> Result<Option<Route>>;

    /// A route's path, resolved fresh on every call.
    fn get_path(&self, route_id: &str) -> Result<Option<Path>> {
        Ok(self.get_route(route_id)?.map(|route| route.coordinates))
    }

    /// All vehicles, optionally restricted to one route.
    fn list_vehicles(&self, route_id: Option<&str>) -> Result<Vec<Vehicle>>;

    fn list_active_vehicles(&self) -> Result<Vec<Vehicle>> {
        Ok(self
            .list_vehicles(None)?
            .into_iter()
            .filter(Vehicle::is_active)
            .collect())
    }

    fn get_vehicle(&self, vehicle_id: &str) -> Result<Option<Vehicle>>;

    /// Replace a vehicle's simulated state. Last write wins.
    fn write_vehicle_state(&self, vehicle_id: &str, state: &VehicleState) -> Result<()>;

    fn count_stops(&self) -> Result<u64>;

    fn count_routes(&self) -> Result<u64>;

    fn count_vehicles(&self) -> Result<u64>;

    fn count_active_vehicles(&self) -> Result<u64> {
        Ok(self.list_active_vehicles()?.len() as u64)
    }

    fn insert_stops(&self, stops: Vec<BusStop>) -> Result<()>;

    fn insert_routes(&self, routes: Vec<Route>) -> Result<()>;

    fn insert_vehicles(&self, vehicles: Vec<Vehicle>) -> Result<()>;
}

/// `TransitStore` backed by lock-guarded in-process collections.
///
/// Each vehicle write happens under the vehicles write lock, so a reader
/// sees either the previous state or the new one, never a mix.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    stops: RwLock<Vec<BusStop>>,
    routes: RwLock<BTreeMap<String, Route>>,
    vehicles: RwLock<BTreeMap<String, Vehicle>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<'a, T>(lock: &'a RwLock<T>, name: &'static str) -> Result<RwLockReadGuard<'a, T>> {
    lock.read()
        .map_err(|_| TransitError::Store(StoreError::Poisoned(name)))
}

fn write<'a, T>(lock: &'a RwLock<T>, name: &'static str) -> Result<RwLockWriteGuard<'a, T>> {
    lock.write()
        .map_err(|_| TransitError::Store(StoreError::Poisoned(name)))
}

impl TransitStore for InMemoryStore {
    fn list_stops(&self, limit: usize) -> Result<Vec<BusStop>> {
        let stops = read(&self.stops, "stops")?;
        Ok(stops.iter().take(limit).cloned().collect())
    }

    fn list_routes(&self) -> Result<Vec<Route>> {
        let routes = read(&self.routes, "routes")?;
        Ok(routes.values().cloned().collect())
    }

    fn get_route(&self, route_id: &str) -> Result<Option<Route>> {
        let routes = read(&self.routes, "routes")?;
        Ok(routes.get(route_id).cloned())
    }

    fn list_vehicles(&self, route_id: Option<&str>) -> Result<Vec<Vehicle>> {
        let vehicles = read(&self.vehicles, "vehicles")?;
        Ok(vehicles
            .values()
            .filter(|v| route_id.is_none_or(|id| v.route_id == id))
            .cloned()
            .collect())
    }

    fn get_vehicle(&self, vehicle_id: &str) -> Result<Option<Vehicle>> {
        let vehicles = read(&self.vehicles, "vehicles")?;
        Ok(vehicles.get(vehicle_id).cloned())
    }

    fn write_vehicle_state(&self, vehicle_id: &str, state: &VehicleState) -> Result<()> {
        let mut vehicles = write(&self.vehicles, "vehicles")?;
        match vehicles.get_mut(vehicle_id) {
            Some(vehicle) => {
                vehicle.state = state.clone();
                Ok(())
            }
            None => Err(TransitError::not_found(EntityKind::Vehicle, vehicle_id)),
        }
    }

    fn count_stops(&self) -> Result<u64> {
        Ok(read(&self.stops, "stops")?.len() as u64)
    }

    fn count_routes(&self) -> Result<u64> {
        Ok(read(&self.routes, "routes")?.len() as u64)
    }

    fn count_vehicles(&self) -> Result<u64> {
        Ok(read(&self.vehicles, "vehicles")?.len() as u64)
    }

    fn count_active_vehicles(&self) -> Result<u64> {
        let vehicles = read(&self.vehicles, "vehicles")?;
        Ok(vehicles.values().filter(|v| v.is_active()).count() as u64)
    }

    fn insert_stops(&self, new_stops: Vec<BusStop>) -> Result<()> {
        write(&self.stops, "stops")?.extend(new_stops);
        Ok(())
    }

    fn insert_routes(&self, new_routes: Vec<Route>) -> Result<()> {
        let mut routes = write(&self.routes, "routes")?;
        for route in new_routes {
            routes.insert(route.id.clone(), route);
        }
        Ok(())
    }

    fn insert_vehicles(&self, new_vehicles: Vec<Vehicle>) -> Result<()> {
        let mut vehicles = write(&self.vehicles, "vehicles")?;
        for vehicle in new_vehicles {
            vehicles.insert(vehicle.id.clone(), vehicle);
        }
        Ok(())
    }
}
