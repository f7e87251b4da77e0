//! Seed data for the demo network of Mumbai stops, routes and buses.
//!
//! Identifiers and initial vehicle figures come from the supplied RNG, so
//! the same seed always produces the same fleet.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use transit_core::constants::*;
use transit_core::enums::VehicleStatus;
use transit_core::model::{BusStop, Route, Vehicle, VehicleState};
use transit_core::{Coordinate, Path, Result};

use crate::store::TransitStore;

/// Counts of records inserted by `seed_store`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub stops: usize,
    pub routes: usize,
    pub vehicles: usize,
}

impl SeedSummary {
    pub fn is_empty(&self) -> bool {
        self.stops == 0 && self.routes == 0 && self.vehicles == 0
    }
}

/// Plate prefixes, one per route; vehicles append a two-digit index.
const VEHICLE_NUMBERS: [&str; 5] = [
    "MH01-AB-1234",
    "MH01-CD-5678",
    "MH01-EF-9012",
    "MH01-GH-3456",
    "MH01-IJ-7890",
];

/// Populate an empty store. A store that already has stops is left alone.
pub fn seed_store<R: Rng>(
    store: &dyn TransitStore,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<SeedSummary> {
    if store.count_stops()? > 0 {
        info!("store already populated, skipping seed");
        return Ok(SeedSummary::default());
    }

    let stops = build_stops(rng);
    let routes = build_routes(rng)?;
    let vehicles = build_vehicles(&routes, rng, now);

    let summary = SeedSummary {
        stops: stops.len(),
        routes: routes.len(),
        vehicles: vehicles.len(),
    };

    store.insert_stops(stops)?;
    store.insert_routes(routes)?;
    store.insert_vehicles(vehicles)?;

    info!(
        stops = summary.stops,
        routes = summary.routes,
        vehicles = summary.vehicles,
        "store initialized with seed data"
    );
    Ok(summary)
}

fn new_id<R: Rng>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string()
}

fn build_stops<R: Rng>(rng: &mut R) -> Vec<BusStop> {
    let data: [(&str, &str, [f64; 2], &str, &[&str]); 8] = [
        ("CST001", "Chhatrapati Shivaji Terminus", [72.8347, 18.9394], "CST", &["shelter", "seating", "digital_display"]),
        ("BKC002", "Bandra Kurla Complex", [72.8697, 19.0638], "BKC", &["shelter", "seating"]),
        ("JUH003", "Juhu Beach", [72.8267, 19.0968], "JUH", &["shelter"]),
        ("AND004", "Andheri Station", [72.8397, 19.1197], "AND", &["shelter", "seating", "digital_display", "wifi"]),
        ("POW005", "Powai Lake", [72.8977, 19.1247], "POW", &["shelter", "seating"]),
        ("VRL006", "Versova", [72.8097, 19.1317], "VRL", &["shelter"]),
        ("GTW007", "Gateway of India", [72.8347, 18.9218], "GTW", &["shelter", "seating", "tourist_info"]),
        ("NFH008", "Nariman Point", [72.8226, 18.9267], "NFH", &["shelter", "seating", "digital_display"]),
    ];

    data.iter()
        .map(|(stop_id, name, location, code, amenities)| BusStop {
            id: new_id(rng),
            stop_id: stop_id.to_string(),
            name: name.to_string(),
            location: Coordinate::from(*location),
            code: code.to_string(),
            amenities: amenities.iter().map(|a| a.to_string()).collect(),
            accessibility: true,
        })
        .collect()
}

struct RouteSeed {
    name: &'static str,
    color: &'static str,
    description: &'static str,
    coordinates: &'static [[f64; 2]],
    stops: &'static [&'static str],
    distance: f64,
    estimated_time: u32,
}

const ROUTES: [RouteSeed; 3] = [
    RouteSeed {
        name: "Express Line 1: CST - Andheri",
        color: "#FF6B6B",
        description: "High-frequency express route connecting South Mumbai to Western suburbs",
        coordinates: &[
            [72.8347, 18.9394], // CST
            [72.8297, 18.9494], // Marine Drive
            [72.8226, 18.9267], // Nariman Point
            [72.8347, 18.9618], // Opera House
            [72.8247, 19.0176], // Worli
            [72.8197, 19.0338], // Mahim
            [72.8297, 19.0548], // Bandra
            [72.8397, 19.0748], // Santacruz
            [72.8397, 19.1197], // Andheri
        ],
        stops: &["CST001", "NFH008", "AND004"],
        distance: 28.5,
        estimated_time: 65,
    },
    RouteSeed {
        name: "Coastal Route 2: Gateway - Juhu",
        color: "#4ECDC4",
        description: "Scenic coastal route connecting tourist destinations",
        coordinates: &[
            [72.8347, 18.9218], // Gateway of India
            [72.8276, 18.9358], // Colaba
            [72.8226, 18.9467], // Cuffe Parade
            [72.8197, 18.9876], // Breach Candy
            [72.8147, 19.0376], // Haji Ali
            [72.8197, 19.0576], // Mahim Bay
            [72.8267, 19.0968], // Juhu Beach
        ],
        stops: &["GTW007", "NFH008", "JUH003"],
        distance: 22.3,
        estimated_time: 55,
    },
    RouteSeed {
        name: "Tech Route 3: BKC - Powai",
        color: "#45B7D1",
        description: "Business district connector for IT professionals",
        coordinates: &[
            [72.8697, 19.0638], // BKC
            [72.8797, 19.0738], // SEEPZ
            [72.8897, 19.0938], // Chakala
            [72.8977, 19.1047], // JVLR
            [72.8977, 19.1247], // Powai Lake
        ],
        stops: &["BKC002", "POW005"],
        distance: 18.7,
        estimated_time: 42,
    },
];

fn build_routes<R: Rng>(rng: &mut R) -> Result<Vec<Route>> {
    ROUTES
        .iter()
        .map(|seed| -> Result<Route> {
            let path = Path::new(seed.coordinates.iter().copied().map(Coordinate::from).collect())?;
            Ok(Route {
                id: new_id(rng),
                name: seed.name.to_string(),
                color: seed.color.to_string(),
                description: seed.description.to_string(),
                coordinates: path,
                stops: seed.stops.iter().map(|s| s.to_string()).collect(),
                distance: seed.distance,
                estimated_time: seed.estimated_time,
            })
        })
        .collect()
}

fn build_vehicles<R: Rng>(routes: &[Route], rng: &mut R, now: DateTime<Utc>) -> Vec<Vehicle> {
    let mut vehicles = Vec::with_capacity(routes.len() * VEHICLES_PER_ROUTE);

    for (i, route) in routes.iter().enumerate() {
        let prefix = VEHICLE_NUMBERS[i % VEHICLE_NUMBERS.len()];
        for j in 0..VEHICLES_PER_ROUTE {
            let path = &route.coordinates;
            let position = path.vertices()[j % path.len()];
            let state = VehicleState {
                position,
                bearing: rng.gen_range(0.0..360.0),
                speed: rng.gen_range(SEED_SPEED_MIN..SEED_SPEED_MAX),
                occupancy: rng.gen_range(SEED_OCCUPANCY_MIN..=SEED_OCCUPANCY_MAX),
                timestamp: now,
            };
            vehicles.push(Vehicle {
                id: new_id(rng),
                route_id: route.id.clone(),
                vehicle_number: format!("{prefix}{:02}", j + 1),
                state,
                status: VehicleStatus::Active,
                next_stop: route.stops.first().cloned().unwrap_or_default(),
                delay: rng.gen_range(SEED_DELAY_MIN..=SEED_DELAY_MAX),
            });
        }
    }
    vehicles
}
