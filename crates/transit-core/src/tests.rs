#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::enums::*;
    use crate::error::TransitError;
    use crate::geometry::{bearing, distance, haversine_meters};
    use crate::model::{Vehicle, VehicleState};
    use crate::state::{format_uptime, HealthReport};
    use crate::types::{Coordinate, Path, SimTime};

    fn sample_points() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(-3.5, 2.25),
            Coordinate::new(72.8347, 18.9394),
            Coordinate::new(72.8397, 19.1197),
            Coordinate::new(-0.0001, -0.0002),
        ]
    }

    // ---- Geometry ----

    #[test]
    fn test_distance_symmetric_and_zero_on_self() {
        let points = sample_points();
        for a in &points {
            assert_eq!(distance(*a, *a), 0.0);
            for b in &points {
                assert_eq!(distance(*a, *b), distance(*b, *a));
            }
        }
    }

    #[test]
    fn test_distance_is_planar_on_degrees() {
        let d = distance(Coordinate::new(0.0, 0.0), Coordinate::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bearing_in_range() {
        let points = sample_points();
        for a in &points {
            for b in &points {
                let brg = bearing(*a, *b);
                assert!((0.0..360.0).contains(&brg), "bearing {brg} out of range");
            }
        }
    }

    #[test]
    fn test_bearing_to_self_is_zero() {
        for a in sample_points() {
            assert_eq!(bearing(a, a), 0.0);
        }
    }

    #[test]
    fn test_bearing_uses_dx_dy_order() {
        let origin = Coordinate::new(0.0, 0.0);
        // +y is 0, +x is 90
        assert!((bearing(origin, Coordinate::new(0.0, 1.0)) - 0.0).abs() < 1e-9);
        assert!((bearing(origin, Coordinate::new(1.0, 0.0)) - 90.0).abs() < 1e-9);
        assert!((bearing(origin, Coordinate::new(0.0, -1.0)) - 180.0).abs() < 1e-9);
        assert!((bearing(origin, Coordinate::new(-1.0, 0.0)) - 270.0).abs() < 1e-9);
        assert!((bearing(origin, Coordinate::new(1.0, 1.0)) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_coordinate_methods_match_free_functions() {
        let a = Coordinate::new(72.8347, 18.9394);
        let b = Coordinate::new(72.8297, 18.9494);
        assert_eq!(a.distance_to(&b), distance(a, b));
        assert_eq!(a.bearing_to(&b), bearing(a, b));
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let d = haversine_meters(Coordinate::new(72.0, 18.0), Coordinate::new(72.0, 19.0));
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
        assert_eq!(haversine_meters(Coordinate::new(1.0, 2.0), Coordinate::new(1.0, 2.0)), 0.0);
    }

    // ---- Path ----

    #[test]
    fn test_empty_path_rejected() {
        assert!(matches!(Path::new(Vec::new()), Err(TransitError::EmptyPath)));
    }

    #[test]
    fn test_path_next_index_wraps() {
        let path = Path::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(path.next_index(0), 1);
        assert_eq!(path.next_index(1), 2);
        assert_eq!(path.next_index(2), 0);

        let single = Path::new(vec![Coordinate::new(5.0, 5.0)]).unwrap();
        assert_eq!(single.next_index(0), 0);
        assert!(!single.is_empty());
    }

    #[test]
    fn test_path_serde_as_coordinate_arrays() {
        let path = Path::new(vec![Coordinate::new(72.8347, 18.9394), Coordinate::new(1.0, 2.0)])
            .unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "[[72.8347,18.9394],[1.0,2.0]]");
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn test_empty_path_fails_to_deserialize() {
        let result: Result<Path, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }

    // ---- Records ----

    #[test]
    fn test_vehicle_document_shape() {
        let vehicle = Vehicle {
            id: "v-1".into(),
            route_id: "r-1".into(),
            vehicle_number: "MH01-AB-123401".into(),
            state: VehicleState {
                position: Coordinate::new(72.8347, 18.9394),
                bearing: 12.5,
                speed: 30.0,
                occupancy: 7,
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            },
            status: VehicleStatus::Maintenance,
            next_stop: "CST001".into(),
            delay: -2,
        };

        let value = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(value["location"], serde_json::json!([72.8347, 18.9394]));
        assert_eq!(value["status"], "maintenance");
        assert_eq!(value["occupancy"], 7);

        let back: Vehicle = serde_json::from_value(value).unwrap();
        assert_eq!(back, vehicle);
        assert!(!back.is_active());
    }

    #[test]
    fn test_vehicle_status_defaults_to_active() {
        let json = r#"{
            "id": "v", "route_id": "r", "vehicle_number": "n",
            "location": [0.0, 0.0], "bearing": 0.0, "speed": 10.0,
            "occupancy": 0, "timestamp": "2024-01-01T00:00:00Z"
        }"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Active);
        assert!(vehicle.is_active());
    }

    #[test]
    fn test_not_found_display() {
        let err = TransitError::not_found(EntityKind::Route, "abc");
        assert_eq!(err.to_string(), "route not found: abc");
        assert!(err.is_not_found());
    }

    // ---- Reports ----

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0:00:00");
        assert_eq!(format_uptime(3_725), "1:02:05");
        assert_eq!(format_uptime(86_400 + 61), "1 day, 0:01:01");
        assert_eq!(format_uptime(3 * 86_400 + 7_200), "3 days, 2:00:00");
        assert_eq!(format_uptime(-5), "0:00:00");
    }

    #[test]
    fn test_unhealthy_report_carries_error() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let report = HealthReport::unhealthy("store down", now);
        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert!(!report.database_connected);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["error"], "store down");
        assert!(value.get("advanced_metrics").is_none());
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(2.0);
        time.advance(2.0);
        assert_eq!(time.tick, 2);
        assert!((time.elapsed_secs - 4.0).abs() < 1e-12);
    }
}
