// src/services/statistics_service_tests.rs
//
// INTEGRATION TESTS: StatisticsService over real SQLite repositories
//
// PURPOSE:
// - Prove the derived figures from a known set of records
// - Prove snapshots are persisted and replaced per kind
// - Prove the event subscription keeps snapshots fresh

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::cost::{OtherCost, RecurrenceInterval};
use crate::domain::refueling::Refueling;
use crate::domain::statistics::{StatisticsKind, VehicleStatistics};
use crate::domain::vehicle::Vehicle;
use crate::error::AppError;
use crate::events::EventBus;
use crate::repositories::test_support::test_pool;
use crate::repositories::{
    CostRepository, RefuelingRepository, SqliteCostRepository, SqliteRefuelingRepository,
    SqliteStatisticsRepository, SqliteVehicleRepository, VehicleRepository,
};
use crate::services::statistics_service::compute_vehicle_statistics;
use crate::services::{CreateRefuelingRequest, RefuelingService, StatisticsService};

struct Harness {
    _dir: tempfile::TempDir,
    vehicle_repo: Arc<SqliteVehicleRepository>,
    refueling_repo: Arc<SqliteRefuelingRepository>,
    cost_repo: Arc<SqliteCostRepository>,
    event_bus: Arc<EventBus>,
    statistics: Arc<StatisticsService>,
}

fn harness() -> Harness {
    let (dir, pool) = test_pool();
    let vehicle_repo = Arc::new(SqliteVehicleRepository::new(Arc::clone(&pool)));
    let refueling_repo = Arc::new(SqliteRefuelingRepository::new(Arc::clone(&pool)));
    let cost_repo = Arc::new(SqliteCostRepository::new(Arc::clone(&pool)));
    let statistics_repo = Arc::new(SqliteStatisticsRepository::new(Arc::clone(&pool)));
    let event_bus = Arc::new(EventBus::new());

    let statistics = Arc::new(StatisticsService::new(
        statistics_repo,
        Arc::clone(&vehicle_repo) as Arc<dyn VehicleRepository>,
        Arc::clone(&refueling_repo) as Arc<dyn RefuelingRepository>,
        Arc::clone(&cost_repo) as Arc<dyn CostRepository>,
        Arc::clone(&event_bus),
    ));

    Harness {
        _dir: dir,
        vehicle_repo,
        refueling_repo,
        cost_repo,
        event_bus,
        statistics,
    }
}

fn saved_vehicle(repo: &SqliteVehicleRepository) -> Vehicle {
    let vehicle = Vehicle::new("Kombi".to_string(), "#336699".to_string());
    repo.save(&vehicle).expect("vehicle save failed");
    vehicle
}

fn record(vehicle_id: Uuid, days_ago: i64, mileage: i64, volume: f64, price: f64, partial: bool) -> Refueling {
    let mut r = Refueling::new(
        vehicle_id,
        Utc::now() - Duration::days(days_ago),
        mileage,
        volume,
        price,
    );
    r.partial = partial;
    r
}

#[test]
fn test_compute_statistics_from_records() {
    let vehicle_id = Uuid::new_v4();
    let now = Utc::now();
    let refuelings = vec![
        record(vehicle_id, 30, 1000, 40.0, 60.0, false),
        record(vehicle_id, 20, 1400, 20.0, 30.0, true),
        record(vehicle_id, 10, 1800, 25.0, 40.0, false),
    ];
    let cost = OtherCost::new(
        vehicle_id,
        "Insurance".to_string(),
        now - Duration::days(5),
        100.0,
    );

    let stats = compute_vehicle_statistics(vehicle_id, &refuelings, &[cost], now);

    assert_eq!(stats.refueling_count, 3);
    assert_eq!(stats.cost_count, 1);
    assert_eq!(stats.total_distance, 800);
    assert!((stats.total_volume - 85.0).abs() < 1e-9);
    assert!((stats.total_fuel_cost - 130.0).abs() < 1e-9);
    assert!((stats.total_other_cost - 100.0).abs() < 1e-9);

    // One fill-to-fill interval: 45 l over 800 km
    let avg = stats.average_consumption.expect("no average");
    assert!((avg - 45.0 / 800.0 * 100.0).abs() < 1e-9);
}

#[test]
fn test_compute_statistics_without_closed_interval() {
    let vehicle_id = Uuid::new_v4();
    let refuelings = vec![record(vehicle_id, 5, 1000, 40.0, 60.0, false)];

    let stats = compute_vehicle_statistics(vehicle_id, &refuelings, &[], Utc::now());

    assert_eq!(stats.refueling_count, 1);
    assert_eq!(stats.total_distance, 0);
    assert_eq!(stats.average_consumption, None);
}

#[test]
fn test_vehicle_snapshot_is_persisted_and_replaced() {
    let h = harness();
    let vehicle = saved_vehicle(&h.vehicle_repo);

    h.refueling_repo
        .save(&record(vehicle.id, 10, 1000, 40.0, 60.0, false))
        .expect("save failed");

    h.statistics
        .calculate_vehicle_statistics(vehicle.id)
        .expect("calculate failed");

    h.refueling_repo
        .save(&record(vehicle.id, 5, 1500, 30.0, 45.0, false))
        .expect("save failed");

    h.statistics
        .calculate_vehicle_statistics(vehicle.id)
        .expect("calculate failed");

    let kind = StatisticsKind::PerVehicle { vehicle_id: vehicle.id };
    let snapshot = h
        .statistics
        .last_snapshot(&kind)
        .expect("load failed")
        .expect("no snapshot");

    // Second calculation replaced the first, one row per kind
    let stats: VehicleStatistics =
        serde_json::from_value(snapshot.value).expect("snapshot deserialization failed");
    assert_eq!(stats.refueling_count, 2);
    assert_eq!(stats.total_distance, 500);
}

#[test]
fn test_unknown_vehicle_is_rejected() {
    let h = harness();
    let result = h.statistics.calculate_vehicle_statistics(Uuid::new_v4());
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[test]
fn test_global_statistics_aggregate_all_vehicles() {
    let h = harness();
    let first = saved_vehicle(&h.vehicle_repo);
    let second = saved_vehicle(&h.vehicle_repo);

    h.refueling_repo
        .save(&record(first.id, 10, 1000, 40.0, 60.0, false))
        .expect("save failed");
    h.refueling_repo
        .save(&record(second.id, 10, 500, 20.0, 30.0, false))
        .expect("save failed");

    let mut cost = OtherCost::new(
        first.id,
        "Tires".to_string(),
        Utc::now() - Duration::days(1),
        200.0,
    );
    cost.recurrence_interval = RecurrenceInterval::Once;
    h.cost_repo.save(&cost).expect("save failed");

    let global = h
        .statistics
        .calculate_global_statistics()
        .expect("calculate failed");

    assert_eq!(global.vehicle_count, 2);
    assert_eq!(global.refueling_count, 2);
    assert_eq!(global.cost_count, 1);
    assert!((global.total_volume - 60.0).abs() < 1e-9);
    assert!((global.total_other_cost - 200.0).abs() < 1e-9);

    let snapshot = h
        .statistics
        .last_snapshot(&StatisticsKind::Global)
        .expect("load failed");
    assert!(snapshot.is_some());
}

#[test]
fn test_refueling_events_refresh_snapshot() {
    let h = harness();
    let vehicle = saved_vehicle(&h.vehicle_repo);

    h.statistics.register_event_handlers();

    let refueling_service = RefuelingService::new(
        Arc::clone(&h.refueling_repo) as Arc<dyn RefuelingRepository>,
        Arc::clone(&h.vehicle_repo) as Arc<dyn VehicleRepository>,
        Arc::clone(&h.event_bus),
    );

    let refueling_id = refueling_service
        .create_refueling(CreateRefuelingRequest {
            vehicle_id: vehicle.id,
            time: Utc::now(),
            mileage: 1200,
            volume: 35.0,
            price: 52.5,
            partial: false,
            note: None,
        })
        .expect("create failed");

    let kind = StatisticsKind::PerVehicle { vehicle_id: vehicle.id };
    let snapshot = h
        .statistics
        .last_snapshot(&kind)
        .expect("load failed")
        .expect("no snapshot after create");
    let stats: VehicleStatistics =
        serde_json::from_value(snapshot.value).expect("snapshot deserialization failed");
    assert_eq!(stats.refueling_count, 1);

    refueling_service
        .delete_refueling(refueling_id)
        .expect("delete failed");

    let snapshot = h
        .statistics
        .last_snapshot(&kind)
        .expect("load failed")
        .expect("no snapshot after delete");
    let stats: VehicleStatistics =
        serde_json::from_value(snapshot.value).expect("snapshot deserialization failed");
    assert_eq!(stats.refueling_count, 0);
}
