// src/application/state.rs

use std::path::Path;
use std::sync::Arc;

use crate::db::{create_connection_pool, create_connection_pool_at, initialize_database};
use crate::domain::report::Units;
use crate::error::AppResult;
use crate::events::EventBus;
use crate::repositories::{
    CostRepository, RefuelingRepository, SqliteCostRepository, SqliteRefuelingRepository,
    SqliteStatisticsRepository, SqliteVehicleRepository, StatisticsRepository, VehicleRepository,
};
use crate::services::{
    CostService, RefuelingService, ReportService, StatisticsService, VehicleService,
};

/// Shared application state.
/// All fields are Arc-wrapped for thread-safe sharing across callers.
/// Services are wired once in the constructors.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub vehicle_service: Arc<VehicleService>,
    pub refueling_service: Arc<RefuelingService>,
    pub cost_service: Arc<CostService>,
    pub statistics_service: Arc<StatisticsService>,
    pub report_service: Arc<ReportService>,
}

impl AppState {
    /// Open the database at the platform data directory and wire everything
    pub fn open_default(units: Units) -> AppResult<Self> {
        let pool = Arc::new(create_connection_pool()?);
        Self::build(pool, units)
    }

    /// Open the database at an explicit path and wire everything
    pub fn open_at(database_path: &Path, units: Units) -> AppResult<Self> {
        let pool = Arc::new(create_connection_pool_at(database_path)?);
        Self::build(pool, units)
    }

    fn build(pool: Arc<crate::db::ConnectionPool>, units: Units) -> AppResult<Self> {
        // 1. INFRASTRUCTURE
        let event_bus = Arc::new(EventBus::new());

        // Initialize schema (idempotent)
        {
            let conn = pool.get().map_err(crate::error::AppError::from)?;
            initialize_database(&conn)?;
        }

        // 2. REPOSITORIES
        let vehicle_repo: Arc<dyn VehicleRepository> =
            Arc::new(SqliteVehicleRepository::new(pool.clone()));
        let refueling_repo: Arc<dyn RefuelingRepository> =
            Arc::new(SqliteRefuelingRepository::new(pool.clone()));
        let cost_repo: Arc<dyn CostRepository> = Arc::new(SqliteCostRepository::new(pool.clone()));
        let statistics_repo: Arc<dyn StatisticsRepository> =
            Arc::new(SqliteStatisticsRepository::new(pool.clone()));

        // 3. SERVICES
        let vehicle_service = Arc::new(VehicleService::new(
            vehicle_repo.clone(),
            event_bus.clone(),
        ));
        let refueling_service = Arc::new(RefuelingService::new(
            refueling_repo.clone(),
            vehicle_repo.clone(),
            event_bus.clone(),
        ));
        let cost_service = Arc::new(CostService::new(
            cost_repo.clone(),
            vehicle_repo.clone(),
            event_bus.clone(),
        ));
        let statistics_service = Arc::new(StatisticsService::new(
            statistics_repo.clone(),
            vehicle_repo.clone(),
            refueling_repo.clone(),
            cost_repo.clone(),
            event_bus.clone(),
        ));
        let report_service = Arc::new(ReportService::new(
            vehicle_repo,
            refueling_repo,
            cost_repo,
            units,
        ));

        // 4. EVENT HANDLER REGISTRATION (WIRING)
        statistics_service.register_event_handlers();

        Ok(Self {
            event_bus,
            vehicle_service,
            refueling_service,
            cost_service,
            statistics_service,
            report_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use crate::domain::statistics::StatisticsKind;
    use crate::services::{CreateRefuelingRequest, CreateVehicleRequest};

    #[test]
    fn test_open_at_wires_a_working_stack() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let state =
            AppState::open_at(&dir.path().join("app.db"), Units::default()).expect("open failed");

        let vehicle_id = state
            .vehicle_service
            .create_vehicle(CreateVehicleRequest {
                name: "Golf".to_string(),
                color: "#cc0000".to_string(),
                initial_mileage: None,
            })
            .expect("create vehicle failed");

        state
            .refueling_service
            .create_refueling(CreateRefuelingRequest {
                vehicle_id,
                time: Utc::now(),
                mileage: 12000,
                volume: 38.0,
                price: 57.0,
                partial: false,
                note: None,
            })
            .expect("create refueling failed");

        // The statistics wiring reacted to the refueling event
        let snapshot = state
            .statistics_service
            .last_snapshot(&StatisticsKind::PerVehicle { vehicle_id })
            .expect("load failed");
        assert!(snapshot.is_some());

        let reports = state.report_service.build_all().expect("reports failed");
        assert_eq!(reports.len(), 4);
    }
}
