// src/services/statistics_service.rs
//
// Statistics Service - derived totals, persisted as snapshots
//
// Statistics are recomputed from the records on demand and after refueling
// changes (event subscription). They are never a source of truth.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::refueling::{consumption_intervals, reconstruct};
use crate::domain::statistics::{
    GlobalStatistics, StatisticsKind, StatisticsSnapshot, VehicleStatistics,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, RefuelingCreated, RefuelingDeleted, StatisticsUpdated};
use crate::repositories::{
    CostRepository, RefuelingRepository, StatisticsRepository, VehicleRepository,
};

pub struct StatisticsService {
    statistics_repo: Arc<dyn StatisticsRepository>,
    vehicle_repo: Arc<dyn VehicleRepository>,
    refueling_repo: Arc<dyn RefuelingRepository>,
    cost_repo: Arc<dyn CostRepository>,
    event_bus: Arc<EventBus>,
}

impl StatisticsService {
    pub fn new(
        statistics_repo: Arc<dyn StatisticsRepository>,
        vehicle_repo: Arc<dyn VehicleRepository>,
        refueling_repo: Arc<dyn RefuelingRepository>,
        cost_repo: Arc<dyn CostRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            statistics_repo,
            vehicle_repo,
            refueling_repo,
            cost_repo,
            event_bus,
        }
    }

    /// Compute and persist the statistics snapshot for one vehicle
    pub fn calculate_vehicle_statistics(&self, vehicle_id: Uuid) -> AppResult<VehicleStatistics> {
        if !self.vehicle_repo.exists(vehicle_id)? {
            return Err(AppError::NotFound);
        }

        let refuelings = self.refueling_repo.list_by_vehicle(vehicle_id)?;
        let costs = self.cost_repo.list_by_vehicle(vehicle_id)?;
        let now = Utc::now();

        let stats = compute_vehicle_statistics(vehicle_id, &refuelings, &costs, now);

        let snapshot = StatisticsSnapshot::new(
            StatisticsKind::PerVehicle { vehicle_id },
            serde_json::to_value(&stats)?,
        );
        self.statistics_repo.save_snapshot(&snapshot)?;

        self.event_bus
            .emit(StatisticsUpdated::new(snapshot.kind.to_string()));

        Ok(stats)
    }

    /// Compute and persist the global statistics snapshot
    pub fn calculate_global_statistics(&self) -> AppResult<GlobalStatistics> {
        let vehicles = self.vehicle_repo.list_all()?;
        let now = Utc::now();

        let mut global = GlobalStatistics {
            vehicle_count: vehicles.len() as u32,
            ..GlobalStatistics::default()
        };

        for vehicle in &vehicles {
            let refuelings = self.refueling_repo.list_by_vehicle(vehicle.id)?;
            let costs = self.cost_repo.list_by_vehicle(vehicle.id)?;
            let stats = compute_vehicle_statistics(vehicle.id, &refuelings, &costs, now);

            global.refueling_count += stats.refueling_count;
            global.cost_count += stats.cost_count;
            global.total_distance += stats.total_distance;
            global.total_volume += stats.total_volume;
            global.total_fuel_cost += stats.total_fuel_cost;
            global.total_other_cost += stats.total_other_cost;
        }

        let snapshot =
            StatisticsSnapshot::new(StatisticsKind::Global, serde_json::to_value(&global)?);
        self.statistics_repo.save_snapshot(&snapshot)?;

        self.event_bus
            .emit(StatisticsUpdated::new(snapshot.kind.to_string()));

        Ok(global)
    }

    /// Load the last persisted snapshot for a kind, if any
    pub fn last_snapshot(&self, kind: &StatisticsKind) -> AppResult<Option<StatisticsSnapshot>> {
        self.statistics_repo.get_by_kind(kind)
    }

    /// Recompute a vehicle's snapshot whenever its refuelings change
    pub fn register_event_handlers(self: &Arc<Self>) {
        let on_created = Arc::clone(self);
        self.event_bus.subscribe::<RefuelingCreated, _>(move |event| {
            if let Err(e) = on_created.calculate_vehicle_statistics(event.vehicle_id) {
                log::warn!(
                    "Failed to refresh statistics for vehicle {}: {}",
                    event.vehicle_id,
                    e
                );
            }
        });

        let on_deleted = Arc::clone(self);
        self.event_bus.subscribe::<RefuelingDeleted, _>(move |event| {
            if let Err(e) = on_deleted.calculate_vehicle_statistics(event.vehicle_id) {
                log::warn!(
                    "Failed to refresh statistics for vehicle {}: {}",
                    event.vehicle_id,
                    e
                );
            }
        });
    }
}

/// Pure computation of one vehicle's statistics from its records
pub fn compute_vehicle_statistics(
    vehicle_id: Uuid,
    refuelings: &[crate::domain::refueling::Refueling],
    costs: &[crate::domain::cost::OtherCost],
    now: chrono::DateTime<Utc>,
) -> VehicleStatistics {
    let balanced = reconstruct(refuelings);
    let intervals = consumption_intervals(&balanced);

    let mut interval_distance = 0i64;
    let mut interval_volume = 0.0;
    for interval in &intervals {
        if balanced[interval.end_index].valid && interval.distance() > 0 {
            interval_distance += interval.distance();
            interval_volume += interval.volume;
        }
    }

    let average_consumption = if interval_distance > 0 {
        Some(interval_volume / interval_distance as f64 * 100.0)
    } else {
        None
    };

    let total_distance = match (refuelings.first(), refuelings.last()) {
        (Some(first), Some(last)) => last.mileage - first.mileage,
        _ => 0,
    };

    VehicleStatistics {
        vehicle_id,
        refueling_count: refuelings.len() as u32,
        cost_count: costs.len() as u32,
        total_distance,
        total_volume: refuelings.iter().map(|r| r.volume).sum(),
        total_fuel_cost: refuelings.iter().map(|r| r.price).sum(),
        total_other_cost: costs.iter().map(|c| c.total_by(now)).sum(),
        average_consumption,
        last_refueling_at: refuelings.iter().map(|r| r.time).max(),
    }
}
