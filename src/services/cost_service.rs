// src/services/cost_service.rs
//
// Cost Service - non-fuel costs and their recurrence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::cost::{validate_cost, OtherCost, RecurrenceInterval};
use crate::error::{AppError, AppResult};
use crate::events::{CostCreated, CostDeleted, EventBus};
use crate::repositories::{CostRepository, VehicleRepository};

/// Request to record a cost
#[derive(Debug, Clone)]
pub struct CreateCostRequest {
    pub vehicle_id: Uuid,
    pub title: String,
    pub time: DateTime<Utc>,
    pub mileage: Option<i64>,
    pub price: f64,
    pub recurrence_interval: RecurrenceInterval,
    pub note: Option<String>,
}

/// Request to edit a cost
#[derive(Debug, Clone)]
pub struct UpdateCostRequest {
    pub cost_id: Uuid,
    pub title: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub mileage: Option<Option<i64>>,
    pub price: Option<f64>,
    pub recurrence_interval: Option<RecurrenceInterval>,
    pub note: Option<String>,
}

pub struct CostService {
    cost_repo: Arc<dyn CostRepository>,
    vehicle_repo: Arc<dyn VehicleRepository>,
    event_bus: Arc<EventBus>,
}

impl CostService {
    pub fn new(
        cost_repo: Arc<dyn CostRepository>,
        vehicle_repo: Arc<dyn VehicleRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            cost_repo,
            vehicle_repo,
            event_bus,
        }
    }

    /// Record a cost
    ///
    /// CRITICAL: vehicle_id MUST exist (validated)
    pub fn create_cost(&self, request: CreateCostRequest) -> AppResult<Uuid> {
        if !self.vehicle_repo.exists(request.vehicle_id)? {
            return Err(AppError::Other("Vehicle not found".to_string()));
        }

        let mut cost = OtherCost::new(
            request.vehicle_id,
            request.title,
            request.time,
            request.price,
        );
        cost.mileage = request.mileage;
        cost.recurrence_interval = request.recurrence_interval;
        if let Some(note) = request.note {
            cost.note = note;
        }

        validate_cost(&cost).map_err(AppError::Domain)?;
        self.cost_repo.save(&cost)?;

        self.event_bus
            .emit(CostCreated::new(cost.id, cost.vehicle_id, cost.title.clone()));

        Ok(cost.id)
    }

    pub fn update_cost(&self, request: UpdateCostRequest) -> AppResult<()> {
        let mut cost = self
            .cost_repo
            .get_by_id(request.cost_id)?
            .ok_or(AppError::NotFound)?;

        cost.update(
            request.title,
            request.time,
            request.mileage,
            request.price,
            request.recurrence_interval,
            request.note,
        );

        validate_cost(&cost).map_err(AppError::Domain)?;
        self.cost_repo.save(&cost)?;

        Ok(())
    }

    pub fn delete_cost(&self, cost_id: Uuid) -> AppResult<()> {
        let cost = self
            .cost_repo
            .get_by_id(cost_id)?
            .ok_or(AppError::NotFound)?;

        self.cost_repo.delete(cost_id)?;

        self.event_bus
            .emit(CostDeleted::new(cost_id, cost.vehicle_id));

        Ok(())
    }

    pub fn list_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<OtherCost>> {
        self.cost_repo.list_by_vehicle(vehicle_id)
    }

    /// How often a cost has occurred by now (1 for one-off costs)
    pub fn occurrences_to_date(&self, cost_id: Uuid) -> AppResult<u32> {
        let cost = self
            .cost_repo
            .get_by_id(cost_id)?
            .ok_or(AppError::NotFound)?;

        Ok(cost.recurrence().occurrences_between(Utc::now()))
    }

    /// Total amount a cost has contributed by now
    pub fn total_to_date(&self, cost_id: Uuid) -> AppResult<f64> {
        let cost = self
            .cost_repo
            .get_by_id(cost_id)?
            .ok_or(AppError::NotFound)?;

        Ok(cost.total_by(Utc::now()))
    }
}
