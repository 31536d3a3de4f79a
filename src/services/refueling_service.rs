// src/services/refueling_service.rs
//
// Refueling Service - recording refuelings and producing the balanced list
//
// CRITICAL RULES:
// - Manages refuelings ONLY
// - The balanced sequence and the list model are computed fresh per call and
//   never written back (synthetic entries have no identity)

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::refueling::{
    consumption_intervals, reconstruct, validate_refueling, BalancedRefueling, Refueling,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, RefuelingCreated, RefuelingDeleted, RefuelingUpdated};
use crate::repositories::{RefuelingRepository, VehicleRepository};

/// Request to record a refueling
#[derive(Debug, Clone)]
pub struct CreateRefuelingRequest {
    pub vehicle_id: Uuid,
    pub time: DateTime<Utc>,
    pub mileage: i64,
    pub volume: f64,
    pub price: f64,
    pub partial: bool,
    pub note: Option<String>,
}

/// Request to edit a refueling
#[derive(Debug, Clone)]
pub struct UpdateRefuelingRequest {
    pub refueling_id: Uuid,
    pub time: Option<DateTime<Utc>>,
    pub mileage: Option<i64>,
    pub volume: Option<f64>,
    pub price: Option<f64>,
    pub partial: Option<bool>,
    pub note: Option<String>,
}

/// One row of the refueling list as the presentation layer renders it
#[derive(Debug, Clone)]
pub struct RefuelingListItem {
    pub entry: BalancedRefueling,

    /// Distance to the immediately preceding list entry
    pub distance_since_previous: Option<i64>,

    pub price_per_volume: Option<f64>,

    /// Consumption of the fill-to-fill interval this entry closes, when it
    /// closes one and the interval is resolvable
    pub consumption: Option<f64>,
}

pub struct RefuelingService {
    refueling_repo: Arc<dyn RefuelingRepository>,
    vehicle_repo: Arc<dyn VehicleRepository>,
    event_bus: Arc<EventBus>,
}

impl RefuelingService {
    pub fn new(
        refueling_repo: Arc<dyn RefuelingRepository>,
        vehicle_repo: Arc<dyn VehicleRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            refueling_repo,
            vehicle_repo,
            event_bus,
        }
    }

    /// Record a refueling
    ///
    /// CRITICAL: vehicle_id MUST exist (validated)
    pub fn create_refueling(&self, request: CreateRefuelingRequest) -> AppResult<Uuid> {
        // 1. Validate vehicle exists
        if !self.vehicle_repo.exists(request.vehicle_id)? {
            return Err(AppError::Other("Vehicle not found".to_string()));
        }

        // 2. Create domain entity
        let mut refueling = Refueling::new(
            request.vehicle_id,
            request.time,
            request.mileage,
            request.volume,
            request.price,
        );
        refueling.partial = request.partial;
        if let Some(note) = request.note {
            refueling.note = note;
        }

        // 3. Validate domain invariants
        validate_refueling(&refueling).map_err(AppError::Domain)?;

        // 4. Persist
        self.refueling_repo.save(&refueling)?;

        // 5. Emit event
        self.event_bus.emit(RefuelingCreated::new(
            refueling.id,
            refueling.vehicle_id,
            refueling.mileage,
            refueling.volume,
        ));

        Ok(refueling.id)
    }

    pub fn update_refueling(&self, request: UpdateRefuelingRequest) -> AppResult<()> {
        let mut refueling = self
            .refueling_repo
            .get_by_id(request.refueling_id)?
            .ok_or(AppError::NotFound)?;

        refueling.update(
            request.time,
            request.mileage,
            request.volume,
            request.price,
            request.partial,
            request.note,
        );

        validate_refueling(&refueling).map_err(AppError::Domain)?;
        self.refueling_repo.save(&refueling)?;

        self.event_bus
            .emit(RefuelingUpdated::new(refueling.id, refueling.vehicle_id));

        Ok(())
    }

    pub fn delete_refueling(&self, refueling_id: Uuid) -> AppResult<()> {
        let refueling = self
            .refueling_repo
            .get_by_id(refueling_id)?
            .ok_or(AppError::NotFound)?;

        self.refueling_repo.delete(refueling_id)?;

        self.event_bus
            .emit(RefuelingDeleted::new(refueling_id, refueling.vehicle_id));

        Ok(())
    }

    /// The balanced sequence for a vehicle: recorded refuelings in mileage
    /// order, plus the synthetic anchor when the sequence starts with a
    /// partial fill
    pub fn balanced_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<BalancedRefueling>> {
        let records = self.refueling_repo.list_by_vehicle(vehicle_id)?;
        Ok(reconstruct(&records))
    }

    /// The list model: every balanced entry with its derived display figures
    pub fn list_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<RefuelingListItem>> {
        let balanced = self.balanced_for_vehicle(vehicle_id)?;
        let intervals = consumption_intervals(&balanced);

        let mut items: Vec<RefuelingListItem> = Vec::with_capacity(balanced.len());
        for (index, entry) in balanced.iter().enumerate() {
            let distance_since_previous = if index > 0 {
                Some(entry.mileage - balanced[index - 1].mileage)
            } else {
                None
            };

            // An invalid closing entry must not show a misleading figure
            let consumption = intervals
                .iter()
                .find(|i| i.end_index == index)
                .filter(|_| entry.valid)
                .and_then(|i| i.consumption());

            items.push(RefuelingListItem {
                entry: entry.clone(),
                distance_since_previous,
                price_per_volume: entry.price_per_volume(),
                consumption,
            });
        }

        Ok(items)
    }
}
