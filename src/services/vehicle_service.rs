// src/services/vehicle_service.rs
//
// Vehicle Service - Vehicle lifecycle
//
// CRITICAL RULES:
// - Manages vehicles ONLY
// - Never touches refuelings or costs directly; deletion cascades in the
//   database

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::vehicle::{validate_vehicle, Vehicle};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, VehicleCreated, VehicleDeleted};
use crate::repositories::VehicleRepository;

/// Request to create a new vehicle
#[derive(Debug, Clone)]
pub struct CreateVehicleRequest {
    pub name: String,
    pub color: String,
    pub initial_mileage: Option<i64>,
}

/// Request to update an existing vehicle
#[derive(Debug, Clone)]
pub struct UpdateVehicleRequest {
    pub vehicle_id: Uuid,
    pub name: Option<String>,
    pub color: Option<String>,
    pub initial_mileage: Option<i64>,
}

pub struct VehicleService {
    vehicle_repo: Arc<dyn VehicleRepository>,
    event_bus: Arc<EventBus>,
}

impl VehicleService {
    pub fn new(vehicle_repo: Arc<dyn VehicleRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            vehicle_repo,
            event_bus,
        }
    }

    pub fn create_vehicle(&self, request: CreateVehicleRequest) -> AppResult<Uuid> {
        let mut vehicle = Vehicle::new(request.name, request.color);
        if let Some(mileage) = request.initial_mileage {
            vehicle.initial_mileage = mileage;
        }

        validate_vehicle(&vehicle).map_err(AppError::Domain)?;
        self.vehicle_repo.save(&vehicle)?;

        self.event_bus
            .emit(VehicleCreated::new(vehicle.id, vehicle.name.clone()));

        Ok(vehicle.id)
    }

    pub fn update_vehicle(&self, request: UpdateVehicleRequest) -> AppResult<()> {
        let mut vehicle = self
            .vehicle_repo
            .get_by_id(request.vehicle_id)?
            .ok_or(AppError::NotFound)?;

        vehicle.update(request.name, request.color, request.initial_mileage);

        validate_vehicle(&vehicle).map_err(AppError::Domain)?;
        self.vehicle_repo.save(&vehicle)?;

        Ok(())
    }

    /// Delete a vehicle. Its refuelings and costs go with it (FK cascade).
    pub fn delete_vehicle(&self, vehicle_id: Uuid) -> AppResult<()> {
        self.vehicle_repo.delete(vehicle_id)?;
        self.event_bus.emit(VehicleDeleted::new(vehicle_id));
        Ok(())
    }

    pub fn get_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vehicle> {
        self.vehicle_repo
            .get_by_id(vehicle_id)?
            .ok_or(AppError::NotFound)
    }

    pub fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.vehicle_repo.list_all()
    }
}
