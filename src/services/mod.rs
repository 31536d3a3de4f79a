// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod cost_service;
pub mod refueling_service;
pub mod report_service;
pub mod statistics_service;
pub mod vehicle_service;

#[cfg(test)]
mod statistics_service_tests;

// Re-export all services and their types
pub use vehicle_service::{CreateVehicleRequest, UpdateVehicleRequest, VehicleService};

pub use refueling_service::{
    CreateRefuelingRequest, RefuelingListItem, RefuelingService, UpdateRefuelingRequest,
};

pub use cost_service::{CostService, CreateCostRequest, UpdateCostRequest};

pub use statistics_service::StatisticsService;

pub use report_service::ReportService;
