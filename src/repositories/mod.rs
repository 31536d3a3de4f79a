// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only

pub mod cost_repository;
pub mod refueling_repository;
pub mod statistics_repository;
pub mod vehicle_repository;

pub use cost_repository::{CostRepository, SqliteCostRepository};
pub use refueling_repository::{RefuelingRepository, SqliteRefuelingRepository};
pub use statistics_repository::{SqliteStatisticsRepository, StatisticsRepository};
pub use vehicle_repository::{SqliteVehicleRepository, VehicleRepository};
