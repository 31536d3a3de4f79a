// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod cost;
pub mod refueling;
pub mod report;
pub mod statistics;
pub mod vehicle;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Vehicle Domain
pub use vehicle::{validate_vehicle, Vehicle};

// Refueling Domain
pub use refueling::{
    consumption_intervals, rebalance, reconstruct, validate_refueling, BalancedRefueling,
    ConsumptionInterval, Refueling,
};

// Cost Domain
pub use cost::{validate_cost, OtherCost, Recurrence, RecurrenceInterval};

// Statistics Domain (Derived Data)
pub use statistics::{
    GlobalStatistics, StatisticsKind, StatisticsSnapshot, VehicleStatistics,
};

// Reports
pub use report::{
    DataPoint, Report, ReportInput, ReportItem, ReportKind, ReportSection, Series, Units,
    VehicleData,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Negative mileage: {0}")]
    NegativeMileage(i64),

    #[error("Volume must be positive, got {0}")]
    NonPositiveVolume(f64),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
