// src/lib.rs
// FuelLog - Local-first vehicle fuel and cost tracker
//
// Architecture:
// - Domain-centric: All business logic lives in domains
// - Event-driven: Services coordinate through events
// - Explicit: No implicit behavior, no magic
// - Local-first: User controls all data

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    consumption_intervals,
    rebalance,
    reconstruct,
    validate_cost,
    validate_refueling,
    validate_vehicle,
    // Refueling
    BalancedRefueling,
    ConsumptionInterval,
    // Statistics (derived data)
    GlobalStatistics,
    // Cost
    OtherCost,
    Recurrence,
    RecurrenceInterval,
    Refueling,
    // Reports
    Report,
    ReportInput,
    ReportKind,
    StatisticsKind,
    StatisticsSnapshot,
    Units,
    // Vehicle
    Vehicle,
    VehicleStatistics,
};

// ============================================================================
// PUBLIC API - Errors
// ============================================================================

pub use domain::{DomainError, DomainResult};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Application State
// ============================================================================

pub use application::AppState;
