// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: the type-erased handler representation is INTERNAL and must NOT
// be exported

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    CostCreated,
    CostDeleted,
    // Refueling
    RefuelingCreated,
    RefuelingDeleted,
    RefuelingUpdated,
    // Statistics
    StatisticsUpdated,
    // Vehicle
    VehicleCreated,
    VehicleDeleted,
};

pub use bus::{EventBus, EventLogEntry};
