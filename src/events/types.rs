// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// VEHICLE EVENTS
// ============================================================================

/// Emitted when a new Vehicle is created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub vehicle_id: Uuid,
    pub name: String,
}

impl VehicleCreated {
    pub fn new(vehicle_id: Uuid, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            vehicle_id,
            name,
        }
    }
}

impl DomainEvent for VehicleCreated {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "VehicleCreated"
    }
}

/// Emitted when a Vehicle (and, by cascade, its records) is deleted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub vehicle_id: Uuid,
}

impl VehicleDeleted {
    pub fn new(vehicle_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            vehicle_id,
        }
    }
}

impl DomainEvent for VehicleDeleted {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "VehicleDeleted"
    }
}

// ============================================================================
// REFUELING EVENTS
// ============================================================================

/// Emitted when a refueling is recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefuelingCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub refueling_id: Uuid,
    pub vehicle_id: Uuid,
    pub mileage: i64,
    pub volume: f64,
}

impl RefuelingCreated {
    pub fn new(refueling_id: Uuid, vehicle_id: Uuid, mileage: i64, volume: f64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            refueling_id,
            vehicle_id,
            mileage,
            volume,
        }
    }
}

impl DomainEvent for RefuelingCreated {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "RefuelingCreated"
    }
}

/// Emitted when a refueling is edited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefuelingUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub refueling_id: Uuid,
    pub vehicle_id: Uuid,
}

impl RefuelingUpdated {
    pub fn new(refueling_id: Uuid, vehicle_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            refueling_id,
            vehicle_id,
        }
    }
}

impl DomainEvent for RefuelingUpdated {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "RefuelingUpdated"
    }
}

/// Emitted when a refueling is removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefuelingDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub refueling_id: Uuid,
    pub vehicle_id: Uuid,
}

impl RefuelingDeleted {
    pub fn new(refueling_id: Uuid, vehicle_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            refueling_id,
            vehicle_id,
        }
    }
}

impl DomainEvent for RefuelingDeleted {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "RefuelingDeleted"
    }
}

// ============================================================================
// OTHER COST EVENTS
// ============================================================================

/// Emitted when an other cost is recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub cost_id: Uuid,
    pub vehicle_id: Uuid,
    pub title: String,
}

impl CostCreated {
    pub fn new(cost_id: Uuid, vehicle_id: Uuid, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            cost_id,
            vehicle_id,
            title,
        }
    }
}

impl DomainEvent for CostCreated {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "CostCreated"
    }
}

/// Emitted when an other cost is removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub cost_id: Uuid,
    pub vehicle_id: Uuid,
}

impl CostDeleted {
    pub fn new(cost_id: Uuid, vehicle_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            cost_id,
            vehicle_id,
        }
    }
}

impl DomainEvent for CostDeleted {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "CostDeleted"
    }
}

// ============================================================================
// STATISTICS EVENTS
// ============================================================================

/// Emitted when a statistics snapshot has been recomputed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub kind: String,
}

impl StatisticsUpdated {
    pub fn new(kind: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            kind,
        }
    }
}

impl DomainEvent for StatisticsUpdated {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "StatisticsUpdated"
    }
}
