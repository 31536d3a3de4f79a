use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked vehicle - the aggregate root for refuelings and other costs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Display name ("Family car", "VW Golf", ...)
    pub name: String,

    /// Display color as a hex string ("#FF5722")
    pub color: String,

    /// Odometer reading when tracking started
    pub initial_mileage: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Create a new Vehicle
    pub fn new(name: String, color: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            color,
            initial_mileage: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update vehicle fields; `None` leaves a field unchanged
    pub fn update(
        &mut self,
        name: Option<String>,
        color: Option<String>,
        initial_mileage: Option<i64>,
    ) {
        if let Some(n) = name {
            self.name = n;
        }
        if let Some(c) = color {
            self.color = c;
        }
        if let Some(m) = initial_mileage {
            self.initial_mileage = m;
        }
        self.updated_at = Utc::now();
    }
}
