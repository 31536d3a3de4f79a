use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded refueling event
/// Refuelings are the unit of all consumption math
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Refueling {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Reference to owning Vehicle (REQUIRED)
    pub vehicle_id: Uuid,

    /// When the refueling happened; used for display and ordering ties only,
    /// consumption math orders by mileage
    pub time: DateTime<Utc>,

    /// Odometer reading at the pump
    pub mileage: i64,

    /// Fuel volume added
    pub volume: f64,

    /// Total price paid for this fill
    pub price: f64,

    /// True when the tank was NOT filled to full
    pub partial: bool,

    /// Free-form note
    pub note: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Refueling {
    /// Create a new Refueling
    /// vehicle_id MUST be valid (checked by caller)
    pub fn new(vehicle_id: Uuid, time: DateTime<Utc>, mileage: i64, volume: f64, price: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            time,
            mileage,
            volume,
            price,
            partial: false,
            note: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Price paid per volume unit, None when the volume is not positive
    pub fn price_per_volume(&self) -> Option<f64> {
        if self.volume > 0.0 {
            Some(self.price / self.volume)
        } else {
            None
        }
    }

    /// Update refueling fields; `None` leaves a field unchanged
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        time: Option<DateTime<Utc>>,
        mileage: Option<i64>,
        volume: Option<f64>,
        price: Option<f64>,
        partial: Option<bool>,
        note: Option<String>,
    ) {
        if let Some(t) = time {
            self.time = t;
        }
        if let Some(m) = mileage {
            self.mileage = m;
        }
        if let Some(v) = volume {
            self.volume = v;
        }
        if let Some(p) = price {
            self.price = p;
        }
        if let Some(pt) = partial {
            self.partial = pt;
        }
        if let Some(n) = note {
            self.note = n;
        }
        self.updated_at = Utc::now();
    }
}
