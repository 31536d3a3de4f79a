use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recurrence::{Recurrence, RecurrenceInterval};

/// A non-fuel cost: maintenance, insurance, tax, parking...
/// May repeat; the cost's own date is the first occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherCost {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Reference to owning Vehicle (REQUIRED)
    pub vehicle_id: Uuid,

    /// What was paid for ("Insurance", "Winter tyres")
    pub title: String,

    /// Date of the (first) occurrence
    pub time: DateTime<Utc>,

    /// Odometer reading, when it makes sense for this cost
    pub mileage: Option<i64>,

    /// Price per occurrence. Negative values are allowed and represent
    /// income (refunds, reimbursements).
    pub price: f64,

    /// Repetition cadence; Once for one-off costs
    pub recurrence_interval: RecurrenceInterval,

    /// Free-form note
    pub note: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl OtherCost {
    /// Create a new one-off cost
    /// vehicle_id MUST be valid (checked by caller)
    pub fn new(vehicle_id: Uuid, title: String, time: DateTime<Utc>, price: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            title,
            time,
            mileage: None,
            price,
            recurrence_interval: RecurrenceInterval::Once,
            note: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The recurrence definition anchored at this cost's date
    pub fn recurrence(&self) -> Recurrence {
        Recurrence::new(self.recurrence_interval, self.time)
    }

    /// Total amount this cost has contributed by `end`
    pub fn total_by(&self, end: DateTime<Utc>) -> f64 {
        self.price * f64::from(self.recurrence().occurrences_between(end))
    }

    /// Update cost fields; `None` leaves a field unchanged
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        title: Option<String>,
        time: Option<DateTime<Utc>>,
        mileage: Option<Option<i64>>,
        price: Option<f64>,
        recurrence_interval: Option<RecurrenceInterval>,
        note: Option<String>,
    ) {
        if let Some(t) = title {
            self.title = t;
        }
        if let Some(t) = time {
            self.time = t;
        }
        if let Some(m) = mileage {
            self.mileage = m;
        }
        if let Some(p) = price {
            self.price = p;
        }
        if let Some(r) = recurrence_interval {
            self.recurrence_interval = r;
        }
        if let Some(n) = note {
            self.note = n;
        }
        self.updated_at = Utc::now();
    }
}
