// src/domain/refueling/balance.rs
//
// Refueling sequence balancing
//
// Consumption can only be computed between two FULL fills: a partial fill
// leaves an unknown amount of room in the tank, so its volume has to be
// carried forward until the next full fill closes the interval. This module
// rewrites a vehicle's mileage-ordered refueling sequence so that downstream
// consumers (lists, reports, statistics) only ever see fill-to-fill intervals.
//
// CRITICAL RULES:
// - Pure computation, no I/O, no persistence
// - Only ever INSERTS entries, never removes or reorders
// - Synthetic entries carry no identifier and must never be written back
// - Malformed input is flagged per entry (`valid = false`), never an error

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::entity::Refueling;

/// A refueling as seen by lists and reports: the recorded fields plus the
/// transient balancing flags. Lives for one computation and is discarded.
#[derive(Debug, Clone, Serialize)]
pub struct BalancedRefueling {
    /// Identifier of the underlying record; None for synthetic entries
    pub id: Option<Uuid>,

    pub vehicle_id: Uuid,
    pub time: DateTime<Utc>,
    pub mileage: i64,
    pub volume: f64,
    pub price: f64,
    pub partial: bool,
    pub note: String,

    /// True for entries manufactured by the balancer
    pub synthetic: bool,

    /// False when the interval this entry takes part in cannot be resolved
    /// (negative or zero distance since the previous full fill)
    pub valid: bool,
}

impl BalancedRefueling {
    /// Wrap a recorded refueling, flags at their defaults
    pub fn from_record(record: &Refueling) -> Self {
        Self {
            id: Some(record.id),
            vehicle_id: record.vehicle_id,
            time: record.time,
            mileage: record.mileage,
            volume: record.volume,
            price: record.price,
            partial: record.partial,
            note: record.note.clone(),
            synthetic: false,
            valid: true,
        }
    }

    /// Manufacture the synthetic full-fill anchor for a leading partial fill.
    /// Positioned at the same mileage, zero volume and price, no identifier.
    fn anchor_for(first: &BalancedRefueling) -> Self {
        Self {
            id: None,
            vehicle_id: first.vehicle_id,
            time: first.time,
            mileage: first.mileage,
            volume: 0.0,
            price: 0.0,
            partial: false,
            note: String::new(),
            synthetic: true,
            valid: true,
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
}

/// Balance a vehicle's recorded refuelings.
///
/// Input must be the full list for one vehicle, ordered by mileage ascending
/// (the repository query guarantees this). Returns a new sequence with the
/// original entries in their original order, plus at most one synthetic
/// full-fill anchor at the head when the sequence starts with a partial fill.
pub fn reconstruct(records: &[Refueling]) -> Vec<BalancedRefueling> {
    rebalance(records.iter().map(BalancedRefueling::from_record).collect())
}

/// Balance an already-wrapped sequence.
///
/// Running this on its own output is a no-op apart from recomputing the
/// validity flags: the synthetic anchor is a full fill, so a once-balanced
/// sequence never gains further synthetic entries.
pub fn rebalance(entries: Vec<BalancedRefueling>) -> Vec<BalancedRefueling> {
    let mut out = Vec::with_capacity(entries.len() + 1);

    // A leading partial fill has no full fill to anchor its interval.
    // Manufacture exactly one anchor; this is the only insertion case.
    // Gaps or odometer jumps later in the sequence are NOT treated as
    // evidence of a missing fill-up.
    if let Some(first) = entries.first() {
        if first.partial {
            out.push(BalancedRefueling::anchor_for(first));
        }
    }
    out.extend(entries);

    let mut last_anchor: Option<i64> = None;
    for entry in out.iter_mut() {
        entry.valid = true;

        match last_anchor {
            None => {
                // Nothing to measure against yet
            }
            Some(anchor) => {
                let distance = entry.mileage - anchor;
                if distance < 0 {
                    // Out-of-order odometer reading
                    entry.valid = false;
                } else if distance == 0 && !entry.partial {
                    // Duplicate reading closing an interval: the volume since
                    // the anchor cannot be attributed to any distance
                    entry.valid = false;
                }
            }
        }

        if !entry.partial {
            last_anchor = Some(entry.mileage);
        }
    }

    out
}

/// One fill-to-fill consumption interval
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConsumptionInterval {
    pub start_mileage: i64,
    pub end_mileage: i64,

    /// Volume of the closing full fill plus every partial fill in between
    pub volume: f64,

    /// Index (into the balanced sequence) of the full fill closing this interval
    pub end_index: usize,
}

impl ConsumptionInterval {
    pub fn distance(&self) -> i64 {
        self.end_mileage - self.start_mileage
    }

    /// Volume per 100 distance units; None when the distance is not positive
    pub fn consumption(&self) -> Option<f64> {
        let distance = self.distance();
        if distance > 0 {
            Some(self.volume / distance as f64 * 100.0)
        } else {
            None
        }
    }
}

/// Extract the consumption intervals from a balanced sequence.
///
/// Walks the sequence once: partial fills accumulate into the pending volume,
/// every full fill after the first closes an interval and becomes the new
/// anchor. Intervals with non-positive distance are returned as well so that
/// callers can surface them; their `consumption()` is None.
pub fn consumption_intervals(entries: &[BalancedRefueling]) -> Vec<ConsumptionInterval> {
    let mut intervals = Vec::new();
    let mut anchor: Option<i64> = None;
    let mut pending_volume = 0.0;

    for (index, entry) in entries.iter().enumerate() {
        if entry.partial {
            pending_volume += entry.volume;
            continue;
        }

        if let Some(start_mileage) = anchor {
            intervals.push(ConsumptionInterval {
                start_mileage,
                end_mileage: entry.mileage,
                volume: pending_volume + entry.volume,
                end_index: index,
            });
        }

        pending_volume = 0.0;
        anchor = Some(entry.mileage);
    }

    intervals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn record(vehicle_id: Uuid, mileage: i64, volume: f64, partial: bool) -> Refueling {
        let mut r = Refueling::new(vehicle_id, Utc::now(), mileage, volume, volume * 1.5);
        r.partial = partial;
        r
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(reconstruct(&[]).is_empty());
    }

    #[test]
    fn test_full_fills_pass_through_unchanged() {
        let vehicle_id = Uuid::new_v4();
        let records = vec![
            record(vehicle_id, 100, 10.0, false),
            record(vehicle_id, 190, 9.0, false),
        ];

        let balanced = reconstruct(&records);

        assert_eq!(balanced.len(), 2);
        assert!(balanced.iter().all(|e| !e.synthetic && e.valid));
        assert_eq!(balanced[0].id, Some(records[0].id));
        assert_eq!(balanced[1].id, Some(records[1].id));

        let intervals = consumption_intervals(&balanced);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].distance(), 90);
        assert!((intervals[0].volume - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_leading_partial_gets_synthetic_anchor() {
        let vehicle_id = Uuid::new_v4();
        let records = vec![
            record(vehicle_id, 95, 8.0, true),
            record(vehicle_id, 210, 10.0, false),
        ];

        let balanced = reconstruct(&records);

        assert_eq!(balanced.len(), 3);
        assert!(balanced[0].synthetic);
        assert_eq!(balanced[0].id, None);
        assert_eq!(balanced[0].mileage, 95);
        assert!(!balanced[0].partial);
        assert_eq!(balanced[0].volume, 0.0);
        assert_eq!(balanced[0].price, 0.0);
        assert!(!balanced[1].synthetic);
        assert!(!balanced[2].synthetic);

        let intervals = consumption_intervals(&balanced);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].distance(), 115);
        assert!((intervals[0].volume - 18.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_consecutive_leading_partials_share_one_anchor() {
        let vehicle_id = Uuid::new_v4();
        let records = vec![
            record(vehicle_id, 95, 8.0, true),
            record(vehicle_id, 150, 6.0, true),
            record(vehicle_id, 210, 10.0, false),
        ];

        let balanced = reconstruct(&records);

        assert_eq!(balanced.len(), 4);
        assert_eq!(balanced.iter().filter(|e| e.synthetic).count(), 1);
        assert!(balanced[0].synthetic);
        assert_eq!(balanced[0].mileage, 95);
        assert!(balanced.iter().all(|e| e.valid));

        // Both partials fold into the single anchored interval
        let intervals = consumption_intervals(&balanced);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].distance(), 115);
        assert!((intervals[0].volume - 24.0).abs() < f64::EPSILON);
        assert_eq!(intervals[0].end_index, 3);
    }

    #[test]
    fn test_interval_volume_sums_partials_between_full_fills() {
        let vehicle_id = Uuid::new_v4();
        let records = vec![
            record(vehicle_id, 100, 40.0, false),
            record(vehicle_id, 150, 5.0, true),
            record(vehicle_id, 200, 7.0, true),
            record(vehicle_id, 300, 30.0, false),
        ];

        let balanced = reconstruct(&records);
        assert_eq!(balanced.len(), 4);

        let intervals = consumption_intervals(&balanced);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].distance(), 200);
        assert!((intervals[0].volume - 42.0).abs() < f64::EPSILON);
        assert_eq!(intervals[0].end_index, 3);
        let consumption = intervals[0].consumption().unwrap();
        assert!((consumption - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_rebalance_is_idempotent() {
        let vehicle_id = Uuid::new_v4();
        let records = vec![
            record(vehicle_id, 95, 8.0, true),
            record(vehicle_id, 210, 10.0, false),
            record(vehicle_id, 250, 4.0, true),
            record(vehicle_id, 330, 12.0, false),
        ];

        let once = reconstruct(&records);
        let twice = rebalance(once.clone());

        assert_eq!(once.len(), twice.len());
        assert_eq!(twice.iter().filter(|e| e.synthetic).count(), 1);
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.mileage, b.mileage);
            assert_eq!(a.partial, b.partial);
            assert_eq!(a.synthetic, b.synthetic);
            assert_eq!(a.valid, b.valid);
        }
    }

    #[test]
    fn test_output_preserves_mileage_ordering() {
        let vehicle_id = Uuid::new_v4();
        let records = vec![
            record(vehicle_id, 50, 6.0, true),
            record(vehicle_id, 120, 11.0, false),
            record(vehicle_id, 120, 3.0, true),
            record(vehicle_id, 260, 13.0, false),
        ];

        let balanced = reconstruct(&records);
        for pair in balanced.windows(2) {
            assert!(pair[0].mileage <= pair[1].mileage);
        }
    }

    #[test]
    fn test_negative_distance_is_flagged_not_rejected() {
        let vehicle_id = Uuid::new_v4();
        let records = vec![
            record(vehicle_id, 200, 10.0, false),
            record(vehicle_id, 150, 9.0, false),
        ];

        let balanced = reconstruct(&records);
        assert_eq!(balanced.len(), 2);
        assert!(balanced[0].valid);
        assert!(!balanced[1].valid);
    }

    #[test]
    fn test_duplicate_mileage_full_fill_is_invalid() {
        let vehicle_id = Uuid::new_v4();
        let records = vec![
            record(vehicle_id, 100, 10.0, false),
            record(vehicle_id, 100, 9.0, false),
        ];

        let balanced = reconstruct(&records);
        assert!(balanced[0].valid);
        assert!(!balanced[1].valid);

        let intervals = consumption_intervals(&balanced);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].consumption(), None);
    }

    #[test]
    fn test_partial_at_anchor_mileage_stays_valid() {
        // Synthetic anchor and the partial it anchors share a mileage; the
        // zero distance between them is not an anomaly.
        let vehicle_id = Uuid::new_v4();
        let records = vec![
            record(vehicle_id, 95, 8.0, true),
            record(vehicle_id, 210, 10.0, false),
        ];

        let balanced = reconstruct(&records);
        assert!(balanced.iter().all(|e| e.valid));
    }

    #[test]
    fn test_trailing_partial_opens_no_interval() {
        let vehicle_id = Uuid::new_v4();
        let records = vec![
            record(vehicle_id, 100, 10.0, false),
            record(vehicle_id, 180, 5.0, true),
        ];

        let balanced = reconstruct(&records);
        assert_eq!(balanced.len(), 2);
        assert!(consumption_intervals(&balanced).is_empty());
    }

    #[test]
    fn test_single_full_fill_has_no_interval() {
        let vehicle_id = Uuid::new_v4();
        let records = vec![record(vehicle_id, 100, 10.0, false)];

        let balanced = reconstruct(&records);
        assert_eq!(balanced.len(), 1);
        assert!(consumption_intervals(&balanced).is_empty());
    }
}
