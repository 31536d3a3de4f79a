use super::entity::Refueling;
use crate::domain::{DomainError, DomainResult};

/// Validates all Refueling invariants
pub fn validate_refueling(refueling: &Refueling) -> DomainResult<()> {
    validate_mileage(refueling)?;
    validate_volume(refueling)?;
    validate_price(refueling)?;
    Ok(())
}

/// Odometer readings are never negative
fn validate_mileage(refueling: &Refueling) -> DomainResult<()> {
    if refueling.mileage < 0 {
        return Err(DomainError::NegativeMileage(refueling.mileage));
    }
    Ok(())
}

/// A refueling without volume is not a refueling
fn validate_volume(refueling: &Refueling) -> DomainResult<()> {
    if refueling.volume <= 0.0 || !refueling.volume.is_finite() {
        return Err(DomainError::NonPositiveVolume(refueling.volume));
    }
    Ok(())
}

fn validate_price(refueling: &Refueling) -> DomainResult<()> {
    if refueling.price < 0.0 || !refueling.price.is_finite() {
        return Err(DomainError::InvariantViolation(format!(
            "Refueling price must be a non-negative number, got {}",
            refueling.price
        )));
    }
    Ok(())
}

/// Critical Refueling Invariants:
///
/// 1. Refueling MUST belong to exactly one Vehicle (vehicle_id required)
/// 2. Mileage is never negative (ordering anomalies between records are
///    surfaced by the balancer, not rejected here)
/// 3. Volume is strictly positive
/// 4. Price is non-negative
/// 5. Refueling ID is immutable
/// 6. vehicle_id is immutable (refueling cannot change parent)
