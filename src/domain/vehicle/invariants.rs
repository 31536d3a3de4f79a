use super::entity::Vehicle;
use crate::domain::{DomainError, DomainResult};

/// Validates all Vehicle invariants
pub fn validate_vehicle(vehicle: &Vehicle) -> DomainResult<()> {
    validate_name(&vehicle.name)?;
    validate_initial_mileage(vehicle)?;
    Ok(())
}

/// Name cannot be empty
fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Vehicle name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_initial_mileage(vehicle: &Vehicle) -> DomainResult<()> {
    if vehicle.initial_mileage < 0 {
        return Err(DomainError::NegativeMileage(vehicle.initial_mileage));
    }
    Ok(())
}

/// Critical Vehicle Invariants:
///
/// 1. Vehicle can exist without refuelings or costs
/// 2. Identity (UUID) is immutable
/// 3. Name cannot be empty
/// 4. Initial mileage is never negative
/// 5. Deleting a vehicle deletes its refuelings and costs (enforced by FK cascade)
