use super::entity::OtherCost;
use crate::domain::{DomainError, DomainResult};

/// Validates all OtherCost invariants
pub fn validate_cost(cost: &OtherCost) -> DomainResult<()> {
    validate_title(&cost.title)?;
    validate_mileage(cost)?;
    validate_price(cost)?;
    Ok(())
}

/// Title cannot be empty
fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Cost title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_mileage(cost: &OtherCost) -> DomainResult<()> {
    if let Some(mileage) = cost.mileage {
        if mileage < 0 {
            return Err(DomainError::NegativeMileage(mileage));
        }
    }
    Ok(())
}

/// Price may be negative (income) but must be a finite number
fn validate_price(cost: &OtherCost) -> DomainResult<()> {
    if !cost.price.is_finite() {
        return Err(DomainError::InvariantViolation(format!(
            "Cost price must be a finite number, got {}",
            cost.price
        )));
    }
    Ok(())
}

/// Critical OtherCost Invariants:
///
/// 1. Cost MUST belong to exactly one Vehicle (vehicle_id required)
/// 2. Title cannot be empty
/// 3. Mileage, when present, is never negative
/// 4. Price may be negative (income) but never NaN/infinite
/// 5. The cost's date anchors its recurrence; both move together

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn cost() -> OtherCost {
        OtherCost::new(Uuid::new_v4(), "Insurance".to_string(), Utc::now(), 120.0)
    }

    #[test]
    fn test_valid_cost() {
        assert!(validate_cost(&cost()).is_ok());
    }

    #[test]
    fn test_empty_title_fails() {
        let mut c = cost();
        c.title = "  ".to_string();
        assert!(validate_cost(&c).is_err());
    }

    #[test]
    fn test_negative_mileage_fails() {
        let mut c = cost();
        c.mileage = Some(-10);
        assert!(validate_cost(&c).is_err());
    }

    #[test]
    fn test_negative_price_is_income_and_valid() {
        let mut c = cost();
        c.price = -50.0;
        assert!(validate_cost(&c).is_ok());
    }

    #[test]
    fn test_nan_price_fails() {
        let mut c = cost();
        c.price = f64::NAN;
        assert!(validate_cost(&c).is_err());
    }
}
