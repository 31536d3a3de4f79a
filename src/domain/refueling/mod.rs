pub mod balance;
pub mod entity;
pub mod invariants;

pub use balance::{
    consumption_intervals, rebalance, reconstruct, BalancedRefueling, ConsumptionInterval,
};
pub use entity::Refueling;
pub use invariants::validate_refueling;
