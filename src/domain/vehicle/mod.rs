pub mod entity;
pub mod invariants;

pub use entity::Vehicle;
pub use invariants::validate_vehicle;
