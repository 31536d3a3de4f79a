pub mod entity;
pub mod invariants;
pub mod recurrence;

pub use entity::OtherCost;
pub use invariants::validate_cost;
pub use recurrence::{Recurrence, RecurrenceInterval};
