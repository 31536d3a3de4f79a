use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a derived statistics snapshot
/// Statistics are NEVER a source of truth and can be recalculated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    /// Snapshot identifier
    pub id: Uuid,

    /// What this snapshot covers
    pub kind: StatisticsKind,

    /// The actual data (stored as JSON for flexibility)
    pub value: serde_json::Value,

    /// When this snapshot was generated
    pub generated_at: DateTime<Utc>,
}

/// Kinds of statistics that can be tracked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticsKind {
    /// Global statistics across all vehicles
    Global,

    /// Statistics for a specific vehicle
    PerVehicle { vehicle_id: Uuid },
}

impl StatisticsSnapshot {
    /// Create a new statistics snapshot
    pub fn new(kind: StatisticsKind, value: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            value,
            generated_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for StatisticsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatisticsKind::Global => write!(f, "global"),
            StatisticsKind::PerVehicle { vehicle_id } => write!(f, "per_vehicle:{}", vehicle_id),
        }
    }
}

/// Common global statistics structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalStatistics {
    pub vehicle_count: u32,
    pub refueling_count: u32,
    pub cost_count: u32,
    pub total_distance: i64,
    pub total_volume: f64,
    pub total_fuel_cost: f64,
    pub total_other_cost: f64,
}

/// Per-vehicle statistics structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleStatistics {
    pub vehicle_id: Uuid,
    pub refueling_count: u32,
    pub cost_count: u32,

    /// Distance between the first and last recorded refueling
    pub total_distance: i64,
    pub total_volume: f64,
    pub total_fuel_cost: f64,

    /// Other costs with recurring ones expanded up to the snapshot time
    pub total_other_cost: f64,

    /// Volume per 100 distance units across all resolvable intervals
    pub average_consumption: Option<f64>,

    pub last_refueling_at: Option<DateTime<Utc>>,
}
