// src/domain/report/data.rs
//
// Report input and output structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ReportKind;
use crate::domain::cost::OtherCost;
use crate::domain::refueling::Refueling;
use crate::domain::vehicle::Vehicle;

/// Display units for report labels. Purely cosmetic; all math is unit-blind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Units {
    pub distance: String,
    pub volume: String,
    pub currency: String,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            distance: "km".to_string(),
            volume: "l".to_string(),
            currency: "EUR".to_string(),
        }
    }
}

/// One vehicle's data as the report builders consume it.
/// Refuelings MUST be ordered by mileage ascending.
#[derive(Debug, Clone)]
pub struct VehicleData {
    pub vehicle: Vehicle,
    pub refuelings: Vec<Refueling>,
    pub costs: Vec<OtherCost>,
}

/// Everything a report builder needs, assembled once by the report service
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub vehicles: Vec<VehicleData>,
    pub units: Units,

    /// End of the reporting range; recurring costs are expanded up to here
    pub now: DateTime<Utc>,
}

/// A single chart point: x is unix milliseconds, y the measured value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: i64,
    pub y: f64,
}

/// One chart line, usually one per vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub color: String,
    pub points: Vec<DataPoint>,
}

/// A labelled value in the textual part of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportItem {
    pub label: String,
    pub value: f64,
    pub unit: String,
}

/// A group of report items, usually one section per vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub label: String,
    pub items: Vec<ReportItem>,
}

/// A fully built report: textual sections plus chart series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub kind: ReportKind,
    pub sections: Vec<ReportSection>,
    pub series: Vec<Series>,
}
