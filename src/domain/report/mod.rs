// src/domain/report/mod.rs
//
// Report building
//
// Reports are a CLOSED set: each kind is an enum variant dispatching to its
// own pure data transform. Adding a report kind means adding a variant, a
// module, and an entry in `ReportKind::ALL` - no open-ended subclassing.
//
// CRITICAL RULES:
// - Report builders are pure functions over ReportInput
// - No repository access, no I/O, no mutation
// - Entries flagged invalid by the balancer never produce data points

pub mod costs;
pub mod data;
pub mod fuel_consumption;
pub mod fuel_price;
pub mod mileage;

pub use data::{
    DataPoint, Report, ReportInput, ReportItem, ReportSection, Series, Units, VehicleData,
};

use serde::{Deserialize, Serialize};

/// The closed set of report kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    FuelConsumption,
    FuelPrice,
    Mileage,
    Costs,
}

impl ReportKind {
    /// Registration table: every kind the application offers, in menu order
    pub const ALL: [ReportKind; 4] = [
        ReportKind::FuelConsumption,
        ReportKind::FuelPrice,
        ReportKind::Mileage,
        ReportKind::Costs,
    ];

    /// Human-readable title
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::FuelConsumption => "Fuel consumption",
            ReportKind::FuelPrice => "Fuel price",
            ReportKind::Mileage => "Mileage",
            ReportKind::Costs => "Costs",
        }
    }

    /// Build this report from the assembled input
    pub fn build(&self, input: &ReportInput) -> Report {
        match self {
            ReportKind::FuelConsumption => fuel_consumption::build(input),
            ReportKind::FuelPrice => fuel_price::build(input),
            ReportKind::Mileage => mileage::build(input),
            ReportKind::Costs => costs::build(input),
        }
    }
}
