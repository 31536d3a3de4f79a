// src/services/report_service.rs
//
// Report Service - assembles report input from the repositories and runs the
// pure report builders

use std::sync::Arc;

use chrono::Utc;

use crate::domain::report::{Report, ReportInput, ReportKind, Units, VehicleData};
use crate::error::AppResult;
use crate::repositories::{CostRepository, RefuelingRepository, VehicleRepository};

pub struct ReportService {
    vehicle_repo: Arc<dyn VehicleRepository>,
    refueling_repo: Arc<dyn RefuelingRepository>,
    cost_repo: Arc<dyn CostRepository>,
    units: Units,
}

impl ReportService {
    pub fn new(
        vehicle_repo: Arc<dyn VehicleRepository>,
        refueling_repo: Arc<dyn RefuelingRepository>,
        cost_repo: Arc<dyn CostRepository>,
        units: Units,
    ) -> Self {
        Self {
            vehicle_repo,
            refueling_repo,
            cost_repo,
            units,
        }
    }

    /// One snapshot of everything the report builders need.
    /// Assembled once and shared by all kinds when building them together.
    pub fn assemble_input(&self) -> AppResult<ReportInput> {
        let mut vehicles = Vec::new();

        for vehicle in self.vehicle_repo.list_all()? {
            let refuelings = self.refueling_repo.list_by_vehicle(vehicle.id)?;
            let costs = self.cost_repo.list_by_vehicle(vehicle.id)?;
            vehicles.push(VehicleData {
                vehicle,
                refuelings,
                costs,
            });
        }

        Ok(ReportInput {
            vehicles,
            units: self.units.clone(),
            now: Utc::now(),
        })
    }

    /// Build a single report kind
    pub fn build(&self, kind: ReportKind) -> AppResult<Report> {
        let input = self.assemble_input()?;
        Ok(kind.build(&input))
    }

    /// Build every registered report kind from one shared input snapshot
    pub fn build_all(&self) -> AppResult<Vec<Report>> {
        let input = self.assemble_input()?;
        Ok(ReportKind::ALL.iter().map(|kind| kind.build(&input)).collect())
    }
}
