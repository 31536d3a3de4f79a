// src/domain/report/mileage.rs
//
// Odometer reading over time, per vehicle.

use super::data::{DataPoint, Report, ReportInput, ReportItem, ReportSection, Series};
use super::ReportKind;

pub fn build(input: &ReportInput) -> Report {
    let mut sections = Vec::new();
    let mut series = Vec::new();

    for data in &input.vehicles {
        let mut points: Vec<DataPoint> = data
            .refuelings
            .iter()
            .map(|r| DataPoint {
                x: r.time.timestamp_millis(),
                y: r.mileage as f64,
            })
            .collect();
        points.sort_by_key(|p| p.x);

        if let (Some(first), Some(last)) = (data.refuelings.first(), data.refuelings.last()) {
            // Refuelings arrive mileage-ascending; count from the vehicle's
            // initial odometer reading when one was recorded below the first fill
            let baseline = if data.vehicle.initial_mileage > 0 {
                data.vehicle.initial_mileage.min(first.mileage)
            } else {
                first.mileage
            };
            let total = last.mileage - baseline;

            let mut items = vec![ReportItem {
                label: "Total driven".to_string(),
                value: total as f64,
                unit: input.units.distance.clone(),
            }];

            if data.refuelings.len() >= 2 {
                let spans = (data.refuelings.len() - 1) as f64;
                items.push(ReportItem {
                    label: "Average between refuelings".to_string(),
                    value: (last.mileage - first.mileage) as f64 / spans,
                    unit: input.units.distance.clone(),
                });
            }

            sections.push(ReportSection {
                label: data.vehicle.name.clone(),
                items,
            });
        }

        series.push(Series {
            label: data.vehicle.name.clone(),
            color: data.vehicle.color.clone(),
            points,
        });
    }

    Report {
        kind: ReportKind::Mileage,
        sections,
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::data::{Units, VehicleData};
    use crate::domain::refueling::Refueling;
    use crate::domain::vehicle::Vehicle;
    use chrono::{Duration, Utc};

    #[test]
    fn test_total_driven_uses_initial_mileage_as_baseline() {
        let mut vehicle = Vehicle::new("Golf".to_string(), "#2196F3".to_string());
        vehicle.initial_mileage = 800;
        let t0 = Utc::now();
        let refuelings = vec![
            Refueling::new(vehicle.id, t0, 1000, 40.0, 60.0),
            Refueling::new(vehicle.id, t0 + Duration::days(14), 1600, 38.0, 58.0),
        ];

        let input = ReportInput {
            vehicles: vec![VehicleData {
                vehicle,
                refuelings,
                costs: Vec::new(),
            }],
            units: Units::default(),
            now: Utc::now(),
        };

        let report = build(&input);
        let items = &report.sections[0].items;
        assert_eq!(items[0].label, "Total driven");
        assert!((items[0].value - 800.0).abs() < f64::EPSILON);
        assert!((items[1].value - 600.0).abs() < f64::EPSILON);
        assert_eq!(report.series[0].points.len(), 2);
    }
}
