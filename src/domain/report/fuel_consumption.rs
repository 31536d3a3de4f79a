// src/domain/report/fuel_consumption.rs
//
// Consumption per fill-to-fill interval, over time, per vehicle.
// Built on the balanced sequence so partial fills never distort the figures.

use super::data::{DataPoint, Report, ReportInput, ReportItem, ReportSection, Series};
use super::ReportKind;
use crate::domain::refueling::{consumption_intervals, reconstruct};

pub fn build(input: &ReportInput) -> Report {
    let unit = format!("{}/100{}", input.units.volume, input.units.distance);

    let mut sections = Vec::new();
    let mut series = Vec::new();

    for data in &input.vehicles {
        let balanced = reconstruct(&data.refuelings);
        let intervals = consumption_intervals(&balanced);

        let mut points = Vec::new();
        let mut values = Vec::new();

        for interval in &intervals {
            let closing = &balanced[interval.end_index];
            if !closing.valid {
                continue;
            }
            if let Some(consumption) = interval.consumption() {
                points.push(DataPoint {
                    x: closing.time.timestamp_millis(),
                    y: consumption,
                });
                values.push(consumption);
            }
        }

        if !values.is_empty() {
            sections.push(ReportSection {
                label: data.vehicle.name.clone(),
                items: summary_items(&values, &unit),
            });
        }

        series.push(Series {
            label: data.vehicle.name.clone(),
            color: data.vehicle.color.clone(),
            points,
        });
    }

    Report {
        kind: ReportKind::FuelConsumption,
        sections,
        series,
    }
}

fn summary_items(values: &[f64], unit: &str) -> Vec<ReportItem> {
    let count = values.len() as f64;
    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    vec![
        ReportItem {
            label: "Average".to_string(),
            value: sum / count,
            unit: unit.to_string(),
        },
        ReportItem {
            label: "Minimum".to_string(),
            value: min,
            unit: unit.to_string(),
        },
        ReportItem {
            label: "Maximum".to_string(),
            value: max,
            unit: unit.to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::data::{Units, VehicleData};
    use crate::domain::refueling::Refueling;
    use crate::domain::vehicle::Vehicle;
    use chrono::Utc;

    fn refueling(vehicle_id: uuid::Uuid, mileage: i64, volume: f64, partial: bool) -> Refueling {
        let mut r = Refueling::new(vehicle_id, Utc::now(), mileage, volume, volume * 1.6);
        r.partial = partial;
        r
    }

    #[test]
    fn test_consumption_series_per_interval() {
        let vehicle = Vehicle::new("Golf".to_string(), "#2196F3".to_string());
        let refuelings = vec![
            refueling(vehicle.id, 1000, 40.0, false),
            refueling(vehicle.id, 1500, 35.0, false),
            refueling(vehicle.id, 2000, 38.0, false),
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
        assert_eq!(report.series.len(), 1);
        assert_eq!(report.series[0].points.len(), 2);
        assert!((report.series[0].points[0].y - 7.0).abs() < 1e-9);
        assert!((report.series[0].points[1].y - 7.6).abs() < 1e-9);

        assert_eq!(report.sections.len(), 1);
        let avg = &report.sections[0].items[0];
        assert_eq!(avg.label, "Average");
        assert!((avg.value - 7.3).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_intervals_produce_no_points() {
        let vehicle = Vehicle::new("Golf".to_string(), "#2196F3".to_string());
        let refuelings = vec![
            refueling(vehicle.id, 2000, 40.0, false),
            refueling(vehicle.id, 1500, 35.0, false),
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
        assert!(report.series[0].points.is_empty());
        assert!(report.sections.is_empty());
    }
}
