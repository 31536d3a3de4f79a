// src/domain/report/fuel_price.rs
//
// Price paid per volume unit, per refueling, over time.

use super::data::{DataPoint, Report, ReportInput, ReportItem, ReportSection, Series};
use super::ReportKind;

pub fn build(input: &ReportInput) -> Report {
    let unit = format!("{}/{}", input.units.currency, input.units.volume);

    let mut sections = Vec::new();
    let mut series = Vec::new();

    for data in &input.vehicles {
        let mut points = Vec::new();
        let mut values = Vec::new();

        for refueling in &data.refuelings {
            if let Some(price) = refueling.price_per_volume() {
                points.push(DataPoint {
                    x: refueling.time.timestamp_millis(),
                    y: price,
                });
                values.push(price);
            }
        }

        // The fuel price axis is time, not mileage
        points.sort_by_key(|p| p.x);

        if !values.is_empty() {
            let count = values.len() as f64;
            let sum: f64 = values.iter().sum();
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            sections.push(ReportSection {
                label: data.vehicle.name.clone(),
                items: vec![
                    ReportItem {
                        label: "Average".to_string(),
                        value: sum / count,
                        unit: unit.clone(),
                    },
                    ReportItem {
                        label: "Minimum".to_string(),
                        value: min,
                        unit: unit.clone(),
                    },
                    ReportItem {
                        label: "Maximum".to_string(),
                        value: max,
                        unit: unit.clone(),
                    },
                ],
            });
        }

        series.push(Series {
            label: data.vehicle.name.clone(),
            color: data.vehicle.color.clone(),
            points,
        });
    }

    Report {
        kind: ReportKind::FuelPrice,
        sections,
        series,
    }
}
