// src/domain/report/costs.rs
//
// All money spent on a vehicle: fuel plus other costs, with recurring costs
// expanded to their occurrence dates up to the end of the reporting range.

use chrono::{DateTime, Utc};

use super::data::{DataPoint, Report, ReportInput, ReportItem, ReportSection, Series};
use super::ReportKind;

const DAYS_PER_MONTH: f64 = 30.4375;
const DAYS_PER_YEAR: f64 = 365.25;

pub fn build(input: &ReportInput) -> Report {
    let mut sections = Vec::new();
    let mut series = Vec::new();

    for data in &input.vehicles {
        // Every spending event on the time axis
        let mut events: Vec<(DateTime<Utc>, f64)> = Vec::new();

        let mut fuel_total = 0.0;
        for refueling in &data.refuelings {
            fuel_total += refueling.price;
            events.push((refueling.time, refueling.price));
        }

        let mut other_total = 0.0;
        for cost in &data.costs {
            for occurrence in cost.recurrence().occurrence_dates(input.now) {
                other_total += cost.price;
                events.push((occurrence, cost.price));
            }
        }

        events.sort_by_key(|(time, _)| *time);

        // Cumulative spending line
        let mut running = 0.0;
        let points: Vec<DataPoint> = events
            .iter()
            .map(|(time, price)| {
                running += price;
                DataPoint {
                    x: time.timestamp_millis(),
                    y: running,
                }
            })
            .collect();

        if let Some((first_time, _)) = events.first() {
            let total = fuel_total + other_total;
            let elapsed_days = (input.now - *first_time).num_days().max(1) as f64;

            sections.push(ReportSection {
                label: data.vehicle.name.clone(),
                items: vec![
                    ReportItem {
                        label: "Fuel".to_string(),
                        value: fuel_total,
                        unit: input.units.currency.clone(),
                    },
                    ReportItem {
                        label: "Other".to_string(),
                        value: other_total,
                        unit: input.units.currency.clone(),
                    },
                    ReportItem {
                        label: "Total".to_string(),
                        value: total,
                        unit: input.units.currency.clone(),
                    },
                    ReportItem {
                        label: "Per day".to_string(),
                        value: total / elapsed_days,
                        unit: input.units.currency.clone(),
                    },
                    ReportItem {
                        label: "Per month".to_string(),
                        value: total / elapsed_days * DAYS_PER_MONTH,
                        unit: input.units.currency.clone(),
                    },
                    ReportItem {
                        label: "Per year".to_string(),
                        value: total / elapsed_days * DAYS_PER_YEAR,
                        unit: input.units.currency.clone(),
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
        kind: ReportKind::Costs,
        sections,
        series,
    }
}
