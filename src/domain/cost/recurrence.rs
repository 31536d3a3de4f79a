// src/domain/cost/recurrence.rs
//
// Recurrence arithmetic for repeating costs
//
// Pure calendar computation: a recurrence is its cadence plus the date of the
// first occurrence. Counting is whole-calendar-unit subtraction; a monthly
// cost started Jan 1 has occurred twice by Mar 1.

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// Repetition cadence of a recurring cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceInterval {
    Once,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl std::fmt::Display for RecurrenceInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RecurrenceInterval::Once => "once",
            RecurrenceInterval::Daily => "daily",
            RecurrenceInterval::Weekly => "weekly",
            RecurrenceInterval::Monthly => "monthly",
            RecurrenceInterval::Yearly => "yearly",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for RecurrenceInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "once" => Ok(RecurrenceInterval::Once),
            "daily" => Ok(RecurrenceInterval::Daily),
            "weekly" => Ok(RecurrenceInterval::Weekly),
            "monthly" => Ok(RecurrenceInterval::Monthly),
            "yearly" => Ok(RecurrenceInterval::Yearly),
            other => Err(format!("Unknown recurrence interval: {}", other)),
        }
    }
}

/// A recurrence definition: cadence plus first occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub interval: RecurrenceInterval,
    pub start: DateTime<Utc>,
}

impl Recurrence {
    pub fn new(interval: RecurrenceInterval, start: DateTime<Utc>) -> Self {
        Self { interval, start }
    }

    /// Number of occurrences by `end`.
    ///
    /// `Once` always yields exactly 1, regardless of the range. For repeating
    /// intervals the count is the number of whole calendar units between the
    /// start and `end`; an end before the start yields 0, never a negative.
    pub fn occurrences_between(&self, end: DateTime<Utc>) -> u32 {
        match self.interval {
            RecurrenceInterval::Once => 1,
            _ if end < self.start => 0,
            RecurrenceInterval::Daily => clamp_to_u32((end - self.start).num_days()),
            RecurrenceInterval::Weekly => clamp_to_u32((end - self.start).num_weeks()),
            RecurrenceInterval::Monthly => whole_months_between(self.start, end),
            RecurrenceInterval::Yearly => whole_months_between(self.start, end) / 12,
        }
    }

    /// Expand the occurrence timestamps up to `until`.
    ///
    /// Returns exactly `occurrences_between(until)` entries, starting at the
    /// first occurrence. Used by the costs report to place recurring costs on
    /// the time axis.
    pub fn occurrence_dates(&self, until: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let count = self.occurrences_between(until);
        let mut dates = Vec::with_capacity(count as usize);

        for n in 0..count {
            let date = match self.interval {
                RecurrenceInterval::Once => Some(self.start),
                RecurrenceInterval::Daily => self
                    .start
                    .checked_add_signed(Duration::days(i64::from(n))),
                RecurrenceInterval::Weekly => self
                    .start
                    .checked_add_signed(Duration::weeks(i64::from(n))),
                RecurrenceInterval::Monthly => self.start.checked_add_months(Months::new(n)),
                RecurrenceInterval::Yearly => self.start.checked_add_months(Months::new(n * 12)),
            };
            match date {
                Some(d) => dates.push(d),
                None => break,
            }
        }

        dates
    }
}

fn clamp_to_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Whole calendar months between two dates. Partially elapsed months do not
/// count: Jan 15 to Feb 14 is 0 months, Jan 15 to Feb 15 is 1.
fn whole_months_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    if end < start {
        return 0;
    }

    let mut months =
        (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32);

    if (end.day(), end.time()) < (start.day(), start.time()) {
        months -= 1;
    }

    months.max(0) as u32
}
