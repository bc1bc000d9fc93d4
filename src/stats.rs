use crate::models::DayRecord;
use serde::Serialize;

/// Descriptive totals for one person's series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total: u64,
    /// Mean per day, rounded to one decimal. Zero for an empty series.
    pub average: f64,
    pub max: u64,
}

pub fn summarize<F>(records: &[DayRecord], selector: F) -> Summary
where
    F: Fn(&DayRecord) -> u64,
{
    let mut total = 0u64;
    let mut max = 0u64;
    for record in records {
        let value = selector(record);
        total = total.saturating_add(value);
        max = max.max(value);
    }

    let average = if records.is_empty() {
        0.0
    } else {
        round_tenths(total as f64 / records.len() as f64)
    };

    Summary { total, average, max }
}

pub fn summarize_person(records: &[DayRecord], person: &str) -> Summary {
    summarize(records, |record| record.count(person))
}

/// Running totals of a daily series.
pub fn cumulative(daily: &[u64]) -> Vec<u64> {
    daily
        .iter()
        .scan(0u64, |running, value| {
            *running = running.saturating_add(*value);
            Some(*running)
        })
        .collect()
}

pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A 0..1 habit score as a percentage with one decimal.
pub fn as_percent(score: f64) -> f64 {
    round_tenths(score * 100.0)
}
