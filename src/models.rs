use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One calendar day of completed-task counts, keyed by person id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub counts: BTreeMap<String, u64>,
}

impl DayRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            counts: BTreeMap::new(),
        }
    }

    pub fn with_count(mut self, person: impl Into<String>, count: u64) -> Self {
        self.counts.insert(person.into(), count);
        self
    }

    /// Count for `person`, zero when the record does not mention them.
    pub fn count(&self, person: &str) -> u64 {
        self.counts.get(person).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeatmapPayload {
    #[serde(default)]
    pub dates: Vec<DayRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonSeries {
    #[serde(default)]
    pub daily: Vec<u64>,
    #[serde(default)]
    pub cumulative: Vec<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskCountsPayload {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(flatten)]
    pub people: BTreeMap<String, PersonSeries>,
}

/// Share of habits kept on one day, per person, in `0.0..=1.0`.
#[derive(Debug, Clone, Deserialize)]
pub struct HabitDay {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub scores: BTreeMap<String, f64>,
}

pub type ScoreBoard = BTreeMap<String, f64>;
