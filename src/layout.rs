//! Column-major calendar grid layout.
//!
//! Days fill a column top to bottom before moving to the next column, so
//! each column reads as one (possibly partial) week. A record's slot is its
//! offset from the start of the grid; `row = slot % rows`, `column = slot / rows`.

use crate::models::DayRecord;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_ROWS: usize = 5;
const DAYS_PER_WEEK: usize = 7;

/// Where the first record lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillPolicy {
    /// First record at row 0 of column 0, `rows` rows per column.
    #[default]
    Sequential,
    /// Seven rows per column, Sunday first; the first record is pushed down by
    /// its weekday, leaving blank slots above it.
    CalendarWeeks,
}

/// How a record's offset from the start of the grid is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionSource {
    /// Position in the input list. Gaps in the dates are closed up.
    #[default]
    Index,
    /// Days elapsed since the first record. Gaps leave empty slots.
    DayOffset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    pub record: &'a DayRecord,
    /// Position of the record in the input list.
    pub index: usize,
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPlacement<'a> {
    pub rows: usize,
    pub columns: usize,
    pub placements: Vec<Placement<'a>>,
    /// Records that could not be placed (out of order or duplicate dates).
    pub skipped: usize,
}

impl GridPlacement<'_> {
    /// Column of the record at `index` in the input list, if it was placed.
    pub fn column_of(&self, index: usize) -> Option<usize> {
        self.placements
            .iter()
            .find(|placement| placement.index == index)
            .map(|placement| placement.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    pub fill: FillPolicy,
    pub source: PositionSource,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            fill: FillPolicy::Sequential,
            source: PositionSource::Index,
        }
    }
}

impl GridLayout {
    pub fn new(rows: usize, fill: FillPolicy, source: PositionSource) -> Self {
        Self { rows, fill, source }
    }

    /// Rows actually used; calendar weeks always have seven.
    pub fn effective_rows(&self) -> usize {
        match self.fill {
            FillPolicy::Sequential => self.rows.max(1),
            FillPolicy::CalendarWeeks => DAYS_PER_WEEK,
        }
    }

    pub fn place<'a>(&self, records: &'a [DayRecord]) -> GridPlacement<'a> {
        let rows = self.effective_rows();
        let Some(first) = records.first() else {
            return GridPlacement {
                rows,
                columns: 0,
                placements: Vec::new(),
                skipped: 0,
            };
        };

        let lead = match self.fill {
            FillPolicy::Sequential => 0,
            FillPolicy::CalendarWeeks => first.date.weekday().num_days_from_sunday() as usize,
        };

        let mut taken = HashSet::with_capacity(records.len());
        let mut placements = Vec::with_capacity(records.len());
        let mut skipped = 0;

        for (index, record) in records.iter().enumerate() {
            let offset = match self.source {
                PositionSource::Index => index,
                PositionSource::DayOffset => {
                    let days = (record.date - first.date).num_days();
                    match usize::try_from(days) {
                        Ok(days) => days,
                        Err(_) => {
                            warn!(date = %record.date, "record precedes series start, skipping");
                            skipped += 1;
                            continue;
                        }
                    }
                }
            };

            let slot = lead + offset;
            if !taken.insert(slot) {
                warn!(date = %record.date, "duplicate grid slot, skipping");
                skipped += 1;
                continue;
            }

            placements.push(Placement {
                record,
                index,
                row: slot % rows,
                column: slot / rows,
            });
        }

        let columns = placements
            .iter()
            .map(|placement| placement.column + 1)
            .max()
            .unwrap_or(0);

        GridPlacement {
            rows,
            columns,
            placements,
            skipped,
        }
    }
}

/// Plain index-driven layout: `row = idx % rows`, `column = idx / rows`.
pub fn layout(records: &[DayRecord], rows: usize) -> Vec<Placement<'_>> {
    GridLayout::new(rows, FillPolicy::Sequential, PositionSource::Index)
        .place(records)
        .placements
}

impl FromStr for FillPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "sequential" => Ok(FillPolicy::Sequential),
            "calendar-weeks" | "weeks" => Ok(FillPolicy::CalendarWeeks),
            other => Err(format!("unknown fill policy '{other}'")),
        }
    }
}

impl FromStr for PositionSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "index" => Ok(PositionSource::Index),
            "day-offset" | "days" => Ok(PositionSource::DayOffset),
            other => Err(format!("unknown position source '{other}'")),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    pub(crate) fn series(start: NaiveDate, days: i64) -> Vec<DayRecord> {
        (0..days)
            .map(|offset| DayRecord::new(start + Duration::days(offset)).with_count("a", offset as u64))
            .collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn index_layout_is_column_major_and_unique() {
        let records = series(date(2024, 1, 1), 23);
        let placed = layout(&records, 5);
        assert_eq!(placed.len(), 23);

        let mut seen = HashSet::new();
        for (idx, placement) in placed.iter().enumerate() {
            assert_eq!(placement.row, idx % 5);
            assert_eq!(placement.column, idx / 5);
            assert!(seen.insert((placement.row, placement.column)));
        }
    }

    #[test]
    fn partial_last_column_is_reported() {
        let records = series(date(2024, 1, 1), 12);
        let grid = GridLayout::default().place(&records);
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.placements.last().map(|p| (p.row, p.column)), Some((1, 2)));
    }

    #[test]
    fn empty_input_yields_empty_grid() {
        let grid = GridLayout::default().place(&[]);
        assert_eq!(grid.columns, 0);
        assert!(grid.placements.is_empty());
        assert_eq!(grid.skipped, 0);
    }

    #[test]
    fn zero_rows_falls_back_to_one() {
        let records = series(date(2024, 1, 1), 3);
        let placed = layout(&records, 0);
        assert_eq!(placed.iter().map(|p| p.column).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn index_and_day_offset_agree_on_contiguous_series() {
        let records = series(date(2024, 2, 20), 40);
        let by_index = GridLayout::new(5, FillPolicy::Sequential, PositionSource::Index).place(&records);
        let by_days = GridLayout::new(5, FillPolicy::Sequential, PositionSource::DayOffset).place(&records);
        assert_eq!(by_index, by_days);
    }

    #[test]
    fn gaps_diverge_between_sources() {
        // Jan 1..=3, then Jan 10
        let mut records = series(date(2024, 1, 1), 3);
        records.push(DayRecord::new(date(2024, 1, 10)));

        let by_index = GridLayout::new(5, FillPolicy::Sequential, PositionSource::Index).place(&records);
        let last = by_index.placements[3];
        assert_eq!((last.row, last.column), (3, 0));
        assert_eq!(by_index.columns, 1);

        let by_days = GridLayout::new(5, FillPolicy::Sequential, PositionSource::DayOffset).place(&records);
        let last = by_days.placements[3];
        assert_eq!((last.row, last.column), (4, 1));
        assert_eq!(by_days.columns, 2);
    }

    #[test]
    fn day_offset_skips_out_of_order_and_duplicate_dates() {
        let records = vec![
            DayRecord::new(date(2024, 1, 5)),
            DayRecord::new(date(2024, 1, 4)),
            DayRecord::new(date(2024, 1, 6)),
            DayRecord::new(date(2024, 1, 6)),
        ];
        let grid = GridLayout::new(5, FillPolicy::Sequential, PositionSource::DayOffset).place(&records);
        assert_eq!(grid.skipped, 2);
        assert_eq!(grid.placements.iter().map(|p| p.index).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(grid.column_of(1), None);
    }

    #[test]
    fn calendar_weeks_offsets_by_starting_weekday() {
        // 2024-01-03 is a Wednesday
        let records = series(date(2024, 1, 3), 10);
        let grid = GridLayout::new(5, FillPolicy::CalendarWeeks, PositionSource::Index).place(&records);
        assert_eq!(grid.rows, 7);
        let first = grid.placements[0];
        assert_eq!((first.row, first.column), (3, 0));
        // Sunday 2024-01-07 opens the second column
        let sunday = grid.placements[4];
        assert_eq!(sunday.record.date, date(2024, 1, 7));
        assert_eq!((sunday.row, sunday.column), (0, 1));
        assert_eq!(grid.columns, 2);
    }

    #[test]
    fn policy_names_parse() {
        assert_eq!("calendar-weeks".parse::<FillPolicy>().unwrap(), FillPolicy::CalendarWeeks);
        assert_eq!("day-offset".parse::<PositionSource>().unwrap(), PositionSource::DayOffset);
        assert!("diagonal".parse::<FillPolicy>().is_err());
    }
}
