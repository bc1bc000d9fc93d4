//! One render pass of a person's heatmap: stats, cells, labels, legend.

use crate::labels::{FontMetrics, LabelPolicy, MonthLabel, place_labels};
use crate::layout::{DEFAULT_ROWS, FillPolicy, GridLayout, PositionSource};
use crate::level::{LevelPolicy, legend_levels};
use crate::models::DayRecord;
use crate::stats::{Summary, summarize_person};
use crate::tooltip::tooltip_text;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cell edge plus gap, in px.
pub const DEFAULT_COLUMN_WIDTH_PX: f64 = 14.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub rows: usize,
    pub fill: FillPolicy,
    pub source: PositionSource,
    pub level: LevelPolicy,
    pub label: LabelPolicy,
    pub column_width_px: f64,
    pub font: FontMetrics,
    pub segments: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            fill: FillPolicy::default(),
            source: PositionSource::default(),
            level: LevelPolicy::default(),
            label: LabelPolicy::default(),
            column_width_px: DEFAULT_COLUMN_WIDTH_PX,
            font: FontMetrics::default(),
            segments: 1,
        }
    }
}

impl RenderConfig {
    pub fn grid_layout(&self) -> GridLayout {
        GridLayout::new(self.rows, self.fill, self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    pub date: NaiveDate,
    pub count: u64,
    pub level: u8,
    pub row: usize,
    pub column: usize,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentView {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<CellView>,
    pub labels: Vec<MonthLabel>,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapView {
    pub person: String,
    pub stats: Summary,
    pub legend: Vec<u8>,
    pub label_policy: LabelPolicy,
    pub column_width_px: f64,
    /// Metrics the label widths were measured with; the page styles labels from them.
    pub font: FontMetrics,
    pub segments: Vec<SegmentView>,
}

impl HeatmapView {
    pub fn cell_count(&self) -> usize {
        self.segments.iter().map(|segment| segment.cells.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    config: RenderConfig,
}

impl HeatmapRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Same config, different column width (resize re-render).
    pub fn with_column_width(&self, column_width_px: f64) -> Self {
        Self::new(RenderConfig {
            column_width_px,
            ..self.config.clone()
        })
    }

    pub fn render(&self, person: &str, records: &[DayRecord]) -> HeatmapView {
        let stats = summarize_person(records, person);
        let layout = self.config.grid_layout();

        let segments = split_segments(records, self.config.segments)
            .into_iter()
            .map(|chunk| {
                let grid = layout.place(chunk);
                let cells = grid
                    .placements
                    .iter()
                    .map(|placement| {
                        let count = placement.record.count(person);
                        CellView {
                            date: placement.record.date,
                            count,
                            level: self.config.level.level(count, stats.max),
                            row: placement.row,
                            column: placement.column,
                            tooltip: tooltip_text(placement.record.date, count),
                        }
                    })
                    .collect();
                let labels = place_labels(
                    &grid,
                    self.config.column_width_px,
                    &self.config.font,
                    self.config.label,
                );
                SegmentView {
                    rows: grid.rows,
                    columns: grid.columns,
                    cells,
                    labels,
                    skipped: grid.skipped,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            person,
            days = records.len(),
            segments = segments.len(),
            "rendered heatmap"
        );

        HeatmapView {
            person: person.to_string(),
            stats,
            legend: legend_levels().collect(),
            label_policy: self.config.label,
            column_width_px: self.config.column_width_px,
            font: self.config.font.clone(),
            segments,
        }
    }
}

/// Contiguous chunks of near-equal size; earlier chunks take the remainder.
fn split_segments(records: &[DayRecord], segments: usize) -> Vec<&[DayRecord]> {
    if records.is_empty() {
        return Vec::new();
    }
    let segments = segments.clamp(1, records.len());
    let base = records.len() / segments;
    let extra = records.len() % segments;

    let mut chunks = Vec::with_capacity(segments);
    let mut start = 0;
    for i in 0..segments {
        let len = base + usize::from(i < extra);
        chunks.push(&records[start..start + len]);
        start += len;
    }
    chunks
}
