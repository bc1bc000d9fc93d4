//! Month labels above the heatmap grid.

use crate::layout::GridPlacement;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelPolicy {
    /// Offsets are relative to the end of the previous label, so labels laid
    /// out inline never overlap.
    #[default]
    Cumulative,
    /// Offsets are measured from the grid's left edge.
    Absolute,
}

impl FromStr for LabelPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "cumulative" => Ok(LabelPolicy::Cumulative),
            "absolute" => Ok(LabelPolicy::Absolute),
            other => Err(format!("unknown label policy '{other}'")),
        }
    }
}

/// Glyph metrics for the label font. The page styles labels from the same
/// values, so widths measured here match what the browser draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub family: String,
    pub size_px: f64,
    /// Horizontal advance of one glyph, in em.
    pub advance_em: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            family: "ui-monospace, SFMono-Regular, Menlo, monospace".to_string(),
            size_px: 10.0,
            advance_em: 0.6,
        }
    }
}

impl FontMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.size_px * self.advance_em
    }

    pub fn css(&self) -> String {
        format!("font-family: {}; font-size: {}px", self.family, self.size_px)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLabel {
    pub text: String,
    pub anchor_column: usize,
    pub pixel_offset: f64,
    pub text_width: f64,
}

/// Emits one label per first-of-month record the grid managed to place.
pub fn place_labels(
    grid: &GridPlacement<'_>,
    column_width_px: f64,
    metrics: &FontMetrics,
    policy: LabelPolicy,
) -> Vec<MonthLabel> {
    let mut labels: Vec<MonthLabel> = Vec::new();

    for placement in &grid.placements {
        let date = placement.record.date;
        if date.day() != 1 {
            continue;
        }

        let text = date.format("%b").to_string();
        let text_width = metrics.text_width(&text);
        let column = placement.column;

        let pixel_offset = match (policy, labels.last()) {
            (LabelPolicy::Cumulative, Some(previous)) => {
                (column as f64 - previous.anchor_column as f64) * column_width_px - previous.text_width
            }
            _ => column as f64 * column_width_px,
        };

        labels.push(MonthLabel {
            text,
            anchor_column: column,
            pixel_offset,
            text_width,
        });
    }

    labels
}
