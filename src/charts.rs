//! Chart.js configurations for the daily, cumulative, habit and score charts.
//!
//! Styling that used to live in the chart library's global defaults is carried
//! by [`ChartTheme`] and passed to every builder.

use crate::models::{HabitDay, ScoreBoard, TaskCountsPayload};
use crate::stats::{as_percent, cumulative};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonStyle {
    pub id: String,
    pub label: String,
    /// Solid colour (`#rrggbb`).
    pub color: String,
    /// Translucent fill used under lines and in bars.
    pub fill: String,
}

impl PersonStyle {
    pub fn new(id: &str, color: &str, fill: &str) -> Self {
        Self {
            id: id.to_string(),
            label: display_name(id),
            color: color.to_string(),
            fill: fill.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTheme {
    pub text_color: String,
    pub tick_color: String,
    pub font_family: String,
    pub grid_color: String,
    pub tooltip_background: String,
    pub people: Vec<PersonStyle>,
}

const PALETTE: [(&str, &str); 4] = [
    ("#ffffff", "rgba(255, 255, 255, 0.85)"),
    ("#ff4d4d", "rgba(255, 77, 77, 0.85)"),
    ("#4dabff", "rgba(77, 171, 255, 0.85)"),
    ("#ffd24d", "rgba(255, 210, 77, 0.85)"),
];

impl ChartTheme {
    /// Dark theme with one palette entry per person, in order.
    pub fn dark(people: &[String]) -> Self {
        let people = people
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let (color, fill) = PALETTE[i % PALETTE.len()];
                PersonStyle::new(id, color, fill)
            })
            .collect();
        Self {
            text_color: "#9ca3af".to_string(),
            tick_color: "#888888".to_string(),
            font_family: "'PT Serif', serif".to_string(),
            grid_color: "rgba(255, 255, 255, 0.05)".to_string(),
            tooltip_background: "rgba(20, 20, 20, 0.95)".to_string(),
            people,
        }
    }

    fn title(&self, text: &str) -> Value {
        json!({
            "display": true,
            "text": text,
            "color": "#ffffff",
            "font": { "family": self.font_family, "size": 22, "weight": "700" },
            "padding": { "top": 10, "bottom": 20 }
        })
    }

    fn base_options(&self, title: &str) -> Value {
        json!({
            "maintainAspectRatio": false,
            "responsive": true,
            "color": self.text_color,
            "font": { "family": self.font_family },
            "interaction": { "intersect": false, "mode": "index" },
            "plugins": {
                "title": self.title(title),
                "legend": {
                    "display": true,
                    "position": "bottom",
                    "labels": { "padding": 15, "usePointStyle": true, "color": self.text_color }
                },
                "tooltip": {
                    "backgroundColor": self.tooltip_background,
                    "padding": 12,
                    "cornerRadius": 8
                }
            }
        })
    }

    fn axis(&self, extra: Value) -> Value {
        let mut axis = json!({
            "grid": { "color": self.grid_color },
            "ticks": { "color": self.tick_color },
            "border": { "display": false }
        });
        merge(&mut axis, extra);
        axis
    }
}

/// Stacked bar of tasks completed per day.
pub fn daily_breakdown_chart(data: &TaskCountsPayload, theme: &ChartTheme) -> Value {
    let datasets: Vec<Value> = theme
        .people
        .iter()
        .filter_map(|person| {
            let series = data.people.get(&person.id)?;
            Some(json!({
                "label": person.label,
                "data": series.daily,
                "backgroundColor": person.fill,
                "borderColor": person.color,
                "borderWidth": 0,
                "borderRadius": 6,
                "borderSkipped": false
            }))
        })
        .collect();

    let mut options = theme.base_options("Daily Breakdown");
    merge(
        &mut options,
        json!({
            "scales": {
                "x": theme.axis(json!({
                    "stacked": true,
                    "grid": { "display": false },
                    "ticks": { "maxRotation": 0, "autoSkip": true, "maxTicksLimit": 7 }
                })),
                "y": theme.axis(json!({
                    "stacked": true,
                    "beginAtZero": true,
                    "ticks": { "stepSize": 1 }
                }))
            }
        }),
    );

    json!({
        "type": "bar",
        "data": { "labels": data.dates, "datasets": datasets },
        "options": options
    })
}

/// Running total per person. Recomputed from `daily` when the upstream
/// cumulative series is shorter than the daily one.
pub fn cumulative_chart(data: &TaskCountsPayload, theme: &ChartTheme) -> Value {
    let datasets: Vec<Value> = theme
        .people
        .iter()
        .filter_map(|person| {
            let series = data.people.get(&person.id)?;
            let values = if series.cumulative.len() < series.daily.len() {
                cumulative(&series.daily)
            } else {
                series.cumulative.clone()
            };
            Some(json!({
                "label": person.label,
                "data": values,
                "borderColor": person.color,
                "backgroundColor": person.fill,
                "pointBackgroundColor": person.color,
                "borderWidth": 2.5,
                "tension": 0.4,
                "pointRadius": 4,
                "fill": false
            }))
        })
        .collect();

    let mut options = theme.base_options("Cumulative Progress");
    merge(
        &mut options,
        json!({
            "scales": {
                "x": theme.axis(json!({ "grid": { "display": false } })),
                "y": theme.axis(json!({ "beginAtZero": true }))
            }
        }),
    );

    json!({
        "type": "line",
        "data": { "labels": data.dates, "datasets": datasets },
        "options": options
    })
}

/// Share of habits kept per day, as percentages.
pub fn habits_chart(days: &[HabitDay], theme: &ChartTheme) -> Value {
    let labels: Vec<String> = days.iter().map(|day| day.date.format("%a").to_string()).collect();
    let datasets: Vec<Value> = theme
        .people
        .iter()
        .map(|person| {
            let values: Vec<f64> = days
                .iter()
                .map(|day| as_percent(day.scores.get(&person.id).copied().unwrap_or(0.0)))
                .collect();
            json!({
                "label": person.label,
                "data": values,
                "borderColor": person.color,
                "backgroundColor": person.fill,
                "tension": 0.35,
                "fill": true,
                "pointRadius": 4,
                "borderWidth": 2
            })
        })
        .collect();

    let mut options = theme.base_options("7-Day Habit Consistency");
    merge(
        &mut options,
        json!({
            "scales": {
                "x": theme.axis(json!({ "grid": { "display": false } })),
                "y": theme.axis(json!({ "min": 0, "max": 100 }))
            }
        }),
    );

    json!({
        "type": "line",
        "data": { "labels": labels, "datasets": datasets },
        "options": options
    })
}

/// Bar and pie views of the score board, in person order.
pub fn score_charts(scores: &ScoreBoard, theme: &ChartTheme) -> (Value, Value) {
    let labels: Vec<&str> = theme.people.iter().map(|p| p.label.as_str()).collect();
    let values: Vec<f64> = theme
        .people
        .iter()
        .map(|p| scores.get(&p.id).copied().unwrap_or(0.0))
        .collect();
    let colors: Vec<&str> = theme.people.iter().map(|p| p.color.as_str()).collect();

    let dataset = json!({ "data": values, "backgroundColor": colors, "borderWidth": 0 });

    let mut bar_options = theme.base_options("Scores");
    merge(&mut bar_options, json!({ "plugins": { "legend": { "display": false } } }));
    let bar = json!({
        "type": "bar",
        "data": { "labels": labels, "datasets": [dataset.clone()] },
        "options": bar_options
    });

    let mut pie_options = theme.base_options("Share");
    merge(&mut pie_options, json!({ "interaction": { "mode": "nearest" } }));
    let pie = json!({
        "type": "pie",
        "data": { "labels": labels, "datasets": [dataset] },
        "options": pie_options
    });

    (bar, pie)
}

/// "aashima" -> "Aashima".
pub fn display_name(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Deep-merges `patch` into `target`; objects merge key by key, anything else
/// replaces.
fn merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                merge(target.entry(key).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch,
    }
}
