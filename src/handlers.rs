use crate::charts::{cumulative_chart, daily_breakdown_chart, habits_chart, score_charts};
use crate::errors::AppError;
use crate::render::HeatmapView;
use crate::state::AppState;
use crate::ui::{ChartPanel, DashboardPage, PersonPanel, render_dashboard, render_heatmap};
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct ResizeQuery {
    pub column_width: Option<f64>,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let client = &state.client;
    let (heatmap, counts, habits, scores) = tokio::join!(
        client.fetch_heatmap(),
        client.fetch_task_counts(),
        client.fetch_weekly_habits(),
        client.fetch_scores(),
    );

    let records = match heatmap {
        Ok(records) => Some(records),
        Err(err) => {
            error!("failed to load heatmap data: {err}");
            None
        }
    };

    let people = state
        .theme
        .people
        .iter()
        .map(|style| PersonPanel {
            style: style.clone(),
            heatmap: records
                .as_deref()
                .map(|records| state.renderer.render(&style.id, records)),
        })
        .collect();

    let theme = state.theme.as_ref();
    let mut charts = Vec::new();
    match counts {
        Ok(counts) => {
            charts.push(ChartPanel::new("dailyChart", daily_breakdown_chart(&counts, theme)));
            charts.push(ChartPanel::new("cumulativeChart", cumulative_chart(&counts, theme)));
        }
        Err(err) => error!("failed to load task counts: {err}"),
    }
    match habits {
        Ok(habits) => charts.push(ChartPanel::new("habitsChart", habits_chart(&habits, theme))),
        Err(err) => error!("failed to load weekly habits: {err}"),
    }
    match scores {
        Ok(scores) => {
            let (bar, pie) = score_charts(&scores, theme);
            charts.push(ChartPanel::new("barChart", bar));
            charts.push(ChartPanel::new("pieChart", pie));
        }
        Err(err) => error!("failed to load scores: {err}"),
    }

    info!(charts = charts.len(), heatmap = records.is_some(), "rendered dashboard");
    Html(render_dashboard(&DashboardPage { people, charts }))
}

pub async fn heatmap_view(
    State(state): State<AppState>,
    Path(person): Path<String>,
    Query(query): Query<ResizeQuery>,
) -> Result<Json<HeatmapView>, AppError> {
    Ok(Json(rerender(&state, &person, &query).await?))
}

/// HTML for one person's heatmap; the page swaps it in on resize.
pub async fn heatmap_fragment(
    State(state): State<AppState>,
    Path(person): Path<String>,
    Query(query): Query<ResizeQuery>,
) -> Result<Html<String>, AppError> {
    let view = rerender(&state, &person, &query).await?;
    Ok(Html(render_heatmap(&view)))
}

pub async fn healthz() -> &'static str {
    "ok"
}

async fn rerender(state: &AppState, person: &str, query: &ResizeQuery) -> Result<HeatmapView, AppError> {
    if !state.tracks(person) {
        return Err(AppError::not_found(format!("unknown person '{person}'")));
    }

    let renderer = match query.column_width {
        Some(width) if width.is_finite() && width > 0.0 => state.renderer.with_column_width(width),
        Some(_) => return Err(AppError::bad_request("column_width must be a positive number")),
        None => state.renderer.clone(),
    };

    let records = state.client.fetch_heatmap().await.map_err(|err| {
        error!("failed to load heatmap data: {err}");
        AppError::from(err)
    })?;

    Ok(renderer.render(person, &records))
}
