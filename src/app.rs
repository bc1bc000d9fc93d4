use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::healthz))
        .route("/heatmap/:person", get(handlers::heatmap_fragment))
        .route("/api/heatmap/:person", get(handlers::heatmap_view))
        .with_state(state)
}
