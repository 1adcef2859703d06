use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};

use crate::state::AppState;

/// Root path - hand off to the static frontend entry point
pub async fn root() -> Redirect {
    Redirect::to("/static/index.html")
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// Session diagnostics: connection count, seat occupancy, move count,
/// and the current position.
pub async fn session_stats(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    Json(session.stats())
}
