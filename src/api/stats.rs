//! Statistics and series endpoints

use axum::{extract::State, Json};

use crate::models::{series::BookSeries, stats::Statistics};

/// Get reading statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Library statistics", body = Statistics)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> Json<Statistics> {
    Json(state.services.stats.get_stats().await)
}

/// List series with their books
#[utoipa::path(
    get,
    path = "/series",
    tag = "stats",
    responses(
        (status = 200, description = "All series", body = Vec<BookSeries>)
    )
)]
pub async fn get_series(State(state): State<crate::AppState>) -> Json<Vec<BookSeries>> {
    Json(state.services.stats.get_series().await)
}
