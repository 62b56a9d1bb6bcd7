//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod quotes;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::AppState;

/// Plain acknowledgement body
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:author/:title",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Quotes
        .route(
            "/quotes/:author/:title",
            get(quotes::get_quotes).post(quotes::add_quote),
        )
        // Reading status
        .route("/read/:author/:title", post(quotes::mark_as_read))
        // Statistics
        .route("/stats", get(stats::get_stats))
        .route("/series", get(stats::get_series))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .route("/", get(health::welcome))
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .fallback(health::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
