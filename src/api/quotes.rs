//! Quote and reading-status endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{CreateQuote, MarkRead},
};

use super::MessageResponse;

#[derive(Serialize, ToSchema)]
pub struct QuotesResponse {
    /// Quotes in the order they were added
    pub quotes: Vec<String>,
}

/// Add a quote to a book
#[utoipa::path(
    post,
    path = "/quotes/{author}/{title}",
    tag = "quotes",
    params(
        ("author" = String, Path, description = "Author"),
        ("title" = String, Path, description = "Title")
    ),
    request_body = CreateQuote,
    responses(
        (status = 200, description = "Quote added", body = MessageResponse),
        (status = 400, description = "Quote is missing", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_quote(
    State(state): State<crate::AppState>,
    Path((author, title)): Path<(String, String)>,
    payload: Result<Json<CreateQuote>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(request) = payload?;
    state
        .services
        .catalog
        .add_quote(&author, &title, request)
        .await?;
    Ok(Json(MessageResponse::new("Quote added")))
}

/// Get the quotes of a book
#[utoipa::path(
    get,
    path = "/quotes/{author}/{title}",
    tag = "quotes",
    params(
        ("author" = String, Path, description = "Author"),
        ("title" = String, Path, description = "Title")
    ),
    responses(
        (status = 200, description = "Quotes of the book", body = QuotesResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_quotes(
    State(state): State<crate::AppState>,
    Path((author, title)): Path<(String, String)>,
) -> AppResult<Json<QuotesResponse>> {
    let quotes = state.services.catalog.get_quotes(&author, &title).await?;
    Ok(Json(QuotesResponse { quotes }))
}

/// Mark a book as read or unread
#[utoipa::path(
    post,
    path = "/read/{author}/{title}",
    tag = "quotes",
    params(
        ("author" = String, Path, description = "Author"),
        ("title" = String, Path, description = "Title")
    ),
    request_body = MarkRead,
    responses(
        (status = 200, description = "Read status updated", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn mark_as_read(
    State(state): State<crate::AppState>,
    Path((author, title)): Path<(String, String)>,
    payload: Result<Json<MarkRead>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(request) = payload?;
    state
        .services
        .catalog
        .mark_as_read(&author, &title, request.read)
        .await?;
    Ok(Json(MessageResponse::new("Read status updated")))
}
