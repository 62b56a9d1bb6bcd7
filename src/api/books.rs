//! Book (catalog) endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
};

/// Every book of the library
#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<Book>,
    pub count: usize,
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = BookListResponse)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> Json<BookListResponse> {
    let books = state.services.catalog.list_books().await;
    Json(BookListResponse {
        count: books.len(),
        books,
    })
}

/// Get a book by author and title
#[utoipa::path(
    get,
    path = "/books/{author}/{title}",
    tag = "books",
    params(
        ("author" = String, Path, description = "Author (case-insensitive)"),
        ("title" = String, Path, description = "Title (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path((author, title)): Path<(String, String)>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(&author, &title).await?;
    Ok(Json(book))
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Book already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    payload: Result<Json<CreateBook>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let Json(request) = payload?;
    let created = state.services.catalog.create_book(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{author}/{title}",
    tag = "books",
    params(
        ("author" = String, Path, description = "Current author"),
        ("title" = String, Path, description = "Current title")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Another book has the new author and title", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path((author, title)): Path<(String, String)>,
    payload: Result<Json<UpdateBook>, JsonRejection>,
) -> AppResult<Json<Book>> {
    let Json(changes) = payload?;
    let updated = state
        .services
        .catalog
        .update_book(&author, &title, changes)
        .await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{author}/{title}",
    tag = "books",
    params(
        ("author" = String, Path, description = "Author"),
        ("title" = String, Path, description = "Title")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path((author, title)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(&author, &title).await?;
    Ok(StatusCode::NO_CONTENT)
}
