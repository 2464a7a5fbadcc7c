//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::Book,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(get_books).post(create_book))
        .route(
            "/books/:isbn",
            get(get_book).put(update_book).delete(delete_book),
        )
}

/// Query parameters for listing books
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BooksQuery {
    /// Substring matched against book titles
    pub search_term: Option<String>,
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book,
            headers(("Location" = String, description = "URL of the created book"))),
        (status = 400, description = "Validation failed or ISBN already in use", body = Vec<ValidationFailure>)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(book): Json<Book>,
) -> AppResult<impl IntoResponse> {
    let violations = book.violations();
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    state.services.books.create(&book).await?;

    let location = format!("/books/{}", book.isbn);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

/// List books, optionally filtered by a title search term
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BooksQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>)
    )
)]
pub async fn get_books(
    State(state): State<AppState>,
    Query(query): Query<BooksQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = match query.search_term.as_deref() {
        Some(term) if !term.trim().is_empty() => {
            state.services.books.search_by_title(term).await?
        }
        _ => state.services.books.get_all().await?,
    };
    Ok(Json(books))
}

/// Fetch a single book by its ISBN-13
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN-13 of the book")),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, description = "No book with this ISBN", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_isbn(&isbn).await?;
    Ok(Json(book))
}

/// Replace the book stored under an ISBN-13. The ISBN in the request body
/// is ignored; the path segment is authoritative.
#[utoipa::path(
    put,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN-13 of the book")),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Validation failed", body = Vec<ValidationFailure>),
        (status = 404, description = "No book with this ISBN", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    Json(mut book): Json<Book>,
) -> AppResult<Json<Book>> {
    book.isbn = isbn;

    let violations = book.violations();
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    state.services.books.update(&book).await?;
    Ok(Json(book))
}

/// Remove a book from the catalog
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN-13 of the book")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "No book with this ISBN", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<StatusCode> {
    state.services.books.delete(&isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}
