//! Book (catalog) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use super::extract::{AppJson, AppQuery};
use crate::{
    error::AppResult,
    models::book::{Availability, Book, BookQuery, CreateBook, ReplaceBook, UpdateBook},
    AppState,
};

/// Book listing
#[derive(Serialize, ToSchema)]
pub struct BookList {
    /// Number of books returned
    pub total: usize,
    pub books: Vec<Book>,
}

impl From<Vec<Book>> for BookList {
    fn from(books: Vec<Book>) -> Self {
        Self {
            total: books.len(),
            books,
        }
    }
}

/// List books, optionally filtered by availability
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Books in insertion order", body = BookList)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BookQuery>,
) -> Json<BookList> {
    let catalog = &state.services.catalog;
    let books = match query.availability {
        None => catalog.list_books().await,
        Some(Availability::Available) => catalog.list_available().await,
        Some(Availability::OnLoan) => catalog.list_on_loan().await,
    };
    Json(books.into())
}

/// Get a book by ISBN
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(&isbn).await?;
    Ok(Json(book))
}

/// Add a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "ISBN already catalogued", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AppJson(data): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    data.validate()?;

    let created = state.services.catalog.create_book(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace all fields of a book
#[utoipa::path(
    put,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    request_body = ReplaceBook,
    responses(
        (status = 200, description = "Book replaced", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn replace_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    AppJson(data): AppJson<ReplaceBook>,
) -> AppResult<Json<Book>> {
    data.validate()?;

    let replaced = state.services.catalog.replace_book(&isbn, data).await?;
    Ok(Json(replaced))
}

/// Update some fields of a book
#[utoipa::path(
    patch,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    AppJson(data): AppJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    data.validate()?;

    let updated = state.services.catalog.update_book(&isbn, data).await?;
    Ok(Json(updated))
}

/// Remove a book
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(&isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}
