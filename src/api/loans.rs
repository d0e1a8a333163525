//! Loan endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::book::Book, AppState};

/// Lend a book out
#[utoipa::path(
    post,
    path = "/books/{isbn}/loan",
    tag = "loans",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 200, description = "Book lent out", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book already on loan", body = crate::error::ErrorResponse)
    )
)]
pub async fn loan_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.loans.loan_book(&isbn).await?;
    Ok(Json(book))
}

/// Return a lent book
#[utoipa::path(
    post,
    path = "/books/{isbn}/return",
    tag = "loans",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 200, description = "Book returned", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book is not on loan", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.loans.return_book(&isbn).await?;
    Ok(Json(book))
}
