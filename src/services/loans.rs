//! Loan management service

use crate::{error::AppResult, models::book::Book, repository::Repository};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Lend a book out
    pub async fn loan_book(&self, isbn: &str) -> AppResult<Book> {
        let result = self.repository.books.write().await.loan(isbn);
        match &result {
            Ok(_) => tracing::info!("Loan: isbn={}", isbn),
            Err(e) => tracing::debug!("Loan rejected: {}", e),
        }
        result
    }

    /// Bring a lent book back
    pub async fn return_book(&self, isbn: &str) -> AppResult<Book> {
        let result = self.repository.books.write().await.return_book(isbn);
        match &result {
            Ok(_) => tracing::info!("Return: isbn={}", isbn),
            Err(e) => tracing::debug!("Return rejected: {}", e),
        }
        result
    }
}
