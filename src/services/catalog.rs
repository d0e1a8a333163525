//! Catalog management service

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, ReplaceBook, UpdateBook},
    repository::Repository,
};

/// Book counts by availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogSummary {
    pub total: usize,
    pub available: usize,
    pub on_loan: usize,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books in insertion order
    pub async fn list_books(&self) -> Vec<Book> {
        self.repository.books.read().await.list()
    }

    /// List books currently on the shelf
    pub async fn list_available(&self) -> Vec<Book> {
        self.repository.books.read().await.filter_available()
    }

    /// List books currently lent out
    pub async fn list_on_loan(&self) -> Vec<Book> {
        self.repository.books.read().await.filter_on_loan()
    }

    /// Get a book by ISBN
    pub async fn get_book(&self, isbn: &str) -> AppResult<Book> {
        self.repository.books.read().await.get(isbn)
    }

    /// Add a new book, rejecting a duplicate ISBN
    pub async fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        let created = self.repository.books.write().await.add(data.into());
        match &created {
            Ok(book) => tracing::info!("Catalog create: isbn={}", book.isbn()),
            Err(e) => tracing::debug!("Catalog create rejected: {}", e),
        }
        created
    }

    /// Replace every field of an existing book
    pub async fn replace_book(&self, isbn: &str, data: ReplaceBook) -> AppResult<Book> {
        let (book, availability_changed) = self.repository.books.write().await.replace(isbn, data)?;
        tracing::info!("Catalog replace: isbn={}", isbn);
        if availability_changed {
            warn_availability_override(&book);
        }
        Ok(book)
    }

    /// Update the given fields of an existing book
    pub async fn update_book(&self, isbn: &str, data: UpdateBook) -> AppResult<Book> {
        let (book, availability_changed) = self.repository.books.write().await.update(isbn, data)?;
        tracing::info!("Catalog update: isbn={}", isbn);
        if availability_changed {
            warn_availability_override(&book);
        }
        Ok(book)
    }

    /// Delete a book
    pub async fn delete_book(&self, isbn: &str) -> AppResult<()> {
        self.repository.books.write().await.remove(isbn)?;
        tracing::info!("Catalog delete: isbn={}", isbn);
        Ok(())
    }

    /// Count books by availability under a single read guard
    pub async fn summary(&self) -> CatalogSummary {
        let catalog = self.repository.books.read().await;
        let available = catalog.filter_available().len();
        CatalogSummary {
            total: catalog.len(),
            available,
            on_loan: catalog.len() - available,
        }
    }
}

fn warn_availability_override(book: &Book) {
    tracing::warn!(
        "Availability of isbn={} set to {} outside loan/return",
        book.isbn(),
        book.is_available()
    );
}
