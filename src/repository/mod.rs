//! Repository layer holding the in-memory catalog

pub mod books;

use std::{fs, path::Path, sync::Arc};

use tokio::sync::RwLock;
use validator::Validate;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::book::{sample_books, Book, CreateBook},
};

pub use books::BookCatalog;

/// Shared handle on the catalog.
///
/// Mutations go through the write guard so concurrent requests can't lose
/// updates or race on a duplicate ISBN; reads share the read guard.
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<RwLock<BookCatalog>>,
}

impl Repository {
    /// Create a repository owning the given catalog
    pub fn new(catalog: BookCatalog) -> Self {
        Self {
            books: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Create a repository seeded according to the catalog configuration
    pub fn seeded(config: &CatalogConfig) -> AppResult<Self> {
        let books = match &config.seed_file {
            Some(path) => load_seed_file(path)?,
            None if config.seed_samples => sample_books(),
            None => Vec::new(),
        };
        let catalog = BookCatalog::with_books(books)?;
        tracing::info!("Catalog seeded with {} books", catalog.len());
        Ok(Self::new(catalog))
    }
}

/// Read a JSON array of books, held to the same rules as books added over HTTP
fn load_seed_file(path: &Path) -> AppResult<Vec<Book>> {
    tracing::debug!("Loading seed file {}", path.display());
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::Internal(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;
    let entries: Vec<CreateBook> = serde_json::from_str(&raw).map_err(|e| {
        AppError::Internal(format!("Invalid seed file {}: {}", path.display(), e))
    })?;

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            entry.validate().map_err(|e| {
                AppError::Internal(format!(
                    "Invalid entry {} in seed file {}: {}",
                    idx,
                    path.display(),
                    e
                ))
            })?;
            Ok(Book::from(entry))
        })
        .collect()
}
