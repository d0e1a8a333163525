//! Data models for Biblio

pub mod book;

// Re-export commonly used types
pub use book::{Availability, Book, BookQuery, CreateBook, ReplaceBook, UpdateBook};
