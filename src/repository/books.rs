//! In-memory book catalog

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, ReplaceBook, UpdateBook},
};

/// Books keyed by ISBN, listed in insertion order.
///
/// Every operation either applies completely or leaves the catalog untouched.
/// Callers receive clones, never references into the catalog.
#[derive(Debug, Default, Clone)]
pub struct BookCatalog {
    books: IndexMap<String, Book>,
}

impl BookCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from an initial set of books, rejecting duplicate ISBNs
    pub fn with_books<I>(books: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = Book>,
    {
        let mut catalog = Self::new();
        for book in books {
            catalog.add(book)?;
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// All books, in insertion order
    pub fn list(&self) -> Vec<Book> {
        self.books.values().cloned().collect()
    }

    pub fn get(&self, isbn: &str) -> AppResult<Book> {
        self.books.get(isbn).cloned().ok_or_else(|| not_found(isbn))
    }

    /// Append a new book; fails if the ISBN is already catalogued
    pub fn add(&mut self, book: Book) -> AppResult<Book> {
        if self.books.contains_key(book.isbn()) {
            return Err(AppError::Conflict(format!(
                "A book with ISBN {} already exists",
                book.isbn()
            )));
        }
        self.books.insert(book.isbn().to_string(), book.clone());
        Ok(book)
    }

    /// Overwrite every mutable field of a book.
    ///
    /// The boolean is true when the replacement moved the book on or off loan.
    pub fn replace(&mut self, isbn: &str, fields: ReplaceBook) -> AppResult<(Book, bool)> {
        let book = self.get_mut(isbn)?;
        let availability_changed = book.apply_replace(fields);
        Ok((book.clone(), availability_changed))
    }

    /// Overwrite only the fields present in `fields`
    pub fn update(&mut self, isbn: &str, fields: UpdateBook) -> AppResult<(Book, bool)> {
        let book = self.get_mut(isbn)?;
        let availability_changed = book.apply_update(fields);
        Ok((book.clone(), availability_changed))
    }

    /// Delete a book, keeping the order of the remaining ones
    pub fn remove(&mut self, isbn: &str) -> AppResult<Book> {
        self.books.shift_remove(isbn).ok_or_else(|| not_found(isbn))
    }

    pub fn loan(&mut self, isbn: &str) -> AppResult<Book> {
        let book = self.get_mut(isbn)?;
        book.loan()?;
        Ok(book.clone())
    }

    pub fn return_book(&mut self, isbn: &str) -> AppResult<Book> {
        let book = self.get_mut(isbn)?;
        book.return_book()?;
        Ok(book.clone())
    }

    pub fn filter_available(&self) -> Vec<Book> {
        self.filter(|book| book.is_available())
    }

    pub fn filter_on_loan(&self) -> Vec<Book> {
        self.filter(|book| !book.is_available())
    }

    fn filter(&self, predicate: impl Fn(&Book) -> bool) -> Vec<Book> {
        self.books
            .values()
            .filter(|book| predicate(book))
            .cloned()
            .collect()
    }

    fn get_mut(&mut self, isbn: &str) -> AppResult<&mut Book> {
        self.books.get_mut(isbn).ok_or_else(|| not_found(isbn))
    }
}

fn not_found(isbn: &str) -> AppError {
    AppError::NotFound(format!("Book with ISBN {} not found", isbn))
}
