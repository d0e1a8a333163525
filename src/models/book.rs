//! Book model and request payloads

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// A catalogued book.
///
/// Fields are only reachable through accessors; availability only changes
/// through [`Book::loan`] and [`Book::return_book`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// ISBN, unique within a catalog
    #[schema(example = "978-0-307-47472-3")]
    isbn: String,
    #[schema(example = "Cien Años de Soledad")]
    title: String,
    #[schema(example = "Gabriel García Márquez")]
    author: String,
    #[schema(example = 1967)]
    publication_year: i32,
    #[schema(example = 417)]
    total_pages: u32,
    /// true when on the shelf, false when on loan
    is_available: bool,
}

impl Book {
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
        total_pages: u32,
        is_available: bool,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            publication_year,
            total_pages,
            is_available,
        }
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn publication_year(&self) -> i32 {
        self.publication_year
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// Mark the book as lent out
    pub fn loan(&mut self) -> AppResult<()> {
        if !self.is_available {
            return Err(AppError::NotAvailable(format!(
                "Book {} is already on loan",
                self.isbn
            )));
        }
        self.is_available = false;
        Ok(())
    }

    /// Mark the book as back on the shelf
    pub fn return_book(&mut self) -> AppResult<()> {
        if self.is_available {
            return Err(AppError::NotBorrowed(format!(
                "Book {} is already available",
                self.isbn
            )));
        }
        self.is_available = true;
        Ok(())
    }

    /// Apply every field of a full replacement. Returns true when availability changed.
    pub(crate) fn apply_replace(&mut self, fields: ReplaceBook) -> bool {
        self.title = fields.title;
        self.author = fields.author;
        self.publication_year = fields.publication_year;
        self.total_pages = fields.total_pages;
        self.set_availability(fields.is_available)
    }

    /// Apply the present fields of a partial update. Returns true when availability changed.
    pub(crate) fn apply_update(&mut self, fields: UpdateBook) -> bool {
        if let Some(title) = fields.title {
            self.title = title;
        }
        if let Some(author) = fields.author {
            self.author = author;
        }
        if let Some(year) = fields.publication_year {
            self.publication_year = year;
        }
        if let Some(pages) = fields.total_pages {
            self.total_pages = pages;
        }
        match fields.is_available {
            Some(available) => self.set_availability(available),
            None => false,
        }
    }

    // A value equal to the current state is a no-op, never a conflict.
    fn set_availability(&mut self, available: bool) -> bool {
        let transition = match (self.is_available, available) {
            (true, false) => self.loan(),
            (false, true) => self.return_book(),
            _ => return false,
        };
        transition.is_ok()
    }
}

fn default_available() -> bool {
    true
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 10, message = "ISBN must be at least 10 characters"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    #[validate(range(
        min = 1000,
        max = 2100,
        message = "Publication year must be between 1000 and 2100"
    ))]
    pub publication_year: i32,
    #[validate(range(min = 1, message = "Page count must be positive"))]
    pub total_pages: u32,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl From<CreateBook> for Book {
    fn from(data: CreateBook) -> Self {
        Book::new(
            data.isbn,
            data.title,
            data.author,
            data.publication_year,
            data.total_pages,
            data.is_available,
        )
    }
}

/// Full replacement of a book's fields (the ISBN comes from the path)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReplaceBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    #[validate(range(
        min = 1000,
        max = 2100,
        message = "Publication year must be between 1000 and 2100"
    ))]
    pub publication_year: i32,
    #[validate(range(min = 1, message = "Page count must be positive"))]
    pub total_pages: u32,
    /// Required: an omitted value must not move a lent book back on the shelf
    pub is_available: bool,
}

/// Partial update: only present fields are changed
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: Option<String>,
    #[validate(range(
        min = 1000,
        max = 2100,
        message = "Publication year must be between 1000 and 2100"
    ))]
    pub publication_year: Option<i32>,
    #[validate(range(min = 1, message = "Page count must be positive"))]
    pub total_pages: Option<u32>,
    pub is_available: Option<bool>,
}

/// Availability filter for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    OnLoan,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// `available` or `on_loan`; all books when absent
    pub availability: Option<Availability>,
}

/// Books loaded at startup when no seed file is configured
pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new(
            "978-0-307-47472-3",
            "Cien Años de Soledad",
            "Gabriel García Márquez",
            1967,
            417,
            true,
        ),
        Book::new(
            "978-0-06-093434-7",
            "Don Quijote de la Mancha",
            "Miguel de Cervantes",
            1605,
            863,
            true,
        ),
        Book::new(
            "978-0-15-601219-1",
            "El Principito",
            "Antoine de Saint-Exupéry",
            1943,
            96,
            false,
        ),
        Book::new("978-0-452-28423-4", "1984", "George Orwell", 1949, 328, true),
    ]
}
