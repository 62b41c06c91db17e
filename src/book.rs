use std::fmt;

use serde::{Deserialize, Serialize};

/// A book held by the library, keyed by its ISBN
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Book {
    /// Unique, immutable catalog key
    isbn: String,
    /// Title of the book
    title: String,
    /// Author of the book
    author: String,
    /// Year the book was published
    publication_year: i32,
    /// Whether the book is on the shelf
    available: bool,
}

/// Mutable bibliographic fields applied by an update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookDetails {
    /// New title
    pub title: String,
    /// New author
    pub author: String,
    /// New publication year
    pub publication_year: i32,
}

impl Book {
    /// Create a new book, initially available for checkout
    #[must_use]
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            publication_year,
            available: true,
        }
    }

    /// The book's ISBN
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// The book's title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The book's author
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// The year the book was published
    #[must_use]
    pub fn publication_year(&self) -> i32 {
        self.publication_year
    }

    /// Whether the book can currently be checked out
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Current bibliographic fields as an update payload
    #[must_use]
    pub fn details(&self) -> BookDetails {
        BookDetails {
            title: self.title.clone(),
            author: self.author.clone(),
            publication_year: self.publication_year,
        }
    }

    /// Flip the availability flag; only the lending engine does this
    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Overwrite the mutable fields, keeping ISBN and availability
    pub(crate) fn apply(&mut self, details: BookDetails) {
        self.title = details.title;
        self.author = details.author;
        self.publication_year = details.publication_year;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book{{ISBN='{}', title='{}', author='{}', year={}, available={}}}",
            self.isbn, self.title, self.author, self.publication_year, self.available
        )
    }
}
