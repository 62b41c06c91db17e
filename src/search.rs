//! Matching policies applied over the catalog's books.
//!
//! The policy is chosen per call with a [`SearchKind`]; there is no
//! "current strategy" state shared between searches.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::book::Book;

/// Which book field a query is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// Case-insensitive substring of the title
    #[default]
    Title,
    /// Case-insensitive substring of the author
    Author,
    /// Exact ISBN
    Isbn,
}

/// A search kind name or selector that does not map to a [`SearchKind`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown search type: {0}")]
pub struct UnknownSearchKind(pub String);

impl SearchKind {
    /// Every search kind, in menu order
    pub const ALL: [Self; 3] = [Self::Title, Self::Author, Self::Isbn];

    /// Menu selector for this kind (1=title, 2=author, 3=ISBN)
    #[must_use]
    pub fn selector(self) -> u32 {
        match self {
            Self::Title => 1,
            Self::Author => 2,
            Self::Isbn => 3,
        }
    }

    /// Map a menu selector back to its kind
    #[must_use]
    pub fn from_selector(selector: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.selector() == selector)
    }

    /// Human-readable name of the field searched
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Isbn => "ISBN",
        }
    }

    /// Whether `book` matches `query` under this policy
    #[must_use]
    pub fn matches(self, book: &Book, query: &str) -> bool {
        self.is_match(book, query, &query.to_lowercase())
    }

    /// Match with the lowercased query computed once by the caller
    fn is_match(self, book: &Book, query: &str, lowered: &str) -> bool {
        match self {
            Self::Title => book.title().to_lowercase().contains(lowered),
            Self::Author => book.author().to_lowercase().contains(lowered),
            Self::Isbn => book.isbn() == query,
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SearchKind {
    type Err = UnknownSearchKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Some(kind) = name.parse::<u32>().ok().and_then(Self::from_selector) {
            return Ok(kind);
        }
        match name.to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "isbn" | "id" => Ok(Self::Isbn),
            _ => Err(UnknownSearchKind(s.to_string())),
        }
    }
}

/// Books matching `query`, in the order `books` yields them
///
/// A blank query matches nothing.
pub fn search<'a>(
    books: impl IntoIterator<Item = &'a Book>,
    kind: SearchKind,
    query: &str,
) -> Vec<&'a Book> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let lowered = query.to_lowercase();
    let results: Vec<&Book> =
        books.into_iter().filter(|book| kind.is_match(book, query, &lowered)).collect();
    debug!(kind = %kind, query, hits = results.len(), "search completed");
    results
}
