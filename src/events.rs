use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of successful state changes the library announces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A book entered the catalog
    BookAdded,
    /// A book's details changed
    BookUpdated,
    /// A book left the catalog
    BookRemoved,
    /// A book was lent to a patron
    BookCheckedOut,
    /// A patron brought a book back
    BookReturned,
    /// A patron registered
    PatronAdded,
    /// A patron's details changed
    PatronUpdated,
}

impl EventKind {
    /// Stable upper-case name used in log lines
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BookAdded => "BOOK_ADDED",
            Self::BookUpdated => "BOOK_UPDATED",
            Self::BookRemoved => "BOOK_REMOVED",
            Self::BookCheckedOut => "BOOK_CHECKED_OUT",
            Self::BookReturned => "BOOK_RETURNED",
            Self::PatronAdded => "PATRON_ADDED",
            Self::PatronUpdated => "PATRON_UPDATED",
        }
    }

    /// Default human-readable description
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::BookAdded => "Book added to inventory",
            Self::BookUpdated => "Book information updated",
            Self::BookRemoved => "Book removed from inventory",
            Self::BookCheckedOut => "Book checked out",
            Self::BookReturned => "Book returned",
            Self::PatronAdded => "New patron registered",
            Self::PatronUpdated => "Patron information updated",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of a successful change
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LibraryEvent {
    /// What happened
    kind: EventKind,
    /// Human-readable description
    description: String,
    /// Patron involved, if any
    patron_id: Option<String>,
    /// Book involved, if any
    book_isbn: Option<String>,
    /// When the event was created
    timestamp: DateTime<Utc>,
}

impl LibraryEvent {
    /// Create an event stamped with the current time
    #[must_use]
    pub fn new(kind: EventKind, patron_id: Option<&str>, book_isbn: Option<&str>) -> Self {
        Self {
            kind,
            description: kind.description().to_string(),
            patron_id: patron_id.map(str::to_string),
            book_isbn: book_isbn.map(str::to_string),
            timestamp: Utc::now(),
        }
    }

    /// Event about a single book
    #[must_use]
    pub fn for_book(kind: EventKind, isbn: &str) -> Self {
        Self::new(kind, None, Some(isbn))
    }

    /// Event about a single patron
    #[must_use]
    pub fn for_patron(kind: EventKind, patron_id: &str) -> Self {
        Self::new(kind, Some(patron_id), None)
    }

    /// Event about a loan between a patron and a book
    #[must_use]
    pub fn for_loan(kind: EventKind, patron_id: &str, isbn: &str) -> Self {
        Self::new(kind, Some(patron_id), Some(isbn))
    }

    /// What happened
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Patron involved, if any
    #[must_use]
    pub fn patron_id(&self) -> Option<&str> {
        self.patron_id.as_deref()
    }

    /// Book involved, if any
    #[must_use]
    pub fn book_isbn(&self) -> Option<&str> {
        self.book_isbn.as_deref()
    }

    /// When the event was created
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for LibraryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - Patron: {}, Book: {}",
            self.kind,
            self.description,
            self.patron_id.as_deref().unwrap_or("-"),
            self.book_isbn.as_deref().unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_single_line() {
        let event = LibraryEvent::for_loan(EventKind::BookCheckedOut, "P1", "B1");
        assert_eq!(event.to_string(), "[BOOK_CHECKED_OUT] Book checked out - Patron: P1, Book: B1");

        let event = LibraryEvent::for_book(EventKind::BookAdded, "B1");
        assert_eq!(event.to_string(), "[BOOK_ADDED] Book added to inventory - Patron: -, Book: B1");
        assert!(event.patron_id().is_none());
    }

    #[test]
    fn test_kind_serializes_as_upper_snake_case() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&EventKind::PatronUpdated)?;
        assert_eq!(json, "\"PATRON_UPDATED\"");
        Ok(())
    }
}
