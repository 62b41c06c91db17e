use thiserror::Error;

/// Reasons a catalog or lending operation is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// The book's ISBN is empty or whitespace
    #[error("Book ISBN must not be blank")]
    BlankBookIsbn,
    /// The patron's identifier is empty or whitespace
    #[error("Patron ID must not be blank")]
    BlankPatronId,
    /// A book with this ISBN is already catalogued
    #[error("Book with ISBN {0} already exists")]
    DuplicateBook(String),
    /// A patron with this identifier is already registered
    #[error("Patron with ID {0} already exists")]
    DuplicatePatron(String),
    /// No book is catalogued under this ISBN
    #[error("No book with ISBN {0}")]
    UnknownBook(String),
    /// No patron is registered under this identifier
    #[error("No patron with ID {0}")]
    UnknownPatron(String),
    /// The book is already checked out
    #[error("Book {0} is not available")]
    BookUnavailable(String),
    /// The patron already holds as many books as allowed
    #[error("Patron {patron_id} has reached borrowing limit of {limit}")]
    BorrowLimitReached {
        /// Patron attempting the checkout
        patron_id: String,
        /// The patron's limit
        limit: usize,
    },
    /// The patron is returning a book they do not hold
    #[error("Patron {patron_id} has not borrowed book {isbn}")]
    NotBorrowedByPatron {
        /// Patron attempting the return
        patron_id: String,
        /// Book being returned
        isbn: String,
    },
    /// The book cannot be removed while on loan
    #[error("Cannot remove book {0} - currently borrowed")]
    BookCheckedOut(String),
}

/// Result alias for catalog and lending operations
pub type Result<T> = std::result::Result<T, LibraryError>;
