use tracing::warn;

use crate::{
    book::{Book, BookDetails},
    catalog::Catalog,
    error::{LibraryError, Result},
    events::{EventKind, LibraryEvent},
    observers::{EventListener, EventNotifier, ListenerId},
    patron::{Patron, PatronDetails},
    report::InventoryReport,
    search::{self, SearchKind},
};

/// Lending engine over an in-memory [`Catalog`]
///
/// Every mutating operation comes in two forms: `try_*` returns the reason a
/// request was rejected, while the plain form only reports success. Either
/// way a rejection is logged as a warning and leaves the catalog untouched,
/// and a success is published to every registered [`EventListener`].
#[derive(Debug)]
pub struct LibrarySystem {
    /// Books and patrons
    catalog: Catalog,
    /// Listeners notified after each successful change
    notifier: EventNotifier,
}

impl Default for LibrarySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl LibrarySystem {
    /// Create an empty library that logs every event
    #[must_use]
    pub fn new() -> Self {
        Self::with_notifier(EventNotifier::with_logging())
    }

    /// Create an empty library publishing to `notifier`
    #[must_use]
    pub fn with_notifier(notifier: EventNotifier) -> Self {
        Self { catalog: Catalog::new(), notifier }
    }

    /// Register a listener to be notified of changes
    pub fn register_listener(&mut self, listener: impl EventListener + 'static) -> ListenerId {
        self.notifier.register(Box::new(listener))
    }

    /// Stop notifying a listener; returns false if it was not registered
    pub fn unregister_listener(&mut self, id: ListenerId) -> bool {
        self.notifier.unregister(id)
    }

    /// Read-only view of the underlying catalog
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Publish the event of a successful change, or log why it was rejected
    fn settle(&self, operation: &'static str, outcome: Result<LibraryEvent>) -> Result<()> {
        match outcome {
            Ok(event) => {
                self.notifier.publish(&event);
                Ok(())
            }
            Err(error) => {
                warn!(operation, %error, "request rejected");
                Err(error)
            }
        }
    }

    /// Add a book to the catalog
    ///
    /// # Errors
    ///
    /// Returns `BlankBookIsbn` or `DuplicateBook`.
    pub fn try_add_book(&mut self, book: Book) -> Result<()> {
        let isbn = book.isbn().to_string();
        let outcome = self
            .catalog
            .add_book(book)
            .map(|()| LibraryEvent::for_book(EventKind::BookAdded, &isbn));
        self.settle("add_book", outcome)
    }

    /// Add a book to the catalog; false if it was rejected
    pub fn add_book(&mut self, book: Book) -> bool {
        self.try_add_book(book).is_ok()
    }

    /// Remove a book that is on the shelf
    ///
    /// # Errors
    ///
    /// Returns `UnknownBook` or, while the book is on loan, `BookCheckedOut`.
    pub fn try_remove_book(&mut self, isbn: &str) -> Result<()> {
        let outcome = self
            .catalog
            .remove_book(isbn)
            .map(|removed| LibraryEvent::for_book(EventKind::BookRemoved, removed.isbn()));
        self.settle("remove_book", outcome)
    }

    /// Remove a book that is on the shelf; false if it was rejected
    pub fn remove_book(&mut self, isbn: &str) -> bool {
        self.try_remove_book(isbn).is_ok()
    }

    /// Replace a book's title, author and year
    ///
    /// # Errors
    ///
    /// Returns `UnknownBook`.
    pub fn try_update_book(&mut self, isbn: &str, details: BookDetails) -> Result<()> {
        let outcome = self
            .catalog
            .update_book(isbn, details)
            .map(|()| LibraryEvent::for_book(EventKind::BookUpdated, isbn));
        self.settle("update_book", outcome)
    }

    /// Replace a book's title, author and year; false if it was rejected
    pub fn update_book(&mut self, isbn: &str, details: BookDetails) -> bool {
        self.try_update_book(isbn, details).is_ok()
    }

    /// Look up a book by ISBN
    #[must_use]
    pub fn get_book(&self, isbn: &str) -> Option<&Book> {
        self.catalog.get_book(isbn)
    }

    /// Every book, in the order it was added
    #[must_use]
    pub fn list_books(&self) -> Vec<Book> {
        self.catalog.list_books()
    }

    /// Books that can be checked out
    #[must_use]
    pub fn available_books(&self) -> Vec<Book> {
        self.catalog.books().filter(|book| book.is_available()).cloned().collect()
    }

    /// Books currently on loan
    #[must_use]
    pub fn borrowed_books(&self) -> Vec<Book> {
        self.catalog.books().filter(|book| !book.is_available()).cloned().collect()
    }

    /// Books matching `query` under `kind`, in catalog order
    #[must_use]
    pub fn search_books(&self, kind: SearchKind, query: &str) -> Vec<Book> {
        search::search(self.catalog.books(), kind, query).into_iter().cloned().collect()
    }

    /// Books whose title contains `title`, ignoring case
    #[must_use]
    pub fn search_by_title(&self, title: &str) -> Vec<Book> {
        self.search_books(SearchKind::Title, title)
    }

    /// Books whose author contains `author`, ignoring case
    #[must_use]
    pub fn search_by_author(&self, author: &str) -> Vec<Book> {
        self.search_books(SearchKind::Author, author)
    }

    /// The book with exactly this ISBN, if any
    #[must_use]
    pub fn search_by_isbn(&self, isbn: &str) -> Vec<Book> {
        self.search_books(SearchKind::Isbn, isbn)
    }

    /// Register a patron
    ///
    /// # Errors
    ///
    /// Returns `BlankPatronId` or `DuplicatePatron`.
    pub fn try_add_patron(&mut self, patron: Patron) -> Result<()> {
        let patron_id = patron.patron_id().to_string();
        let outcome = self
            .catalog
            .add_patron(patron)
            .map(|()| LibraryEvent::for_patron(EventKind::PatronAdded, &patron_id));
        self.settle("add_patron", outcome)
    }

    /// Register a patron; false if it was rejected
    pub fn add_patron(&mut self, patron: Patron) -> bool {
        self.try_add_patron(patron).is_ok()
    }

    /// Replace a patron's name, email and phone
    ///
    /// # Errors
    ///
    /// Returns `UnknownPatron`.
    pub fn try_update_patron(&mut self, patron_id: &str, details: PatronDetails) -> Result<()> {
        let outcome = self
            .catalog
            .update_patron(patron_id, details)
            .map(|()| LibraryEvent::for_patron(EventKind::PatronUpdated, patron_id));
        self.settle("update_patron", outcome)
    }

    /// Replace a patron's name, email and phone; false if it was rejected
    pub fn update_patron(&mut self, patron_id: &str, details: PatronDetails) -> bool {
        self.try_update_patron(patron_id, details).is_ok()
    }

    /// Look up a patron by identifier
    #[must_use]
    pub fn get_patron(&self, patron_id: &str) -> Option<&Patron> {
        self.catalog.get_patron(patron_id)
    }

    /// Every patron, in the order they registered
    #[must_use]
    pub fn list_patrons(&self) -> Vec<Patron> {
        self.catalog.list_patrons()
    }

    /// Lend a book to a patron
    ///
    /// # Errors
    ///
    /// Returns `UnknownPatron`, `UnknownBook`, `BookUnavailable` or
    /// `BorrowLimitReached`.
    pub fn try_checkout_book(&mut self, patron_id: &str, isbn: &str) -> Result<()> {
        let outcome = Self::lend(&mut self.catalog, patron_id, isbn)
            .map(|()| LibraryEvent::for_loan(EventKind::BookCheckedOut, patron_id, isbn));
        self.settle("checkout_book", outcome)
    }

    /// Lend a book to a patron; false if it was rejected
    pub fn checkout_book(&mut self, patron_id: &str, isbn: &str) -> bool {
        self.try_checkout_book(patron_id, isbn).is_ok()
    }

    /// Take a book back from a patron
    ///
    /// # Errors
    ///
    /// Returns `UnknownPatron`, `UnknownBook` or `NotBorrowedByPatron`.
    pub fn try_return_book(&mut self, patron_id: &str, isbn: &str) -> Result<()> {
        let outcome = Self::take_back(&mut self.catalog, patron_id, isbn)
            .map(|()| LibraryEvent::for_loan(EventKind::BookReturned, patron_id, isbn));
        self.settle("return_book", outcome)
    }

    /// Take a book back from a patron; false if it was rejected
    pub fn return_book(&mut self, patron_id: &str, isbn: &str) -> bool {
        self.try_return_book(patron_id, isbn).is_ok()
    }

    /// Counts of total, available and borrowed books
    #[must_use]
    pub fn inventory_report(&self) -> InventoryReport {
        InventoryReport::from_books(self.catalog.books())
    }

    /// Available -> Borrowed; every check runs before either record changes
    fn lend(catalog: &mut Catalog, patron_id: &str, isbn: &str) -> Result<()> {
        let (patron, book) = catalog.loan_pair_mut(patron_id, isbn)?;
        if !book.is_available() {
            return Err(LibraryError::BookUnavailable(isbn.to_string()));
        }
        if !patron.can_borrow_more() {
            return Err(LibraryError::BorrowLimitReached {
                patron_id: patron_id.to_string(),
                limit: patron.max_books_allowed().get(),
            });
        }
        book.set_available(false);
        patron.borrow(isbn);
        Ok(())
    }

    /// Borrowed -> Available
    fn take_back(catalog: &mut Catalog, patron_id: &str, isbn: &str) -> Result<()> {
        let (patron, book) = catalog.loan_pair_mut(patron_id, isbn)?;
        if !patron.give_back(isbn) {
            return Err(LibraryError::NotBorrowedByPatron {
                patron_id: patron_id.to_string(),
                isbn: isbn.to_string(),
            });
        }
        book.set_available(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
