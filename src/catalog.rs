use std::collections::HashMap;

use crate::{
    book::{Book, BookDetails},
    error::{LibraryError, Result},
    patron::{Patron, PatronDetails},
};

/// Records that are stored under a string key
trait Keyed {
    /// The record's unique key
    fn key(&self) -> &str;
}

impl Keyed for Book {
    fn key(&self) -> &str {
        self.isbn()
    }
}

impl Keyed for Patron {
    fn key(&self) -> &str {
        self.patron_id()
    }
}

/// Uniquely keyed records that iterate in insertion order
#[derive(Debug, Clone)]
struct Registry<T> {
    /// Records by key
    entries: HashMap<String, T>,
    /// Keys in insertion order
    order: Vec<String>,
}

impl<T: Keyed> Registry<T> {
    /// Create an empty registry
    fn new() -> Self {
        Self { entries: HashMap::new(), order: Vec::new() }
    }

    /// Whether a record is stored under `key`
    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store a record; returns false if its key is taken
    fn insert(&mut self, item: T) -> bool {
        if self.contains(item.key()) {
            return false;
        }
        let key = item.key().to_string();
        self.order.push(key.clone());
        self.entries.insert(key, item);
        true
    }

    /// Look up a record
    fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    /// Look up a record for in-place mutation
    fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    /// Remove and return a record
    fn remove(&mut self, key: &str) -> Option<T> {
        let item = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        Some(item)
    }

    /// Iterate over records in insertion order
    fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|key| self.entries.get(key))
    }

    /// Number of stored records
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// In-memory store of books and patrons
///
/// The catalog only enforces structural rules (non-blank, unique keys and the
/// "no removal while on loan" rule). Lending rules live in
/// [`LibrarySystem`](crate::system::LibrarySystem).
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Books by ISBN
    books: Registry<Book>,
    /// Patrons by identifier
    patrons: Registry<Patron>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self { books: Registry::new(), patrons: Registry::new() }
    }

    /// Add a book
    ///
    /// # Errors
    ///
    /// Returns `BlankBookIsbn` if the ISBN is blank and `DuplicateBook` if the
    /// ISBN is already catalogued.
    ///
    /// The stored book is always available, whatever state the value carried.
    pub fn add_book(&mut self, mut book: Book) -> Result<()> {
        if book.isbn().trim().is_empty() {
            return Err(LibraryError::BlankBookIsbn);
        }
        // A book enters the catalog on the shelf; only lending flips it.
        book.set_available(true);
        let isbn = book.isbn().to_string();
        if self.books.insert(book) { Ok(()) } else { Err(LibraryError::DuplicateBook(isbn)) }
    }

    /// Register a patron
    ///
    /// # Errors
    ///
    /// Returns `BlankPatronId` if the identifier is blank and
    /// `DuplicatePatron` if it is already registered.
    ///
    /// The stored patron starts with no current loans.
    pub fn add_patron(&mut self, mut patron: Patron) -> Result<()> {
        if patron.patron_id().trim().is_empty() {
            return Err(LibraryError::BlankPatronId);
        }
        // Loans belong to the catalog that issued them.
        patron.release_loans();
        let patron_id = patron.patron_id().to_string();
        if self.patrons.insert(patron) {
            Ok(())
        } else {
            Err(LibraryError::DuplicatePatron(patron_id))
        }
    }

    /// Look up a book by ISBN
    #[must_use]
    pub fn get_book(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn)
    }

    /// Look up a patron by identifier
    #[must_use]
    pub fn get_patron(&self, patron_id: &str) -> Option<&Patron> {
        self.patrons.get(patron_id)
    }

    /// Iterate over books in insertion order
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    /// Iterate over patrons in insertion order
    pub fn patrons(&self) -> impl Iterator<Item = &Patron> {
        self.patrons.iter()
    }

    /// Copy of every book in insertion order
    #[must_use]
    pub fn list_books(&self) -> Vec<Book> {
        self.books.iter().cloned().collect()
    }

    /// Copy of every patron in insertion order
    #[must_use]
    pub fn list_patrons(&self) -> Vec<Patron> {
        self.patrons.iter().cloned().collect()
    }

    /// Number of catalogued books
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Number of registered patrons
    #[must_use]
    pub fn patron_count(&self) -> usize {
        self.patrons.len()
    }

    /// Remove a book that is not on loan
    ///
    /// # Errors
    ///
    /// Returns `UnknownBook` if the ISBN is not catalogued and
    /// `BookCheckedOut` if the book is currently borrowed.
    pub fn remove_book(&mut self, isbn: &str) -> Result<Book> {
        let book = self.books.get(isbn).ok_or_else(|| LibraryError::UnknownBook(isbn.to_string()))?;
        if !book.is_available() {
            return Err(LibraryError::BookCheckedOut(isbn.to_string()));
        }
        self.books.remove(isbn).ok_or_else(|| LibraryError::UnknownBook(isbn.to_string()))
    }

    /// Overwrite a book's bibliographic fields
    ///
    /// # Errors
    ///
    /// Returns `UnknownBook` if the ISBN is not catalogued.
    pub fn update_book(&mut self, isbn: &str, details: BookDetails) -> Result<()> {
        let book =
            self.books.get_mut(isbn).ok_or_else(|| LibraryError::UnknownBook(isbn.to_string()))?;
        book.apply(details);
        Ok(())
    }

    /// Overwrite a patron's contact fields
    ///
    /// # Errors
    ///
    /// Returns `UnknownPatron` if the identifier is not registered.
    pub fn update_patron(&mut self, patron_id: &str, details: PatronDetails) -> Result<()> {
        let patron = self
            .patrons
            .get_mut(patron_id)
            .ok_or_else(|| LibraryError::UnknownPatron(patron_id.to_string()))?;
        patron.apply(details);
        Ok(())
    }

    /// Borrow a patron and a book mutably at the same time
    pub(crate) fn loan_pair_mut(
        &mut self,
        patron_id: &str,
        isbn: &str,
    ) -> Result<(&mut Patron, &mut Book)> {
        let patron = self
            .patrons
            .get_mut(patron_id)
            .ok_or_else(|| LibraryError::UnknownPatron(patron_id.to_string()))?;
        let book =
            self.books.get_mut(isbn).ok_or_else(|| LibraryError::UnknownBook(isbn.to_string()))?;
        Ok((patron, book))
    }
}
