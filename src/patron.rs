use std::{collections::BTreeSet, fmt, num::NonZeroUsize};

use serde::{Deserialize, Serialize};

/// Number of books a patron may hold at once unless configured otherwise
pub const DEFAULT_BORROW_LIMIT: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(limit) => limit,
    None => NonZeroUsize::MIN,
};

/// A registered library member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patron {
    /// Unique, immutable catalog key
    patron_id: String,
    /// Display name
    name: String,
    /// Contact email
    email: String,
    /// Contact phone number
    phone: String,
    /// ISBNs currently on loan to this patron
    currently_borrowed: BTreeSet<String>,
    /// Every ISBN ever checked out, oldest first
    borrowing_history: Vec<String>,
    /// Maximum number of concurrent loans
    max_books_allowed: NonZeroUsize,
}

/// Mutable contact fields applied by an update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PatronDetails {
    /// New display name
    pub name: String,
    /// New contact email
    pub email: String,
    /// New contact phone number
    pub phone: String,
}

impl Patron {
    /// Create a patron with no loans and the default borrowing limit
    #[must_use]
    pub fn new(
        patron_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            patron_id: patron_id.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            currently_borrowed: BTreeSet::new(),
            borrowing_history: Vec::new(),
            max_books_allowed: DEFAULT_BORROW_LIMIT,
        }
    }

    /// Replace the borrowing limit
    #[must_use]
    pub fn with_borrow_limit(mut self, limit: NonZeroUsize) -> Self {
        self.max_books_allowed = limit;
        self
    }

    /// The patron's identifier
    #[must_use]
    pub fn patron_id(&self) -> &str {
        &self.patron_id
    }

    /// The patron's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The patron's email
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The patron's phone number
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// ISBNs the patron currently holds
    #[must_use]
    pub fn currently_borrowed(&self) -> &BTreeSet<String> {
        &self.currently_borrowed
    }

    /// Every checkout this patron has made, in order
    #[must_use]
    pub fn borrowing_history(&self) -> &[String] {
        &self.borrowing_history
    }

    /// Maximum number of concurrent loans
    #[must_use]
    pub fn max_books_allowed(&self) -> NonZeroUsize {
        self.max_books_allowed
    }

    /// Whether another checkout would stay within the limit
    #[must_use]
    pub fn can_borrow_more(&self) -> bool {
        self.currently_borrowed.len() < self.max_books_allowed.get()
    }

    /// Whether `isbn` is currently on loan to this patron
    #[must_use]
    pub fn has_borrowed(&self, isbn: &str) -> bool {
        self.currently_borrowed.contains(isbn)
    }

    /// Current contact fields as an update payload
    #[must_use]
    pub fn details(&self) -> PatronDetails {
        PatronDetails {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Record a checkout
    pub(crate) fn borrow(&mut self, isbn: &str) {
        self.currently_borrowed.insert(isbn.to_string());
        self.borrowing_history.push(isbn.to_string());
    }

    /// Record a return; history is left untouched
    pub(crate) fn give_back(&mut self, isbn: &str) -> bool {
        self.currently_borrowed.remove(isbn)
    }

    /// Drop every current loan, keeping the history
    pub(crate) fn release_loans(&mut self) {
        self.currently_borrowed.clear();
    }

    /// Overwrite the contact fields, keeping identifier and loans
    pub(crate) fn apply(&mut self, details: PatronDetails) {
        self.name = details.name;
        self.email = details.email;
        self.phone = details.phone;
    }
}

impl fmt::Display for Patron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patron{{ID='{}', name='{}', email='{}', borrowed={}/{}}}",
            self.patron_id,
            self.name,
            self.email,
            self.currently_borrowed.len(),
            self.max_books_allowed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patron_has_default_limit() {
        let patron = Patron::new("P1", "Ada", "ada@example.com", "555-0100");
        assert_eq!(patron.max_books_allowed().get(), 5);
        assert!(patron.can_borrow_more());
        assert!(patron.currently_borrowed().is_empty());
    }

    #[test]
    fn test_history_survives_return() {
        let mut patron = Patron::new("P1", "Ada", "ada@example.com", "555-0100");
        patron.borrow("B1");
        assert!(patron.give_back("B1"));
        patron.borrow("B1");

        assert_eq!(patron.borrowing_history(), ["B1".to_string(), "B1".to_string()]);
        assert!(patron.has_borrowed("B1"));
        assert!(!patron.give_back("B2"));
    }

    #[test]
    fn test_limit_of_one() {
        let mut patron = Patron::new("P1", "Ada", "", "").with_borrow_limit(NonZeroUsize::MIN);
        patron.borrow("B1");
        assert!(!patron.can_borrow_more());
    }
}
