use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

use crate::book::Book;

/// Snapshot of how many books are on the shelf and on loan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InventoryReport {
    /// Books in the catalog
    pub total: usize,
    /// Books that can be checked out
    pub available: usize,
    /// Books currently on loan
    pub borrowed: usize,
}

impl InventoryReport {
    /// Count `books`; every book is either available or borrowed
    #[must_use]
    pub fn from_books<I>(books: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<Book>,
    {
        let (total, available) =
            books.into_iter().fold((0_usize, 0_usize), |(total, available), book| {
                let on_shelf = usize::from(book.borrow().is_available());
                (total.saturating_add(1), available.saturating_add(on_shelf))
            });
        Self { total, available, borrowed: total.saturating_sub(available) }
    }

    /// Whether the counts add up
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.available.checked_add(self.borrowed) == Some(self.total)
    }
}

impl fmt::Display for InventoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Books: {}", self.total)?;
        writeln!(f, "Available Books: {}", self.available)?;
        write!(f, "Borrowed Books: {}", self.borrowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_split_by_availability() {
        let mut books = vec![Book::new("B1", "A", "X", 2000), Book::new("B2", "B", "Y", 2001)];
        if let Some(book) = books.first_mut() {
            book.set_available(false);
        }
        let report = InventoryReport::from_books(&books);
        assert_eq!(report, InventoryReport { total: 2, available: 1, borrowed: 1 });
        assert!(report.is_consistent());
    }

    #[test]
    fn test_empty_catalog() {
        let report = InventoryReport::from_books(Vec::<Book>::new());
        assert_eq!(report, InventoryReport::default());
        assert!(report.is_consistent());
    }
}
