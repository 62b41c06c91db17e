use crate::{book::Book, events::LibraryEvent, patron::Patron, report::InventoryReport};

/// Text renderings of catalog contents for the console
#[derive(Debug)]
pub struct CatalogView;

impl CatalogView {
    /// Markdown table of books, or a notice when there are none
    #[must_use]
    pub fn books_table(books: &[Book]) -> String {
        if books.is_empty() {
            return "No books in the library.".to_string();
        }

        let mut table = String::from("| # | ISBN | Title | Author | Year | Status |\n");
        table.push_str("|---|------|-------|--------|------|--------|\n");

        for (n, book) in (1_usize..).zip(books) {
            table.push_str(&format!(
                "| {n} | {} | {} | {} | {} | {} |\n",
                book.isbn(),
                book.title(),
                book.author(),
                book.publication_year(),
                Self::format_availability(book)
            ));
        }

        table
    }

    /// Search results, or a notice when nothing matched
    #[must_use]
    pub fn search_results(books: &[Book]) -> String {
        if books.is_empty() {
            "No books found matching your query.".to_string()
        } else {
            format!("Search Results:\n{}", Self::books_table(books))
        }
    }

    /// Markdown table of patrons, or a notice when there are none
    #[must_use]
    pub fn patrons_table(patrons: &[Patron]) -> String {
        if patrons.is_empty() {
            return "No patrons registered.".to_string();
        }

        let mut table = String::from("| # | ID | Name | Email | Phone | Borrowed |\n");
        table.push_str("|---|----|------|-------|-------|----------|\n");

        for (n, patron) in (1_usize..).zip(patrons) {
            table.push_str(&format!(
                "| {n} | {} | {} | {} | {} | {}/{} |\n",
                patron.patron_id(),
                patron.name(),
                patron.email(),
                patron.phone(),
                patron.currently_borrowed().len(),
                patron.max_books_allowed()
            ));
        }

        table
    }

    /// Markdown table of events, oldest first
    #[must_use]
    pub fn events_table(events: &[LibraryEvent]) -> String {
        if events.is_empty() {
            return "No events recorded yet.".to_string();
        }

        let mut table = String::from("| # | Time | Event | Patron | Book |\n");
        table.push_str("|---|------|-------|--------|------|\n");

        for (n, event) in (1_usize..).zip(events) {
            table.push_str(&format!(
                "| {n} | {} | {} | {} | {} |\n",
                event.timestamp().format("%H:%M:%S"),
                event.kind(),
                event.patron_id().unwrap_or("-"),
                event.book_isbn().unwrap_or("-")
            ));
        }

        table
    }

    /// Inventory counts, one per line
    #[must_use]
    pub fn report_summary(report: &InventoryReport) -> String {
        report.to_string()
    }

    /// Shelf status of a book for display
    fn format_availability(book: &Book) -> &'static str {
        if book.is_available() { "Available" } else { "Borrowed" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[test]
    fn test_books_table_rows() {
        let mut borrowed = Book::new("B2", "Dune", "Frank Herbert", 1965);
        borrowed.set_available(false);
        let books = vec![Book::new("B1", "Emma", "Jane Austen", 1815), borrowed];

        let table = CatalogView::books_table(&books);
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("| 1 | B1 | Emma | Jane Austen | 1815 | Available |"));
        assert!(table.contains("| 2 | B2 | Dune | Frank Herbert | 1965 | Borrowed |"));
    }

    #[test]
    fn test_empty_notices() {
        assert_eq!(CatalogView::books_table(&[]), "No books in the library.");
        assert_eq!(CatalogView::patrons_table(&[]), "No patrons registered.");
        assert_eq!(CatalogView::search_results(&[]), "No books found matching your query.");
        assert_eq!(CatalogView::events_table(&[]), "No events recorded yet.");
    }

    #[test]
    fn test_patrons_and_events_tables() {
        let patrons = vec![Patron::new("P001", "John Doe", "john@email.com", "123-456-7890")];
        assert!(
            CatalogView::patrons_table(&patrons)
                .contains("| 1 | P001 | John Doe | john@email.com | 123-456-7890 | 0/5 |")
        );

        let events = vec![LibraryEvent::for_loan(EventKind::BookReturned, "P001", "B1")];
        let table = CatalogView::events_table(&events);
        assert!(table.contains("| BOOK_RETURNED | P001 | B1 |"));
    }

    #[test]
    fn test_report_summary_lines() {
        let report = InventoryReport { total: 3, available: 2, borrowed: 1 };
        assert_eq!(
            CatalogView::report_summary(&report),
            "Total Books: 3\nAvailable Books: 2\nBorrowed Books: 1"
        );
    }
}
