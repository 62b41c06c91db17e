use std::num::NonZeroUsize;

use crate::{
    book::{Book, BookDetails},
    error::LibraryError,
    events::EventKind,
    observers::EventRecorder,
    patron::{Patron, PatronDetails},
    report::InventoryReport,
    search::SearchKind,
    system::LibrarySystem,
};

/// Helper function to set up a library with an event recorder attached
fn setup_test_system() -> (LibrarySystem, EventRecorder) {
    let mut system = LibrarySystem::new();
    let recorder = EventRecorder::new();
    system.register_listener(recorder.clone());
    (system, recorder)
}

/// Helper function to stock the library with `count` books named B1..Bn
fn stock(system: &mut LibrarySystem, count: usize) -> Vec<String> {
    (1..=count)
        .map(|n| {
            let isbn = format!("B{n}");
            assert!(system.add_book(Book::new(isbn.clone(), format!("Title {n}"), "Author", 2000)));
            isbn
        })
        .collect()
}

fn patron(id: &str) -> Patron {
    Patron::new(id, "Test User", "test@example.com", "555-0100")
}

fn kinds(recorder: &EventRecorder) -> Vec<EventKind> {
    recorder.events().iter().map(|event| event.kind()).collect()
}

#[test]
fn test_add_then_get_returns_same_book() {
    let (mut system, recorder) = setup_test_system();
    let book = Book::new("B1", "X", "Y", 2020);

    assert!(system.add_book(book.clone()));
    assert_eq!(system.get_book("B1"), Some(&book));
    assert!(system.get_book("B1").is_some_and(Book::is_available));

    assert!(!system.add_book(Book::new("B1", "Other", "Z", 1999)));
    assert_eq!(system.list_books(), vec![book]);
    assert_eq!(kinds(&recorder), [EventKind::BookAdded]);
}

#[test]
fn test_checkout_return_scenario() {
    let (mut system, recorder) = setup_test_system();
    assert!(system.add_book(Book::new("B1", "X", "Y", 2020)));
    assert!(system.add_patron(patron("P1")));

    assert!(system.checkout_book("P1", "B1"));
    assert!(system.get_book("B1").is_some_and(|b| !b.is_available()));

    assert_eq!(
        system.try_checkout_book("P1", "B1"),
        Err(LibraryError::BookUnavailable("B1".to_string()))
    );

    assert!(system.return_book("P1", "B1"));
    assert!(system.get_book("B1").is_some_and(Book::is_available));

    assert_eq!(
        system.try_return_book("P1", "B1"),
        Err(LibraryError::NotBorrowedByPatron {
            patron_id: "P1".to_string(),
            isbn: "B1".to_string()
        })
    );

    assert_eq!(
        kinds(&recorder),
        [
            EventKind::BookAdded,
            EventKind::PatronAdded,
            EventKind::BookCheckedOut,
            EventKind::BookReturned
        ]
    );
}

#[test]
fn test_round_trip_keeps_history() {
    let (mut system, _) = setup_test_system();
    stock(&mut system, 1);
    assert!(system.add_patron(patron("P1")));

    for _ in 0..2 {
        assert!(system.checkout_book("P1", "B1"));
        assert!(system.return_book("P1", "B1"));
    }

    let p1 = system.get_patron("P1");
    assert!(p1.is_some_and(|p| p.currently_borrowed().is_empty()));
    assert_eq!(p1.map(Patron::borrowing_history), Some(&["B1".to_string(), "B1".to_string()][..]));
}

#[test]
fn test_borrow_limit_blocks_extra_checkout() {
    let (mut system, _) = setup_test_system();
    let isbns = stock(&mut system, 4);
    let limit = NonZeroUsize::new(3).unwrap_or(NonZeroUsize::MIN);
    assert!(system.add_patron(patron("P1").with_borrow_limit(limit)));

    for isbn in isbns.iter().take(3) {
        assert!(system.checkout_book("P1", isbn));
    }

    let before = system.list_books();
    assert_eq!(
        system.try_checkout_book("P1", "B4"),
        Err(LibraryError::BorrowLimitReached { patron_id: "P1".to_string(), limit: 3 })
    );
    assert_eq!(system.list_books(), before);
    assert!(system.get_book("B4").is_some_and(Book::is_available));
    assert_eq!(system.get_patron("P1").map(|p| p.currently_borrowed().len()), Some(3));
}

#[test]
fn test_default_limit_is_five() {
    let (mut system, _) = setup_test_system();
    let isbns = stock(&mut system, 6);
    assert!(system.add_patron(patron("P1")));

    let granted = isbns.iter().filter(|isbn| system.checkout_book("P1", isbn)).count();
    assert_eq!(granted, 5);
    assert!(system.get_book("B6").is_some_and(Book::is_available));
}

#[test]
fn test_unknown_ids_are_rejected_without_events() {
    let (mut system, recorder) = setup_test_system();
    stock(&mut system, 1);
    assert!(system.add_patron(patron("P1")));
    let baseline = recorder.len();

    assert_eq!(
        system.try_checkout_book("ghost", "B1"),
        Err(LibraryError::UnknownPatron("ghost".to_string()))
    );
    assert_eq!(
        system.try_checkout_book("P1", "missing"),
        Err(LibraryError::UnknownBook("missing".to_string()))
    );
    assert!(!system.return_book("ghost", "B1"));
    assert!(!system.return_book("P1", "missing"));
    assert!(!system.remove_book("missing"));
    assert!(!system.update_patron("ghost", patron("ghost").details()));

    assert_eq!(recorder.len(), baseline);
    assert!(system.get_book("B1").is_some_and(Book::is_available));
}

#[test]
fn test_other_patron_cannot_return_loan() {
    let (mut system, _) = setup_test_system();
    stock(&mut system, 1);
    assert!(system.add_patron(patron("P1")));
    assert!(system.add_patron(patron("P2")));
    assert!(system.checkout_book("P1", "B1"));

    assert!(!system.return_book("P2", "B1"));
    assert!(!system.checkout_book("P2", "B1"));
    assert!(system.get_book("B1").is_some_and(|b| !b.is_available()));
    assert!(system.get_patron("P1").is_some_and(|p| p.has_borrowed("B1")));
}

#[test]
fn test_remove_only_after_return() {
    let (mut system, recorder) = setup_test_system();
    stock(&mut system, 1);
    assert!(system.add_patron(patron("P1")));
    assert!(system.checkout_book("P1", "B1"));

    assert_eq!(
        system.try_remove_book("B1"),
        Err(LibraryError::BookCheckedOut("B1".to_string()))
    );
    assert!(system.return_book("P1", "B1"));
    assert!(system.remove_book("B1"));
    assert!(system.get_book("B1").is_none());
    assert_eq!(recorder.events().last().map(|e| e.kind()), Some(EventKind::BookRemoved));
}

#[test]
fn test_updates_keep_identity_and_state() {
    let (mut system, recorder) = setup_test_system();
    stock(&mut system, 1);
    assert!(system.add_patron(patron("P1")));
    assert!(system.checkout_book("P1", "B1"));

    let details = BookDetails {
        title: "Revised".to_string(),
        author: "New Author".to_string(),
        publication_year: 2024,
    };
    assert!(system.update_book("B1", details));
    let contact = PatronDetails {
        name: "Renamed".to_string(),
        email: "renamed@example.com".to_string(),
        phone: "555-0199".to_string(),
    };
    assert!(system.update_patron("P1", contact));

    let book = system.get_book("B1");
    assert_eq!(book.map(Book::title), Some("Revised"));
    assert_eq!(book.map(Book::isbn), Some("B1"));
    assert!(book.is_some_and(|b| !b.is_available()));
    let p1 = system.get_patron("P1");
    assert_eq!(p1.map(Patron::name), Some("Renamed"));
    assert!(p1.is_some_and(|p| p.has_borrowed("B1")));

    let tail: Vec<EventKind> = recorder.recent(2).iter().map(|e| e.kind()).collect();
    assert_eq!(tail, [EventKind::BookUpdated, EventKind::PatronUpdated]);
}

#[test]
fn test_inventory_invariant_holds_throughout() {
    let (mut system, _) = setup_test_system();
    let mut reports = vec![system.inventory_report()];
    stock(&mut system, 3);
    reports.push(system.inventory_report());
    assert!(system.add_patron(patron("P1")));
    assert!(system.checkout_book("P1", "B1"));
    reports.push(system.inventory_report());
    assert!(system.checkout_book("P1", "B2"));
    assert!(!system.checkout_book("P1", "B2"));
    reports.push(system.inventory_report());
    assert!(system.return_book("P1", "B1"));
    assert!(system.remove_book("B1"));
    reports.push(system.inventory_report());

    assert!(reports.iter().all(InventoryReport::is_consistent));
    assert_eq!(
        system.inventory_report(),
        InventoryReport { total: 2, available: 1, borrowed: 1 }
    );
    assert_eq!(system.borrowed_books().len(), 1);
    assert_eq!(system.available_books().len(), 1);
}

#[test]
fn test_search_follows_catalog_order_and_mutations() {
    let (mut system, _) = setup_test_system();
    assert!(system.add_book(Book::new("B2", "Rust in Action", "Tim McNamara", 2021)));
    assert!(system.add_book(Book::new("B1", "Programming Rust", "Jim Blandy", 2017)));
    assert!(system.add_book(Book::new("B3", "Zero To Production", "Luca Palmieri", 2022)));

    let first = system.search_by_title("rust");
    assert_eq!(first, system.search_by_title("rust"));
    let isbns: Vec<&str> = first.iter().map(Book::isbn).collect();
    assert_eq!(isbns, ["B2", "B1"]);

    assert_eq!(system.search_by_author("PALMIERI").len(), 1);
    assert_eq!(system.search_by_isbn("B3").len(), 1);
    assert!(system.search_books(SearchKind::Title, "   ").is_empty());

    assert!(system.remove_book("B2"));
    assert_eq!(system.search_by_title("rust").len(), 1);
}

#[test]
fn test_unregistered_listener_stops_receiving() {
    let mut system = LibrarySystem::new();
    let recorder = EventRecorder::new();
    let id = system.register_listener(recorder.clone());

    stock(&mut system, 1);
    assert!(system.unregister_listener(id));
    assert!(system.add_patron(patron("P1")));

    assert_eq!(kinds(&recorder), [EventKind::BookAdded]);
}

#[test]
fn test_records_enter_catalog_without_loan_state() {
    let (mut lender, _) = setup_test_system();
    assert!(lender.add_book(Book::new("B1", "X", "Y", 2020)));
    assert!(lender.add_patron(patron("P1").with_borrow_limit(NonZeroUsize::MIN)));
    assert!(lender.checkout_book("P1", "B1"));

    let lent_copy = lender.get_book("B1").cloned();
    let holder_copy = lender.get_patron("P1").cloned();
    assert!(lent_copy.as_ref().is_some_and(|book| !book.is_available()));
    assert!(holder_copy.as_ref().is_some_and(|p| p.has_borrowed("B1")));

    let (mut system, _) = setup_test_system();
    assert!(lent_copy.is_some_and(|book| system.add_book(book)));
    assert!(holder_copy.is_some_and(|p| system.add_patron(p)));
    assert!(system.add_patron(patron("P2")));

    assert!(system.get_book("B1").is_some_and(Book::is_available));
    let registered = system.get_patron("P1");
    assert!(registered.is_some_and(|p| p.currently_borrowed().is_empty()));
    assert_eq!(registered.map(|p| p.borrowing_history().len()), Some(1));
    assert_eq!(system.inventory_report(), InventoryReport { total: 1, available: 1, borrowed: 0 });

    // No phantom loan to return, and the book lends normally.
    assert!(!system.return_book("P1", "B1"));
    assert!(system.checkout_book("P2", "B1"));
    assert!(!system.checkout_book("P1", "B1"));
    assert!(system.return_book("P2", "B1"));
    assert!(system.remove_book("B1"));
}
