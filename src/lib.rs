//! In-memory library catalog and lending tracker.
//!
//! This crate keeps books and patrons in a [`Catalog`], searches it with a
//! [`SearchKind`], and drives checkout/return transitions through
//! [`LibrarySystem`], which notifies registered [`EventListener`]s after every
//! successful change.

pub mod book;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod observers;
pub mod patron;
pub mod report;
pub mod search;
pub mod system;
pub mod visualization;

pub use book::{Book, BookDetails};
pub use catalog::Catalog;
pub use config::LibraryConfig;
pub use error::LibraryError;
pub use events::{EventKind, LibraryEvent};
pub use observers::{EventListener, EventNotifier, EventRecorder, ListenerId, LoggingListener};
pub use patron::{Patron, PatronDetails};
pub use report::InventoryReport;
pub use search::SearchKind;
pub use system::LibrarySystem;
pub use visualization::CatalogView;
