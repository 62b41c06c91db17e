//! Menu-driven console over a [`LibrarySystem`].

use std::{
    io::{self, BufRead, Write},
    num::NonZeroUsize,
    str::FromStr,
};

use clap::ValueEnum;
use colored::Colorize;
use library_lending::{
    Book, BookDetails, CatalogView, EventRecorder, LibrarySystem, Patron, SearchKind,
};
use serde::Serialize;

/// Number of events shown by the "Recent Events" entry and kept by the recorder
pub(crate) const RECENT_EVENTS: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(count) => count,
    None => NonZeroUsize::MIN,
};

/// How listings and reports are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Markdown-style tables
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Add the sample books and patrons the console starts with
pub(crate) fn seed_sample_data(system: &mut LibrarySystem, borrow_limit: NonZeroUsize) {
    system.add_book(Book::new("978-0-132-35088-4", "Clean Code", "Robert C. Martin", 2008));
    system.add_book(Book::new(
        "978-0-201-61622-4",
        "The Pragmatic Programmer",
        "Andrew Hunt",
        1999,
    ));
    system.add_book(Book::new(
        "978-0-596-00784-8",
        "Head First Design Patterns",
        "Eric Freeman",
        2004,
    ));

    system.add_patron(
        Patron::new("P001", "John Doe", "john@email.com", "123-456-7890")
            .with_borrow_limit(borrow_limit),
    );
    system.add_patron(
        Patron::new("P002", "Jane Smith", "jane@email.com", "098-765-4321")
            .with_borrow_limit(borrow_limit),
    );
}

/// Interactive console reading commands from `input` and writing to `out`
#[derive(Debug)]
pub(crate) struct Shell<'a, R, W> {
    /// Library being operated on
    system: &'a mut LibrarySystem,
    /// Listener holding the events shown by "Recent Events"
    recorder: &'a EventRecorder,
    /// Limit given to patrons registered from the console
    borrow_limit: NonZeroUsize,
    /// Listing format
    format: OutputFormat,
    /// Line-oriented command source
    input: R,
    /// Destination for prompts and results
    out: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    /// Create a console over `system`
    pub(crate) fn new(
        system: &'a mut LibrarySystem,
        recorder: &'a EventRecorder,
        borrow_limit: NonZeroUsize,
        format: OutputFormat,
        input: R,
        out: W,
    ) -> Self {
        Self { system, recorder, borrow_limit, format, input, out }
    }

    /// Run the menu until the user exits or input ends
    pub(crate) fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=== Welcome to Library Management System ===".green().bold())?;
        match self.menu_loop() {
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                writeln!(self.out)?;
                self.farewell()
            }
            other => other,
        }
    }

    /// Dispatch menu choices until 0 is entered
    fn menu_loop(&mut self) -> io::Result<()> {
        loop {
            self.display_menu()?;
            match self.read_number::<u32>("Enter your choice: ")? {
                1 => self.add_book()?,
                2 => self.search_books()?,
                3 => self.add_patron()?,
                4 => self.checkout_book()?,
                5 => self.return_book()?,
                6 => self.view_inventory_report()?,
                7 => self.view_all_books()?,
                8 => self.view_all_patrons()?,
                9 => self.remove_book()?,
                10 => self.update_book()?,
                11 => self.view_recent_events()?,
                0 => return self.farewell(),
                _ => writeln!(self.out, "{}", "Invalid choice. Please try again.".red())?,
            }
        }
    }

    /// Print the menu
    fn display_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{}", "=== Library Management System ===".cyan().bold())?;
        for entry in [
            "1. Add Book",
            "2. Search Books",
            "3. Add Patron",
            "4. Checkout Book",
            "5. Return Book",
            "6. View Inventory Report",
            "7. View All Books",
            "8. View All Patrons",
            "9. Remove Book",
            "10. Update Book",
            "11. View Recent Events",
            "0. Exit",
        ] {
            writeln!(self.out, "{entry}")?;
        }
        Ok(())
    }

    /// Print the closing message
    fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "Thank you for using Library Management System!".green())
    }

    /// Print a section heading
    fn heading(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "\n{}", format!("=== {title} ===").yellow().bold())
    }

    /// Print a green or red outcome line
    fn outcome(&mut self, ok: bool, success: &str, failure: &str) -> io::Result<()> {
        if ok {
            writeln!(self.out, "{}", success.green())
        } else {
            writeln!(self.out, "{}", failure.red())
        }
    }

    /// Write `value` as JSON, or `text` in text mode
    fn render<T: Serialize + ?Sized>(&mut self, value: &T, text: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{text}"),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
                writeln!(self.out, "{json}")
            }
        }
    }

    /// Prompt and read one trimmed line; end of input is an `UnexpectedEof` error
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }
        Ok(line.trim().to_string())
    }

    /// Prompt until the line parses as a number
    fn read_number<T: FromStr>(&mut self, prompt: &str) -> io::Result<T> {
        loop {
            if let Ok(value) = self.read_line(prompt)?.parse() {
                return Ok(value);
            }
            writeln!(self.out, "Please enter a valid number.")?;
        }
    }

    /// Prompt for a replacement value; a blank line keeps `current`
    fn read_or_keep(&mut self, prompt: &str, current: &str) -> io::Result<String> {
        let line = self.read_line(&format!("{prompt} [{current}]: "))?;
        Ok(if line.is_empty() { current.to_string() } else { line })
    }

    /// Prompt for a replacement number; a blank line keeps `current`
    fn read_number_or_keep(&mut self, prompt: &str, current: i32) -> io::Result<i32> {
        loop {
            let line = self.read_line(&format!("{prompt} [{current}]: "))?;
            if line.is_empty() {
                return Ok(current);
            }
            if let Ok(value) = line.parse() {
                return Ok(value);
            }
            writeln!(self.out, "Please enter a valid number.")?;
        }
    }

    /// Menu 1
    fn add_book(&mut self) -> io::Result<()> {
        self.heading("Add New Book")?;
        let isbn = self.read_line("Enter ISBN: ")?;
        let title = self.read_line("Enter title: ")?;
        let author = self.read_line("Enter author: ")?;
        let year = self.read_number("Enter publication year: ")?;

        let added = self.system.add_book(Book::new(isbn, title, author, year));
        self.outcome(
            added,
            "Book added successfully!",
            "Failed to add book. ISBN might already exist.",
        )
    }

    /// Menu 2
    fn search_books(&mut self) -> io::Result<()> {
        self.heading("Search Books")?;
        for kind in SearchKind::ALL {
            writeln!(self.out, "{}. Search by {kind}", kind.selector())?;
        }
        let choice = self.read_line("Enter search type (number or name): ")?;
        let query = self.read_line("Enter search query: ")?;

        let Ok(kind) = choice.parse::<SearchKind>() else {
            return writeln!(self.out, "{}", "Invalid search type.".red());
        };
        let results = self.system.search_books(kind, &query);
        self.render(&results, &CatalogView::search_results(&results))
    }

    /// Menu 3
    fn add_patron(&mut self) -> io::Result<()> {
        self.heading("Add New Patron")?;
        let patron_id = self.read_line("Enter patron ID: ")?;
        let name = self.read_line("Enter name: ")?;
        let email = self.read_line("Enter email: ")?;
        let phone = self.read_line("Enter phone: ")?;

        let patron =
            Patron::new(patron_id, name, email, phone).with_borrow_limit(self.borrow_limit);
        let added = self.system.add_patron(patron);
        self.outcome(
            added,
            "Patron added successfully!",
            "Failed to add patron. ID might already exist.",
        )
    }

    /// Menu 4
    fn checkout_book(&mut self) -> io::Result<()> {
        self.heading("Checkout Book")?;
        let patron_id = self.read_line("Enter patron ID: ")?;
        let isbn = self.read_line("Enter book ISBN: ")?;

        let done = self.system.checkout_book(&patron_id, &isbn);
        self.outcome(
            done,
            "Book checked out successfully!",
            "Failed to checkout book. Check patron ID, ISBN, and availability.",
        )
    }

    /// Menu 5
    fn return_book(&mut self) -> io::Result<()> {
        self.heading("Return Book")?;
        let patron_id = self.read_line("Enter patron ID: ")?;
        let isbn = self.read_line("Enter book ISBN: ")?;

        let done = self.system.return_book(&patron_id, &isbn);
        self.outcome(
            done,
            "Book returned successfully!",
            "Failed to return book. Check patron ID and ISBN.",
        )
    }

    /// Menu 6
    fn view_inventory_report(&mut self) -> io::Result<()> {
        self.heading("Inventory Report")?;
        let report = self.system.inventory_report();
        self.render(&report, &CatalogView::report_summary(&report))
    }

    /// Menu 7
    fn view_all_books(&mut self) -> io::Result<()> {
        self.heading("All Books")?;
        let books = self.system.list_books();
        self.render(&books, &CatalogView::books_table(&books))
    }

    /// Menu 8
    fn view_all_patrons(&mut self) -> io::Result<()> {
        self.heading("All Patrons")?;
        let patrons = self.system.list_patrons();
        self.render(&patrons, &CatalogView::patrons_table(&patrons))
    }

    /// Menu 9
    fn remove_book(&mut self) -> io::Result<()> {
        self.heading("Remove Book")?;
        let isbn = self.read_line("Enter book ISBN: ")?;

        let removed = self.system.remove_book(&isbn);
        self.outcome(
            removed,
            "Book removed successfully!",
            "Failed to remove book. It may be unknown or currently borrowed.",
        )
    }

    /// Menu 10
    fn update_book(&mut self) -> io::Result<()> {
        self.heading("Update Book")?;
        let isbn = self.read_line("Enter book ISBN: ")?;
        let Some(current) = self.system.get_book(&isbn).map(Book::details) else {
            return writeln!(self.out, "{}", "Book not found.".red());
        };

        let details = BookDetails {
            title: self.read_or_keep("Enter title", &current.title)?,
            author: self.read_or_keep("Enter author", &current.author)?,
            publication_year: self
                .read_number_or_keep("Enter publication year", current.publication_year)?,
        };
        let updated = self.system.update_book(&isbn, details);
        self.outcome(updated, "Book updated successfully!", "Failed to update book.")
    }

    /// Menu 11
    fn view_recent_events(&mut self) -> io::Result<()> {
        self.heading("Recent Events")?;
        let events = self.recorder.recent(RECENT_EVENTS.get());
        self.render(&events, &CatalogView::events_table(&events))
    }
}
