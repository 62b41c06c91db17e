//! Listeners that react to [`LibraryEvent`]s and the notifier that fans
//! events out to them.

use std::{cell::RefCell, collections::VecDeque, fmt, num::NonZeroUsize, rc::Rc};

use tracing::info;

use crate::events::LibraryEvent;

/// Receives every event published by the library
///
/// Listeners run synchronously inside the publishing call and are expected
/// not to panic; a panicking listener aborts the remaining notifications.
pub trait EventListener {
    /// Called once per successful change
    fn handle(&self, event: &LibraryEvent);
}

impl<F> EventListener for F
where
    F: Fn(&LibraryEvent),
{
    fn handle(&self, event: &LibraryEvent) {
        self(event);
    }
}

/// Writes a one-line rendering of each event to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingListener;

impl EventListener for LoggingListener {
    fn handle(&self, event: &LibraryEvent) {
        info!(
            kind = %event.kind(),
            patron_id = event.patron_id(),
            book_isbn = event.book_isbn(),
            "{event}"
        );
    }
}

/// Keeps a copy of the events it sees
///
/// Clones share the same buffer, so one clone can be registered with the
/// notifier while another is kept to read the events back. A recorder built
/// with [`EventRecorder::with_capacity`] keeps only the newest events.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    /// Recorded events, oldest first
    events: Rc<RefCell<VecDeque<LibraryEvent>>>,
    /// Upper bound on `events`; `None` keeps everything
    capacity: Option<NonZeroUsize>,
}

impl EventRecorder {
    /// Create an empty, unbounded recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that drops the oldest event once `capacity` are held
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            events: Rc::new(RefCell::new(VecDeque::with_capacity(capacity.get()))),
            capacity: Some(capacity),
        }
    }

    /// Maximum number of events kept, if bounded
    #[must_use]
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// Copy of every recorded event
    #[must_use]
    pub fn events(&self) -> Vec<LibraryEvent> {
        self.events.borrow().iter().cloned().collect()
    }

    /// The most recent `count` events, oldest first
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<LibraryEvent> {
        let events = self.events.borrow();
        let skip = events.len().saturating_sub(count);
        events.iter().skip(skip).cloned().collect()
    }

    /// Number of recorded events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventListener for EventRecorder {
    fn handle(&self, event: &LibraryEvent) {
        let mut events = self.events.borrow_mut();
        if let Some(capacity) = self.capacity {
            while events.len() >= capacity.get() {
                events.pop_front();
            }
        }
        events.push_back(event.clone());
    }
}

/// Handle returned on registration, used to unregister a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered set of listeners
pub struct EventNotifier {
    /// Registered listeners in registration order
    listeners: Vec<(ListenerId, Box<dyn EventListener>)>,
    /// Identifier handed to the next registration
    next_id: u64,
}

// Manual implementation of Debug for EventNotifier
impl fmt::Debug for EventNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventNotifier")
            .field("listeners_count", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl Default for EventNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl EventNotifier {
    /// Create a notifier with no listeners
    #[must_use]
    pub fn new() -> Self {
        Self { listeners: Vec::new(), next_id: 0 }
    }

    /// Create a notifier with a [`LoggingListener`] already registered
    #[must_use]
    pub fn with_logging() -> Self {
        let mut notifier = Self::new();
        notifier.register(Box::new(LoggingListener));
        notifier
    }

    /// Append a listener; it is called after all earlier registrations
    pub fn register(&mut self, listener: Box<dyn EventListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver `event` to every listener in registration order
    pub fn publish(&self, event: &LibraryEvent) {
        for (_, listener) in &self.listeners {
            listener.handle(event);
        }
    }
}
