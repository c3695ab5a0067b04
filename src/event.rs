use std::cell::RefCell;

/// Notification sent to the host whenever the pad's image changes
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// A stroke was committed; carries the new encoded image
    Committed { data_url: String },
    /// The last stroke was undone; carries the restored value, which is the
    /// default image (or `None`) once history is empty
    Undone { data_url: Option<String> },
    /// The surface was blanked
    Cleared,
}

impl ChangeEvent {
    /// The value handed to the host's `on_change` callback
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Committed { data_url } => Some(data_url),
            Self::Undone { data_url } => data_url.as_deref(),
            Self::Cleared => None,
        }
    }
}

pub trait ChangeListener {
    fn handle_change(&mut self, event: &ChangeEvent);
}

impl<F> ChangeListener for F
where
    F: FnMut(Option<&str>),
{
    fn handle_change(&mut self, event: &ChangeEvent) {
        self(event.value());
    }
}

/// Broadcasts change events to registered listeners
pub struct ChangeBus {
    listeners: RefCell<Vec<Box<dyn ChangeListener>>>,
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBus")
            .field("listeners", &format!("<{} listeners>", self.listeners.borrow().len()))
            .finish()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeBus {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a listener to receive change events
    pub fn subscribe(&self, listener: Box<dyn ChangeListener>) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Emit an event to all registered listeners
    pub fn emit(&self, event: ChangeEvent) {
        for listener in &mut *self.listeners.borrow_mut() {
            listener.handle_change(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}
