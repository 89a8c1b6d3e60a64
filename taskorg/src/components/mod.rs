//! UI components of the task organizer.
//!
//! - [`TaskList`] renders the task collection and emits status-change and
//!   delete intents.
//! - [`TaskBox`] is the modal creation dialog and emits create intents.
//!
//! Neither component talks to the network. Both notify interested parties
//! through [`Callbacks`], an explicit handler list that hands every handler
//! its own copy of the intent.

pub mod task_box;
pub mod task_list;

pub use task_box::TaskBox;
pub use task_list::{RowMode, TaskList, TaskRow};

use std::fmt;

/// Boxed intent handler.
type Handler<T> = Box<dyn FnMut(T) + Send>;

/// Ordered fan-out list of intent handlers.
///
/// Handlers run in registration order. Each invocation receives an
/// independent clone of the intent.
pub struct Callbacks<T> {
    handlers: Vec<Handler<T>>,
}

impl<T: Clone> Callbacks<T> {
    /// Creates an empty handler list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    pub fn register<F>(&mut self, handler: F)
    where
        F: FnMut(T) + Send + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Invokes every handler with its own copy of `intent`.
    pub fn emit(&mut self, intent: &T) {
        for handler in &mut self.handlers {
            handler(intent.clone());
        }
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T: Clone> Default for Callbacks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Callbacks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
