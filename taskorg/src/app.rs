//! Application state and event handling.
//!
//! Routes key presses to whichever component is in front: the creation
//! dialog when it is open, the task list while one of its prompts is
//! open, otherwise the global shortcuts and then the task list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::components::RowMode;
use crate::coordinator::Coordinator;
use crate::service::TaskService;

/// Which component currently receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The task list (default).
    TaskList,
    /// A status selector on a task row.
    StatusSelector,
    /// The delete confirmation prompt.
    DeletePrompt,
    /// The creation dialog.
    TaskBox,
}

/// Main application state.
pub struct App<S> {
    /// The coordinator and, through it, the components.
    pub coordinator: Coordinator<S>,
    /// Label of the service in use, for the status bar.
    pub service_label: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<S: TaskService + 'static> App<S> {
    /// Create an application around a coordinator.
    #[must_use]
    pub fn new(coordinator: Coordinator<S>, service_label: impl Into<String>) -> Self {
        Self {
            coordinator,
            service_label: service_label.into(),
            should_quit: false,
        }
    }

    /// Component that currently receives key presses.
    #[must_use]
    pub fn focus(&self) -> Focus {
        if self.coordinator.task_box().is_open() {
            return Focus::TaskBox;
        }
        match self.coordinator.task_list().mode() {
            RowMode::Browse => Focus::TaskList,
            RowMode::SelectingStatus { .. } => Focus::StatusSelector,
            RowMode::ConfirmingDelete { .. } => Focus::DeletePrompt,
        }
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.should_quit = true;
            return;
        }

        match self.focus() {
            Focus::TaskBox => {
                self.coordinator.task_box_mut().handle_key(key);
            }
            Focus::StatusSelector | Focus::DeletePrompt => {
                self.coordinator.task_list_mut().handle_key(key);
            }
            Focus::TaskList => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('n') => {
                    self.coordinator.open_task_box();
                }
                _ => {
                    self.coordinator.task_list_mut().handle_key(key);
                }
            },
        }
    }
}
