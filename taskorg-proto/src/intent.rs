//! User intents emitted by the UI components.
//!
//! An intent is a request for a mutation that the service has not yet
//! confirmed. Intents are plain values: each registered handler receives
//! its own copy, so mutating one copy never affects another handler or
//! the emitting component.

use crate::task::TaskId;

/// Request to create a task, emitted by the creation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIntent {
    /// Title as typed by the user (not validated client-side).
    pub title: String,
    /// Status chosen in the dialog's selector.
    pub status: String,
}

/// Request to change a task's status, emitted by the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangeIntent {
    /// Task to update.
    pub id: TaskId,
    /// Requested status label.
    pub status: String,
}

/// Request to delete a task, emitted by the task list after confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteIntent {
    /// Task to delete.
    pub id: TaskId,
}

/// Any intent, as carried from the components to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// See [`CreateIntent`].
    Create(CreateIntent),
    /// See [`StatusChangeIntent`].
    ChangeStatus(StatusChangeIntent),
    /// See [`DeleteIntent`].
    Delete(DeleteIntent),
}

impl From<CreateIntent> for Intent {
    fn from(intent: CreateIntent) -> Self {
        Self::Create(intent)
    }
}

impl From<StatusChangeIntent> for Intent {
    fn from(intent: StatusChangeIntent) -> Self {
        Self::ChangeStatus(intent)
    }
}

impl From<DeleteIntent> for Intent {
    fn from(intent: DeleteIntent) -> Self {
        Self::Delete(intent)
    }
}
