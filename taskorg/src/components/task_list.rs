//! The task list component.
//!
//! Holds the displayed task collection and the status vocabulary, rebuilds
//! its rows from scratch after every mutation, and turns user interaction
//! into [`StatusChangeIntent`] and [`DeleteIntent`] values delivered through
//! registered callbacks.
//!
//! A status selection is only an intent: the displayed row keeps its old
//! status until the coordinator calls [`TaskList::update_task`] with the
//! confirmed value.

use crossterm::event::{KeyCode, KeyEvent};
use taskorg_proto::intent::{DeleteIntent, StatusChangeIntent};
use taskorg_proto::task::{InvalidArgument, StatusVocabulary, Task, TaskId};

use super::Callbacks;

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Task this row is bound to.
    pub id: TaskId,
    /// Title as displayed.
    pub title: String,
    /// Status as displayed.
    pub status: String,
    /// Whether the row offers a status selector.
    pub editable: bool,
}

/// Row-local interaction state. Discarded by every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMode {
    /// No row-local interaction is in progress.
    Browse,
    /// The status selector of a row is open.
    SelectingStatus {
        /// Row the selector belongs to.
        id: TaskId,
        /// Highlighted vocabulary index.
        option: usize,
    },
    /// A delete confirmation prompt is open.
    ConfirmingDelete {
        /// Task the prompt asks about.
        id: TaskId,
        /// Title shown in the prompt.
        title: String,
    },
}

/// Displays tasks most-recent-first and emits status-change and delete intents.
#[derive(Debug)]
pub struct TaskList {
    statuses: StatusVocabulary,
    tasks: Vec<Task>,
    rows: Vec<TaskRow>,
    generation: u64,
    cursor: usize,
    mode: RowMode,
    status_change_callbacks: Callbacks<StatusChangeIntent>,
    delete_callbacks: Callbacks<DeleteIntent>,
}

impl TaskList {
    /// Creates an empty list with an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            statuses: StatusVocabulary::default(),
            tasks: Vec::new(),
            rows: Vec::new(),
            generation: 0,
            cursor: 0,
            mode: RowMode::Browse,
            status_change_callbacks: Callbacks::new(),
            delete_callbacks: Callbacks::new(),
        }
    }

    /// Replaces the vocabulary offered by the per-row status selectors.
    ///
    /// Takes effect on the next render.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] if `list` cannot be read as a sequence
    /// of status labels (e.g. a JSON value that is not an array of strings).
    pub fn set_status_vocabulary<V>(&mut self, list: V) -> Result<(), InvalidArgument>
    where
        V: TryInto<StatusVocabulary>,
        V::Error: Into<InvalidArgument>,
    {
        self.set_statuses(list.try_into().map_err(Into::into)?);
        Ok(())
    }

    /// Replaces the vocabulary with an already validated one.
    ///
    /// Takes effect on the next render.
    pub fn set_statuses(&mut self, statuses: StatusVocabulary) {
        self.statuses = statuses;
    }

    /// Inserts `task` at the front and re-renders.
    ///
    /// A task already displayed under the same id is replaced, so ids stay
    /// unique.
    pub fn show_task(&mut self, task: Task) {
        self.tasks.retain(|t| t.id != task.id);
        self.tasks.insert(0, task);
        self.render();
    }

    /// Overwrites the status of the task with `update.id` and re-renders.
    ///
    /// Unknown ids leave the collection unchanged.
    pub fn update_task(&mut self, update: StatusChangeIntent) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == update.id) {
            task.status = update.status;
        }
        self.render();
    }

    /// Removes the task with `id` and re-renders.
    pub fn remove_task(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id != id);
        self.render();
    }

    /// Empties the collection without re-rendering.
    ///
    /// The caller must trigger a render (any mutating call does).
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Appends a handler for status-change intents.
    ///
    /// Only callables are accepted:
    ///
    /// ```compile_fail
    /// let mut list = taskorg::components::TaskList::new();
    /// list.register_status_change_callback("not a function");
    /// ```
    pub fn register_status_change_callback<F>(&mut self, callback: F)
    where
        F: FnMut(StatusChangeIntent) + Send + 'static,
    {
        self.status_change_callbacks.register(callback);
    }

    /// Appends a handler for delete intents.
    ///
    /// ```compile_fail
    /// let mut list = taskorg::components::TaskList::new();
    /// list.register_delete_callback(42);
    /// ```
    pub fn register_delete_callback<F>(&mut self, callback: F)
    where
        F: FnMut(DeleteIntent) + Send + 'static,
    {
        self.delete_callbacks.register(callback);
    }

    /// Number of displayed tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Displayed tasks, front first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Rows produced by the last render.
    #[must_use]
    pub fn rows(&self) -> &[TaskRow] {
        &self.rows
    }

    /// Current vocabulary.
    #[must_use]
    pub const fn statuses(&self) -> &StatusVocabulary {
        &self.statuses
    }

    /// Number of renders performed so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of the highlighted row.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current row-local interaction state.
    #[must_use]
    pub const fn mode(&self) -> &RowMode {
        &self.mode
    }

    /// Text of the open delete prompt, if any.
    #[must_use]
    pub fn confirmation_prompt(&self) -> Option<String> {
        match &self.mode {
            RowMode::ConfirmingDelete { title, .. } => {
                Some(format!("Are you sure you want to delete task {title}"))
            }
            _ => None,
        }
    }

    /// Emits a status-change intent for a displayed, editable row.
    ///
    /// Returns `false` (and emits nothing) if the row is unknown or the
    /// status is not offered by its selector. The row itself is not changed.
    pub fn select_status(&mut self, id: TaskId, status: &str) -> bool {
        let offered = self.rows.iter().any(|r| r.id == id && r.editable)
            && self.statuses.contains(status);
        self.mode = RowMode::Browse;
        if !offered {
            return false;
        }
        tracing::debug!(task_id = %id, status, "status change requested");
        self.status_change_callbacks.emit(&StatusChangeIntent {
            id,
            status: status.to_string(),
        });
        true
    }

    /// Opens the delete confirmation prompt for a displayed row.
    ///
    /// Returns `false` if no row is bound to `id`.
    pub fn request_delete(&mut self, id: TaskId) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id == id) else {
            return false;
        };
        self.mode = RowMode::ConfirmingDelete {
            id,
            title: row.title.clone(),
        };
        true
    }

    /// Answers the open delete prompt.
    ///
    /// On `true` every delete handler receives the intent; on `false`
    /// nothing is emitted and nothing changes. Returns whether an intent
    /// was emitted.
    pub fn resolve_delete(&mut self, confirmed: bool) -> bool {
        let RowMode::ConfirmingDelete { id, .. } = std::mem::replace(&mut self.mode, RowMode::Browse)
        else {
            return false;
        };
        if !confirmed {
            tracing::debug!(task_id = %id, "delete cancelled");
            return false;
        }
        tracing::debug!(task_id = %id, "delete requested");
        self.delete_callbacks.emit(&DeleteIntent { id });
        true
    }

    /// Handles a key press. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode.clone() {
            RowMode::ConfirmingDelete { .. } => match key.code {
                KeyCode::Char('y' | 'Y') => {
                    self.resolve_delete(true);
                    true
                }
                KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                    self.resolve_delete(false);
                    true
                }
                _ => true,
            },
            RowMode::SelectingStatus { id, option } => {
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.mode = RowMode::SelectingStatus {
                            id,
                            option: option.saturating_sub(1),
                        };
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        let last = self.statuses.len().saturating_sub(1);
                        self.mode = RowMode::SelectingStatus {
                            id,
                            option: (option + 1).min(last),
                        };
                    }
                    KeyCode::Enter => {
                        if let Some(status) = self.statuses.get(option).map(str::to_string) {
                            self.select_status(id, &status);
                        }
                    }
                    KeyCode::Esc => self.mode = RowMode::Browse,
                    _ => {}
                }
                true
            }
            RowMode::Browse => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.cursor = self.cursor.saturating_sub(1);
                    true
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.cursor + 1 < self.rows.len() {
                        self.cursor += 1;
                    }
                    true
                }
                KeyCode::Enter | KeyCode::Char('s') => self.open_status_selector(),
                KeyCode::Char('d') | KeyCode::Delete => match self.rows.get(self.cursor) {
                    Some(row) => {
                        let id = row.id;
                        self.request_delete(id)
                    }
                    None => false,
                },
                _ => false,
            },
        }
    }

    /// Opens the status selector on the highlighted row.
    ///
    /// Returns `false` if there is no row or the row is not editable.
    pub fn open_status_selector(&mut self) -> bool {
        let Some(row) = self.rows.get(self.cursor) else {
            return false;
        };
        if !row.editable {
            return false;
        }
        let option = self.statuses.position(&row.status).unwrap_or(0);
        self.mode = RowMode::SelectingStatus { id: row.id, option };
        true
    }

    /// Rebuilds every row from the collection.
    ///
    /// Row-local state does not survive: open selectors and prompts close.
    fn render(&mut self) {
        let editable = !self.statuses.is_empty();
        self.rows = self
            .tasks
            .iter()
            .map(|task| TaskRow {
                id: task.id,
                title: task.title.clone(),
                status: task.status.clone(),
                editable,
            })
            .collect();
        self.mode = RowMode::Browse;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        self.generation += 1;
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}
