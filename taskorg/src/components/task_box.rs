//! The task creation dialog.
//!
//! A modal form with a title field and a status selector. Submitting the
//! form hands a [`CreateIntent`] to every registered callback; the dialog
//! does not validate the title itself and never talks to the network.
//! Lifecycle: closed -> [`TaskBox::show`] -> submit or cancel -> closed.

use crossterm::event::{KeyCode, KeyEvent};
use taskorg_proto::intent::CreateIntent;
use taskorg_proto::task::{InvalidArgument, MAX_TASK_TITLE_LENGTH, StatusVocabulary};

use super::Callbacks;

/// Modal dialog that emits create intents.
#[derive(Debug)]
pub struct TaskBox {
    statuses: StatusVocabulary,
    title: String,
    /// Cursor position in `title`, in characters.
    cursor: usize,
    selected_status: usize,
    open: bool,
    max_title_len: usize,
    create_callbacks: Callbacks<CreateIntent>,
}

impl TaskBox {
    /// Creates a closed dialog with an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            statuses: StatusVocabulary::default(),
            title: String::new(),
            cursor: 0,
            selected_status: 0,
            open: false,
            max_title_len: MAX_TASK_TITLE_LENGTH,
            create_callbacks: Callbacks::new(),
        }
    }

    /// Sets the maximum number of characters the title field accepts.
    #[must_use]
    pub const fn with_max_title_len(mut self, len: usize) -> Self {
        self.max_title_len = len;
        self
    }

    /// Repopulates the status selector. The first status becomes selected.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] if `list` is not a sequence of labels.
    pub fn set_status_vocabulary<V>(&mut self, list: V) -> Result<(), InvalidArgument>
    where
        V: TryInto<StatusVocabulary>,
        V::Error: Into<InvalidArgument>,
    {
        self.set_statuses(list.try_into().map_err(Into::into)?);
        Ok(())
    }

    /// Repopulates the status selector from an already validated vocabulary.
    pub fn set_statuses(&mut self, statuses: StatusVocabulary) {
        self.statuses = statuses;
        self.selected_status = 0;
    }

    /// Appends a handler for create intents.
    ///
    /// ```compile_fail
    /// let mut dialog = taskorg::components::TaskBox::new();
    /// dialog.register_create_callback(String::from("not a function"));
    /// ```
    pub fn register_create_callback<F>(&mut self, callback: F)
    where
        F: FnMut(CreateIntent) + Send + 'static,
    {
        self.create_callbacks.register(callback);
    }

    /// Opens the dialog.
    pub fn show(&mut self) {
        self.open = true;
    }

    /// Dismisses the dialog. Field values are kept for the next opening.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether the dialog is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Current title field value.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Cursor position in the title field, in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Status currently selected, or `None` if the selector is empty.
    #[must_use]
    pub fn selected_status(&self) -> Option<&str> {
        self.statuses.get(self.selected_status)
    }

    /// Current vocabulary.
    #[must_use]
    pub const fn statuses(&self) -> &StatusVocabulary {
        &self.statuses
    }

    /// Replaces the title field value, truncated to the maximum length.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.chars().take(self.max_title_len).collect();
        self.cursor = self.title.chars().count();
    }

    /// Selects `status` in the selector. Returns `false` if it is not offered.
    pub fn select_status(&mut self, status: &str) -> bool {
        match self.statuses.position(status) {
            Some(index) => {
                self.selected_status = index;
                true
            }
            None => false,
        }
    }

    /// Reads the form and hands a [`CreateIntent`] to every handler.
    ///
    /// An empty selector submits an empty status.
    pub fn submit(&mut self) {
        let intent = CreateIntent {
            title: self.title.clone(),
            status: self.selected_status().unwrap_or_default().to_string(),
        };
        tracing::debug!(title = %intent.title, status = %intent.status, "create requested");
        self.create_callbacks.emit(&intent);
    }

    /// Handles a key press while open. Returns `true` if consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.open {
            return false;
        }
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.close(),
            KeyCode::Up => self.selected_status = self.selected_status.saturating_sub(1),
            KeyCode::Down => {
                if self.selected_status + 1 < self.statuses.len() {
                    self.selected_status += 1;
                }
            }
            KeyCode::Char(c) => self.enter_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.title.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.title.chars().count(),
            _ => {}
        }
        true
    }

    /// Byte offset of the character at `index`.
    fn byte_offset(&self, index: usize) -> usize {
        self.title
            .char_indices()
            .nth(index)
            .map_or(self.title.len(), |(offset, _)| offset)
    }

    /// Inserts a character at the cursor unless the field is full.
    fn enter_char(&mut self, c: char) {
        if self.title.chars().count() >= self.max_title_len {
            return;
        }
        let offset = self.byte_offset(self.cursor);
        self.title.insert(offset, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor.
    fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let offset = self.byte_offset(self.cursor - 1);
        self.title.remove(offset);
        self.cursor -= 1;
    }
}

impl Default for TaskBox {
    fn default() -> Self {
        Self::new()
    }
}
