//! Task data model for `TaskOrganizer`.
//!
//! Defines the server-identified [`Task`] record and the ordered
//! [`StatusVocabulary`] of labels a task's status may take. Both are
//! authoritative on the remote service; the client only caches them.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

/// Maximum allowed task title length in characters.
pub const MAX_TASK_TITLE_LENGTH: usize = 80;

/// Identifier of a task, assigned by the remote service.
///
/// Immutable once set. The client never invents ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a service-assigned id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of work with a title and a status drawn from the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Service-assigned identifier.
    pub id: TaskId,
    /// Human-readable title (non-empty, at most [`MAX_TASK_TITLE_LENGTH`] chars).
    pub title: String,
    /// Current status label.
    pub status: String,
}

impl Task {
    /// Creates a task record.
    pub fn new(id: i64, title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(id),
            title: title.into(),
            status: status.into(),
        }
    }
}

/// Error returned when a component receives a structurally invalid argument.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid argument: {0}")]
pub struct InvalidArgument(pub String);

impl From<Infallible> for InvalidArgument {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Ordered sequence of allowed status labels.
///
/// An empty vocabulary means status editing must not be offered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusVocabulary(Vec<String>);

impl StatusVocabulary {
    /// Creates a vocabulary from an ordered list of labels.
    #[must_use]
    pub const fn new(statuses: Vec<String>) -> Self {
        Self(statuses)
    }

    /// Returns `true` if no statuses are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if `status` is one of the labels.
    #[must_use]
    pub fn contains(&self, status: &str) -> bool {
        self.0.iter().any(|s| s == status)
    }

    /// Label at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Position of `status` in the vocabulary.
    #[must_use]
    pub fn position(&self, status: &str) -> Option<usize> {
        self.0.iter().position(|s| s == status)
    }

    /// Iterates over labels in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the labels as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for StatusVocabulary {
    fn from(statuses: Vec<String>) -> Self {
        Self(statuses)
    }
}

impl From<&[&str]> for StatusVocabulary {
    fn from(statuses: &[&str]) -> Self {
        Self(statuses.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for StatusVocabulary {
    fn from(statuses: [&str; N]) -> Self {
        Self(statuses.iter().map(|s| (*s).to_string()).collect())
    }
}

impl TryFrom<serde_json::Value> for StatusVocabulary {
    type Error = InvalidArgument;

    /// Builds a vocabulary from untyped JSON, which must be an array of strings.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Array(items) = value else {
            return Err(InvalidArgument(
                "statuses list must be an array".to_string(),
            ));
        };
        items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => Ok(s),
                other => Err(InvalidArgument(format!(
                    "status must be a string, got {other}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl TryFrom<&serde_json::Value> for StatusVocabulary {
    type Error = InvalidArgument;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        Self::try_from(value.clone())
    }
}
