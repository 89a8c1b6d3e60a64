//! Task service abstraction for `TaskOrganizer`.
//!
//! Defines the [`TaskService`] trait the coordinator talks to. Concrete
//! implementations:
//! - [`http::HttpTaskService`]: the remote REST service, over `reqwest`
//! - [`memory::InMemoryTaskService`]: in-process stand-in with fault
//!   injection, for tests and offline demo mode

pub mod http;
pub mod memory;

use std::fmt;
use std::future::Future;

use taskorg_proto::codec::CodecError;
use taskorg_proto::task::{StatusVocabulary, Task, TaskId};

/// The five calls the coordinator makes against the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET {base}/tasklist`
    FetchTasks,
    /// `GET {base}/allstatuses`
    FetchStatuses,
    /// `POST {base}/task`
    CreateTask,
    /// `PUT {base}/task/{id}`
    UpdateStatus,
    /// `DELETE {base}/task/{id}`
    DeleteTask,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchTasks => write!(f, "fetch tasks"),
            Self::FetchStatuses => write!(f, "fetch statuses"),
            Self::CreateTask => write!(f, "create task"),
            Self::UpdateStatus => write!(f, "update status"),
            Self::DeleteTask => write!(f, "delete task"),
        }
    }
}

/// Errors that can occur during a service call.
///
/// Everything except [`ServiceError::Rejected`] is a transport-tier
/// failure; `Rejected` means the service answered with a false
/// `responseStatus`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The configured base URL could not be parsed.
    #[error("invalid service url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP request could not be completed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service could not be reached.
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(#[from] CodecError),

    /// A success response lacked a field the operation needs.
    #[error("response to {operation} is missing `{field}`")]
    MissingField {
        /// Operation whose response was incomplete.
        operation: Operation,
        /// Name of the missing field.
        field: &'static str,
    },

    /// The service refused the operation (`responseStatus: false`).
    #[error("{0} was refused by the service")]
    Rejected(Operation),

    /// The task running the call panicked or was cancelled before answering.
    #[error("{0} did not complete")]
    Aborted(Operation),
}

impl ServiceError {
    /// Returns `true` for domain-level refusals, `false` for transport-tier
    /// failures.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Async client of the remote task service.
///
/// Every call either succeeds with the confirmed value or fails with a
/// [`ServiceError`]; callers must not mutate local state on failure.
pub trait TaskService: Send + Sync {
    /// Fetches all tasks in server order.
    fn fetch_tasks(&self) -> impl Future<Output = Result<Vec<Task>, ServiceError>> + Send;

    /// Fetches the status vocabulary.
    fn fetch_statuses(
        &self,
    ) -> impl Future<Output = Result<StatusVocabulary, ServiceError>> + Send;

    /// Creates a task and returns it as stored by the service.
    fn create_task(
        &self,
        title: &str,
        status: &str,
    ) -> impl Future<Output = Result<Task, ServiceError>> + Send;

    /// Updates a task's status and returns the status the service stored.
    fn update_status(
        &self,
        id: TaskId,
        status: &str,
    ) -> impl Future<Output = Result<String, ServiceError>> + Send;

    /// Deletes a task.
    fn delete_task(&self, id: TaskId) -> impl Future<Output = Result<(), ServiceError>> + Send;
}
