//! REST wire bodies exchanged with the task service.
//!
//! | Endpoint                 | Request               | Response                       |
//! |--------------------------|-----------------------|--------------------------------|
//! | `GET {base}/tasklist`    | -                     | [`TaskListResponse`]           |
//! | `GET {base}/allstatuses` | -                     | [`StatusListResponse`]         |
//! | `POST {base}/task`       | [`CreateTaskRequest`] | [`CreateTaskResponse`]         |
//! | `PUT {base}/task/{id}`   | [`UpdateStatusRequest`] | [`UpdateStatusResponse`]     |
//! | `DELETE {base}/task/{id}`| -                     | [`DeleteTaskResponse`]         |
//!
//! Fields are required unless typed as `Option`; a missing required field
//! is a decode failure. `responseStatus: false` is a domain-level refusal,
//! which callers must treat separately from decode failures.

use serde::{Deserialize, Serialize};

use crate::task::{StatusVocabulary, Task};

/// Content type sent with every request.
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body of `GET {base}/tasklist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListResponse {
    /// Tasks in server order.
    pub tasks: Vec<Task>,
}

/// Body of `GET {base}/allstatuses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusListResponse {
    /// Allowed statuses in server order.
    pub allstatuses: StatusVocabulary,
}

/// Body of `POST {base}/task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Title of the new task.
    pub title: String,
    /// Initial status.
    pub status: String,
}

/// Response to `POST {base}/task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskResponse {
    /// Whether the service accepted the task.
    pub response_status: bool,
    /// The stored task; present when `response_status` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
}

/// Body of `PUT {base}/task/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// Requested status.
    pub status: String,
}

/// Response to `PUT {base}/task/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusResponse {
    /// Whether the service applied the update.
    pub response_status: bool,
    /// The stored status; present when `response_status` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Response to `DELETE {base}/task/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTaskResponse {
    /// Whether the service removed the task.
    pub response_status: bool,
}
