//! REST implementation of [`TaskService`].
//!
//! Talks JSON to `{base}/tasklist`, `{base}/allstatuses`, `{base}/task` and
//! `{base}/task/{id}`. A non-2xx status, an undecodable body, or a missing
//! field fails the call; `responseStatus: false` maps to
//! [`ServiceError::Rejected`].

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use taskorg_proto::codec;
use taskorg_proto::task::{StatusVocabulary, Task, TaskId};
use taskorg_proto::wire::{
    self, CreateTaskRequest, CreateTaskResponse, DeleteTaskResponse, StatusListResponse,
    TaskListResponse, UpdateStatusRequest, UpdateStatusResponse,
};
use url::Url;

use super::{Operation, ServiceError, TaskService};

/// HTTP client for the remote task service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpTaskService {
    client: Client,
    base_url: Url,
}

impl HttpTaskService {
    /// Creates a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidUrl`] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Ok(Self::with_client(Client::new(), Url::parse(base_url)?))
    }

    /// Creates a client reusing an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `path` to the base URL.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Sends a request and returns the body of a 2xx response.
    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ServiceError> {
        let response = request
            .header(CONTENT_TYPE, wire::CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ServiceError::Unreachable(e.to_string())
                } else {
                    ServiceError::Http(e)
                }
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

impl TaskService for HttpTaskService {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        let body = self.send(self.client.get(self.endpoint("tasklist"))).await?;
        let list: TaskListResponse = codec::decode(&body)?;
        tracing::debug!(count = list.tasks.len(), "fetched task list");
        Ok(list.tasks)
    }

    async fn fetch_statuses(&self) -> Result<StatusVocabulary, ServiceError> {
        let body = self
            .send(self.client.get(self.endpoint("allstatuses")))
            .await?;
        let list: StatusListResponse = codec::decode(&body)?;
        Ok(list.allstatuses)
    }

    async fn create_task(&self, title: &str, status: &str) -> Result<Task, ServiceError> {
        let request = CreateTaskRequest {
            title: title.to_string(),
            status: status.to_string(),
        };
        let body = self
            .send(
                self.client
                    .post(self.endpoint("task"))
                    .body(codec::encode(&request)?),
            )
            .await?;
        let response: CreateTaskResponse = codec::decode(&body)?;
        if !response.response_status {
            return Err(ServiceError::Rejected(Operation::CreateTask));
        }
        response.task.ok_or(ServiceError::MissingField {
            operation: Operation::CreateTask,
            field: "task",
        })
    }

    async fn update_status(&self, id: TaskId, status: &str) -> Result<String, ServiceError> {
        let request = UpdateStatusRequest {
            status: status.to_string(),
        };
        let body = self
            .send(
                self.client
                    .put(self.endpoint(&format!("task/{id}")))
                    .body(codec::encode(&request)?),
            )
            .await?;
        let response: UpdateStatusResponse = codec::decode(&body)?;
        if !response.response_status {
            return Err(ServiceError::Rejected(Operation::UpdateStatus));
        }
        response.status.ok_or(ServiceError::MissingField {
            operation: Operation::UpdateStatus,
            field: "status",
        })
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), ServiceError> {
        let body = self
            .send(self.client.delete(self.endpoint(&format!("task/{id}"))))
            .await?;
        let response: DeleteTaskResponse = codec::decode(&body)?;
        if !response.response_status {
            return Err(ServiceError::Rejected(Operation::DeleteTask));
        }
        Ok(())
    }
}
