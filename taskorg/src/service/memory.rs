//! In-process task service for testing and offline demo mode.
//!
//! Behaves like the remote service (server-assigned ids, validation of
//! titles and statuses, `responseStatus: false` on refusal) and lets
//! callers inject faults or latency per [`Operation`]. Clones share state,
//! so a test can keep a handle while the coordinator owns another.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use taskorg_proto::codec::CodecError;
use taskorg_proto::task::{MAX_TASK_TITLE_LENGTH, StatusVocabulary, Task, TaskId};

use super::{Operation, ServiceError, TaskService};

/// A failure to inject into the next call of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The call fails before reaching the service.
    Unreachable,
    /// The service answers with this non-success HTTP status.
    HttpStatus(u16),
    /// The service answers with an undecodable body.
    Malformed,
    /// The service answers `responseStatus: false`.
    Refuse,
}

impl Fault {
    fn into_error(self, operation: Operation) -> ServiceError {
        match self {
            Self::Unreachable => ServiceError::Unreachable(format!("{operation}: connection refused")),
            Self::HttpStatus(code) => ServiceError::Status(code),
            Self::Malformed => ServiceError::Malformed(CodecError::Malformed(format!(
                "{operation}: expected value at line 1 column 1"
            ))),
            Self::Refuse => ServiceError::Rejected(operation),
        }
    }
}

#[derive(Debug)]
struct MemoryState {
    tasks: Vec<Task>,
    statuses: StatusVocabulary,
    next_id: i64,
    faults: HashMap<Operation, VecDeque<Fault>>,
    latency: HashMap<Operation, Duration>,
    calls: HashMap<Operation, usize>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            statuses: StatusVocabulary::default(),
            next_id: 1,
            faults: HashMap::new(),
            latency: HashMap::new(),
            calls: HashMap::new(),
        }
    }
}

/// Task service backed by process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskService {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryTaskService {
    /// Creates a service with the given vocabulary and no tasks.
    #[must_use]
    pub fn new(statuses: impl Into<StatusVocabulary>) -> Self {
        let service = Self::default();
        service.state.lock().statuses = statuses.into();
        service
    }

    /// Seeds the service with tasks, keeping their ids.
    #[must_use]
    pub fn with_tasks(self, tasks: impl IntoIterator<Item = Task>) -> Self {
        {
            let mut state = self.state.lock();
            state.tasks.extend(tasks);
            state.next_id = state.tasks.iter().map(|t| t.id.get()).max().unwrap_or(0) + 1;
        }
        self
    }

    /// A small data set for offline demo mode.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(["WAITING", "ACTIVE", "DONE"]).with_tasks([
            Task::new(1, "Paint roof", "WAITING"),
            Task::new(2, "Clean windows", "ACTIVE"),
            Task::new(3, "Wash floor", "DONE"),
        ])
    }

    /// Makes the next call of `operation` fail with `fault`.
    ///
    /// Faults queue up: each call consumes one.
    pub fn fail_next(&self, operation: Operation, fault: Fault) {
        self.state
            .lock()
            .faults
            .entry(operation)
            .or_default()
            .push_back(fault);
    }

    /// Delays every call of `operation` by `delay` before it is answered.
    pub fn set_latency(&self, operation: Operation, delay: Duration) {
        self.state.lock().latency.insert(operation, delay);
    }

    /// Tasks as currently stored, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.state.lock().tasks.clone()
    }

    /// Number of calls made to `operation` so far.
    #[must_use]
    pub fn calls(&self, operation: Operation) -> usize {
        self.state.lock().calls.get(&operation).copied().unwrap_or(0)
    }

    /// Records the call, waits out any latency, and pops a queued fault.
    async fn begin(&self, operation: Operation) -> Result<(), ServiceError> {
        let delay = {
            let mut state = self.state.lock();
            *state.calls.entry(operation).or_default() += 1;
            state.latency.get(&operation).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let fault = self
            .state
            .lock()
            .faults
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);
        match fault {
            Some(fault) => Err(fault.into_error(operation)),
            None => Ok(()),
        }
    }
}

impl TaskService for InMemoryTaskService {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        self.begin(Operation::FetchTasks).await?;
        Ok(self.snapshot())
    }

    async fn fetch_statuses(&self) -> Result<StatusVocabulary, ServiceError> {
        self.begin(Operation::FetchStatuses).await?;
        Ok(self.state.lock().statuses.clone())
    }

    async fn create_task(&self, title: &str, status: &str) -> Result<Task, ServiceError> {
        self.begin(Operation::CreateTask).await?;
        let mut state = self.state.lock();
        let title_len = title.chars().count();
        if title_len == 0 || title_len > MAX_TASK_TITLE_LENGTH || !state.statuses.contains(status)
        {
            tracing::debug!(title, status, "in-memory service refused create");
            return Err(ServiceError::Rejected(Operation::CreateTask));
        }
        let task = Task::new(state.next_id, title, status);
        state.next_id += 1;
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_status(&self, id: TaskId, status: &str) -> Result<String, ServiceError> {
        self.begin(Operation::UpdateStatus).await?;
        let mut state = self.state.lock();
        if !state.statuses.contains(status) {
            return Err(ServiceError::Rejected(Operation::UpdateStatus));
        }
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ServiceError::Rejected(Operation::UpdateStatus))?;
        task.status = status.to_string();
        Ok(task.status.clone())
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), ServiceError> {
        self.begin(Operation::DeleteTask).await?;
        let mut state = self.state.lock();
        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        if state.tasks.len() == before {
            return Err(ServiceError::Rejected(Operation::DeleteTask));
        }
        Ok(())
    }
}
