//! Coordinator wiring the UI components to the task service.
//!
//! The coordinator owns the [`TaskList`] and the [`TaskBox`], registers
//! itself as their only intent handler, and is the sole writer of
//! confirmed state. Service calls run as tokio tasks; their outcomes come
//! back over a channel and are applied on the UI thread.
//!
//! # Architecture
//!
//! ```text
//! TaskList / TaskBox ── Intent ──▶ Coordinator ── spawn ──▶ TaskService
//!         ▲                           │  ▲                      │
//!         └──── show/update/remove ───┘  └────── Outcome ───────┘
//! ```
//!
//! Every mutation of displayed state happens after the service confirmed
//! it. A failed call is logged and leaves local state untouched.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use taskorg_proto::intent::{CreateIntent, DeleteIntent, Intent, StatusChangeIntent};
use taskorg_proto::task::{StatusVocabulary, Task, TaskId};

use crate::components::{TaskBox, TaskList};
use crate::service::{Operation, ServiceError, TaskService};

/// Lifecycle of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// [`Coordinator::start`] has not been called.
    Uninitialized,
    /// The initial fetch is in flight.
    Loading,
    /// Tasks and statuses are displayed; mutations are accepted.
    Ready,
    /// The initial load produced data that cannot be displayed. Terminal.
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
            Self::Ready => write!(f, "Ready"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// The "N tasks found" banner above the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMessage {
    /// No successful load yet.
    Waiting,
    /// Loaded, nothing displayed.
    Empty,
    /// Loaded, this many tasks displayed.
    Found(usize),
}

impl ListMessage {
    /// Message for a displayed task count.
    #[must_use]
    pub const fn from_count(count: usize) -> Self {
        if count == 0 {
            Self::Empty
        } else {
            Self::Found(count)
        }
    }
}

impl fmt::Display for ListMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "Waiting for server data."),
            Self::Empty => write!(f, "Found no tasks."),
            Self::Found(1) => write!(f, "Found 1 task."),
            Self::Found(n) => write!(f, "Found {n} tasks."),
        }
    }
}

/// Result of a service call, delivered back to the UI thread.
#[derive(Debug)]
enum Outcome {
    Loaded {
        tasks: Result<Vec<Task>, ServiceError>,
        statuses: Result<StatusVocabulary, ServiceError>,
    },
    Created(Result<Task, ServiceError>),
    StatusUpdated {
        id: TaskId,
        result: Result<String, ServiceError>,
    },
    Deleted {
        id: TaskId,
        result: Result<(), ServiceError>,
    },
}

/// Root component: owns the service boundary and reconciles confirmed
/// results into the task list.
pub struct Coordinator<S> {
    service: Arc<S>,
    task_list: TaskList,
    task_box: TaskBox,
    phase: Phase,
    message: ListMessage,
    statuses: StatusVocabulary,
    /// Tasks acknowledged by the service, in server order.
    confirmed: Vec<Task>,
    intent_rx: mpsc::UnboundedReceiver<Intent>,
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome>,
    in_flight: usize,
}

impl<S: TaskService + 'static> Coordinator<S> {
    /// Creates a coordinator with fresh components wired to `service`.
    #[must_use]
    pub fn new(service: S) -> Self {
        Self::with_components(service, TaskList::new(), TaskBox::new())
    }

    /// Creates a coordinator around existing components.
    ///
    /// Handlers already registered on the components keep firing alongside
    /// the coordinator's own.
    #[must_use]
    pub fn with_components(service: S, mut task_list: TaskList, mut task_box: TaskBox) -> Self {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel::<Intent>();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        let tx = intent_tx.clone();
        task_box.register_create_callback(move |intent: CreateIntent| {
            let _ = tx.send(intent.into());
        });
        let tx = intent_tx.clone();
        task_list.register_status_change_callback(move |intent: StatusChangeIntent| {
            let _ = tx.send(intent.into());
        });
        task_list.register_delete_callback(move |intent: DeleteIntent| {
            let _ = intent_tx.send(intent.into());
        });

        Self {
            service: Arc::new(service),
            task_list,
            task_box,
            phase: Phase::Uninitialized,
            message: ListMessage::Waiting,
            statuses: StatusVocabulary::default(),
            confirmed: Vec::new(),
            intent_rx,
            outcome_tx,
            outcome_rx,
            in_flight: 0,
        }
    }

    /// Starts the initial load of tasks and statuses.
    ///
    /// Both fetches run concurrently. Has no effect unless the coordinator
    /// is [`Phase::Uninitialized`]. Must be called within a tokio runtime.
    pub fn start(&mut self) {
        if self.phase != Phase::Uninitialized {
            tracing::warn!(phase = %self.phase, "initial load already started");
            return;
        }
        self.phase = Phase::Loading;
        tracing::info!("loading tasks and statuses");
        let service = Arc::clone(&self.service);
        self.spawn(
            async move {
                let (tasks, statuses) =
                    tokio::join!(service.fetch_tasks(), service.fetch_statuses());
                Outcome::Loaded { tasks, statuses }
            },
            || Outcome::Loaded {
                tasks: Err(ServiceError::Aborted(Operation::FetchTasks)),
                statuses: Err(ServiceError::Aborted(Operation::FetchStatuses)),
            },
        );
    }

    /// Starts the initial load and waits until it has been applied.
    pub async fn initialize(&mut self) {
        self.start();
        self.settle().await;
    }

    /// Dispatches pending intents and applies every outcome that has
    /// already arrived, without waiting. Returns the number of outcomes
    /// applied.
    pub fn tick(&mut self) -> usize {
        self.dispatch_intents();
        let mut applied = 0;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Dispatches pending intents and waits until no service call is in
    /// flight, applying outcomes in arrival order.
    ///
    /// Never returns if a service call never resolves.
    pub async fn settle(&mut self) {
        loop {
            self.dispatch_intents();
            if self.in_flight == 0 {
                break;
            }
            match self.outcome_rx.recv().await {
                Some(outcome) => self.apply(outcome),
                None => break,
            }
        }
    }

    /// Opens the creation dialog if the coordinator is ready.
    pub fn open_task_box(&mut self) -> bool {
        if !self.can_create() {
            return false;
        }
        self.task_box.show();
        true
    }

    /// Whether the "new task" action is enabled.
    #[must_use]
    pub fn can_create(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current banner message.
    #[must_use]
    pub const fn message(&self) -> ListMessage {
        self.message
    }

    /// Vocabulary fetched during the initial load.
    #[must_use]
    pub const fn statuses(&self) -> &StatusVocabulary {
        &self.statuses
    }

    /// Tasks acknowledged by the service, in server order.
    #[must_use]
    pub fn confirmed_tasks(&self) -> &[Task] {
        &self.confirmed
    }

    /// Number of service calls awaiting an outcome.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// The task list component.
    #[must_use]
    pub const fn task_list(&self) -> &TaskList {
        &self.task_list
    }

    /// The task list component, for forwarding user input.
    pub const fn task_list_mut(&mut self) -> &mut TaskList {
        &mut self.task_list
    }

    /// The creation dialog.
    #[must_use]
    pub const fn task_box(&self) -> &TaskBox {
        &self.task_box
    }

    /// The creation dialog, for forwarding user input.
    pub const fn task_box_mut(&mut self) -> &mut TaskBox {
        &mut self.task_box
    }

    /// Turns every queued intent into a service call.
    fn dispatch_intents(&mut self) {
        while let Ok(intent) = self.intent_rx.try_recv() {
            let service = Arc::clone(&self.service);
            match intent {
                Intent::Create(CreateIntent { title, status }) => {
                    tracing::debug!(%title, %status, "creating task");
                    self.spawn(
                        async move { Outcome::Created(service.create_task(&title, &status).await) },
                        || Outcome::Created(Err(ServiceError::Aborted(Operation::CreateTask))),
                    );
                }
                Intent::ChangeStatus(StatusChangeIntent { id, status }) => {
                    tracing::debug!(task_id = %id, %status, "updating task status");
                    self.spawn(
                        async move {
                            let result = service.update_status(id, &status).await;
                            Outcome::StatusUpdated { id, result }
                        },
                        move || Outcome::StatusUpdated {
                            id,
                            result: Err(ServiceError::Aborted(Operation::UpdateStatus)),
                        },
                    );
                }
                Intent::Delete(DeleteIntent { id }) => {
                    tracing::debug!(task_id = %id, "deleting task");
                    self.spawn(
                        async move {
                            let result = service.delete_task(id).await;
                            Outcome::Deleted { id, result }
                        },
                        move || Outcome::Deleted {
                            id,
                            result: Err(ServiceError::Aborted(Operation::DeleteTask)),
                        },
                    );
                }
            }
        }
    }

    /// Runs `call` on its own task and reports its outcome.
    ///
    /// If the call panics, `aborted` supplies the outcome instead, so every
    /// spawned call is answered exactly once.
    fn spawn<F, A>(&mut self, call: F, aborted: A)
    where
        F: Future<Output = Outcome> + Send + 'static,
        A: FnOnce() -> Outcome + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.outcome_tx.clone();
        let handle = tokio::spawn(call);
        tokio::spawn(async move {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(error = %e, "service call did not complete");
                    aborted()
                }
            };
            let _ = tx.send(outcome);
        });
    }

    fn apply(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            Outcome::Loaded { tasks, statuses } => self.finish_load(tasks, statuses),
            Outcome::Created(result) => self.finish_create(result),
            Outcome::StatusUpdated { id, result } => self.finish_update(id, result),
            Outcome::Deleted { id, result } => self.finish_delete(id, result),
        }
    }

    fn finish_load(
        &mut self,
        tasks: Result<Vec<Task>, ServiceError>,
        statuses: Result<StatusVocabulary, ServiceError>,
    ) {
        let tasks = tasks.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to fetch tasks, showing none");
            Vec::new()
        });
        let statuses = statuses.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to fetch statuses, status editing disabled");
            StatusVocabulary::default()
        });

        if let Some(id) = first_duplicate_id(&tasks) {
            tracing::error!(task_id = %id, "task list contains duplicate ids, giving up");
            self.phase = Phase::Failed;
            return;
        }
        self.task_list.set_statuses(statuses.clone());
        self.task_box.set_statuses(statuses.clone());

        self.statuses = statuses;
        self.confirmed = tasks;
        self.populate();
        self.phase = Phase::Ready;
        self.refresh_message();
        tracing::info!(
            tasks = self.confirmed.len(),
            statuses = self.statuses.len(),
            "initial load complete"
        );
    }

    fn finish_create(&mut self, result: Result<Task, ServiceError>) {
        let task = match result {
            Ok(task) => task,
            Err(e) => {
                tracing::warn!(error = %e, "failed to add task");
                return;
            }
        };
        self.confirmed.retain(|t| t.id != task.id);
        self.task_list.clear();
        self.populate();
        self.task_list.show_task(task.clone());
        self.confirmed.push(task.clone());
        self.task_box.close();
        self.refresh_message();
        tracing::info!(task_id = %task.id, title = %task.title, "task added");
    }

    fn finish_update(&mut self, id: TaskId, result: Result<String, ServiceError>) {
        let status = match result {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(task_id = %id, error = %e, "failed to update task status");
                return;
            }
        };
        if let Some(task) = self.confirmed.iter_mut().find(|t| t.id == id) {
            task.status.clone_from(&status);
        }
        tracing::info!(task_id = %id, %status, "task status updated");
        self.task_list.update_task(StatusChangeIntent { id, status });
    }

    fn finish_delete(&mut self, id: TaskId, result: Result<(), ServiceError>) {
        if let Err(e) = result {
            tracing::warn!(task_id = %id, error = %e, "failed to delete task");
            return;
        }
        self.confirmed.retain(|t| t.id != id);
        self.task_list.remove_task(id);
        self.refresh_message();
        tracing::info!(task_id = %id, "task deleted");
    }

    /// Shows every confirmed task, one `show_task` per task in server order.
    ///
    /// Front insertion means the last server element ends up first.
    fn populate(&mut self) {
        for task in &self.confirmed {
            self.task_list.show_task(task.clone());
        }
    }

    fn refresh_message(&mut self) {
        self.message = ListMessage::from_count(self.task_list.task_count());
    }
}

impl<S> fmt::Debug for Coordinator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("phase", &self.phase)
            .field("message", &self.message)
            .field("confirmed", &self.confirmed.len())
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

/// First id that appears more than once in `tasks`.
fn first_duplicate_id(tasks: &[Task]) -> Option<TaskId> {
    let mut seen = std::collections::HashSet::new();
    tasks.iter().map(|t| t.id).find(|id| !seen.insert(*id))
}
