//! Integration tests for the coordinator's initial load.
//!
//! Covers ordering of the loaded list, the banner message, vocabulary
//! propagation to both components, and degradation when either fetch
//! fails.
//!
//! Verification command: `cargo test --test initial_load`

use std::time::Duration;

use taskorg::coordinator::{Coordinator, ListMessage, Phase};
use taskorg::service::{Operation, TaskService};
use taskorg::service::memory::{Fault, InMemoryTaskService};
use taskorg_proto::task::{StatusVocabulary, Task, TaskId};

// =============================================================================
// Test helpers
// =============================================================================

fn two_task_service() -> InMemoryTaskService {
    InMemoryTaskService::new(["todo", "done"])
        .with_tasks([Task::new(1, "A", "todo"), Task::new(2, "B", "done")])
}

fn displayed_ids<S: TaskService + 'static>(coordinator: &Coordinator<S>) -> Vec<i64> {
    coordinator
        .task_list()
        .rows()
        .iter()
        .map(|row| row.id.get())
        .collect()
}

// =============================================================================
// Successful load
// =============================================================================

#[tokio::test]
async fn two_tasks_are_shown_newest_first() {
    let mut coordinator = Coordinator::new(two_task_service());
    coordinator.initialize().await;

    assert_eq!(coordinator.phase(), Phase::Ready);
    assert_eq!(coordinator.task_list().task_count(), 2);
    assert_eq!(coordinator.message().to_string(), "Found 2 tasks.");
    assert_eq!(displayed_ids(&coordinator), vec![2, 1]);
    assert_eq!(coordinator.task_list().rows()[0].title, "B");
}

#[tokio::test]
async fn single_task_uses_singular_message() {
    let service = InMemoryTaskService::new(["todo"]).with_tasks([Task::new(7, "Only", "todo")]);
    let mut coordinator = Coordinator::new(service);
    coordinator.initialize().await;

    assert_eq!(coordinator.message().to_string(), "Found 1 task.");
}

#[tokio::test]
async fn empty_service_reports_no_tasks() {
    let mut coordinator = Coordinator::new(InMemoryTaskService::new(["todo"]));
    coordinator.initialize().await;

    assert_eq!(coordinator.message(), ListMessage::Empty);
    assert_eq!(coordinator.message().to_string(), "Found no tasks.");
}

#[tokio::test]
async fn vocabulary_reaches_both_components() {
    let mut coordinator = Coordinator::new(two_task_service());
    coordinator.initialize().await;

    let expected = StatusVocabulary::from(["todo", "done"]);
    assert_eq!(coordinator.statuses(), &expected);
    assert_eq!(coordinator.task_list().statuses(), &expected);
    assert_eq!(coordinator.task_box().statuses(), &expected);
    assert_eq!(coordinator.task_box().selected_status(), Some("todo"));
    assert!(coordinator.task_list().rows().iter().all(|row| row.editable));
}

#[tokio::test]
async fn both_fetches_are_issued_once() {
    let service = two_task_service();
    let mut coordinator = Coordinator::new(service.clone());
    coordinator.initialize().await;
    coordinator.start();
    coordinator.settle().await;

    assert_eq!(service.calls(Operation::FetchTasks), 1);
    assert_eq!(service.calls(Operation::FetchStatuses), 1);
}

// =============================================================================
// Before the load completes
// =============================================================================

#[tokio::test]
async fn waiting_message_until_load_is_applied() {
    let service = two_task_service();
    service.set_latency(Operation::FetchTasks, Duration::from_millis(50));
    let mut coordinator = Coordinator::new(service);

    assert_eq!(coordinator.message().to_string(), "Waiting for server data.");
    coordinator.start();
    assert_eq!(coordinator.phase(), Phase::Loading);
    assert_eq!(coordinator.tick(), 0);
    assert_eq!(coordinator.message(), ListMessage::Waiting);
    assert!(!coordinator.can_create());
    assert!(!coordinator.open_task_box());

    coordinator.settle().await;
    assert_eq!(coordinator.phase(), Phase::Ready);
    assert!(coordinator.open_task_box());
}

// =============================================================================
// Degraded load
// =============================================================================

#[tokio::test]
async fn task_fetch_failure_degrades_to_empty_list() {
    let service = two_task_service();
    service.fail_next(Operation::FetchTasks, Fault::Unreachable);
    let mut coordinator = Coordinator::new(service);
    coordinator.initialize().await;

    assert_eq!(coordinator.phase(), Phase::Ready);
    assert_eq!(coordinator.task_list().task_count(), 0);
    assert_eq!(coordinator.message().to_string(), "Found no tasks.");
    // The vocabulary fetch was not affected.
    assert_eq!(coordinator.statuses().len(), 2);
}

#[tokio::test]
async fn status_fetch_failure_disables_status_editing() {
    let service = two_task_service();
    service.fail_next(Operation::FetchStatuses, Fault::HttpStatus(503));
    let mut coordinator = Coordinator::new(service);
    coordinator.initialize().await;

    assert_eq!(coordinator.task_list().task_count(), 2);
    assert!(coordinator.statuses().is_empty());
    assert!(coordinator.task_list().rows().iter().all(|row| !row.editable));
    assert!(!coordinator.task_list_mut().open_status_selector());
    assert_eq!(coordinator.task_box().selected_status(), None);
}

#[tokio::test]
async fn malformed_bodies_on_both_fetches_still_reach_ready() {
    let service = two_task_service();
    service.fail_next(Operation::FetchTasks, Fault::Malformed);
    service.fail_next(Operation::FetchStatuses, Fault::Malformed);
    let mut coordinator = Coordinator::new(service);
    coordinator.initialize().await;

    assert_eq!(coordinator.phase(), Phase::Ready);
    assert_eq!(coordinator.message(), ListMessage::Empty);
}

#[tokio::test]
async fn duplicate_ids_fail_the_coordinator() {
    let service = InMemoryTaskService::new(["todo"])
        .with_tasks([Task::new(1, "A", "todo"), Task::new(1, "A again", "todo")]);
    let mut coordinator = Coordinator::new(service);
    coordinator.initialize().await;

    assert_eq!(coordinator.phase(), Phase::Failed);
    assert_eq!(coordinator.task_list().task_count(), 0);
    assert_eq!(coordinator.message(), ListMessage::Waiting);
    assert!(!coordinator.open_task_box());
    assert!(coordinator.confirmed_tasks().is_empty());
    assert!(!coordinator.task_list().tasks().iter().any(|t| t.id == TaskId::new(1)));
}
