//! Integration tests for create, status-update, and delete flows.
//!
//! Each test drives the components through their public input methods,
//! lets the coordinator settle, and checks the displayed and confirmed
//! state together with what the service stored.
//!
//! Verification command: `cargo test --test mutation_flows`

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskorg::components::RowMode;
use taskorg::coordinator::{Coordinator, Phase};
use taskorg::service::Operation;
use taskorg::service::memory::{Fault, InMemoryTaskService};
use taskorg_proto::task::{Task, TaskId};

// =============================================================================
// Test helpers
// =============================================================================

fn two_task_service() -> InMemoryTaskService {
    InMemoryTaskService::new(["todo", "done"])
        .with_tasks([Task::new(1, "A", "todo"), Task::new(2, "B", "done")])
}

async fn ready(service: &InMemoryTaskService) -> Coordinator<InMemoryTaskService> {
    let mut coordinator = Coordinator::new(service.clone());
    coordinator.initialize().await;
    assert_eq!(coordinator.phase(), Phase::Ready);
    coordinator
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn status_of(coordinator: &Coordinator<InMemoryTaskService>, id: i64) -> Option<String> {
    coordinator
        .task_list()
        .rows()
        .iter()
        .find(|row| row.id == TaskId::new(id))
        .map(|row| row.status.clone())
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_adds_server_assigned_task_at_front() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;

    assert!(coordinator.open_task_box());
    coordinator.task_box_mut().set_title("C");
    assert!(coordinator.task_box_mut().select_status("todo"));
    coordinator.task_box_mut().submit();
    coordinator.settle().await;

    assert_eq!(coordinator.task_list().task_count(), 3);
    assert_eq!(coordinator.task_list().rows()[0].id, TaskId::new(3));
    assert_eq!(coordinator.task_list().rows()[0].title, "C");
    assert_eq!(coordinator.message().to_string(), "Found 3 tasks.");
    assert!(!coordinator.task_box().is_open());
    assert_eq!(service.snapshot().len(), 3);
}

#[tokio::test]
async fn create_through_dialog_keys() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;

    coordinator.open_task_box();
    for c in "Wash car".chars() {
        coordinator.task_box_mut().handle_key(key(KeyCode::Char(c)));
    }
    coordinator.task_box_mut().handle_key(key(KeyCode::Down));
    coordinator.task_box_mut().handle_key(key(KeyCode::Enter));
    coordinator.settle().await;

    let created = &coordinator.task_list().rows()[0];
    assert_eq!(created.title, "Wash car");
    assert_eq!(created.status, "done");
}

#[tokio::test]
async fn refused_create_keeps_dialog_open() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;
    let generation = coordinator.task_list().generation();

    coordinator.open_task_box();
    // Empty title is refused by the service.
    coordinator.task_box_mut().submit();
    coordinator.settle().await;

    assert!(coordinator.task_box().is_open());
    assert_eq!(coordinator.task_list().task_count(), 2);
    assert_eq!(coordinator.task_list().generation(), generation);
    assert_eq!(coordinator.message().to_string(), "Found 2 tasks.");
}

#[tokio::test]
async fn create_transport_failure_changes_nothing() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;
    service.fail_next(Operation::CreateTask, Fault::HttpStatus(500));

    coordinator.open_task_box();
    coordinator.task_box_mut().set_title("C");
    coordinator.task_box_mut().submit();
    coordinator.settle().await;

    assert!(coordinator.task_box().is_open());
    assert_eq!(coordinator.confirmed_tasks().len(), 2);
    assert_eq!(service.calls(Operation::CreateTask), 1);
}

#[tokio::test]
async fn create_rebuilds_from_confirmed_tasks() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;

    coordinator.open_task_box();
    coordinator.task_box_mut().set_title("C");
    coordinator.task_box_mut().submit();
    coordinator.settle().await;
    coordinator.open_task_box();
    coordinator.task_box_mut().set_title("D");
    coordinator.task_box_mut().submit();
    coordinator.settle().await;

    let ids: Vec<i64> = coordinator
        .task_list()
        .rows()
        .iter()
        .map(|row| row.id.get())
        .collect();
    assert_eq!(ids, vec![4, 3, 2, 1]);
    assert_eq!(coordinator.message().to_string(), "Found 4 tasks.");
}

#[tokio::test]
async fn create_after_delete_does_not_resurrect_deleted_task() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;

    assert!(coordinator.task_list_mut().request_delete(TaskId::new(1)));
    assert!(coordinator.task_list_mut().resolve_delete(true));
    coordinator.settle().await;

    coordinator.open_task_box();
    coordinator.task_box_mut().set_title("C");
    coordinator.task_box_mut().submit();
    coordinator.settle().await;

    assert_eq!(coordinator.task_list().task_count(), 2);
    assert!(status_of(&coordinator, 1).is_none());
}

// =============================================================================
// Status update
// =============================================================================

#[tokio::test]
async fn confirmed_status_update_changes_row() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;

    assert!(coordinator.task_list_mut().select_status(TaskId::new(1), "done"));
    // Nothing changes before the service confirms.
    assert_eq!(status_of(&coordinator, 1).as_deref(), Some("todo"));
    coordinator.settle().await;

    assert_eq!(status_of(&coordinator, 1).as_deref(), Some("done"));
    assert_eq!(coordinator.confirmed_tasks()[0].status, "done");
}

#[tokio::test]
async fn refused_status_update_leaves_row_unchanged() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;
    service.fail_next(Operation::UpdateStatus, Fault::Refuse);

    coordinator.task_list_mut().select_status(TaskId::new(1), "done");
    coordinator.settle().await;

    assert_eq!(status_of(&coordinator, 1).as_deref(), Some("todo"));
    assert_eq!(service.snapshot()[0].status, "todo");
}

#[tokio::test]
async fn status_selector_through_keys() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;

    // Cursor starts on task 2 ("done"); pick "todo".
    let list = coordinator.task_list_mut();
    assert!(list.handle_key(key(KeyCode::Char('s'))));
    assert!(matches!(list.mode(), RowMode::SelectingStatus { .. }));
    list.handle_key(key(KeyCode::Up));
    list.handle_key(key(KeyCode::Enter));
    coordinator.settle().await;

    assert_eq!(status_of(&coordinator, 2).as_deref(), Some("todo"));
    assert_eq!(coordinator.task_list().mode(), &RowMode::Browse);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn confirmed_delete_removes_task_and_updates_message() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;

    coordinator.task_list_mut().request_delete(TaskId::new(2));
    assert_eq!(
        coordinator.task_list().confirmation_prompt().as_deref(),
        Some("Are you sure you want to delete task B")
    );
    coordinator.task_list_mut().resolve_delete(true);
    coordinator.settle().await;

    assert_eq!(coordinator.task_list().task_count(), 1);
    assert_eq!(coordinator.message().to_string(), "Found 1 task.");
    assert_eq!(service.snapshot(), vec![Task::new(1, "A", "todo")]);
}

#[tokio::test]
async fn cancelled_delete_makes_no_call() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;

    let list = coordinator.task_list_mut();
    list.handle_key(key(KeyCode::Char('d')));
    list.handle_key(key(KeyCode::Char('n')));
    coordinator.settle().await;

    assert_eq!(service.calls(Operation::DeleteTask), 0);
    assert_eq!(coordinator.task_list().task_count(), 2);
}

#[tokio::test]
async fn unreachable_delete_keeps_task() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;
    service.fail_next(Operation::DeleteTask, Fault::Unreachable);

    coordinator.task_list_mut().request_delete(TaskId::new(1));
    coordinator.task_list_mut().resolve_delete(true);
    coordinator.settle().await;

    assert_eq!(coordinator.task_list().task_count(), 2);
    assert_eq!(coordinator.message().to_string(), "Found 2 tasks.");
    assert_eq!(coordinator.confirmed_tasks().len(), 2);
}

// =============================================================================
// Ordering
// =============================================================================

#[tokio::test]
async fn outcomes_apply_in_arrival_order() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;
    service.set_latency(Operation::UpdateStatus, Duration::from_millis(60));

    // The slow update is issued first but lands after the delete.
    coordinator.task_list_mut().select_status(TaskId::new(1), "done");
    coordinator.task_list_mut().request_delete(TaskId::new(2));
    coordinator.task_list_mut().resolve_delete(true);
    coordinator.tick();
    assert_eq!(coordinator.in_flight(), 2);

    tokio::time::sleep(Duration::from_millis(20)).await;
    coordinator.tick();
    assert_eq!(coordinator.task_list().task_count(), 1);
    assert_eq!(status_of(&coordinator, 1).as_deref(), Some("todo"));

    coordinator.settle().await;
    assert_eq!(status_of(&coordinator, 1).as_deref(), Some("done"));
    assert_eq!(coordinator.in_flight(), 0);
}

#[tokio::test]
async fn update_for_task_deleted_meanwhile_is_a_no_op() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;
    service.set_latency(Operation::UpdateStatus, Duration::from_millis(40));

    coordinator.task_list_mut().select_status(TaskId::new(1), "done");
    coordinator.task_list_mut().request_delete(TaskId::new(1));
    coordinator.task_list_mut().resolve_delete(true);
    coordinator.settle().await;

    // The service answered the update only if it ran before the delete;
    // either way the row stays gone.
    assert!(status_of(&coordinator, 1).is_none());
    assert_eq!(coordinator.task_list().task_count(), 1);
}

#[tokio::test]
async fn clear_twice_leaves_empty_list() {
    let service = two_task_service();
    let mut coordinator = ready(&service).await;

    coordinator.task_list_mut().clear();
    coordinator.task_list_mut().clear();

    assert_eq!(coordinator.task_list().task_count(), 0);
}
