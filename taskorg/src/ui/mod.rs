//! Terminal UI rendering.
//!
//! Drawing is a pure function of the application state: every frame is
//! rebuilt from the components' current rows and modes.

pub mod status_bar;
pub mod task_box;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::service::TaskService;

/// Main draw function for the entire UI.
pub fn draw<S: TaskService + 'static>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Length(1), // Message
            Constraint::Length(1), // New task
            Constraint::Min(3),    // Task list
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let coordinator = &app.coordinator;

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled("Tasks", theme::heading()))),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            coordinator.message().to_string(),
            theme::normal(),
        ))),
        chunks[1],
    );
    let new_task_style = if coordinator.can_create() {
        theme::button()
    } else {
        theme::disabled()
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled("[n] New task", new_task_style))),
        chunks[2],
    );

    task_list::render(frame, chunks[3], coordinator.task_list());
    status_bar::render(frame, chunks[4], app);

    // Modal overlays, drawn last so they sit on top.
    task_list::render_overlays(frame, area, coordinator.task_list());
    if coordinator.task_box().is_open() {
        task_box::render(frame, area, coordinator.task_box());
    }
}

/// A rectangle of the given size centered in `area`, clamped to fit.
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
