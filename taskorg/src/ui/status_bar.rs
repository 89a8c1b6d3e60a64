//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Focus};
use crate::coordinator::Phase;
use crate::service::TaskService;

/// Render the status bar at the bottom of the screen.
pub fn render<S: TaskService + 'static>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let help_text = match app.focus() {
        Focus::TaskList => "n: new task | ↑↓/jk: navigate | s: status | d: delete | q: quit",
        Focus::StatusSelector => "↑↓: choose | Enter: confirm | Esc: cancel",
        Focus::DeletePrompt => "y: delete | n/Esc: cancel",
        Focus::TaskBox => "Enter: add | ↑↓: status | ←→: move cursor | Esc: close",
    };

    let coordinator = &app.coordinator;
    let dot_color = match coordinator.phase() {
        Phase::Uninitialized => theme::IDLE,
        Phase::Loading => theme::WARNING,
        Phase::Ready => theme::SUCCESS,
        Phase::Failed => theme::ERROR,
    };

    let mut spans = vec![
        Span::styled(
            concat!("TaskOrganizer v", env!("CARGO_PKG_VERSION")),
            theme::bold(),
        ),
        Span::raw(" | "),
        Span::styled("●", theme::normal().fg(dot_color)),
        Span::raw(format!(" {} via {}", coordinator.phase(), app.service_label)),
    ];
    if coordinator.in_flight() > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{} pending", coordinator.in_flight()),
            theme::normal().fg(theme::WARNING),
        ));
    }
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
