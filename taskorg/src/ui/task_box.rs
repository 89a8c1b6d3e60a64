//! Creation dialog rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::{centered_rect, theme};
use crate::components::TaskBox;

/// Render the dialog as a centered popup and place the terminal cursor in the title field.
pub fn render(frame: &mut Frame, area: Rect, dialog: &TaskBox) {
    let popup = centered_rect(60, 8, area);
    let block = Block::default()
        .title("Add task")
        .borders(Borders::ALL)
        .border_style(theme::highlighted())
        .style(theme::popup());
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title label
            Constraint::Length(1), // Title input
            Constraint::Length(1), // Status
            Constraint::Min(0),
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(Span::styled("Title", theme::bold())), chunks[0]);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("> ", theme::highlighted()),
            Span::styled(dialog.title(), theme::normal()),
        ])),
        chunks[1],
    );

    let status_line = match dialog.selected_status() {
        Some(status) => Line::from(vec![
            Span::styled("Status: ", theme::bold()),
            Span::styled(
                format!("◂ {status} ▸"),
                theme::normal().fg(theme::status_color(status)),
            ),
        ]),
        None => Line::from(vec![
            Span::styled("Status: ", theme::bold()),
            Span::styled("(none)", theme::dimmed()),
        ]),
    };
    frame.render_widget(Paragraph::new(status_line), chunks[2]);
    frame.render_widget(
        Paragraph::new(Span::styled("Enter: add | Esc: close", theme::dimmed())),
        chunks[4],
    );

    // Prompt "> " is two columns wide.
    let cursor_x = u16::try_from(dialog.cursor())
        .unwrap_or(u16::MAX)
        .saturating_add(chunks[1].x + 2)
        .min(chunks[1].right().saturating_sub(1));
    frame.set_cursor_position(Position::new(cursor_x, chunks[1].y));
}
