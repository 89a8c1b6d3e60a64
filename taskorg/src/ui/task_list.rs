//! Task list rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, TableState, Wrap,
    },
};

use super::{centered_rect, theme};
use crate::components::{RowMode, TaskList};

/// Render the rows of the last list render, scrolled so the cursor row is visible.
pub fn render(frame: &mut Frame, area: Rect, list: &TaskList) {
    let rows: Vec<Row> = list
        .rows()
        .iter()
        .map(|row| {
            let status_style = if row.editable {
                theme::normal().fg(theme::status_color(&row.status))
            } else {
                theme::dimmed()
            };
            Row::new(vec![
                Cell::from(Span::styled(row.id.to_string(), theme::dimmed())),
                Cell::from(row.title.clone()),
                Cell::from(Span::styled(row.status.clone(), status_style)),
            ])
        })
        .collect();

    let header = Row::new(vec!["Id", "Title", "Status"]).style(theme::bold());
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(20),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .row_highlight_style(theme::selected())
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::normal()),
    );

    let selected = (!list.rows().is_empty()).then(|| list.cursor());
    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}

/// Render the status selector or delete prompt, if one is open.
pub fn render_overlays(frame: &mut Frame, area: Rect, list: &TaskList) {
    match list.mode() {
        RowMode::Browse => {}
        RowMode::SelectingStatus { id, option } => {
            let items: Vec<ListItem> = list
                .statuses()
                .iter()
                .enumerate()
                .map(|(i, status)| {
                    let style = if i == *option {
                        theme::selected()
                    } else {
                        theme::normal().fg(theme::status_color(status))
                    };
                    ListItem::new(Line::from(Span::styled(status.to_string(), style)))
                })
                .collect();
            let height = u16::try_from(list.statuses().len())
                .unwrap_or(u16::MAX)
                .saturating_add(2);
            let popup = centered_rect(30, height, area);
            let block = Block::default()
                .title(format!("Status of task {id}"))
                .borders(Borders::ALL)
                .border_style(theme::highlighted())
                .style(theme::popup());
            frame.render_widget(Clear, popup);
            frame.render_widget(List::new(items).block(block), popup);
        }
        RowMode::ConfirmingDelete { .. } => {
            let prompt = list.confirmation_prompt().unwrap_or_default();
            let popup = centered_rect(50, 5, area);
            let block = Block::default()
                .title("Delete")
                .borders(Borders::ALL)
                .border_style(theme::highlighted())
                .style(theme::popup());
            let text = vec![
                Line::from(format!("{prompt}?")),
                Line::from(Span::styled("[y] Yes   [n] No", theme::dimmed())),
            ];
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
                popup,
            );
        }
    }
}
