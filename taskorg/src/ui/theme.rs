//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success/ready indicator color.
pub const SUCCESS: Color = Color::Green;

/// Warning/loading indicator color.
pub const WARNING: Color = Color::Yellow;

/// Error/failed indicator color.
pub const ERROR: Color = Color::Red;

/// Idle indicator color.
pub const IDLE: Color = Color::DarkGray;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (hints, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Page heading style.
#[must_use]
pub fn heading() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Enabled button style.
#[must_use]
pub fn button() -> Style {
    Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD)
}

/// Disabled control style.
#[must_use]
pub fn disabled() -> Style {
    Style::default().fg(IDLE)
}

/// Get a color for a status label based on its name.
///
/// Stable across runs so the same status always has the same color.
#[must_use]
pub fn status_color(status: &str) -> Color {
    const STATUS_COLORS: [Color; 6] = [
        Color::Yellow,
        Color::Cyan,
        Color::Green,
        Color::Magenta,
        Color::LightBlue,
        Color::LightRed,
    ];
    let hash = status.bytes().fold(0u32, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(u32::from(b))
    });
    STATUS_COLORS[(hash as usize) % STATUS_COLORS.len()]
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for modal popups.
#[must_use]
pub fn popup() -> Style {
    Style::default().fg(FG_PRIMARY).bg(Color::Rgb(20, 20, 35))
}
