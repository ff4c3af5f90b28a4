//! Layout calculation for the chat screen.
//!
//! Single source of truth for the screen split, used both when rendering
//! and when the layout is refreshed before a frame.

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas of the chat interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatLayout {
    /// Header area (1 line).
    pub header: Rect,
    /// Chat scrollback pane including its border (grows).
    pub chat: Rect,
    /// Composer including its border.
    pub input: Rect,
    /// Footer area (key hints, 1 line).
    pub footer: Rect,
}

const CHAT_LAYOUT_CONSTRAINTS: [Constraint; 4] = [
    Constraint::Length(1), // Header
    Constraint::Min(3),    // Chat (grows)
    Constraint::Length(3), // Input (1 line + borders)
    Constraint::Length(1), // Footer (key hints)
];

/// Calculates the layout for the chat screen.
#[must_use]
pub fn calculate_chat_layout(area: Rect) -> ChatLayout {
    let chunks = Layout::vertical(CHAT_LAYOUT_CONSTRAINTS).split(area);
    ChatLayout {
        header: chunks[0],
        chat: chunks[1],
        input: chunks[2],
        footer: chunks[3],
    }
}
