//! Shared test utilities for the app module.
//!
//! - `create_test_app` - An `App` with an empty scrollback
//! - `render_app_to_terminal` - Renders the app to a `TestBackend`
//! - Key and mouse event helpers

use anyhow::Result;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::TestBackend};

use crate::app::App;
use crate::core::ChannelTag;
use crate::fs::ViewportSettings;

/// Terminal size used by most screen tests.
///
/// Chat text rows are y = 2..=6, the scrollbar is column 38.
pub const WIDTH: u16 = 40;
pub const HEIGHT: u16 = 12;

/// Creates an app with default settings and no lines.
pub fn create_test_app() -> App {
    create_test_app_with(&ViewportSettings::default())
}

/// Creates an app with the given settings and no lines.
pub fn create_test_app_with(settings: &ViewportSettings) -> App {
    let mut app = App::new(settings);
    app.viewport.clear();
    app
}

/// Pushes `count` public lines `line 0`, `line 1`, ... without a sender.
pub fn push_numbered(app: &mut App, count: usize) {
    for i in 0..count {
        app.viewport
            .push_line(&format!("line {i}"), ChannelTag::Public, 0, None, None);
    }
}

/// Creates a [`KeyEvent`] with the given modifiers.
pub fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] with no modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    key_with(code, KeyModifiers::NONE)
}

/// Creates a [`KeyEvent`] for a character key with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// Creates a Ctrl+`c` [`KeyEvent`].
pub fn ctrl_key(c: char) -> KeyEvent {
    key_with(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Types `text` one key at a time.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(char_key(c));
    }
}

/// Creates a [`MouseEvent`] at a terminal cell.
pub fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

pub fn left_down(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

/// Renders the app to a `TestBackend` terminal.
///
/// Mimics the main loop by calling `update_layout()` before rendering.
///
/// # Errors
///
/// Returns an error if terminal creation or rendering fails.
pub fn render_app_to_terminal(
    app: &mut App,
    width: u16,
    height: u16,
) -> Result<Terminal<TestBackend>> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    app.update_layout(Rect::new(0, 0, width, height));
    terminal.draw(|f| app.render(f))?;
    Ok(terminal)
}

/// Renders at the default test size.
///
/// # Errors
///
/// Returns an error if terminal creation or rendering fails.
pub fn render(app: &mut App) -> Result<Terminal<TestBackend>> {
    render_app_to_terminal(app, WIDTH, HEIGHT)
}

/// Text of one buffer row.
pub fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}
