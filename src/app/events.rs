//! Event handling logic for the App.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::debug;

use super::{App, ChatEvent, LOCAL_SENDER};
use crate::core::{CaretMove, ChannelTag, EditCommand, PxPoint};

impl App {
    /// Handles pasted text from bracketed paste mode.
    ///
    /// The composer is a single line: line breaks become spaces and other
    /// control characters are dropped. Text beyond the length limit is cut.
    pub fn handle_paste(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let flattened: String = text
            .replace("\r\n", " ")
            .chars()
            .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();

        let inserted = self.input.insert_str(&flattened);
        debug!(inserted, pasted = flattened.chars().count(), "paste into composer");
        self.touch_caret();
    }

    /// Handles a key event.
    ///
    /// Key priorities:
    /// 1. Quit shortcuts (Esc, Ctrl+C)
    /// 2. App hotkeys (Ctrl+L, F2, scrolling)
    /// 3. Composer editing (default)
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('l') if ctrl => self.viewport.clear(),
            KeyCode::F(2) => self.toggle_timestamps(),
            KeyCode::PageUp => self.viewport.page_up(),
            KeyCode::PageDown => self.viewport.page_down(),
            KeyCode::Home if ctrl => self.viewport.scroll_to_top(),
            KeyCode::End if ctrl => self.viewport.scroll_to_bottom(),
            KeyCode::Enter => self.submit_input(),
            _ => {
                if let Some(command) = edit_command(key) {
                    self.input.apply(command);
                    self.touch_caret();
                }
            }
        }
    }

    /// Handles a mouse event.
    ///
    /// Wheel scrolls the chat, the left button drives the scrollbar, and a
    /// right click on a line starts a whisper to whoever wrote it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let point = PxPoint::new(i32::from(mouse.column), i32::from(mouse.row));

        match mouse.kind {
            MouseEventKind::ScrollUp => self.viewport.on_wheel(-1),
            MouseEventKind::ScrollDown => self.viewport.on_wheel(1),
            MouseEventKind::Down(MouseButton::Left) => {
                self.viewport.on_pointer_down(point);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.viewport.on_pointer_drag(point);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.viewport.on_pointer_up(point);
            }
            MouseEventKind::Down(MouseButton::Right) => {
                let name = self.viewport.row_at(point).and_then(|hit| {
                    let line = hit.line;
                    let name = match (line.channel, line.receiver.as_deref()) {
                        (ChannelTag::Private, Some(receiver)) => Some(receiver),
                        _ => line.sender.as_deref(),
                    };
                    name.filter(|n| !n.is_empty() && *n != LOCAL_SENDER)
                        .map(str::to_string)
                });
                if let Some(name) = name {
                    self.start_whisper(&name);
                }
            }
            _ => {}
        }
    }

    /// Drains pending events from background tasks.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                ChatEvent::Line(line) => {
                    self.viewport.push_line(
                        &line.text,
                        line.channel,
                        line.timestamp_ms,
                        line.sender.as_deref(),
                        line.receiver.as_deref(),
                    );
                }
                ChatEvent::Clear => self.viewport.clear(),
            }
        }
    }
}

/// Maps a key to a composer edit, if it is one.
fn edit_command(key: KeyEvent) -> Option<EditCommand> {
    let command = match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            EditCommand::Insert(c)
        }
        KeyCode::Backspace => EditCommand::Backspace,
        KeyCode::Delete => EditCommand::Delete,
        KeyCode::Left => EditCommand::Move(CaretMove::Left),
        KeyCode::Right => EditCommand::Move(CaretMove::Right),
        KeyCode::Home => EditCommand::Move(CaretMove::Home),
        KeyCode::End => EditCommand::Move(CaretMove::End),
        _ => return None,
    };
    Some(command)
}
