//! Terminal setup and configuration utilities.
//!
//! Enables the event modes the chat host needs on top of ratatui's raw
//! mode: bracketed paste (a paste arrives as one event) and mouse capture
//! (wheel, scrollbar dragging, right-click on lines).

use std::io::stdout;

use ratatui::crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use ratatui::crossterm::execute;
use tracing::{debug, warn};

/// Guard to ensure terminal event modes are disabled on drop.
///
/// This ensures proper cleanup even if the application panics.
pub struct TerminalEventGuard {
    bracketed_paste_enabled: bool,
    mouse_capture_enabled: bool,
}

impl TerminalEventGuard {
    #[must_use]
    pub fn new() -> Self {
        let mut guard = Self {
            bracketed_paste_enabled: false,
            mouse_capture_enabled: false,
        };

        match execute!(stdout(), EnableBracketedPaste) {
            Ok(()) => {
                debug!("bracketed paste enabled");
                guard.bracketed_paste_enabled = true;
            }
            Err(e) => warn!("could not enable bracketed paste mode: {e}"),
        }

        match execute!(stdout(), EnableMouseCapture) {
            Ok(()) => {
                debug!("mouse capture enabled");
                guard.mouse_capture_enabled = true;
            }
            // Not fatal: keys still scroll.
            Err(e) => warn!("could not enable mouse capture: {e}"),
        }

        guard
    }
}

impl Default for TerminalEventGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalEventGuard {
    fn drop(&mut self) {
        if self.mouse_capture_enabled {
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        if self.bracketed_paste_enabled {
            let _ = execute!(stdout(), DisableBracketedPaste);
        }
    }
}
