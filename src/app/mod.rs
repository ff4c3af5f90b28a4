//! Main application state and logic.
//!
//! This module contains the core App struct and its implementation,
//! organized into submodules:
//! - `events` - Key, mouse, paste and background event handling
//! - `feed` - Scripted demo chat traffic
//! - `layout` - Screen layout
//! - `render` - UI rendering
//!
//! The chat pane is a [`ChatViewport`] drawn through the terminal surface;
//! the composer below it is an [`InputLine`].

pub mod events;
mod feed;
mod layout;
mod render;

#[cfg(test)]
mod tests;

pub use feed::{DEMO_SCRIPT, spawn_demo_feed};
pub use layout::{ChatLayout, calculate_chat_layout};

use std::time::Instant;

use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::info;

use crate::core::{Blink, ChannelTag, ChatViewport, InputLine, LabelPolicy, markup};
use crate::fs::ViewportSettings;
use crate::tui::Theme;

/// Channel buffer size for chat events.
const EVENT_CHANNEL_SIZE: usize = 256;

/// Name used for lines typed into the composer.
pub const LOCAL_SENDER: &str = "You";

/// A chat message arriving from outside the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingLine {
    /// Marked-up message text.
    pub text: String,
    pub channel: ChannelTag,
    pub timestamp_ms: i64,
    pub sender: Option<String>,
    pub receiver: Option<String>,
}

/// Events delivered to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// A message to append to the scrollback.
    Line(IncomingLine),
    /// Drop every stored line.
    Clear,
}

/// Main application state.
pub struct App {
    /// Theme for styling.
    pub(crate) theme: Theme,
    /// The chat scrollback.
    pub(crate) viewport: ChatViewport,
    /// The composer.
    pub(crate) input: InputLine,
    /// Screen areas of the last frame.
    pub(crate) layout: ChatLayout,
    blink: Blink,
    /// Blink phase origin; reset on every edit so the caret shows while typing.
    blink_epoch: Instant,
    caret_on: bool,
    should_quit: bool,

    /// Event receiver for chat events.
    event_rx: mpsc::Receiver<ChatEvent>,
    /// Event sender (cloned into background tasks).
    event_tx: mpsc::Sender<ChatEvent>,
}

impl App {
    /// Creates the application from loaded settings.
    #[must_use]
    pub fn new(settings: &ViewportSettings) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        let mut viewport = ChatViewport::new(settings.viewport_config(), settings.palette());
        viewport.push_line(
            "Type a message and press <col=ffffff>Enter</col>. \
             Right-click a line to whisper its sender.",
            ChannelTag::System,
            now_ms(),
            None,
            None,
        );

        Self {
            theme: Theme::default(),
            viewport,
            input: InputLine::new(Some(settings.input_max_chars)),
            layout: ChatLayout::default(),
            blink: settings.blink(),
            blink_epoch: Instant::now(),
            caret_on: true,
            should_quit: false,
            event_rx,
            event_tx,
        }
    }

    /// Returns whether the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns a sender for background tasks to deliver chat events.
    #[must_use]
    pub fn event_sender(&self) -> mpsc::Sender<ChatEvent> {
        self.event_tx.clone()
    }

    #[must_use]
    pub const fn viewport(&self) -> &ChatViewport {
        &self.viewport
    }

    #[must_use]
    pub const fn input(&self) -> &InputLine {
        &self.input
    }

    #[must_use]
    pub const fn caret_on(&self) -> bool {
        self.caret_on
    }

    /// Recomputes the layout for the current terminal area.
    pub fn update_layout(&mut self, terminal_area: Rect) {
        self.layout = calculate_chat_layout(terminal_area);
    }

    /// Processes periodic tasks: advances the caret blink.
    pub fn tick(&mut self) {
        self.caret_on = self.blink.is_on(self.blink_epoch.elapsed());
    }

    /// Restarts the blink so the caret is visible right after an edit.
    pub(crate) fn touch_caret(&mut self) {
        self.blink_epoch = Instant::now();
        self.caret_on = true;
    }

    /// Sends the composer content.
    ///
    /// `/w name message` sends a whisper; anything else goes to the public
    /// channel. Typed text is escaped so it is shown verbatim.
    pub(crate) fn submit_input(&mut self) {
        let message = self.input.commit();
        self.touch_caret();
        if message.is_empty() {
            return;
        }

        let (channel, receiver, body) = match parse_whisper(&message) {
            Some((receiver, body)) => (ChannelTag::Private, Some(receiver), body),
            None => (ChannelTag::Public, None, message.as_str()),
        };
        if body.is_empty() {
            return;
        }

        self.viewport.push_line(
            &markup::escape(body),
            channel,
            now_ms(),
            Some(LOCAL_SENDER),
            receiver,
        );
        self.viewport.scroll_to_bottom();
    }

    /// Flips timestamp labels on or off for every line.
    pub(crate) fn toggle_timestamps(&mut self) {
        let policy = LabelPolicy {
            show_timestamp: !self.viewport.label_policy().show_timestamp,
            ..self.viewport.label_policy().clone()
        };
        info!(show_timestamp = policy.show_timestamp, "label policy changed");
        self.viewport.set_label_policy(policy);
    }

    /// Prefills the composer with a whisper to `name`.
    pub(crate) fn start_whisper(&mut self, name: &str) {
        self.input.set_text(&format!("/w {name} "));
        self.touch_caret();
    }
}

/// Splits `/w name message` into the receiver and the message.
fn parse_whisper(message: &str) -> Option<(&str, &str)> {
    let rest = message.strip_prefix("/w ")?;
    let rest = rest.trim_start();
    let (name, body) = rest.split_once(' ').unwrap_or((rest, ""));
    if name.is_empty() {
        return None;
    }
    Some((name, body.trim()))
}

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
