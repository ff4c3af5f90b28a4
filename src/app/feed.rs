//! Scripted demo chat traffic.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use super::{ChatEvent, IncomingLine, now_ms};
use crate::core::ChannelTag;

/// One scripted message: markup, channel, sender, receiver.
pub type ScriptedLine = (
    &'static str,
    ChannelTag,
    Option<&'static str>,
    Option<&'static str>,
);

/// Messages the demo feed cycles through.
pub const DEMO_SCRIPT: &[ScriptedLine] = &[
    (
        "Welcome to <col=ffc800>Northwatch</col>. Be nice.",
        ChannelTag::System,
        None,
        None,
    ),
    ("anyone up for the bridge raid tonight?", ChannelTag::Public, Some("Aldric"), None),
    (
        "selling <col=7fff7f>3x healing draught</col>, 40g each",
        ChannelTag::Trade,
        Some("Mira"),
        None,
    ),
    (
        "meet at the east gate<br>bring torches, it gets dark early",
        ChannelTag::Clan,
        Some("Torvald"),
        None,
    ),
    ("hey, got a minute?", ChannelTag::Private, Some("Mira"), None),
    ("gg everyone", ChannelTag::Friends, Some("Pip"), None),
    (
        "this one is deliberately long so you can watch it wrap across several rows \
         when the chat pane is narrow, and reflow when you resize the terminal",
        ChannelTag::Public,
        Some("Quill"),
        None,
    ),
    (
        "<col=ff5555>warning:</col> server restart in <col=ffffff>5</col> minutes",
        ChannelTag::System,
        None,
        None,
    ),
];

/// Spawns a task that sends [`DEMO_SCRIPT`] lines forever, one per `interval`.
///
/// The task stops when the receiving side is dropped.
pub fn spawn_demo_feed(event_tx: mpsc::Sender<ChatEvent>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        for (text, channel, sender, receiver) in DEMO_SCRIPT.iter().cycle() {
            ticker.tick().await;
            let line = IncomingLine {
                text: (*text).to_string(),
                channel: *channel,
                timestamp_ms: now_ms(),
                sender: sender.map(str::to_string),
                receiver: receiver.map(str::to_string),
            };
            if event_tx.send(ChatEvent::Line(line)).await.is_err() {
                debug!("demo feed stopped: receiver closed");
                break;
            }
        }
    });
}
