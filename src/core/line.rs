//! Chat line records: color runs, stored lines and their decorations.
//!
//! A [`StoredLine`] is created from one markup-parsed line and lives in the
//! [`ScrollbackStore`](super::ScrollbackStore) until evicted. Its channel
//! prefix and timestamp label are computed once, when a [`LabelPolicy`] is
//! applied, and cached on the line until the policy changes.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::color::Rgba;

/// A contiguous span of text sharing one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRun {
    pub text: String,
    pub color: Rgba,
}

impl ColorRun {
    #[must_use]
    pub fn new(text: impl Into<String>, color: Rgba) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// One physically wrapped row, ready to draw at a fixed height.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayRow {
    pub runs: Vec<ColorRun>,
}

impl DisplayRow {
    /// Concatenated text of every run in the row.
    #[must_use]
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }
}

/// Stable identity of a stored line, assigned by the store on push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u64);

/// Category of a chat line; picks its color and prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChannelTag {
    #[default]
    Public,
    Private,
    Friends,
    Clan,
    Trade,
    System,
}

impl ChannelTag {
    /// Returns all channels in display order.
    #[must_use]
    pub const fn all() -> &'static [ChannelTag] {
        &[
            ChannelTag::Public,
            ChannelTag::Private,
            ChannelTag::Friends,
            ChannelTag::Clan,
            ChannelTag::Trade,
            ChannelTag::System,
        ]
    }

    /// Label shown inside the bracketed prefix.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
            Self::Friends => "Friends",
            Self::Clan => "Clan",
            Self::Trade => "Trade",
            Self::System => "System",
        }
    }

    /// Default display color for the channel.
    #[must_use]
    pub const fn default_color(&self) -> Rgba {
        match self {
            Self::Public => Rgba::rgb(0xff, 0xff, 0xff),
            Self::Private => Rgba::rgb(0x00, 0xff, 0xff),
            Self::Friends => Rgba::rgb(0x7f, 0xff, 0x7f),
            Self::Clan => Rgba::rgb(0x7f, 0xa9, 0xff),
            Self::Trade => Rgba::rgb(0xff, 0xc8, 0x00),
            Self::System => Rgba::rgb(0xff, 0xff, 0x00),
        }
    }
}

/// Per-channel color lookup supplied by the host.
pub trait ChannelColors {
    fn color_for(&self, channel: ChannelTag) -> Rgba;
}

impl<F> ChannelColors for F
where
    F: Fn(ChannelTag) -> Rgba,
{
    fn color_for(&self, channel: ChannelTag) -> Rgba {
        self(channel)
    }
}

/// Channel color table with fallbacks to [`ChannelTag::default_color`].
#[derive(Debug, Clone, Default)]
pub struct ChannelPalette {
    overrides: HashMap<ChannelTag, Rgba>,
}

impl ChannelPalette {
    #[must_use]
    pub fn new(overrides: HashMap<ChannelTag, Rgba>) -> Self {
        Self { overrides }
    }

    pub fn set(&mut self, channel: ChannelTag, color: Rgba) {
        self.overrides.insert(channel, color);
    }
}

impl ChannelColors for ChannelPalette {
    fn color_for(&self, channel: ChannelTag) -> Rgba {
        self.overrides
            .get(&channel)
            .copied()
            .unwrap_or_else(|| channel.default_color())
    }
}

/// Controls which decorations are prepended to a line's first run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPolicy {
    /// Prepend the channel/sender prefix.
    pub show_prefix: bool,
    /// Prepend a `[time] ` label.
    pub show_timestamp: bool,
    /// chrono format string for the timestamp label.
    pub timestamp_format: String,
    /// Format in UTC instead of the local time zone.
    pub utc: bool,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            show_prefix: true,
            show_timestamp: false,
            timestamp_format: "%H:%M".to_string(),
            utc: false,
        }
    }
}

impl LabelPolicy {
    /// Formats a millisecond UNIX timestamp according to this policy.
    ///
    /// Out-of-range timestamps and invalid format strings yield `None`
    /// rather than a bogus label.
    #[must_use]
    pub fn format_timestamp(&self, timestamp_ms: i64) -> Option<String> {
        let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)?;
        let mut formatted = String::new();
        let written = if self.utc {
            write!(formatted, "{}", utc.format(&self.timestamp_format))
        } else {
            write!(
                formatted,
                "{}",
                utc.with_timezone(&Local).format(&self.timestamp_format)
            )
        };
        written.ok().map(|()| formatted)
    }
}

/// A parsed chat line as owned by the scrollback store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredLine {
    pub(crate) id: LineId,
    pub runs: Vec<ColorRun>,
    pub channel: ChannelTag,
    pub timestamp_ms: i64,
    pub sender: Option<String>,
    pub receiver: Option<String>,
    cached_prefix: Option<ColorRun>,
    cached_timestamp_label: Option<ColorRun>,
}

impl StoredLine {
    /// Creates an undecorated line. The id is assigned by the store.
    #[must_use]
    pub fn new(
        runs: Vec<ColorRun>,
        channel: ChannelTag,
        timestamp_ms: i64,
        sender: Option<String>,
        receiver: Option<String>,
    ) -> Self {
        Self {
            id: LineId(0),
            runs,
            channel,
            timestamp_ms,
            sender,
            receiver,
            cached_prefix: None,
            cached_timestamp_label: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> LineId {
        self.id
    }

    /// Plain text of the message body, without decorations.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    #[must_use]
    pub fn cached_prefix(&self) -> Option<&ColorRun> {
        self.cached_prefix.as_ref()
    }

    #[must_use]
    pub fn cached_timestamp_label(&self) -> Option<&ColorRun> {
        self.cached_timestamp_label.as_ref()
    }

    /// Recomputes the cached prefix and timestamp label.
    ///
    /// Called once when the line enters the store and again only when the
    /// label policy changes.
    pub fn apply_policy(&mut self, policy: &LabelPolicy, colors: &dyn ChannelColors) {
        let color = colors.color_for(self.channel);

        self.cached_prefix = if policy.show_prefix {
            self.prefix_text().map(|text| ColorRun::new(text, color))
        } else {
            None
        };

        self.cached_timestamp_label = if policy.show_timestamp {
            policy
                .format_timestamp(self.timestamp_ms)
                .map(|stamp| ColorRun::new(format!("[{stamp}] "), color))
        } else {
            None
        };
    }

    /// Every run to lay out, decorations first.
    pub fn layout_runs(&self) -> impl Iterator<Item = &ColorRun> {
        self.cached_timestamp_label
            .iter()
            .chain(self.cached_prefix.iter())
            .chain(self.runs.iter())
    }

    fn prefix_text(&self) -> Option<String> {
        let sender = self.sender.as_deref().filter(|s| !s.is_empty());
        match self.channel {
            ChannelTag::System => Some("[System] ".to_string()),
            ChannelTag::Public => sender.map(|name| format!("{name}: ")),
            ChannelTag::Private => match (self.receiver.as_deref(), sender) {
                (Some(to), _) if !to.is_empty() => Some(format!("To {to}: ")),
                (_, Some(from)) => Some(format!("From {from}: ")),
                _ => None,
            },
            ChannelTag::Friends | ChannelTag::Clan | ChannelTag::Trade => {
                let label = self.channel.label();
                Some(match sender {
                    Some(name) => format!("[{label}] {name}: "),
                    None => format!("[{label}] "),
                })
            }
        }
    }
}
