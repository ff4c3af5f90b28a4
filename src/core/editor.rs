//! Single-line input editor used to compose outgoing messages.
//!
//! The caret is a char index into the buffer, always in `[0, len]`. The
//! visible window scrolls horizontally so the caret stays in view; the
//! scroll is recomputed at render time from the full, unscrolled text width.

use std::time::Duration;

use super::color::Rgba;
use super::geometry::{PxPoint, PxRect};
use super::metrics::FontMetrics;
use super::surface::Surface;

/// Default maximum message length in chars.
pub const DEFAULT_MAX_CHARS: usize = 80;

/// Caret navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMove {
    Left,
    Right,
    Home,
    End,
}

/// One editing action, as produced by the host's key handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Insert(char),
    /// Delete the char before the caret.
    Backspace,
    /// Delete the char at the caret.
    Delete,
    Move(CaretMove),
}

/// Time-based caret blink, independent of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blink {
    pub period: Duration,
}

impl Default for Blink {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(500),
        }
    }
}

impl Blink {
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Whether the caret is shown `elapsed` after the blink epoch.
    ///
    /// A zero period means the caret never blinks.
    #[must_use]
    pub fn is_on(&self, elapsed: Duration) -> bool {
        let period = self.period.as_millis();
        if period == 0 {
            return true;
        }
        (elapsed.as_millis() / period) % 2 == 0
    }
}

/// State of the input line.
#[derive(Debug, Clone)]
pub struct InputLine {
    buffer: String,
    caret: usize,
    scroll_px: i32,
    max_chars: Option<usize>,
    caret_width: i32,
}

impl Default for InputLine {
    fn default() -> Self {
        Self::new(Some(DEFAULT_MAX_CHARS))
    }
}

impl InputLine {
    /// Creates an empty editor. `None` disables the length limit.
    #[must_use]
    pub const fn new(max_chars: Option<usize>) -> Self {
        Self {
            buffer: String::new(),
            caret: 0,
            scroll_px: 0,
            max_chars,
            caret_width: 1,
        }
    }

    /// Sets the width reserved for the caret at the right edge.
    #[must_use]
    pub const fn with_caret_width(mut self, caret_width: i32) -> Self {
        self.caret_width = caret_width;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Caret position as a char index.
    #[must_use]
    pub const fn caret(&self) -> usize {
        self.caret
    }

    #[must_use]
    pub const fn horizontal_scroll(&self) -> i32 {
        self.scroll_px
    }

    #[must_use]
    pub fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    fn has_room(&self) -> bool {
        self.max_chars.is_none_or(|max| self.char_len() < max)
    }

    /// Inserts a char at the caret. Control chars and overflow are rejected.
    pub fn insert(&mut self, ch: char) -> bool {
        if ch.is_control() || !self.has_room() {
            return false;
        }
        let at = self.byte_index(self.caret);
        self.buffer.insert(at, ch);
        self.caret += 1;
        true
    }

    /// Inserts pasted text, skipping control chars. Returns the number of chars inserted.
    pub fn insert_str(&mut self, text: &str) -> usize {
        text.chars().filter(|&ch| self.insert(ch)).count()
    }

    /// Deletes the char before the caret.
    pub fn delete_before(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        let at = self.byte_index(self.caret - 1);
        self.buffer.remove(at);
        self.caret -= 1;
        true
    }

    /// Deletes the char at the caret.
    pub fn delete_at(&mut self) -> bool {
        if self.caret >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.caret);
        self.buffer.remove(at);
        true
    }

    pub fn move_caret(&mut self, movement: CaretMove) -> bool {
        let before = self.caret;
        self.caret = match movement {
            CaretMove::Left => self.caret.saturating_sub(1),
            CaretMove::Right => (self.caret + 1).min(self.char_len()),
            CaretMove::Home => 0,
            CaretMove::End => self.char_len(),
        };
        self.caret != before
    }

    /// Applies one editing command. Returns true if the state changed.
    pub fn apply(&mut self, command: EditCommand) -> bool {
        match command {
            EditCommand::Insert(ch) => self.insert(ch),
            EditCommand::Backspace => self.delete_before(),
            EditCommand::Delete => self.delete_at(),
            EditCommand::Move(movement) => self.move_caret(movement),
        }
    }

    /// Replaces the buffer and puts the caret at the end.
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.insert_str(text);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.caret = 0;
        self.scroll_px = 0;
    }

    /// Takes the trimmed message and resets the editor.
    pub fn commit(&mut self) -> String {
        let message = self.buffer.trim().to_string();
        self.clear();
        message
    }

    /// Caret x within the full, unscrolled text.
    pub fn caret_x<M>(&self, metrics: &M) -> i32
    where
        M: FontMetrics + ?Sized,
    {
        metrics.string_width(&self.buffer[..self.byte_index(self.caret)])
    }

    /// Adjusts the horizontal scroll so the caret is inside a window `visible_width` wide.
    pub fn autoscroll<M>(&mut self, metrics: &M, visible_width: i32)
    where
        M: FontMetrics + ?Sized,
    {
        let caret_x = self.caret_x(metrics);
        let right_edge = self.scroll_px + (visible_width - self.caret_width).max(0);
        if caret_x > right_edge {
            self.scroll_px += caret_x - right_edge;
        } else if caret_x < self.scroll_px {
            self.scroll_px -= self.scroll_px - caret_x;
        }
        self.scroll_px = self.scroll_px.max(0);
    }

    /// Draws the visible slice of the text and, if `caret_on`, the caret.
    pub fn render<S, M>(
        &mut self,
        surface: &mut S,
        rect: PxRect,
        metrics: &M,
        text_color: Rgba,
        caret_color: Rgba,
        caret_on: bool,
    ) where
        S: Surface + ?Sized,
        M: FontMetrics + ?Sized,
    {
        if !rect.is_valid() {
            return;
        }
        self.autoscroll(metrics, rect.width);

        surface.set_clip(Some(rect));
        if !self.buffer.is_empty() {
            surface.draw_text(rect.x - self.scroll_px, rect.y, &self.buffer, text_color);
        }
        if caret_on {
            let x = rect.x + self.caret_x(metrics) - self.scroll_px;
            surface.draw_line(
                PxPoint::new(x, rect.y),
                PxPoint::new(x, rect.bottom() - 1),
                caret_color,
            );
        }
        surface.set_clip(None);
    }
}
