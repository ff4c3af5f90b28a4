//! Centralized theme and styling.

use ratatui::style::{Color, Modifier, Style};

use crate::core::Rgba;

/// Application theme with consistent colors and styles.
///
/// Chat text colors come from the channel palette; the theme covers the
/// chrome around it and the input line.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent/highlight color.
    pub accent: Color,
    /// Muted/secondary text color.
    pub muted: Color,
    /// Border color.
    pub border: Color,
    /// Border color of the pane being scrolled by the user.
    pub scrolled_border: Color,
    /// Input line text.
    pub input_text: Rgba,
    /// Input caret.
    pub caret: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            muted: Color::DarkGray,
            border: Color::Gray,
            scrolled_border: Color::Yellow,
            input_text: Rgba::WHITE,
            caret: Rgba::rgb(0x80, 0x80, 0x80),
        }
    }
}

impl Theme {
    /// Style for the header/title.
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for muted/secondary text.
    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for borders.
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Border style of the chat pane while the user is reading history.
    #[must_use]
    pub fn scrolled_border_style(&self) -> Style {
        Style::default().fg(self.scrolled_border)
    }
}
