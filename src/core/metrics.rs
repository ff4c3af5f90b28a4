//! Font metrics supplied by the host.

/// Pixel advance widths for glyphs of the current font.
pub trait FontMetrics {
    /// Advance width of a single glyph in pixels.
    fn glyph_width(&self, ch: char) -> i32;

    /// Advance width of a whole string in pixels.
    fn string_width(&self, text: &str) -> i32 {
        text.chars().map(|ch| self.glyph_width(ch)).sum()
    }
}

impl<F> FontMetrics for F
where
    F: Fn(char) -> i32,
{
    fn glyph_width(&self, ch: char) -> i32 {
        self(ch)
    }
}

/// Every glyph has the same advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMetrics {
    pub advance: i32,
}

impl MonospaceMetrics {
    #[must_use]
    pub const fn new(advance: i32) -> Self {
        Self { advance }
    }
}

impl FontMetrics for MonospaceMetrics {
    fn glyph_width(&self, _ch: char) -> i32 {
        self.advance
    }

    fn string_width(&self, text: &str) -> i32 {
        i32::try_from(text.chars().count())
            .unwrap_or(i32::MAX)
            .saturating_mul(self.advance)
    }
}
