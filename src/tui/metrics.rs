//! Terminal cell metrics.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::FontMetrics;

/// Measures text in terminal columns.
///
/// Wide CJK glyphs take two columns; combining characters take none.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMetrics;

impl FontMetrics for CellMetrics {
    fn glyph_width(&self, ch: char) -> i32 {
        ch.width().map_or(0, |w| i32::try_from(w).unwrap_or(i32::MAX))
    }

    fn string_width(&self, text: &str) -> i32 {
        i32::try_from(text.width()).unwrap_or(i32::MAX)
    }
}
