//! Drawing engine surfaces into a ratatui [`Buffer`].
//!
//! One terminal cell is one host pixel: `x`/`y` are column/row, and every
//! row of text is one pixel tall.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use unicode_width::UnicodeWidthChar;

use crate::core::{PxPoint, PxRect, Rgba, Surface};

/// Converts a terminal area to engine pixels.
#[must_use]
pub fn px_rect(area: Rect) -> PxRect {
    PxRect::new(
        i32::from(area.x),
        i32::from(area.y),
        i32::from(area.width),
        i32::from(area.height),
    )
}

/// Converts an engine color; fully transparent colors map to `None`.
#[must_use]
pub const fn to_color(color: Rgba) -> Option<Color> {
    if color.a == 0 {
        None
    } else {
        Some(Color::Rgb(color.r, color.g, color.b))
    }
}

/// A [`Surface`] writing straight into a ratatui buffer.
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    clip: Option<PxRect>,
}

impl<'a> BufferSurface<'a> {
    #[must_use]
    pub fn new(buf: &'a mut Buffer) -> Self {
        Self { buf, clip: None }
    }

    fn visible(&self, x: i32, y: i32) -> bool {
        let point = PxPoint::new(x, y);
        self.clip.is_none_or(|clip| clip.contains(point)) && px_rect(self.buf.area).contains(point)
    }

    fn cell_at(&mut self, x: i32, y: i32) -> Option<&mut ratatui::buffer::Cell> {
        if !self.visible(x, y) {
            return None;
        }
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        self.buf.cell_mut(Position::new(x, y))
    }

    fn paint_bg(&mut self, x: i32, y: i32, color: Color) {
        if let Some(cell) = self.cell_at(x, y) {
            cell.set_bg(color);
        }
    }
}

impl Surface for BufferSurface<'_> {
    fn fill_rect(&mut self, rect: PxRect, color: Rgba) {
        self.fill_rounded_rect(rect, 0, color);
    }

    /// Cells within `radius` (Manhattan distance) of a corner are left untouched.
    fn fill_rounded_rect(&mut self, rect: PxRect, radius: i32, color: Rgba) {
        let Some(color) = to_color(color) else {
            return;
        };
        let Some(area) = rect.intersection(&px_rect(self.buf.area)) else {
            return;
        };
        let radius = radius.clamp(0, rect.width.min(rect.height) / 2);
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let dx = (x - rect.x).min(rect.right() - 1 - x);
                let dy = (y - rect.y).min(rect.bottom() - 1 - y);
                if dx + dy < radius {
                    continue;
                }
                self.paint_bg(x, y, color);
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgba) {
        let Some(color) = to_color(color) else {
            return;
        };
        let mut column = x;
        for ch in text.chars() {
            let width = ch.width().map_or(0, |w| i32::try_from(w).unwrap_or(0));
            if width == 0 {
                continue;
            }
            if let Some(cell) = self.cell_at(column, y) {
                cell.set_char(ch).set_fg(color);
            }
            // Cells covered by a wide glyph are blanked so stale symbols don't show.
            for trailing in column + 1..column + width {
                if let Some(cell) = self.cell_at(trailing, y) {
                    cell.set_symbol("");
                }
            }
            column += width;
        }
    }

    /// Paints the background of every cell on the line.
    fn draw_line(&mut self, from: PxPoint, to: PxPoint, color: Rgba) {
        let Some(color) = to_color(color) else {
            return;
        };
        let steps = (to.x - from.x).abs().max((to.y - from.y).abs());
        if steps == 0 {
            self.paint_bg(from.x, from.y, color);
            return;
        }
        for step in 0..=steps {
            let x = from.x + (to.x - from.x) * step / steps;
            let y = from.y + (to.y - from.y) * step / steps;
            self.paint_bg(x, y, color);
        }
    }

    fn set_clip(&mut self, clip: Option<PxRect>) {
        self.clip = clip;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn buffer() -> Buffer {
        Buffer::empty(Rect::new(0, 0, 10, 3))
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn text_is_written_with_color() {
        let mut buf = buffer();
        BufferSurface::new(&mut buf).draw_text(2, 1, "hi", Rgba::rgb(1, 2, 3));
        assert_eq!(row(&buf, 1), "  hi      ");
        assert_eq!(buf[(2, 1)].fg, Color::Rgb(1, 2, 3));
    }

    #[test]
    fn text_respects_clip_and_buffer_edges() {
        let mut buf = buffer();
        let mut surface = BufferSurface::new(&mut buf);
        surface.set_clip(Some(PxRect::new(0, 0, 4, 3)));
        surface.draw_text(-1, 0, "abcdefg", Rgba::WHITE);
        surface.set_clip(None);
        surface.draw_text(8, 2, "xyz", Rgba::WHITE);
        assert_eq!(row(&buf, 0), "bcde      ");
        assert_eq!(row(&buf, 2), "        xy");
    }

    #[test]
    fn wide_glyphs_advance_two_cells() {
        let mut buf = buffer();
        BufferSurface::new(&mut buf).draw_text(0, 0, "日a", Rgba::WHITE);
        assert_eq!(buf[(0, 0)].symbol(), "日");
        assert_eq!(buf[(2, 0)].symbol(), "a");
    }

    #[test]
    fn fill_paints_background() {
        let mut buf = buffer();
        BufferSurface::new(&mut buf).fill_rect(PxRect::new(8, 0, 5, 2), Rgba::rgb(9, 9, 9));
        assert_eq!(buf[(9, 1)].bg, Color::Rgb(9, 9, 9));
        assert_eq!(buf[(7, 0)].bg, Color::Reset);
        assert_eq!(buf[(9, 2)].bg, Color::Reset);
    }

    #[test]
    fn rounded_fill_skips_corners() {
        let mut buf = buffer();
        let green = Rgba::rgb(0, 0xff, 0);
        BufferSurface::new(&mut buf).fill_rounded_rect(PxRect::new(0, 0, 6, 3), 1, green);
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
        assert_eq!(buf[(5, 2)].bg, Color::Reset);
        assert_eq!(buf[(1, 0)].bg, Color::Rgb(0, 0xff, 0));
        assert_eq!(buf[(0, 1)].bg, Color::Rgb(0, 0xff, 0));
    }

    #[test]
    fn transparent_colors_draw_nothing() {
        let mut buf = buffer();
        let clear = Rgba::rgba(0xff, 0, 0, 0);
        let mut surface = BufferSurface::new(&mut buf);
        surface.fill_rect(PxRect::new(0, 0, 10, 3), clear);
        surface.draw_text(0, 0, "x", clear);
        assert_eq!(buf, buffer());
    }

    #[test]
    fn vertical_line_paints_each_cell() {
        let mut buf = buffer();
        BufferSurface::new(&mut buf).draw_line(
            PxPoint::new(4, 0),
            PxPoint::new(4, 2),
            Rgba::rgb(7, 7, 7),
        );
        for y in 0..3 {
            assert_eq!(buf[(4, y)].bg, Color::Rgb(7, 7, 7));
        }
        assert_eq!(buf[(3, 1)].bg, Color::Reset);
    }
}
