//! Minimal drawing abstraction the engine renders through.

use super::color::Rgba;
use super::geometry::{PxPoint, PxRect};

/// Drawing primitives a host must provide.
///
/// Coordinates are host pixels. Text is drawn with its top-left corner at
/// `(x, y)`. Implementations must honor the clip rectangle set through
/// [`Surface::set_clip`].
pub trait Surface {
    fn fill_rect(&mut self, rect: PxRect, color: Rgba);

    fn fill_rounded_rect(&mut self, rect: PxRect, radius: i32, color: Rgba);

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgba);

    fn draw_line(&mut self, from: PxPoint, to: PxPoint, color: Rgba);

    /// Restricts subsequent drawing to `clip`, or lifts the restriction.
    fn set_clip(&mut self, clip: Option<PxRect>);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    FillRect { rect: PxRect, color: Rgba },
    FillRoundedRect { rect: PxRect, radius: i32, color: Rgba },
    Text { x: i32, y: i32, text: String, color: Rgba },
    Line { from: PxPoint, to: PxPoint, color: Rgba },
    Clip(Option<PxRect>),
}

/// A surface that records operations instead of drawing them.
///
/// Useful for headless hosts that replay the list later, and for tests.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text operations in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (i32, i32, &str, Rgba)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { x, y, text, color } => Some((*x, *y, text.as_str(), *color)),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn fill_rect(&mut self, rect: PxRect, color: Rgba) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: PxRect, radius: i32, color: Rgba) {
        self.ops.push(DrawOp::FillRoundedRect {
            rect,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgba) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }

    fn draw_line(&mut self, from: PxPoint, to: PxPoint, color: Rgba) {
        self.ops.push(DrawOp::Line { from, to, color });
    }

    fn set_clip(&mut self, clip: Option<PxRect>) {
        self.ops.push(DrawOp::Clip(clip));
    }
}
