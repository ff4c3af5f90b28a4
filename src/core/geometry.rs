//! Pixel-space geometry shared by layout, scrolling and hit-testing.

/// A point in host pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PxPoint {
    pub x: i32,
    pub y: i32,
}

impl PxPoint {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in host pixel coordinates.
///
/// Hosts may hand over degenerate rectangles (zero or negative extents)
/// while their window is in transition; such rectangles report
/// `is_valid() == false` and must never be laid out against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PxRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PxRect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the rectangle has a positive area.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns true if `point` lies inside the half-open rectangle.
    #[must_use]
    pub const fn contains(&self, point: PxPoint) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns the overlapping part of two rectangles, or `None` if they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &PxRect) -> Option<PxRect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let rect = PxRect::new(x, y, right - x, bottom - y);
        rect.is_valid().then_some(rect)
    }

    /// Splits off a column of `width` pixels from the right edge.
    ///
    /// Returns `(left, right)`. The right column never exceeds the rectangle.
    #[must_use]
    pub fn split_right(&self, width: i32) -> (PxRect, PxRect) {
        let column = width.clamp(0, self.width);
        let left = PxRect::new(self.x, self.y, self.width - column, self.height);
        let right = PxRect::new(self.right() - column, self.y, column, self.height);
        (left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_rects_are_invalid() {
        assert!(!PxRect::new(0, 0, 0, 10).is_valid());
        assert!(!PxRect::new(0, 0, 10, -1).is_valid());
        assert!(PxRect::new(-5, -5, 1, 1).is_valid());
    }

    #[test]
    fn contains_is_half_open() {
        let rect = PxRect::new(10, 10, 5, 5);
        assert!(rect.contains(PxPoint::new(10, 10)));
        assert!(rect.contains(PxPoint::new(14, 14)));
        assert!(!rect.contains(PxPoint::new(15, 10)));
        assert!(!rect.contains(PxPoint::new(10, 15)));
    }

    #[test]
    fn intersection_of_disjoint_rects_is_none() {
        let a = PxRect::new(0, 0, 10, 10);
        let b = PxRect::new(10, 0, 10, 10);
        assert_eq!(a.intersection(&b), None);
        assert_eq!(
            a.intersection(&PxRect::new(5, 5, 10, 10)),
            Some(PxRect::new(5, 5, 5, 5))
        );
    }

    #[test]
    fn split_right_clamps_column() {
        let rect = PxRect::new(0, 0, 10, 4);
        let (left, right) = rect.split_right(3);
        assert_eq!(left, PxRect::new(0, 0, 7, 4));
        assert_eq!(right, PxRect::new(7, 0, 3, 4));

        let (left, right) = rect.split_right(50);
        assert_eq!(left.width, 0);
        assert_eq!(right, rect);
    }
}
