//! Scrollbar thumb geometry and thumb dragging.

use tracing::debug;

use super::geometry::{PxPoint, PxRect};

/// Default minimum thumb height in pixels.
pub const MIN_THUMB_HEIGHT: i32 = 1;

/// Track and thumb placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarGeometry {
    /// The whole track rectangle.
    pub track: PxRect,
    pub thumb: PxRect,
    pub track_top: i32,
    pub track_height: i32,
    pub max_scroll: i32,
}

impl ScrollbarGeometry {
    /// Computes the thumb for the given scroll state.
    ///
    /// Returns `None` when the content fits the viewport (nothing to scroll)
    /// or the track is degenerate.
    #[must_use]
    pub fn compute(
        track: PxRect,
        content_height: i32,
        viewport_height: i32,
        offset: i32,
        min_thumb_height: i32,
    ) -> Option<Self> {
        if !track.is_valid() || content_height <= viewport_height || viewport_height <= 0 {
            return None;
        }

        let track_height = track.height;
        let ratio = f64::from(viewport_height) / f64::from(content_height);
        let proportional = round_px(f64::from(track_height) * ratio);
        let thumb_height = proportional
            .max(min_thumb_height.max(1))
            .min(track_height);

        let max_scroll = content_height - viewport_height;
        let travel = track_height - thumb_height;
        let fraction = if max_scroll == 0 {
            0.0
        } else {
            f64::from(offset.clamp(0, max_scroll)) / f64::from(max_scroll)
        };
        let thumb_y = track.y + round_px(f64::from(travel) * fraction);

        Some(Self {
            track,
            thumb: PxRect::new(track.x, thumb_y, track.width, thumb_height),
            track_top: track.y,
            track_height,
            max_scroll,
        })
    }

    /// Pixels the thumb can travel along the track.
    #[must_use]
    pub const fn travel(&self) -> i32 {
        self.track_height - self.thumb.height
    }

    /// Maps a thumb top position to a content offset.
    #[must_use]
    pub fn offset_for_thumb_top(&self, thumb_top: i32) -> i32 {
        let travel = self.travel();
        if travel <= 0 {
            return 0;
        }
        let moved = (thumb_top - self.track_top).clamp(0, travel);
        round_px(f64::from(self.max_scroll) * f64::from(moved) / f64::from(travel))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_px(value: f64) -> i32 {
    value.round() as i32
}

/// Where a pointer press landed relative to the scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackHit {
    /// On the thumb; a drag has started.
    Thumb,
    /// On the track above the thumb.
    Above,
    /// On the track below the thumb.
    Below,
}

/// Tracks an in-progress thumb drag.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragController {
    /// Pointer offset from the thumb's top edge at press time.
    grab_offset: Option<i32>,
}

impl DragController {
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }

    /// Handles a pointer press; starts a drag when it lands on the thumb.
    pub fn press(&mut self, point: PxPoint, geometry: &ScrollbarGeometry) -> Option<TrackHit> {
        if !geometry.track.contains(point) {
            return None;
        }
        if geometry.thumb.contains(point) {
            self.grab_offset = Some(point.y - geometry.thumb.y);
            debug!(grab = point.y - geometry.thumb.y, "thumb drag started");
            Some(TrackHit::Thumb)
        } else if point.y < geometry.thumb.y {
            Some(TrackHit::Above)
        } else {
            Some(TrackHit::Below)
        }
    }

    /// Maps a pointer move during a drag to a new content offset.
    ///
    /// Returns `None` when no drag is active.
    #[must_use]
    pub fn drag(&self, point: PxPoint, geometry: &ScrollbarGeometry) -> Option<i32> {
        let grab = self.grab_offset?;
        Some(geometry.offset_for_thumb_top(point.y - grab))
    }

    /// Ends the drag. Returns true if one was active.
    pub fn release(&mut self) -> bool {
        let was_dragging = self.grab_offset.take().is_some();
        if was_dragging {
            debug!("thumb drag ended");
        }
        was_dragging
    }
}
