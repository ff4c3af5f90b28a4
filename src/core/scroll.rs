//! Pixel scroll offset over the wrapped content, with stick-to-bottom.

/// Tuning for the scroll controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollConfig {
    /// Pixels moved per wheel notch.
    pub wheel_step_px: i32,
    /// Distance from the bottom within which the view still counts as "at bottom".
    pub bottom_tolerance_px: i32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            wheel_step_px: 3,
            bottom_tolerance_px: 2,
        }
    }
}

/// Stored scroll position.
///
/// `SnapToBottom` and `FromBottom` are transient requests; they are turned
/// into a concrete pixel offset by [`ScrollState::resolve`] once the new
/// content height is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOffset {
    Px(i32),
    SnapToBottom,
    /// A relative move made while a snap was pending, kept as a distance
    /// above the bottom.
    FromBottom(i32),
}

/// Scroll position over content of a known height.
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: ScrollOffset,
    content_height: i32,
    viewport_height: i32,
    user_scrolled: bool,
    config: ScrollConfig,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollState {
    /// Creates a state pinned to the bottom of empty content.
    #[must_use]
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            offset: ScrollOffset::SnapToBottom,
            content_height: 0,
            viewport_height: 0,
            user_scrolled: false,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> ScrollConfig {
        self.config
    }

    pub fn set_config(&mut self, config: ScrollConfig) {
        self.config = config;
    }

    /// Largest valid offset for the last resolved dimensions.
    #[must_use]
    pub fn max_scroll(&self) -> i32 {
        (self.content_height - self.viewport_height).max(0)
    }

    /// Concrete offset in pixels. A pending snap reads as the bottom.
    #[must_use]
    pub fn offset(&self) -> i32 {
        let max_scroll = self.max_scroll();
        match self.offset {
            ScrollOffset::Px(px) => px.clamp(0, max_scroll),
            ScrollOffset::SnapToBottom => max_scroll,
            ScrollOffset::FromBottom(distance) => (max_scroll - distance).clamp(0, max_scroll),
        }
    }

    /// Raw stored offset, including a pending snap request.
    #[must_use]
    pub const fn raw_offset(&self) -> ScrollOffset {
        self.offset
    }

    #[must_use]
    pub const fn content_height(&self) -> i32 {
        self.content_height
    }

    #[must_use]
    pub const fn viewport_height(&self) -> i32 {
        self.viewport_height
    }

    /// Whether the user has moved away from the newest content.
    #[must_use]
    pub const fn user_scrolled(&self) -> bool {
        self.user_scrolled
    }

    /// Returns true if the view shows the newest content.
    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.offset() >= self.max_scroll() - self.config.bottom_tolerance_px
    }

    /// Called when a new line arrives.
    pub fn on_line_pushed(&mut self) {
        if !self.user_scrolled {
            self.offset = ScrollOffset::SnapToBottom;
        }
    }

    /// Records the frame's dimensions and turns the stored offset into a clamped pixel value.
    ///
    /// Returns the resolved offset.
    pub fn resolve(&mut self, content_height: i32, viewport_height: i32) -> i32 {
        let px = self.peek_resolved(content_height, viewport_height);
        self.content_height = content_height.max(0);
        self.viewport_height = viewport_height.max(0);
        if matches!(self.offset, ScrollOffset::FromBottom(_)) {
            self.user_scrolled = px < self.max_scroll() - self.config.bottom_tolerance_px;
        }
        self.offset = ScrollOffset::Px(px);
        px
    }

    /// The offset [`resolve`](Self::resolve) would produce, without storing anything.
    #[must_use]
    pub fn peek_resolved(&self, content_height: i32, viewport_height: i32) -> i32 {
        let content_height = content_height.max(0);
        let viewport_height = viewport_height.max(0);
        let max_scroll = (content_height - viewport_height).max(0);

        match self.offset {
            ScrollOffset::SnapToBottom => max_scroll,
            _ if !self.user_scrolled && content_height <= viewport_height => max_scroll,
            ScrollOffset::Px(px) => px.clamp(0, max_scroll),
            ScrollOffset::FromBottom(distance) => (max_scroll - distance).clamp(0, max_scroll),
        }
    }

    /// Applies mouse wheel rotation; positive rotation scrolls toward newer lines.
    pub fn on_wheel(&mut self, rotation: i32) {
        if rotation == 0 {
            return;
        }
        let delta = rotation.saturating_mul(self.config.wheel_step_px);
        self.scroll_by(delta);
    }

    /// Moves the view by `delta` pixels, clamped to the content.
    ///
    /// While a snap is pending the bottom is not known yet, so the move is
    /// kept relative to it until the next [`resolve`](Self::resolve).
    pub fn scroll_by(&mut self, delta: i32) {
        let distance = match self.offset {
            ScrollOffset::Px(px) => {
                let current = px.clamp(0, self.max_scroll());
                self.set_user_offset(current.saturating_add(delta));
                return;
            }
            ScrollOffset::SnapToBottom => 0,
            ScrollOffset::FromBottom(distance) => distance,
        };
        let distance = distance.saturating_sub(delta).max(0);
        self.offset = ScrollOffset::FromBottom(distance);
        self.user_scrolled = distance > self.config.bottom_tolerance_px;
    }

    /// Scrolls up by one viewport height.
    pub fn page_up(&mut self) {
        self.scroll_by(-self.viewport_height.max(1));
    }

    /// Scrolls down by one viewport height.
    pub fn page_down(&mut self) {
        self.scroll_by(self.viewport_height.max(1));
    }

    /// Jumps to the oldest content.
    pub fn scroll_to_top(&mut self) {
        self.set_user_offset(0);
    }

    /// Explicitly returns to the newest content and re-enables stick-to-bottom.
    pub fn scroll_to_bottom(&mut self) {
        self.user_scrolled = false;
        self.offset = ScrollOffset::SnapToBottom;
    }

    /// Sets an offset chosen by the user (wheel, drag, keys).
    ///
    /// The view counts as user-scrolled when it ends up further than the
    /// tolerance away from the bottom.
    pub fn set_user_offset(&mut self, offset: i32) {
        let max_scroll = self.max_scroll();
        let px = offset.clamp(0, max_scroll);
        self.offset = ScrollOffset::Px(px);
        self.user_scrolled = px < max_scroll - self.config.bottom_tolerance_px;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(content: i32, viewport: i32) -> ScrollState {
        let mut state = ScrollState::default();
        state.resolve(content, viewport);
        state
    }

    #[test]
    fn new_state_snaps_to_bottom_on_first_resolve() {
        let mut state = ScrollState::default();
        assert_eq!(state.raw_offset(), ScrollOffset::SnapToBottom);
        assert_eq!(state.resolve(100, 40), 60);
        assert_eq!(state.raw_offset(), ScrollOffset::Px(60));
    }

    #[test]
    fn content_smaller_than_viewport_resolves_to_zero() {
        let state = resolved(20, 40);
        assert_eq!(state.offset(), 0);
        assert_eq!(state.max_scroll(), 0);
    }

    #[test]
    fn push_while_at_bottom_follows_new_content() {
        let mut state = resolved(100, 40);
        state.on_line_pushed();
        assert_eq!(state.resolve(120, 40), 80);
        assert!(!state.user_scrolled());
    }

    #[test]
    fn push_while_scrolled_up_keeps_position() {
        let mut state = resolved(100, 40);
        state.on_wheel(-10);
        assert!(state.user_scrolled());
        let before = state.offset();

        state.on_line_pushed();
        assert_eq!(state.resolve(120, 40), before);
    }

    #[test]
    fn wheel_moves_by_step_times_rotation() {
        let mut state = resolved(100, 40);
        state.on_wheel(-2);
        assert_eq!(state.offset(), 60 - 2 * 3);
        state.on_wheel(1);
        assert_eq!(state.offset(), 57);
    }

    #[test]
    fn wheel_is_clamped_to_content() {
        let mut state = resolved(100, 40);
        state.on_wheel(-1000);
        assert_eq!(state.offset(), 0);
        state.on_wheel(1000);
        assert_eq!(state.offset(), 60);
    }

    #[test]
    fn small_moves_within_tolerance_keep_stick_to_bottom() {
        let mut state = resolved(100, 40);
        state.scroll_by(-2);
        assert!(!state.user_scrolled());
        state.scroll_by(-1);
        assert!(state.user_scrolled());
    }

    #[test]
    fn returning_to_bottom_by_wheel_clears_user_scrolled() {
        let mut state = resolved(100, 40);
        state.on_wheel(-5);
        assert!(state.user_scrolled());
        state.on_wheel(5);
        assert!(!state.user_scrolled());
    }

    #[test]
    fn scroll_to_bottom_resets_user_scrolled() {
        let mut state = resolved(100, 40);
        state.scroll_to_top();
        assert!(state.user_scrolled());
        state.scroll_to_bottom();
        assert!(!state.user_scrolled());
        assert_eq!(state.raw_offset(), ScrollOffset::SnapToBottom);
        assert_eq!(state.resolve(100, 40), 60);
    }

    #[test]
    fn shrinking_content_clamps_offset() {
        let mut state = resolved(200, 40);
        state.set_user_offset(100);
        assert_eq!(state.resolve(80, 40), 40);
    }

    #[test]
    fn page_keys_move_by_viewport_height() {
        let mut state = resolved(200, 40);
        state.page_up();
        assert_eq!(state.offset(), 120);
        state.page_down();
        assert_eq!(state.offset(), 160);
    }

    #[test]
    fn wheel_before_render_moves_from_the_new_bottom() {
        let mut state = resolved(200, 50);
        assert_eq!(state.offset(), 150);

        state.on_line_pushed();
        state.on_wheel(-1);
        assert_eq!(state.raw_offset(), ScrollOffset::FromBottom(3));
        assert!(state.user_scrolled());

        assert_eq!(state.resolve(300, 50), 247);
        assert_eq!(state.max_scroll(), 250);
        assert!(state.user_scrolled());
    }

    #[test]
    fn page_up_before_render_moves_one_page_from_the_new_bottom() {
        let mut state = resolved(200, 50);
        state.on_line_pushed();
        state.page_up();
        state.on_wheel(1);
        assert_eq!(state.resolve(300, 50), 250 - 50 + 3);
    }

    #[test]
    fn pending_move_within_tolerance_stays_at_bottom() {
        let mut state = resolved(200, 50);
        state.on_line_pushed();
        state.scroll_by(-2);
        assert!(!state.user_scrolled());
        assert_eq!(state.resolve(300, 50), 248);
        assert!(!state.user_scrolled());

        state.on_line_pushed();
        assert_eq!(state.resolve(310, 50), 260);
    }

    #[test]
    fn pending_move_past_the_top_clamps_and_stays_scrolled() {
        let mut state = resolved(200, 50);
        state.on_line_pushed();
        state.on_wheel(-1000);
        assert_eq!(state.resolve(300, 50), 0);
        assert!(state.user_scrolled());
    }

    #[test]
    fn offset_stays_clamped_over_arbitrary_sequences() {
        let mut state = ScrollState::default();
        let mut content = 0;
        for step in 0..200 {
            content += (step % 7) * 5;
            match step % 5 {
                0 => state.on_wheel(-(step % 11)),
                1 => state.on_wheel(step % 13),
                2 => state.on_line_pushed(),
                3 => state.set_user_offset(step * 17 - 300),
                _ => state.page_up(),
            }
            let offset = state.resolve(content, 50);
            assert!(offset >= 0);
            assert!(offset <= (content - 50).max(0));
        }
    }
}
