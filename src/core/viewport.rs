//! The chat scrollback viewport: store, layout, scrolling and hit-testing
//! wired together behind one per-frame API.
//!
//! Each frame the host calls [`ChatViewport::render`] with the rectangle to
//! draw into. Lines are wrapped to the text area's width (cache hits unless
//! something invalidated them), the scroll offset is resolved and clamped,
//! the visible rows are drawn, and the scrollbar geometry is recomputed.
//! Pointer and wheel events between frames only mutate state; they take
//! effect on the next render.

use tracing::debug;

use super::color::Rgba;
use super::geometry::{PxPoint, PxRect};
use super::hit_test::{self, RowHit};
use super::line::{ChannelColors, ChannelPalette, ChannelTag, LabelPolicy, LineId, StoredLine};
use super::markup;
use super::metrics::FontMetrics;
use super::scroll::{ScrollConfig, ScrollState};
use super::scrollbar::{DragController, MIN_THUMB_HEIGHT, ScrollbarGeometry, TrackHit};
use super::store::{DEFAULT_CAPACITY, ScrollbackStore};
use super::surface::Surface;

/// Supplies the rectangle to draw into; may report degenerate bounds.
pub trait ViewportBounds {
    fn bounds(&self) -> PxRect;
}

impl<F> ViewportBounds for F
where
    F: Fn() -> PxRect,
{
    fn bounds(&self) -> PxRect {
        self()
    }
}

/// Layout and appearance settings of the viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportConfig {
    pub capacity: usize,
    pub scroll: ScrollConfig,
    pub min_thumb_height: i32,
    pub scrollbar_width: i32,
    pub background: Option<Rgba>,
    pub background_radius: i32,
    pub track_color: Rgba,
    pub thumb_color: Rgba,
    pub labels: LabelPolicy,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            scroll: ScrollConfig::default(),
            min_thumb_height: MIN_THUMB_HEIGHT,
            scrollbar_width: 1,
            background: None,
            background_radius: 0,
            track_color: Rgba::rgb(0x3c, 0x3c, 0x3c),
            thumb_color: Rgba::rgb(0xaa, 0xaa, 0xaa),
            labels: LabelPolicy::default(),
        }
    }
}

/// Where the last frame was laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub bounds: PxRect,
    pub text_area: PxRect,
    pub track: PxRect,
    pub row_height: i32,
}

/// Chat scrollback viewport.
pub struct ChatViewport {
    store: ScrollbackStore,
    scroll: ScrollState,
    drag: DragController,
    colors: Box<dyn ChannelColors>,
    config: ViewportConfig,
    last_valid_viewport: Option<PxRect>,
    frame: Option<FrameLayout>,
    geometry: Option<ScrollbarGeometry>,
}

impl Default for ChatViewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default(), ChannelPalette::default())
    }
}

impl ChatViewport {
    #[must_use]
    pub fn new(config: ViewportConfig, colors: impl ChannelColors + 'static) -> Self {
        Self {
            store: ScrollbackStore::new(config.capacity),
            scroll: ScrollState::new(config.scroll),
            drag: DragController::default(),
            colors: Box::new(colors),
            config,
            last_valid_viewport: None,
            frame: None,
            geometry: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ViewportConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &ScrollbackStore {
        &self.store
    }

    #[must_use]
    pub const fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Scrollbar geometry of the last frame; `None` when nothing scrolls.
    #[must_use]
    pub const fn geometry(&self) -> Option<&ScrollbarGeometry> {
        self.geometry.as_ref()
    }

    #[must_use]
    pub const fn frame(&self) -> Option<&FrameLayout> {
        self.frame.as_ref()
    }

    #[must_use]
    pub const fn last_valid_viewport(&self) -> Option<PxRect> {
        self.last_valid_viewport
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Parses a marked-up message and appends one stored line per `<br>` segment.
    pub fn push_line(
        &mut self,
        text: &str,
        channel: ChannelTag,
        timestamp_ms: i64,
        sender: Option<&str>,
        receiver: Option<&str>,
    ) -> Vec<LineId> {
        let base = self.colors.color_for(channel);
        markup::parse(text, base)
            .into_iter()
            .map(|runs| {
                self.push_stored(StoredLine::new(
                    runs,
                    channel,
                    timestamp_ms,
                    sender.map(str::to_string),
                    receiver.map(str::to_string),
                ))
            })
            .collect()
    }

    /// Appends an already parsed line, decorating it with the current label policy.
    pub fn push_stored(&mut self, mut line: StoredLine) -> LineId {
        line.apply_policy(&self.config.labels, self.colors.as_ref());
        let id = self.store.push(line);
        self.scroll.on_line_pushed();
        id
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.scroll.scroll_to_bottom();
        self.drag.release();
    }

    /// Invalidates every wrap cache, e.g. after a font or style change.
    pub fn dirty(&mut self) {
        self.store.mark_all_dirty();
    }

    #[must_use]
    pub const fn label_policy(&self) -> &LabelPolicy {
        &self.config.labels
    }

    /// Changes prefix/timestamp decoration for every stored line.
    pub fn set_label_policy(&mut self, policy: LabelPolicy) {
        if policy == self.config.labels {
            return;
        }
        self.store.apply_policy(&policy, self.colors.as_ref());
        self.config.labels = policy;
    }

    /// Replaces the channel color lookup. Already stored lines keep their colors
    /// until the label policy or content changes.
    pub fn set_channel_colors(&mut self, colors: impl ChannelColors + 'static) {
        self.colors = Box::new(colors);
    }

    /// Applies new settings; only invalidates what the change affects.
    pub fn apply_config(&mut self, config: ViewportConfig) {
        if config.capacity != self.config.capacity {
            self.store.set_capacity(config.capacity);
        }
        self.scroll.set_config(config.scroll);
        if config.labels != self.config.labels {
            self.store.apply_policy(&config.labels, self.colors.as_ref());
        }
        if config.scrollbar_width != self.config.scrollbar_width {
            self.store.mark_all_dirty();
        }
        self.config = config;
    }

    /// Renders one frame.
    ///
    /// Degenerate `bounds` fall back to the last valid bounds; without any the
    /// frame is skipped. Returns true if anything was drawn.
    pub fn render<S, M>(
        &mut self,
        surface: &mut S,
        bounds: PxRect,
        metrics: &M,
        row_height: i32,
    ) -> bool
    where
        S: Surface + ?Sized,
        M: FontMetrics + ?Sized,
    {
        let Some(bounds) = self.accept_bounds(bounds) else {
            debug!("skipping frame: no valid viewport bounds yet");
            return false;
        };
        if row_height <= 0 {
            debug!(row_height, "skipping frame: non-positive row height");
            return false;
        }

        let (text_area, track) = bounds.split_right(self.config.scrollbar_width);
        if !text_area.is_valid() {
            debug!(?bounds, "skipping frame: no room for text");
            return false;
        }

        self.store.ensure_wrapped(metrics, text_area.width);
        let total_rows = i32::try_from(self.store.total_rows()).unwrap_or(i32::MAX);
        let content_height = total_rows.saturating_mul(row_height);
        let offset = self.scroll.resolve(content_height, text_area.height);

        self.frame = Some(FrameLayout {
            bounds,
            text_area,
            track,
            row_height,
        });

        if let Some(background) = self.config.background {
            surface.fill_rounded_rect(bounds, self.config.background_radius, background);
        }

        surface.set_clip(Some(text_area));
        self.draw_rows(surface, metrics, text_area, row_height, offset);
        surface.set_clip(None);

        self.geometry = ScrollbarGeometry::compute(
            track,
            content_height,
            text_area.height,
            offset,
            self.config.min_thumb_height,
        );
        if let Some(geometry) = &self.geometry {
            let radius = geometry.thumb.width / 2;
            surface.fill_rounded_rect(geometry.track, radius, self.config.track_color);
            surface.fill_rounded_rect(geometry.thumb, radius, self.config.thumb_color);
        }
        true
    }

    /// Renders into whatever rectangle `provider` reports this frame.
    pub fn render_with<S, B, M>(
        &mut self,
        surface: &mut S,
        provider: &B,
        metrics: &M,
        row_height: i32,
    ) -> bool
    where
        S: Surface + ?Sized,
        B: ViewportBounds + ?Sized,
        M: FontMetrics + ?Sized,
    {
        self.render(surface, provider.bounds(), metrics, row_height)
    }

    fn accept_bounds(&mut self, bounds: PxRect) -> Option<PxRect> {
        if bounds.is_valid() {
            self.last_valid_viewport = Some(bounds);
            Some(bounds)
        } else {
            self.last_valid_viewport
        }
    }

    /// Draws only the rows intersecting `[offset, offset + area.height)`.
    fn draw_rows<S, M>(&self, surface: &mut S, metrics: &M, area: PxRect, row_height: i32, offset: i32)
    where
        S: Surface + ?Sized,
        M: FontMetrics + ?Sized,
    {
        let first_visible = usize::try_from(offset / row_height).unwrap_or(0);
        let last_visible =
            usize::try_from((offset + area.height - 1) / row_height).unwrap_or(0);

        let mut global_row = 0usize;
        for (_, rows) in self.store.wrapped() {
            if global_row > last_visible {
                break;
            }
            if global_row + rows.len() <= first_visible {
                global_row += rows.len();
                continue;
            }
            for (i, row) in rows.iter().enumerate() {
                let index = global_row + i;
                if index < first_visible {
                    continue;
                }
                if index > last_visible {
                    break;
                }
                let row_top = i32::try_from(index)
                    .unwrap_or(i32::MAX)
                    .saturating_mul(row_height);
                let y = area.y + row_top - offset;
                let mut x = area.x;
                for run in &row.runs {
                    surface.draw_text(x, y, &run.text, run.color);
                    x += metrics.string_width(&run.text);
                }
            }
            global_row += rows.len();
        }
    }

    /// Applies wheel rotation; positive rotation scrolls toward newer lines.
    pub fn on_wheel(&mut self, rotation: i32) {
        self.scroll.on_wheel(rotation);
    }

    /// Handles a pointer press. Returns true if the scrollbar consumed it.
    ///
    /// A press on the thumb starts a drag; a press on the track pages toward it.
    pub fn on_pointer_down(&mut self, point: PxPoint) -> bool {
        let Some(geometry) = self.geometry else {
            return false;
        };
        match self.drag.press(point, &geometry) {
            Some(TrackHit::Thumb) => true,
            Some(TrackHit::Above) => {
                self.scroll.page_up();
                true
            }
            Some(TrackHit::Below) => {
                self.scroll.page_down();
                true
            }
            None => false,
        }
    }

    /// Handles pointer movement with the button held. Returns true while dragging.
    pub fn on_pointer_drag(&mut self, point: PxPoint) -> bool {
        let Some(geometry) = self.geometry else {
            return false;
        };
        match self.drag.drag(point, &geometry) {
            Some(offset) => {
                self.scroll.set_user_offset(offset);
                true
            }
            None => false,
        }
    }

    /// Handles a pointer release. Returns true if it ended a drag.
    pub fn on_pointer_up(&mut self, _point: PxPoint) -> bool {
        self.drag.release()
    }

    /// Finds the stored line under `point`, using the last frame's layout.
    #[must_use]
    pub fn row_at(&self, point: PxPoint) -> Option<RowHit<'_>> {
        let frame = self.frame?;
        let total_rows = i32::try_from(self.store.total_rows()).ok()?;
        let content_height = total_rows.checked_mul(frame.row_height)?;
        let offset = self
            .scroll
            .peek_resolved(content_height, frame.text_area.height);
        hit_test::row_at(&self.store, frame.text_area, frame.row_height, offset, point)
    }

    /// Returns to the newest line and re-enables stick-to-bottom.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll.scroll_to_bottom();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll.scroll_to_top();
    }

    pub fn page_up(&mut self) {
        self.scroll.page_up();
    }

    pub fn page_down(&mut self) {
        self.scroll.page_down();
    }
}
