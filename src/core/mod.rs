//! Host-independent scrollback engine.
//!
//! Everything here works in integer host pixels and draws through the
//! [`Surface`] trait, so the same engine backs a terminal widget, a
//! recording display list, or a game overlay.

pub mod color;
pub mod editor;
pub mod geometry;
pub mod line;
pub mod markup;
pub mod metrics;
pub mod scroll;
pub mod scrollbar;
pub mod store;
pub mod surface;
pub mod viewport;
pub mod wrap;

pub use color::{ColorParseError, Rgba};
pub use editor::{Blink, CaretMove, DEFAULT_MAX_CHARS, EditCommand, InputLine};
pub use geometry::{PxPoint, PxRect};
pub use hit_test::{RowHit, row_at};
pub use line::{
    ChannelColors, ChannelPalette, ChannelTag, ColorRun, DisplayRow, LabelPolicy, LineId,
    StoredLine,
};
pub use metrics::{FontMetrics, MonospaceMetrics};
pub use scroll::{ScrollConfig, ScrollOffset, ScrollState};
pub use scrollbar::{DragController, MIN_THUMB_HEIGHT, ScrollbarGeometry, TrackHit};
pub use store::{DEFAULT_CAPACITY, ScrollbackStore};
pub use surface::{DisplayList, DrawOp, Surface};
pub use viewport::{ChatViewport, FrameLayout, ViewportBounds, ViewportConfig};
pub use wrap::{row_width, wrap, wrap_runs};
