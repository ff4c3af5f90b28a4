//! TUI presentation layer.

pub mod metrics;
pub mod setup;
pub mod surface;
pub mod theme;
pub mod widgets;

pub use metrics::CellMetrics;
pub use setup::TerminalEventGuard;
pub use surface::{BufferSurface, px_rect};
pub use theme::Theme;
