//! Tests for the app module.
//!
//! This module is organized into submodules by functionality:
//! - `helpers` - Shared test utilities
//! - `input` - Composer editing, submit, paste and hotkeys
//! - `mouse` - Wheel, scrollbar dragging and right-click whispers
//! - `ui` - Rendered screen and background events

#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod helpers;
