//! `Chatframe` - rich-text chat scrollback viewport
//!
//! A bounded, color-marked-up message log with word wrap, pixel scrolling,
//! a draggable scrollbar, hit-testing and a single-line input editor, plus a
//! terminal host built on ratatui.

pub mod app;
pub mod cli;
pub mod core;
pub mod fs;
pub mod tui;
