//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use crate::fs::SETTINGS_FILE;

/// `Chatframe` - rich-text chat scrollback in the terminal
///
/// Shows a scrolling chat pane fed by a scripted demo feed, with a
/// draggable scrollbar and an input line.
#[derive(Parser, Debug)]
#[command(name = "chatframe", version, about, long_about = None)]
pub struct Args {
    /// Settings file (JSON). Missing files fall back to defaults.
    #[arg(default_value = SETTINGS_FILE, long)]
    pub config: PathBuf,

    /// Log verbosity.
    #[arg(default_value_t = Level::INFO, long)]
    pub level: Level,

    /// Log output file. The terminal is owned by the UI.
    #[arg(default_value = "chatframe.log", long)]
    pub log_file: PathBuf,

    /// Milliseconds between demo feed lines; 0 disables the feed.
    #[arg(default_value_t = 1500, long)]
    pub feed_interval_ms: u64,
}
