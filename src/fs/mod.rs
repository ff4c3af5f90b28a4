//! File system operations.

pub mod settings;

pub use settings::{SETTINGS_FILE, SettingsError, ViewportSettings, load_settings, save_settings};
