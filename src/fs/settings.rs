//! Settings persistence module.
//!
//! Viewport settings live in a JSON file (`chatframe.json` by default).
//! Every field is optional; missing fields take their defaults.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{
    Blink, ChannelPalette, ChannelTag, DEFAULT_CAPACITY, DEFAULT_MAX_CHARS, LabelPolicy,
    MIN_THUMB_HEIGHT, Rgba, ScrollConfig, ViewportConfig,
};

/// Default settings file name.
pub const SETTINGS_FILE: &str = "chatframe.json";

/// Settings values that parse but make no sense.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("capacity must be at least 1")]
    ZeroCapacity,
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: i32 },
    #[error("invalid timestamp format: {0:?}")]
    TimestampFormat(String),
}

/// Persisted viewport settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewportSettings {
    /// Maximum number of stored lines.
    pub capacity: usize,
    pub wheel_step_px: i32,
    pub bottom_tolerance_px: i32,
    pub min_thumb_height_px: i32,
    pub scrollbar_width_px: i32,
    /// Optional fill behind the whole viewport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgba>,
    pub background_radius_px: i32,
    pub thumb_color: Rgba,
    pub track_color: Rgba,
    pub show_timestamps: bool,
    /// chrono strftime format for timestamp labels.
    pub timestamp_format: String,
    pub timestamp_utc: bool,
    /// Per-channel color overrides.
    pub channel_colors: HashMap<ChannelTag, Rgba>,
    pub input_max_chars: usize,
    /// Caret blink half-period; 0 keeps the caret on.
    pub caret_blink_ms: u64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        let viewport = ViewportConfig::default();
        let labels = LabelPolicy::default();
        Self {
            capacity: DEFAULT_CAPACITY,
            wheel_step_px: viewport.scroll.wheel_step_px,
            bottom_tolerance_px: viewport.scroll.bottom_tolerance_px,
            min_thumb_height_px: MIN_THUMB_HEIGHT,
            scrollbar_width_px: viewport.scrollbar_width,
            background: None,
            background_radius_px: 0,
            thumb_color: viewport.thumb_color,
            track_color: viewport.track_color,
            show_timestamps: labels.show_timestamp,
            timestamp_format: labels.timestamp_format,
            timestamp_utc: labels.utc,
            channel_colors: HashMap::new(),
            input_max_chars: DEFAULT_MAX_CHARS,
            caret_blink_ms: 500,
        }
    }
}

impl ViewportSettings {
    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.capacity == 0 {
            return Err(SettingsError::ZeroCapacity);
        }
        for (field, value) in [
            ("wheel_step_px", self.wheel_step_px),
            ("bottom_tolerance_px", self.bottom_tolerance_px),
            ("min_thumb_height_px", self.min_thumb_height_px),
            ("scrollbar_width_px", self.scrollbar_width_px),
            ("background_radius_px", self.background_radius_px),
        ] {
            if value < 0 {
                return Err(SettingsError::Negative { field, value });
            }
        }
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(SettingsError::TimestampFormat(self.timestamp_format.clone()));
        }
        Ok(())
    }

    #[must_use]
    pub fn label_policy(&self) -> LabelPolicy {
        LabelPolicy {
            show_timestamp: self.show_timestamps,
            timestamp_format: self.timestamp_format.clone(),
            utc: self.timestamp_utc,
            ..LabelPolicy::default()
        }
    }

    #[must_use]
    pub fn palette(&self) -> ChannelPalette {
        ChannelPalette::new(self.channel_colors.clone())
    }

    #[must_use]
    pub fn viewport_config(&self) -> ViewportConfig {
        ViewportConfig {
            capacity: self.capacity,
            scroll: ScrollConfig {
                wheel_step_px: self.wheel_step_px,
                bottom_tolerance_px: self.bottom_tolerance_px,
            },
            min_thumb_height: self.min_thumb_height_px,
            scrollbar_width: self.scrollbar_width_px,
            background: self.background,
            background_radius: self.background_radius_px,
            track_color: self.track_color,
            thumb_color: self.thumb_color,
            labels: self.label_policy(),
        }
    }

    #[must_use]
    pub const fn blink(&self) -> Blink {
        Blink::new(Duration::from_millis(self.caret_blink_ms))
    }
}

/// Loads settings from the specified settings file path.
///
/// If the file doesn't exist, returns default settings.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed, or
/// holds invalid values.
pub fn load_settings(path: &Path) -> Result<ViewportSettings> {
    if !path.exists() {
        return Ok(ViewportSettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    let settings: ViewportSettings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    Ok(settings)
}

/// Saves settings to the specified path as pretty-printed JSON.
///
/// Creates the parent directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn save_settings(path: &Path, settings: &ViewportSettings) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
    std::fs::write(path, json).context("Failed to write settings file")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let settings = ViewportSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.capacity, 40);
        assert_eq!(settings.input_max_chars, 80);
        assert_eq!(settings.timestamp_format, "%H:%M");
    }

    #[test]
    fn load_nonexistent_file_returns_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let settings = load_settings(&temp_dir.path().join(SETTINGS_FILE))?;
        assert_eq!(settings, ViewportSettings::default());
        Ok(())
    }

    #[test]
    fn save_and_load_roundtrip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join(SETTINGS_FILE);

        let mut settings = ViewportSettings {
            capacity: 100,
            show_timestamps: true,
            background: Some(Rgba::rgba(0, 0, 0, 0x80)),
            ..ViewportSettings::default()
        };
        settings
            .channel_colors
            .insert(ChannelTag::Trade, Rgba::rgb(0xff, 0, 0));

        save_settings(&path, &settings)?;
        assert_eq!(load_settings(&path)?, settings);
        Ok(())
    }

    #[test]
    fn missing_fields_take_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r##"{ "capacity": 7, "thumb_color": "#ff0000" }"##)?;

        let settings = load_settings(&path)?;
        assert_eq!(settings.capacity, 7);
        assert_eq!(settings.thumb_color, Rgba::rgb(0xff, 0, 0));
        assert_eq!(settings.wheel_step_px, 3);
        assert_eq!(settings.caret_blink_ms, 500);
        Ok(())
    }

    #[test]
    fn channel_colors_use_lowercase_names() -> Result<()> {
        let json = r#"{ "channel_colors": { "clan": "00ff00" } }"#;
        let settings: ViewportSettings = serde_json::from_str(json)?;
        assert_eq!(
            settings.channel_colors.get(&ChannelTag::Clan),
            Some(&Rgba::rgb(0, 0xff, 0))
        );
        Ok(())
    }

    #[test]
    fn malformed_json_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{ not json")?;

        let err = load_settings(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
        Ok(())
    }

    #[test]
    fn bad_color_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "track_color": "zzz" }"#)?;
        assert!(load_settings(&path).is_err());
        Ok(())
    }

    #[test]
    fn zero_capacity_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "capacity": 0 }"#)?;

        let err = load_settings(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SettingsError>(),
            Some(&SettingsError::ZeroCapacity)
        );
        Ok(())
    }

    #[test]
    fn negative_pixels_are_rejected() {
        let settings = ViewportSettings {
            scrollbar_width_px: -2,
            ..ViewportSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::Negative {
                field: "scrollbar_width_px",
                value: -2
            })
        );
    }

    #[test]
    fn broken_timestamp_format_is_rejected() {
        let settings = ViewportSettings {
            timestamp_format: "%Q".to_string(),
            ..ViewportSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::TimestampFormat(_))
        ));
    }

    #[test]
    fn viewport_config_carries_every_field() {
        let settings = ViewportSettings {
            capacity: 12,
            wheel_step_px: 5,
            bottom_tolerance_px: 1,
            min_thumb_height_px: 3,
            scrollbar_width_px: 2,
            background_radius_px: 4,
            show_timestamps: true,
            timestamp_utc: true,
            ..ViewportSettings::default()
        };
        let config = settings.viewport_config();

        assert_eq!(config.capacity, 12);
        assert_eq!(config.scroll.wheel_step_px, 5);
        assert_eq!(config.scroll.bottom_tolerance_px, 1);
        assert_eq!(config.min_thumb_height, 3);
        assert_eq!(config.scrollbar_width, 2);
        assert_eq!(config.background_radius, 4);
        assert!(config.labels.show_timestamp);
        assert!(config.labels.utc);
        assert!(config.labels.show_prefix);
    }
}
