//! Skin configuration (lustre.toml)
//!
//! Defaults for new authorities and timed surfaces. Every field is optional in
//! the file; missing ones take the built-in value.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::style::{ColorStyle, ThemeStyle};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the file
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse skin config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize skin config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level skin configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SkinConfig {
    #[serde(default = "default_color_style")]
    pub color_style: ColorStyle,
    #[serde(default = "default_theme_style")]
    pub theme_style: ThemeStyle,
    #[serde(default)]
    pub notification: NotificationSettings,
    #[serde(default)]
    pub tween: TweenSettings,
    #[serde(default)]
    pub modal: ModalSettings,
}

fn default_color_style() -> ColorStyle {
    ColorStyle::Blue
}

fn default_theme_style() -> ThemeStyle {
    ThemeStyle::Light
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            color_style: default_color_style(),
            theme_style: default_theme_style(),
            notification: NotificationSettings::default(),
            tween: TweenSettings::default(),
            modal: ModalSettings::default(),
        }
    }
}

/// Transient notification settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NotificationSettings {
    /// Time until auto-close, in milliseconds
    #[serde(default = "default_close_time_ms")]
    pub close_time_ms: u64,
    /// Surface width in pixels; also the full progress bar width
    #[serde(default = "default_notification_width")]
    pub width: u32,
    #[serde(default = "default_notification_height")]
    pub height: u32,
    /// Countdown tick interval, in milliseconds
    #[serde(default = "default_countdown_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_close_time_ms() -> u64 {
    3000
}

fn default_notification_width() -> u32 {
    300
}

fn default_notification_height() -> u32 {
    80
}

fn default_countdown_interval_ms() -> u64 {
    10
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            close_time_ms: default_close_time_ms(),
            width: default_notification_width(),
            height: default_notification_height(),
            tick_interval_ms: default_countdown_interval_ms(),
        }
    }
}

impl NotificationSettings {
    pub fn close_time(&self) -> Duration {
        Duration::from_millis(self.close_time_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Position tween settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TweenSettings {
    #[serde(default = "default_tween_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_tween_interval_ms")]
    pub interval_ms: u64,
}

fn default_tween_duration_ms() -> u64 {
    250
}

fn default_tween_interval_ms() -> u64 {
    4
}

impl Default for TweenSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_tween_duration_ms(),
            interval_ms: default_tween_interval_ms(),
        }
    }
}

impl TweenSettings {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

/// Modal wait settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ModalSettings {
    /// How often the monitor task checks for closure, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Sleep between pump cycles on the waiting thread, in milliseconds
    #[serde(default = "default_pump_yield_ms")]
    pub pump_yield_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    5
}

fn default_pump_yield_ms() -> u64 {
    1
}

impl Default for ModalSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            pump_yield_ms: default_pump_yield_ms(),
        }
    }
}

impl ModalSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn pump_yield(&self) -> Duration {
        Duration::from_millis(self.pump_yield_ms)
    }
}

impl SkinConfig {
    /// Parse from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("loaded skin config from {}", path.display());
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
