// Thaiswap Settings Module
// Handles user-configurable settings for the conversion trigger

#![cfg(feature = "settings")]

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::hotkey::{parse_hotkey, Hotkey, HotkeyParseError};
use crate::trigger::RetryPolicy;

/// Default hotkey string
pub const DEFAULT_HOTKEY: &str = "Ctrl+Shift+Space";

/// Settings for thaiswap
///
/// These settings are loaded from a TOML file (default:
/// ~/.config/thaiswap/settings.toml). A missing file yields the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Hotkey that asks the host to run a conversion
    hotkey: String,

    /// Paste the converted text after writing it back
    auto_paste: bool,

    /// Number of characters shown in notification previews
    preview_length: usize,

    /// Show a notification after each conversion
    enable_notifications: bool,

    /// How long a notification stays visible
    notification_duration_ms: u64,

    /// Attempts made to read or write the text buffer
    max_retries: u32,

    /// Delay between buffer attempts
    retry_delay_ms: u64,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),

    #[error("Invalid hotkey: {0}")]
    InvalidHotkey(#[from] HotkeyParseError),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    hotkey: Option<HotkeySettings>,

    #[serde(default)]
    behavior: Option<BehaviorSettings>,

    #[serde(default)]
    notifications: Option<NotificationSettings>,

    #[serde(default)]
    buffer: Option<BufferSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct HotkeySettings {
    #[serde(default)]
    combo: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct BehaviorSettings {
    #[serde(default)]
    auto_paste: Option<bool>,
    #[serde(default)]
    preview_length: Option<usize>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct NotificationSettings {
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default)]
    duration_ms: Option<u64>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct BufferSettings {
    #[serde(default)]
    max_retries: Option<u32>,
    #[serde(default)]
    retry_delay_ms: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self {
            hotkey: DEFAULT_HOTKEY.to_string(),
            auto_paste: false,
            preview_length: 15,
            enable_notifications: true,
            notification_duration_ms: 2000,
            max_retries: 3,
            retry_delay_ms: 50,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        log::debug!("loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(hotkey) = toml_settings.hotkey {
            if let Some(combo) = hotkey.combo {
                settings.hotkey = combo;
            }
        }

        if let Some(behavior) = toml_settings.behavior {
            if let Some(auto_paste) = behavior.auto_paste {
                settings.auto_paste = auto_paste;
            }
            if let Some(preview_length) = behavior.preview_length {
                if preview_length == 0 {
                    return Err(SettingsError::InvalidValue(
                        "behavior.preview_length must be at least 1".to_string(),
                    ));
                }
                settings.preview_length = preview_length;
            }
        }

        if let Some(notifications) = toml_settings.notifications {
            if let Some(enabled) = notifications.enabled {
                settings.enable_notifications = enabled;
            }
            if let Some(duration_ms) = notifications.duration_ms {
                settings.notification_duration_ms = duration_ms;
            }
        }

        if let Some(buffer) = toml_settings.buffer {
            if let Some(max_retries) = buffer.max_retries {
                if max_retries == 0 {
                    return Err(SettingsError::InvalidValue(
                        "buffer.max_retries must be at least 1".to_string(),
                    ));
                }
                settings.max_retries = max_retries;
            }
            if let Some(retry_delay_ms) = buffer.retry_delay_ms {
                settings.retry_delay_ms = retry_delay_ms;
            }
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("thaiswap").join("settings.toml"))
    }

    /// Load from default location (~/.config/thaiswap/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        log::debug!("no settings file found, using defaults");
        Ok(Self::new())
    }

    /// Check every value that is only interpreted later
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.parsed_hotkey()?;
        Ok(())
    }

    /// Raw hotkey string
    pub fn hotkey(&self) -> &str {
        &self.hotkey
    }

    /// Parsed hotkey
    pub fn parsed_hotkey(&self) -> Result<Hotkey, SettingsError> {
        Ok(parse_hotkey(&self.hotkey)?)
    }

    pub fn auto_paste(&self) -> bool {
        self.auto_paste
    }

    pub fn preview_length(&self) -> usize {
        self.preview_length
    }

    pub fn notifications_enabled(&self) -> bool {
        self.enable_notifications
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }

    /// Retry policy for text buffer access
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.retry_delay_ms))
    }

    /// Path the settings were loaded from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Thaiswap Settings
# Place this file at: ~/.config/thaiswap/settings.toml

[hotkey]
# Modifiers: Ctrl, Shift, Alt, Win. Keys: A-Z, 0-9, F1-F24, Space, Enter, ...
combo = "Ctrl+Shift+Space"

[behavior]
# Paste after writing back; read by host applications with a paste target
auto_paste = false
# Characters shown on each side of the notification preview
preview_length = 15

[notifications]
enabled = true
# How long a host shows each notification
duration_ms = 2000

[buffer]
# Attempts to read or write the text buffer before giving up
max_retries = 3
retry_delay_ms = 50
"#
}
