//! User preferences for the Pomodoro Timer.
//!
//! Settings are grouped in the same sections as the settings file:
//!
//! ```ini
//! [Window]
//! x = 100
//! y = 100
//! always_on_top = true
//!
//! [Timer]
//! custom_duration_minutes = 25
//! pause_duration_minutes = 5
//!
//! [Display]
//! font_size = 96
//! font_path = /usr/share/fonts/dseg7.ttf
//! work_timer_color = #E8E8E8
//! pause_timer_color = #4CAF50
//!
//! [Alerts]
//! show_work_complete_alert = true
//! show_pause_complete_alert = true
//! ```
//!
//! Every key is optional; see [`SettingsStore::load`] for the fallback rules.

mod color;
mod error;
mod store;

pub use color::{Color, ColorParseError};
pub use error::SettingsError;
pub use store::{default_config_path, SettingsStore, SETTINGS_FILE_NAME};

use std::path::PathBuf;

use ini::{EscapePolicy, Ini, WriteOption};

use crate::types::TimerConfig;

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 96;
/// Smallest accepted font size.
pub const MIN_FONT_SIZE: u32 = 8;
/// Largest accepted font size.
pub const MAX_FONT_SIZE: u32 = 512;

// ============================================================================
// Sections
// ============================================================================

/// `[Window]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSettings {
    pub x: i32,
    pub y: i32,
    pub always_on_top: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            always_on_top: true,
        }
    }
}

/// `[Timer]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSettings {
    /// Work phase length
    pub custom_duration_minutes: u32,
    /// Pause phase length, 0 disables the pause phase
    pub pause_duration_minutes: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        let config = TimerConfig::default();
        Self {
            custom_duration_minutes: config.work_minutes,
            pause_duration_minutes: config.pause_minutes,
        }
    }
}

/// `[Display]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub font_size: u32,
    pub font_path: Option<PathBuf>,
    pub work_timer_color: Color,
    pub pause_timer_color: Color,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_path: None,
            work_timer_color: Color::rgb(0xE8, 0xE8, 0xE8),
            pause_timer_color: Color::rgb(0x4C, 0xAF, 0x50),
        }
    }
}

/// `[Alerts]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSettings {
    pub show_work_complete_alert: bool,
    pub show_pause_complete_alert: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            show_work_complete_alert: true,
            show_pause_complete_alert: true,
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// All persisted preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub window: WindowSettings,
    pub timer: TimerSettings,
    pub display: DisplaySettings,
    pub alerts: AlertSettings,
}

impl Settings {
    /// Timer configuration described by these settings.
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            work_minutes: self.timer.custom_duration_minutes,
            pause_minutes: self.timer.pause_duration_minutes,
            alert_on_work_complete: self.alerts.show_work_complete_alert,
            alert_on_pause_complete: self.alerts.show_pause_complete_alert,
        }
    }

    /// Copies durations and alert switches back from a timer configuration.
    pub fn apply_timer_config(&mut self, config: &TimerConfig) {
        self.timer.custom_duration_minutes = config.work_minutes;
        self.timer.pause_duration_minutes = config.pause_minutes;
        self.alerts.show_work_complete_alert = config.alert_on_work_complete;
        self.alerts.show_pause_complete_alert = config.alert_on_pause_complete;
    }

    /// Builds the settings file document.
    ///
    /// Every key is written; an unset font path is an empty value.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("Window"))
            .set("x", self.window.x.to_string())
            .set("y", self.window.y.to_string())
            .set("always_on_top", self.window.always_on_top.to_string());
        ini.with_section(Some("Timer"))
            .set(
                "custom_duration_minutes",
                self.timer.custom_duration_minutes.to_string(),
            )
            .set(
                "pause_duration_minutes",
                self.timer.pause_duration_minutes.to_string(),
            );
        let font_path = self
            .display
            .font_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        ini.with_section(Some("Display"))
            .set("font_size", self.display.font_size.to_string())
            .set("font_path", font_path)
            .set("work_timer_color", self.display.work_timer_color.to_string())
            .set("pause_timer_color", self.display.pause_timer_color.to_string());
        ini.with_section(Some("Alerts"))
            .set(
                "show_work_complete_alert",
                self.alerts.show_work_complete_alert.to_string(),
            )
            .set(
                "show_pause_complete_alert",
                self.alerts.show_pause_complete_alert.to_string(),
            );
        ini
    }

    /// Serializes the settings in the settings file format.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written out.
    pub fn to_ini_string(&self) -> Result<String, SettingsError> {
        let option = WriteOption {
            escape_policy: EscapePolicy::Nothing,
            kv_separator: " = ",
            ..WriteOption::default()
        };
        let mut buf = Vec::new();
        self.to_ini()
            .write_to_opt(&mut buf, option)
            .map_err(SettingsError::Serialize)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
