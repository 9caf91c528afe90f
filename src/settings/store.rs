//! Loading and saving the settings file.

use std::fs;
use std::io::Write;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use super::{Color, Settings, SettingsError, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::types::MAX_DURATION_MINUTES;

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.ini";

/// Directory name used below the platform config directory.
const APP_DIR_NAME: &str = "pomodoro-timer";

/// Returns the default settings file location.
///
/// Uses the platform config directory (e.g. `~/.config/pomodoro-timer/` on
/// Linux) and falls back to the working directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME))
}

// ============================================================================
// SettingsStore
// ============================================================================

/// Reads and writes [`Settings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store for the given settings file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the settings, never failing.
    ///
    /// - Missing file: defaults.
    /// - Unreadable file or broken section structure: defaults, with a
    ///   warning.
    /// - Missing key: the key's default.
    /// - Malformed value: the key's default, with a warning.
    pub fn load(&self) -> Settings {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No settings file, using defaults");
                return Settings::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), "Could not read settings file, using defaults: {}", e);
                return Settings::default();
            }
        };

        let settings = parse_settings(&content);
        info!(path = %self.path.display(), "Settings loaded");
        settings
    }

    /// Writes the settings atomically.
    ///
    /// The new content goes to a temporary file next to the target which is
    /// then renamed over it, so readers never observe a partial file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem step fails. The
    /// previous settings file is left untouched in that case.
    pub fn try_save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let content = settings.to_ini_string()?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let io_err = |source| SettingsError::Io {
            path: dir.clone(),
            source,
        };

        fs::create_dir_all(&dir).map_err(io_err)?;
        let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
        tmp.write_all(content.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path)
            .map_err(|e| SettingsError::Persist {
                path: self.path.clone(),
                source: e.error,
            })?;

        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Writes the settings, logging instead of returning failures.
    ///
    /// Returns true on success.
    pub fn save(&self, settings: &Settings) -> bool {
        match self.try_save(settings) {
            Ok(()) => {
                info!("Settings saved successfully");
                true
            }
            Err(e) => {
                error!("Error saving settings: {} ({})", e, e.suggestion());
                false
            }
        }
    }
}

// ============================================================================
// Lenient parsing
// ============================================================================

/// Parses settings file content, falling back per field.
pub(crate) fn parse_settings(content: &str) -> Settings {
    // Backslashes are kept as written so Windows font paths survive.
    let option = ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = match Ini::load_from_str_opt(content, option) {
        Ok(ini) => ini,
        Err(e) => {
            warn!("Settings file is not valid, using defaults: {}", e);
            return Settings::default();
        }
    };

    let reader = FieldReader { ini: &ini };
    let mut settings = Settings::default();

    let window = &mut settings.window;
    window.x = reader.int("Window", "x", window.x, i32::MIN..=i32::MAX);
    window.y = reader.int("Window", "y", window.y, i32::MIN..=i32::MAX);
    window.always_on_top = reader.boolean("Window", "always_on_top", window.always_on_top);

    let timer = &mut settings.timer;
    timer.custom_duration_minutes = reader.int(
        "Timer",
        "custom_duration_minutes",
        timer.custom_duration_minutes,
        1..=MAX_DURATION_MINUTES,
    );
    timer.pause_duration_minutes = reader.int(
        "Timer",
        "pause_duration_minutes",
        timer.pause_duration_minutes,
        0..=MAX_DURATION_MINUTES,
    );

    let display = &mut settings.display;
    display.font_size = reader.int(
        "Display",
        "font_size",
        display.font_size,
        MIN_FONT_SIZE..=MAX_FONT_SIZE,
    );
    display.font_path = reader
        .value("Display", "font_path")
        .filter(|path| !path.is_empty())
        .map(PathBuf::from);
    display.work_timer_color =
        reader.color("Display", "work_timer_color", display.work_timer_color);
    display.pause_timer_color =
        reader.color("Display", "pause_timer_color", display.pause_timer_color);

    let alerts = &mut settings.alerts;
    alerts.show_work_complete_alert = reader.boolean(
        "Alerts",
        "show_work_complete_alert",
        alerts.show_work_complete_alert,
    );
    alerts.show_pause_complete_alert = reader.boolean(
        "Alerts",
        "show_pause_complete_alert",
        alerts.show_pause_complete_alert,
    );

    settings
}

/// Reads individual keys, coercing values and reporting bad ones.
struct FieldReader<'a> {
    ini: &'a Ini,
}

impl<'a> FieldReader<'a> {
    /// Trimmed raw value of `key` in `section`.
    fn value(&self, section: &str, key: &str) -> Option<&'a str> {
        let ini: &'a Ini = self.ini;
        ini.section(Some(section))?.get(key).map(str::trim)
    }

    fn int<T>(&self, section: &str, key: &str, default: T, range: RangeInclusive<T>) -> T
    where
        T: TryFrom<i64> + PartialOrd + Copy + std::fmt::Display,
    {
        let Some(raw) = self.value(section, key) else {
            return default;
        };
        match raw.parse::<i64>().ok().and_then(|i| T::try_from(i).ok()) {
            Some(v) if range.contains(&v) => v,
            _ => {
                warn!(
                    section,
                    key,
                    value = raw,
                    "Invalid integer in settings, using default {}",
                    default
                );
                default
            }
        }
    }

    fn boolean(&self, section: &str, key: &str, default: bool) -> bool {
        let Some(raw) = self.value(section, key) else {
            return default;
        };
        parse_bool(raw).unwrap_or_else(|| {
            warn!(section, key, value = raw, "Invalid boolean in settings, using default {}", default);
            default
        })
    }

    fn color(&self, section: &str, key: &str, default: Color) -> Color {
        let Some(raw) = self.value(section, key) else {
            return default;
        };
        raw.parse::<Color>().unwrap_or_else(|e| {
            warn!(section, key, "{}, using default {}", e, default);
            default
        })
    }
}

/// Boolean spellings accepted in the settings file.
fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
