//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - The effective settings
//! - The settings file location
//! - Error messages

use std::path::Path;

use crate::settings::{Settings, SettingsError};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Renders the settings report printed by `config show`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized.
    pub fn settings_report(path: &Path, settings: &Settings) -> Result<String, SettingsError> {
        let source = if path.exists() {
            "loaded"
        } else {
            "file not found, showing defaults"
        };
        Ok(format!(
            "# {} ({})\n{}",
            path.display(),
            source,
            settings.to_ini_string()?
        ))
    }

    /// Prints the effective settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized.
    pub fn show_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
        print!("{}", Self::settings_report(path, settings)?);
        Ok(())
    }

    /// Prints the settings file location.
    pub fn show_config_path(path: &Path) {
        println!("{}", path.display());
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
