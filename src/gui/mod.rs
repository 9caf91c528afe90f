//! Desktop window for the Pomodoro Timer.
//!
//! This module contains the eframe front end:
//! - `app`: the timer window and its per-frame controller
//! - `input`: keyboard bindings
//! - `window`: position tracking and debounced saves
//! - `config_window`, `prompt`: settings dialogs
//! - `alert`, `tooltip`: transient popups

pub mod alert;
pub mod app;
pub mod config_window;
pub mod input;
pub mod prompt;
pub mod tooltip;
pub mod window;

pub use alert::{AlertKind, AlertSink, MockAlertSink, PopupAlerts};
pub use app::PomodoroApp;
pub use input::{Direction, InputAction, KeyBindings};
pub use window::{PositionSaver, WindowState};

use anyhow::{anyhow, Result};
use eframe::egui;
use tracing::info;

use crate::settings::{Settings, SettingsStore};

/// Window title, also used as the application id.
pub const APP_NAME: &str = "Pomodoro Timer";

/// Builds the borderless, transparent main viewport.
pub fn native_options(settings: &Settings, initial_size: egui::Vec2) -> eframe::NativeOptions {
    let mut viewport = egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_app_id("pomodoro-timer")
        .with_decorations(false)
        .with_transparent(true)
        .with_resizable(false)
        .with_position(egui::pos2(
            settings.window.x as f32,
            settings.window.y as f32,
        ))
        .with_inner_size(initial_size);
    if settings.window.always_on_top {
        viewport = viewport.with_window_level(egui::WindowLevel::AlwaysOnTop);
    }

    eframe::NativeOptions {
        viewport,
        ..Default::default()
    }
}

/// Opens the timer window and blocks until it is closed.
///
/// # Errors
///
/// Returns an error if the window or graphics context cannot be created.
pub fn run(settings: Settings, store: SettingsStore) -> Result<()> {
    let app = PomodoroApp::new(settings.clone(), store);
    let initial_size = app
        .current_frame()
        .map(|frame| egui::vec2(frame.width() as f32, frame.height() as f32))
        .unwrap_or(egui::vec2(320.0, 120.0));
    let options = native_options(&settings, initial_size);

    info!(
        x = settings.window.x,
        y = settings.window.y,
        always_on_top = settings.window.always_on_top,
        "Opening timer window"
    );
    eframe::run_native(APP_NAME, options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| anyhow!("failed to open the timer window: {e}"))
}
