//! Pomodoro Timer Library
//!
//! This library provides the core functionality of the desktop Pomodoro
//! Timer. It includes:
//! - Timer engine cycling between work and pause phases
//! - Settings file loading (lenient) and saving (atomic)
//! - LED-style display rendering with a built-in font fallback
//! - The borderless eframe window, its key bindings and dialogs
//! - CLI command parsing and display utilities
//! - Log file setup

pub mod cli;
pub mod gui;
pub mod logging;
pub mod render;
pub mod settings;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{Countdown, TimerConfig, TimerPhase, TimerState};

pub use timer::{Clock, ManualClock, SystemClock, TimerEngine, TimerError, TimerEvent};

pub use settings::{Color, Settings, SettingsError, SettingsStore};

pub use render::{format_time, FontSpec, Frame, RenderError, Renderer};

pub use gui::{AlertKind, AlertSink, MockAlertSink, PomodoroApp};

pub use logging::{LogConfig, LogGuard};
