//! Configuration window (`c` key).
//!
//! Edits happen on a [`ConfigDraft`]; nothing reaches the settings or the
//! timer until the draft validates and the user presses Apply or OK.

use eframe::egui;
use tracing::debug;

use crate::settings::{Color, Settings};
use crate::types::{TimerConfig, MAX_DURATION_MINUTES};

/// Tabs of the configuration window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigTab {
    #[default]
    Timer,
    Display,
    Alerts,
}

/// Validated result of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChanges {
    pub timer: TimerConfig,
    pub always_on_top: bool,
    pub work_color: Color,
    pub pause_color: Color,
}

impl ConfigChanges {
    /// Writes the changes into `settings`.
    pub fn apply_to(&self, settings: &mut Settings) {
        settings.apply_timer_config(&self.timer);
        settings.window.always_on_top = self.always_on_top;
        settings.display.work_timer_color = self.work_color;
        settings.display.pause_timer_color = self.pause_color;
    }
}

/// Form contents as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDraft {
    pub work_minutes: String,
    pub pause_minutes: String,
    pub always_on_top: bool,
    pub work_color: String,
    pub pause_color: String,
    pub show_work_alert: bool,
    pub show_pause_alert: bool,
}

impl ConfigDraft {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            work_minutes: settings.timer.custom_duration_minutes.to_string(),
            pause_minutes: settings.timer.pause_duration_minutes.to_string(),
            always_on_top: settings.window.always_on_top,
            work_color: settings.display.work_timer_color.to_string(),
            pause_color: settings.display.pause_timer_color.to_string(),
            show_work_alert: settings.alerts.show_work_complete_alert,
            show_pause_alert: settings.alerts.show_pause_complete_alert,
        }
    }

    /// Checks the draft.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid field.
    pub fn validate(&self) -> Result<ConfigChanges, String> {
        let work = parse_field(&self.work_minutes, "Work duration")?;
        if work <= 0 {
            return Err("Work duration must be greater than 0".to_string());
        }
        let pause = parse_field(&self.pause_minutes, "Pause duration")?;
        if pause < 0 {
            return Err("Pause duration cannot be negative".to_string());
        }
        let max = i64::from(MAX_DURATION_MINUTES);
        if work > max || pause > max {
            return Err(format!("Durations cannot exceed {max} minutes"));
        }

        let work_color = self
            .work_color
            .parse::<Color>()
            .map_err(|e| format!("Work timer color: {e}"))?;
        let pause_color = self
            .pause_color
            .parse::<Color>()
            .map_err(|e| format!("Pause timer color: {e}"))?;

        // Both values were range checked above.
        let timer = TimerConfig {
            work_minutes: work as u32,
            pause_minutes: pause as u32,
            alert_on_work_complete: self.show_work_alert,
            alert_on_pause_complete: self.show_pause_alert,
        };
        timer.validate()?;

        Ok(ConfigChanges {
            timer,
            always_on_top: self.always_on_top,
            work_color,
            pause_color,
        })
    }
}

fn parse_field(value: &str, label: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("{label} must be a whole number"))
}

/// What the user asked for this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Apply and keep the window open
    Apply(ConfigChanges),
    /// Apply and close
    Confirm(ConfigChanges),
    /// Close without applying
    Cancel,
}

// ============================================================================
// ConfigWindow
// ============================================================================

/// The configuration window and its draft.
#[derive(Debug, Default)]
pub struct ConfigWindow {
    draft: Option<ConfigDraft>,
    tab: ConfigTab,
    error: Option<String>,
}

impl ConfigWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the window with a draft of the current settings.
    ///
    /// Reopening while open keeps the existing draft.
    pub fn open(&mut self, settings: &Settings) {
        if self.draft.is_none() {
            self.draft = Some(ConfigDraft::from_settings(settings));
            self.tab = ConfigTab::Timer;
            self.error = None;
            debug!("Configuration window opened");
        }
    }

    pub fn close(&mut self) {
        self.draft = None;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft_mut(&mut self) -> Option<&mut ConfigDraft> {
        self.draft.as_mut()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates the draft for a button press, recording any error inline.
    pub fn press(&mut self, close: bool) -> Option<ConfigAction> {
        let draft = self.draft.as_ref()?;
        match draft.validate() {
            Ok(changes) => {
                self.error = None;
                Some(if close {
                    ConfigAction::Confirm(changes)
                } else {
                    ConfigAction::Apply(changes)
                })
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }

    /// Draws the window when open.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<ConfigAction> {
        if !self.is_open() {
            return None;
        }

        let builder = egui::ViewportBuilder::default()
            .with_title("Pomodoro Timer Settings")
            .with_inner_size([400.0, 300.0])
            .with_resizable(false);

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("pomodoro-config"),
            builder,
            |ctx, _class| {
                let mut action = None;
                let mut pressed = None;
                egui::TopBottomPanel::bottom("config-buttons").show(ctx, |ui| {
                    if let Some(error) = &self.error {
                        ui.colored_label(egui::Color32::from_rgb(0xE0, 0x40, 0x40), error);
                    }
                    ui.horizontal(|ui| {
                        if ui.button("Apply").clicked() {
                            pressed = Some(false);
                        }
                        if ui.button("OK").clicked() {
                            pressed = Some(true);
                        }
                        if ui.button("Cancel").clicked() {
                            action = Some(ConfigAction::Cancel);
                        }
                    });
                });
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.selectable_value(&mut self.tab, ConfigTab::Timer, "Timer");
                        ui.selectable_value(&mut self.tab, ConfigTab::Display, "Display");
                        ui.selectable_value(&mut self.tab, ConfigTab::Alerts, "Alerts");
                    });
                    ui.separator();
                    if let Some(draft) = self.draft.as_mut() {
                        match self.tab {
                            ConfigTab::Timer => timer_tab(ui, draft),
                            ConfigTab::Display => display_tab(ui, draft),
                            ConfigTab::Alerts => alerts_tab(ui, draft),
                        }
                    }
                });

                if let Some(close) = pressed {
                    action = self.press(close);
                }
                if action.is_none()
                    && ctx.input(|i| {
                        i.key_pressed(egui::Key::Escape) || i.viewport().close_requested()
                    })
                {
                    action = Some(ConfigAction::Cancel);
                }
                action
            },
        )
    }
}

fn timer_tab(ui: &mut egui::Ui, draft: &mut ConfigDraft) {
    egui::Grid::new("timer-tab").num_columns(2).show(ui, |ui| {
        ui.label("Work Duration (minutes):");
        ui.add(egui::TextEdit::singleline(&mut draft.work_minutes).desired_width(60.0));
        ui.end_row();
        ui.label("Pause Duration (minutes):");
        ui.add(egui::TextEdit::singleline(&mut draft.pause_minutes).desired_width(60.0));
        ui.end_row();
    });
    ui.small("(Set to 0 to disable pause phase)");
    ui.checkbox(&mut draft.always_on_top, "Always on top");
}

fn display_tab(ui: &mut egui::Ui, draft: &mut ConfigDraft) {
    egui::Grid::new("display-tab").num_columns(2).show(ui, |ui| {
        ui.label("Work Timer Color:");
        color_field(ui, &mut draft.work_color);
        ui.end_row();
        ui.label("Pause Timer Color:");
        color_field(ui, &mut draft.pause_color);
        ui.end_row();
    });
}

/// Color picker button plus a hex entry kept in sync.
fn color_field(ui: &mut egui::Ui, value: &mut String) {
    ui.horizontal(|ui| {
        let mut rgb = value
            .parse::<Color>()
            .map(Color::to_array)
            .unwrap_or([0, 0, 0]);
        if egui::color_picker::color_edit_button_srgb(ui, &mut rgb).changed() {
            *value = Color::from(rgb).to_string();
        }
        ui.add(egui::TextEdit::singleline(value).desired_width(80.0));
    });
}

fn alerts_tab(ui: &mut egui::Ui, draft: &mut ConfigDraft) {
    ui.checkbox(&mut draft.show_work_alert, "Show alert when pomodoro is over");
    ui.checkbox(&mut draft.show_pause_alert, "Show alert when pause is over");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ConfigDraft {
        ConfigDraft::from_settings(&Settings::default())
    }

    // ------------------------------------------------------------------------
    // ConfigDraft Tests
    // ------------------------------------------------------------------------

    mod draft_tests {
        use super::*;

        #[test]
        fn test_default_draft_is_valid() {
            let changes = draft().validate().unwrap();
            assert_eq!(changes.timer, TimerConfig::default());
            assert!(changes.always_on_top);
        }

        #[test]
        fn test_rejects_non_positive_work() {
            let mut d = draft();
            d.work_minutes = "0".into();
            assert_eq!(
                d.validate().unwrap_err(),
                "Work duration must be greater than 0"
            );
        }

        #[test]
        fn test_rejects_negative_pause() {
            let mut d = draft();
            d.pause_minutes = "-1".into();
            assert_eq!(
                d.validate().unwrap_err(),
                "Pause duration cannot be negative"
            );
        }

        #[test]
        fn test_accepts_zero_pause() {
            let mut d = draft();
            d.pause_minutes = " 0 ".into();
            assert_eq!(d.validate().unwrap().timer.pause_minutes, 0);
        }

        #[test]
        fn test_rejects_text_and_oversize() {
            let mut d = draft();
            d.work_minutes = "ten".into();
            assert!(d.validate().unwrap_err().contains("whole number"));

            let mut d = draft();
            d.work_minutes = "100000".into();
            assert!(d.validate().unwrap_err().contains("exceed"));
        }

        #[test]
        fn test_rejects_bad_color() {
            let mut d = draft();
            d.pause_color = "#12345".into();
            assert!(d.validate().unwrap_err().starts_with("Pause timer color"));
        }

        #[test]
        fn test_apply_to_settings() {
            let mut d = draft();
            d.work_minutes = "50".into();
            d.pause_minutes = "10".into();
            d.always_on_top = false;
            d.work_color = "red".into();
            d.show_pause_alert = false;

            let mut settings = Settings::default();
            d.validate().unwrap().apply_to(&mut settings);

            assert_eq!(settings.timer.custom_duration_minutes, 50);
            assert_eq!(settings.timer.pause_duration_minutes, 10);
            assert!(!settings.window.always_on_top);
            assert_eq!(settings.display.work_timer_color, Color::rgb(255, 0, 0));
            assert!(!settings.alerts.show_pause_complete_alert);
        }
    }

    // ------------------------------------------------------------------------
    // ConfigWindow Tests
    // ------------------------------------------------------------------------

    mod window_tests {
        use super::*;

        #[test]
        fn test_press_with_invalid_draft_keeps_window_open() {
            let mut window = ConfigWindow::new();
            window.open(&Settings::default());
            if let Some(d) = window.draft_mut() {
                d.work_minutes = "-3".into();
            }

            assert_eq!(window.press(true), None);
            assert!(window.is_open());
            assert!(window.error().is_some());
        }

        #[test]
        fn test_press_apply_and_confirm() {
            let mut window = ConfigWindow::new();
            window.open(&Settings::default());

            assert!(matches!(window.press(false), Some(ConfigAction::Apply(_))));
            assert!(matches!(window.press(true), Some(ConfigAction::Confirm(_))));
        }

        #[test]
        fn test_reopen_keeps_draft() {
            let mut window = ConfigWindow::new();
            window.open(&Settings::default());
            if let Some(d) = window.draft_mut() {
                d.work_minutes = "40".into();
            }
            window.open(&Settings::default());

            assert_eq!(
                window.draft_mut().map(|d| d.work_minutes.clone()),
                Some("40".to_string())
            );
        }

        #[test]
        fn test_press_when_closed() {
            let mut window = ConfigWindow::new();
            assert_eq!(window.press(false), None);
        }
    }
}
