//! Custom duration prompt (`e` key).

use eframe::egui;
use thiserror::Error;

/// Input that is not a whole number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{0}' is not a whole number of minutes")]
pub struct NotANumber(pub String);

/// Parses the prompt text; range checks are left to the timer engine.
pub fn parse_minutes(input: &str) -> Result<i64, NotANumber> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| NotANumber(trimmed.to_string()))
}

/// What the user did with the prompt this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// OK or Enter with a parsed number
    Submit(i64),
    /// Cancel, Escape or window closed
    Cancel,
}

/// Modal-style dialog asking for a number of minutes.
#[derive(Debug, Default)]
pub struct DurationPrompt {
    input: String,
    error: Option<String>,
    open: bool,
}

impl DurationPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the prompt prefilled with the current duration.
    pub fn open(&mut self, current_minutes: u32) {
        self.input = current_minutes.to_string();
        self.error = None;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Shows an error below the input; the prompt stays open.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the input text.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Validates the current input as if OK was pressed.
    ///
    /// A parse failure is recorded as the inline error and yields `None`.
    pub fn submit(&mut self) -> Option<PromptResponse> {
        match parse_minutes(&self.input) {
            Ok(minutes) => Some(PromptResponse::Submit(minutes)),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Draws the prompt when open.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<PromptResponse> {
        if !self.open {
            return None;
        }

        let builder = egui::ViewportBuilder::default()
            .with_title("Set Timer")
            .with_inner_size([280.0, 140.0])
            .with_resizable(false)
            .with_window_level(egui::WindowLevel::AlwaysOnTop);

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("pomodoro-duration-prompt"),
            builder,
            |ctx, _class| {
                let mut response = None;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.label("Enter minutes:");
                    let edit = ui.text_edit_singleline(&mut self.input);
                    if !edit.has_focus() && self.error.is_none() {
                        edit.request_focus();
                    }
                    if let Some(error) = &self.error {
                        ui.colored_label(egui::Color32::from_rgb(0xE0, 0x40, 0x40), error);
                    }
                    ui.horizontal(|ui| {
                        if ui.button("OK").clicked() {
                            response = self.submit();
                        }
                        if ui.button("Cancel").clicked() {
                            response = Some(PromptResponse::Cancel);
                        }
                    });
                });

                if response.is_none() {
                    if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
                        response = self.submit();
                    } else if ctx.input(|i| {
                        i.key_pressed(egui::Key::Escape) || i.viewport().close_requested()
                    }) {
                        response = Some(PromptResponse::Cancel);
                    }
                }
                response
            },
        )
    }
}
