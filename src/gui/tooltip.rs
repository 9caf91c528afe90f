//! Short-lived status messages below the timer window.

use std::time::{Duration, Instant};

use eframe::egui;

/// How long a tooltip stays visible.
pub const TOOLTIP_DURATION: Duration = Duration::from_millis(1500);
/// Gap between the timer window and the tooltip.
const OFFSET_Y: f32 = 8.0;
/// Tooltip height used for placement.
pub const TOOLTIP_HEIGHT: f32 = 28.0;
const CHAR_WIDTH: f32 = 8.0;
const PADDING_X: f32 = 12.0;

/// Places a tooltip of `size` centered below the parent window.
///
/// If it would leave the bottom of the screen it goes above the parent
/// instead; horizontally it is clamped to the screen.
pub fn tooltip_position(
    parent_pos: egui::Pos2,
    parent_size: egui::Vec2,
    size: egui::Vec2,
    screen: Option<egui::Vec2>,
) -> egui::Pos2 {
    let mut x = parent_pos.x + parent_size.x / 2.0 - size.x / 2.0;
    let mut y = parent_pos.y + parent_size.y + OFFSET_Y;

    if let Some(screen) = screen {
        if y + size.y > screen.y {
            y = parent_pos.y - size.y - OFFSET_Y;
        }
        if x + size.x > screen.x {
            x = screen.x - size.x;
        }
    }
    egui::pos2(x.max(0.0), y)
}

/// Currently displayed tooltip, if any.
#[derive(Debug, Default)]
pub struct Tooltip {
    active: Option<(String, Instant)>,
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `message`, replacing any visible tooltip.
    pub fn show_message(&mut self, message: impl Into<String>, now: Instant) {
        self.active = Some((message.into(), now));
    }

    /// Message still visible at `now`; expired messages are dropped.
    pub fn current(&mut self, now: Instant) -> Option<&str> {
        if let Some((_, shown_at)) = &self.active {
            if now.saturating_duration_since(*shown_at) >= TOOLTIP_DURATION {
                self.active = None;
            }
        }
        self.active.as_ref().map(|(message, _)| message.as_str())
    }

    /// Time until the visible tooltip expires.
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.active
            .as_ref()
            .map(|(_, shown_at)| TOOLTIP_DURATION.saturating_sub(now.saturating_duration_since(*shown_at)))
    }

    /// Draws the tooltip in its own borderless viewport next to `parent`.
    pub fn draw(&mut self, ctx: &egui::Context, parent: egui::Rect, now: Instant) {
        let Some(message) = self.current(now).map(str::to_owned) else {
            return;
        };

        let size = egui::vec2(
            message.chars().count() as f32 * CHAR_WIDTH + 2.0 * PADDING_X,
            TOOLTIP_HEIGHT,
        );
        let screen = ctx.input(|i| i.viewport().monitor_size);
        let position = tooltip_position(parent.min, parent.size(), size, screen);

        let builder = egui::ViewportBuilder::default()
            .with_decorations(false)
            .with_resizable(false)
            .with_taskbar(false)
            .with_window_level(egui::WindowLevel::AlwaysOnTop)
            .with_position(position)
            .with_inner_size(size);

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("pomodoro-tooltip"),
            builder,
            |ctx, _class| {
                let frame = egui::Frame::none()
                    .fill(egui::Color32::from_rgb(0x33, 0x33, 0x33))
                    .inner_margin(egui::Margin::symmetric(PADDING_X, 4.0));
                egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new(message.as_str())
                                .monospace()
                                .color(egui::Color32::WHITE),
                        );
                    });
                });
            },
        );
    }
}
