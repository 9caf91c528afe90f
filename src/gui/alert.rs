//! Phase completion alerts.
//!
//! Alerts are shown as small popup windows that stay until dismissed with
//! OK. The countdown of the next phase keeps running behind them.

use std::collections::VecDeque;

use eframe::egui;
use tracing::info;

use crate::timer::TimerEvent;
use crate::types::TimerPhase;

/// Which phase an alert announces the end of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    WorkComplete,
    PauseComplete,
}

impl AlertKind {
    pub fn for_phase(phase: TimerPhase) -> Self {
        match phase {
            TimerPhase::Work => Self::WorkComplete,
            TimerPhase::Pause => Self::PauseComplete,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::WorkComplete => "Pomodoro Complete!",
            Self::PauseComplete => "Break Complete!",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::WorkComplete => "Work session finished!\n\nTime for a break.",
            Self::PauseComplete => "Break time is over!\n\nReady to get back to work?",
        }
    }
}

/// Returns the alert a timer event calls for, if any.
pub fn alert_for(event: &TimerEvent) -> Option<AlertKind> {
    match event {
        TimerEvent::PhaseCompleted { phase, alert: true } => Some(AlertKind::for_phase(*phase)),
        _ => None,
    }
}

/// Receives alerts to present to the user.
pub trait AlertSink {
    /// Queues an alert for display.
    fn notify(&mut self, kind: AlertKind);

    /// Number of alerts not yet dismissed.
    fn pending(&self) -> usize;

    /// Draws pending alerts; called once per frame.
    fn present(&mut self, _ctx: &egui::Context) {}
}

// ============================================================================
// PopupAlerts
// ============================================================================

/// Shows queued alerts one at a time in their own viewport.
#[derive(Debug, Default)]
pub struct PopupAlerts {
    queue: VecDeque<AlertKind>,
}

impl PopupAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the oldest pending alert.
    fn show_front(&mut self, ctx: &egui::Context) {
        let Some(kind) = self.queue.front().copied() else {
            return;
        };

        let builder = egui::ViewportBuilder::default()
            .with_title(kind.title())
            .with_inner_size([320.0, 150.0])
            .with_resizable(false)
            .with_window_level(egui::WindowLevel::AlwaysOnTop);

        let dismissed = ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("pomodoro-alert"),
            builder,
            |ctx, _class| {
                let mut ok = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading(kind.title());
                        ui.add_space(6.0);
                        ui.label(kind.message());
                        ui.add_space(8.0);
                        ok = ui.button("OK").clicked();
                    });
                });
                ok || ctx.input(|i| i.key_pressed(egui::Key::Enter))
                    || ctx.input(|i| i.viewport().close_requested())
            },
        );

        if dismissed {
            self.queue.pop_front();
            info!(alert = kind.title(), "Alert dismissed");
        }
    }
}

impl AlertSink for PopupAlerts {
    fn notify(&mut self, kind: AlertKind) {
        info!(alert = kind.title(), "Alert shown");
        self.queue.push_back(kind);
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }

    fn present(&mut self, ctx: &egui::Context) {
        self.show_front(ctx);
    }
}

// ============================================================================
// MockAlertSink
// ============================================================================

/// Mock alert sink for testing.
#[derive(Debug, Default)]
pub struct MockAlertSink {
    calls: Vec<AlertKind>,
}

impl MockAlertSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get_calls(&self) -> &[AlertKind] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl AlertSink for MockAlertSink {
    fn notify(&mut self, kind: AlertKind) {
        self.calls.push(kind);
    }

    fn pending(&self) -> usize {
        self.calls.len()
    }
}
