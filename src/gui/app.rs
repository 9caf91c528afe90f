//! The timer window.
//!
//! `PomodoroApp` owns every context object (settings store, timer engine,
//! renderer) and runs them on the eframe event loop. Each frame it:
//!
//! 1. tracks window position and focus,
//! 2. maps key presses to actions,
//! 3. ticks the engine and drains its events,
//! 4. re-renders the display when the text or color changed,
//! 5. draws the display and any open dialogs,
//! 6. saves a debounced window position.

use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver};
use eframe::egui;
use tracing::{debug, error, info, warn};

use super::alert::{alert_for, AlertSink, PopupAlerts};
use super::config_window::{ConfigAction, ConfigChanges, ConfigWindow};
use super::input::{InputAction, KeyBindings};
use super::prompt::{DurationPrompt, PromptResponse};
use super::tooltip::Tooltip;
use super::window::{Position, PositionSaver, WindowState};
use crate::render::{FontSpec, Frame, Renderer};
use crate::settings::{Color, Settings, SettingsStore};
use crate::timer::{Clock, SystemClock, TimerEngine, TimerError, TimerEvent};
use crate::types::TimerPhase;

/// Redraw interval while the countdown runs.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

const BACKGROUND: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 170);
const FOCUS_BORDER: egui::Color32 = egui::Color32::from_rgb(0x64, 0x95, 0xED);

/// Display content of the last render.
#[derive(Debug, Clone, PartialEq)]
struct Rendered {
    text: String,
    color: Color,
    font: FontSpec,
}

/// The Pomodoro timer application.
pub struct PomodoroApp<C: Clock = SystemClock, A: AlertSink = PopupAlerts> {
    settings: Settings,
    store: SettingsStore,
    engine: TimerEngine<C>,
    events: Receiver<TimerEvent>,
    renderer: Renderer,
    frame: Option<Frame>,
    rendered: Option<Rendered>,
    texture: Option<egui::TextureHandle>,
    texture_dirty: bool,
    window: WindowState,
    saver: PositionSaver,
    keys: KeyBindings,
    alerts: A,
    prompt: DurationPrompt,
    config: ConfigWindow,
    tooltip: Tooltip,
}

impl PomodoroApp<SystemClock, PopupAlerts> {
    /// Creates the application from loaded settings.
    pub fn new(settings: Settings, store: SettingsStore) -> Self {
        Self::with_parts(settings, store, SystemClock, PopupAlerts::new())
    }
}

impl<C: Clock, A: AlertSink> PomodoroApp<C, A> {
    /// Creates the application with an explicit clock and alert sink.
    pub fn with_parts(settings: Settings, store: SettingsStore, clock: C, alerts: A) -> Self {
        let (tx, rx) = unbounded();
        let engine = TimerEngine::with_clock(settings.timer_config(), clock, tx);
        let window = WindowState::new(
            (settings.window.x, settings.window.y),
            settings.window.always_on_top,
        );

        let mut app = Self {
            settings,
            store,
            engine,
            events: rx,
            renderer: Renderer::new(),
            frame: None,
            rendered: None,
            texture: None,
            texture_dirty: false,
            window,
            saver: PositionSaver::new(),
            keys: KeyBindings,
            alerts,
            prompt: DurationPrompt::new(),
            config: ConfigWindow::new(),
            tooltip: Tooltip::new(),
        };
        app.refresh_display();
        app
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn engine(&self) -> &TimerEngine<C> {
        &self.engine
    }

    pub fn window_state(&self) -> &WindowState {
        &self.window
    }

    pub fn alerts(&self) -> &A {
        &self.alerts
    }

    /// Most recent successfully rendered frame.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn tooltip_message(&mut self, now: Instant) -> Option<&str> {
        self.tooltip.current(now)
    }

    pub fn prompt_mut(&mut self) -> &mut DurationPrompt {
        &mut self.prompt
    }

    pub fn config_window(&self) -> &ConfigWindow {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    /// Performs a key action and returns the viewport commands it needs.
    pub fn handle_action(&mut self, action: InputAction, now: Instant) -> Vec<egui::ViewportCommand> {
        debug!(?action, "Key action");
        let mut commands = Vec::new();
        match action {
            InputAction::ToggleTimer => self.engine.toggle(),
            InputAction::Reset => self.engine.reset(),
            InputAction::PromptDuration => {
                let minutes = self.engine.config().duration_for(self.engine.phase()).as_secs() / 60;
                self.prompt.open(u32::try_from(minutes).unwrap_or(u32::MAX));
            }
            InputAction::OpenConfig => self.config.open(&self.settings),
            InputAction::ToggleAlwaysOnTop => {
                let on = self.window.toggle_always_on_top();
                self.settings.window.always_on_top = on;
                self.store.save(&self.settings);
                info!(always_on_top = on, "Always on top toggled");
                self.tooltip.show_message(
                    format!("Always on top: {}", if on { "ON" } else { "OFF" }),
                    now,
                );
                commands.push(egui::ViewportCommand::WindowLevel(window_level(on)));
            }
            InputAction::Move { .. } => {
                if let Some((dx, dy)) = action.displacement() {
                    let position = self.window.move_by(dx, dy);
                    self.saver.moved(position, now);
                    commands.push(egui::ViewportCommand::OuterPosition(to_pos2(position)));
                }
            }
        }
        self.process_events();
        commands
    }

    /// Applies a custom duration entered in the prompt.
    ///
    /// # Errors
    ///
    /// Returns the engine's error for out-of-range values; nothing changes
    /// in that case.
    pub fn apply_custom_duration(&mut self, minutes: i64) -> Result<(), TimerError> {
        self.engine.set_custom_duration(minutes)?;
        self.settings.apply_timer_config(self.engine.config());
        self.store.save(&self.settings);
        self.process_events();
        Ok(())
    }

    /// Applies validated configuration changes.
    pub fn apply_config(&mut self, changes: &ConfigChanges) -> Vec<egui::ViewportCommand> {
        changes.apply_to(&mut self.settings);
        self.store.save(&self.settings);

        if let Err(e) = self.engine.configure(changes.timer) {
            warn!("Configuration rejected by the timer: {}", e);
        }

        let mut commands = Vec::new();
        if self.window.always_on_top() != changes.always_on_top {
            self.window.set_always_on_top(changes.always_on_top);
            commands.push(egui::ViewportCommand::WindowLevel(window_level(
                changes.always_on_top,
            )));
        }
        info!("Settings applied");
        self.process_events();
        commands
    }

    /// Records a position reported by the window system.
    pub fn observe_position(&mut self, reported: Position, now: Instant) {
        if self.window.observe(reported) {
            self.saver.moved(self.window.position(), now);
        }
    }

    /// Saves the window position once it has been still long enough.
    pub fn save_position_if_due(&mut self, now: Instant) {
        if let Some(position) = self.saver.due(now) {
            self.persist_position(position);
        }
    }

    /// Writes any pending position and the settings; used on exit.
    pub fn flush(&mut self) {
        let position = self.saver.flush().unwrap_or_else(|| self.window.position());
        self.persist_position(position);
    }

    fn persist_position(&mut self, (x, y): Position) {
        self.settings.window.x = x;
        self.settings.window.y = y;
        if self.store.save(&self.settings) {
            debug!(x, y, "Window position saved");
        }
    }

    // ------------------------------------------------------------------------
    // Timer and display
    // ------------------------------------------------------------------------

    /// Advances the engine and handles its events.
    pub fn tick(&mut self) {
        self.engine.tick();
        self.process_events();
    }

    fn process_events(&mut self) {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            if let Some(kind) = alert_for(&event) {
                self.alerts.notify(kind);
            }
            changed = true;
        }
        if changed {
            self.refresh_display();
        }
    }

    fn display_color(&self) -> Color {
        match self.engine.phase() {
            TimerPhase::Work => self.settings.display.work_timer_color,
            TimerPhase::Pause => self.settings.display.pause_timer_color,
        }
    }

    /// Re-renders if the text, color or font changed.
    ///
    /// A failed render keeps the previous frame on screen.
    fn refresh_display(&mut self) {
        let wanted = Rendered {
            text: self.engine.formatted_time(),
            color: self.display_color(),
            font: FontSpec::new(
                self.settings.display.font_path.clone(),
                self.settings.display.font_size as f32,
            ),
        };
        if self.rendered.as_ref() == Some(&wanted) {
            return;
        }

        match self.renderer.render(&wanted.text, &wanted.font, wanted.color) {
            Ok(frame) => {
                self.frame = Some(frame);
                self.texture_dirty = true;
            }
            Err(e) => error!("Failed to render timer display: {} ({})", e, e.suggestion()),
        }
        self.rendered = Some(wanted);
    }

    fn next_wake(&self, now: Instant) -> Option<Duration> {
        let running = self.engine.is_running().then_some(TICK_INTERVAL);
        [
            running,
            self.saver.time_until_due(now),
            self.tooltip.time_left(now),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    fn upload_texture(&mut self, ctx: &egui::Context) {
        if !self.texture_dirty {
            return;
        }
        let Some(frame) = &self.frame else {
            return;
        };
        let image = frame.to_color_image();
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("timer-display", image, egui::TextureOptions::LINEAR));
            }
        }
        self.texture_dirty = false;

        let ppp = ctx.pixels_per_point();
        let size = egui::vec2(frame.width() as f32 / ppp, frame.height() as f32 / ppp);
        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
    }

    fn draw_display(&self, ctx: &egui::Context) {
        let panel = egui::Frame::none().fill(BACKGROUND).rounding(6.0);
        egui::CentralPanel::default().frame(panel).show(ctx, |ui| {
            if let Some(texture) = &self.texture {
                let size = texture.size_vec2() / ctx.pixels_per_point();
                ui.add(egui::Image::new(egui::load::SizedTexture::new(
                    texture.id(),
                    size,
                )));
            }
            if self.window.focused() {
                let rect = ui.max_rect().shrink(1.0);
                ui.painter()
                    .rect_stroke(rect, 6.0, egui::Stroke::new(2.0, FOCUS_BORDER));
            }
        });
    }

    fn key_actions(&self, ctx: &egui::Context) -> Vec<InputAction> {
        ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => self.keys.resolve(*key, *modifiers),
                    _ => None,
                })
                .collect()
        })
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        match self.prompt.show(ctx) {
            Some(PromptResponse::Submit(minutes)) => match self.apply_custom_duration(minutes) {
                Ok(()) => self.prompt.close(),
                Err(e) => self.prompt.set_error(e.to_string()),
            },
            Some(PromptResponse::Cancel) => self.prompt.close(),
            None => {}
        }

        match self.config.show(ctx) {
            Some(ConfigAction::Apply(changes)) => {
                for command in self.apply_config(&changes) {
                    ctx.send_viewport_cmd(command);
                }
            }
            Some(ConfigAction::Confirm(changes)) => {
                for command in self.apply_config(&changes) {
                    ctx.send_viewport_cmd(command);
                }
                self.config.close();
            }
            Some(ConfigAction::Cancel) => self.config.close(),
            None => {}
        }

        self.alerts.present(ctx);
    }
}

impl<C: Clock, A: AlertSink> eframe::App for PomodoroApp<C, A> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        let (outer, focused) = ctx.input(|i| (i.viewport().outer_rect, i.viewport().focused));
        if let Some(rect) = outer {
            self.observe_position((rect.min.x.round() as i32, rect.min.y.round() as i32), now);
        }
        if let Some(focused) = focused {
            self.window.set_focused(focused);
        }

        for action in self.key_actions(ctx) {
            for command in self.handle_action(action, now) {
                ctx.send_viewport_cmd(command);
            }
        }

        self.tick();
        self.upload_texture(ctx);
        self.draw_display(ctx);
        self.show_dialogs(ctx);
        if let Some(rect) = outer {
            self.tooltip.draw(ctx, rect, now);
        }
        self.save_position_if_due(now);

        if let Some(wake) = self.next_wake(now) {
            ctx.request_repaint_after(wake);
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0; 4]
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.flush();
        info!("Pomodoro Timer closed");
    }
}

fn window_level(always_on_top: bool) -> egui::WindowLevel {
    if always_on_top {
        egui::WindowLevel::AlwaysOnTop
    } else {
        egui::WindowLevel::Normal
    }
}

fn to_pos2((x, y): Position) -> egui::Pos2 {
    egui::pos2(x as f32, y as f32)
}

// ============================================================================
// Tests
// ============================================================================
