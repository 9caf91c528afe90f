//! Timer engine for the Pomodoro Timer.
//!
//! This module provides the core timer functionality:
//! - State transitions (start / pause / reset / custom duration)
//! - Remaining time derived from an anchored end time
//! - Work ↔ pause phase advance while running
//! - Event firing for alerts and redraws

use std::time::Duration;

use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::error::TimerError;
use crate::render::format_time;
use crate::types::{ceil_seconds, TimerConfig, TimerPhase, TimerState, MAX_DURATION_MINUTES};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for alerts and display refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        /// Phase being counted down
        phase: TimerPhase,
        /// Remaining seconds at start
        remaining_seconds: u64,
    },
    /// Countdown paused
    Paused {
        /// Frozen remaining seconds
        remaining_seconds: u64,
    },
    /// Timer reset to the full duration of the current phase
    Reset {
        /// Current phase
        phase: TimerPhase,
    },
    /// Configured duration of a phase changed
    DurationChanged {
        /// Phase whose duration changed
        phase: TimerPhase,
        /// New duration in minutes
        minutes: u32,
    },
    /// Whole configuration replaced
    Reconfigured,
    /// A phase ran out
    PhaseCompleted {
        /// Phase that completed
        phase: TimerPhase,
        /// Whether an alert is enabled for this phase
        alert: bool,
    },
    /// A new phase began after completion
    PhaseStarted {
        /// Phase that started
        phase: TimerPhase,
    },
    /// The displayed second changed
    Tick {
        /// Remaining seconds
        remaining_seconds: u64,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that manages the Pomodoro timer state and events.
pub struct TimerEngine<C: Clock = SystemClock> {
    /// Current timer state
    state: TimerState,
    /// Time source
    clock: C,
    /// Event sender channel
    event_tx: Sender<TimerEvent>,
    /// Last second reported through a `Tick` event
    last_reported: Option<u64>,
}

impl TimerEngine<SystemClock> {
    /// Creates a new TimerEngine driven by the system clock.
    pub fn new(config: TimerConfig, event_tx: Sender<TimerEvent>) -> Self {
        Self::with_clock(config, SystemClock, event_tx)
    }
}

impl<C: Clock> TimerEngine<C> {
    /// Creates a new TimerEngine with an explicit clock.
    pub fn with_clock(config: TimerConfig, clock: C, event_tx: Sender<TimerEvent>) -> Self {
        Self {
            state: TimerState::new(config),
            clock,
            event_tx,
            last_reported: None,
        }
    }

    /// Starts or resumes the countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the timer is already running.
    pub fn start(&mut self) -> Result<(), TimerError> {
        let now = self.clock.now();
        if !self.state.start_at(now) {
            return Err(TimerError::AlreadyRunning);
        }

        let remaining_seconds = self.remaining_seconds();
        info!(phase = %self.state.phase, remaining = remaining_seconds, "Timer started");
        self.emit(TimerEvent::Started {
            phase: self.state.phase,
            remaining_seconds,
        });
        Ok(())
    }

    /// Pauses the countdown, freezing the remaining time.
    ///
    /// # Errors
    ///
    /// Returns an error if the timer is not running.
    pub fn pause(&mut self) -> Result<(), TimerError> {
        let now = self.clock.now();
        if !self.state.pause_at(now) {
            return Err(TimerError::NotRunning);
        }

        let remaining_seconds = self.remaining_seconds();
        info!(phase = %self.state.phase, remaining = remaining_seconds, "Timer paused");
        self.emit(TimerEvent::Paused { remaining_seconds });
        Ok(())
    }

    /// Starts a stopped timer or pauses a running one.
    pub fn toggle(&mut self) {
        let result = if self.state.is_running() {
            self.pause()
        } else {
            self.start()
        };
        if let Err(e) = result {
            // Both branches are guarded by the running check above.
            warn!("Unexpected toggle failure: {}", e);
        }
    }

    /// Stops the timer with the full duration of the current phase.
    pub fn reset(&mut self) {
        self.state.reset();
        self.last_reported = None;
        info!(
            phase = %self.state.phase,
            minutes = self.state.config.duration_for(self.state.phase).as_secs() / 60,
            "Timer reset"
        );
        self.emit(TimerEvent::Reset {
            phase: self.state.phase,
        });
    }

    /// Sets the duration of the current phase and resets the timer.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidDuration` for non-positive or oversized
    /// values; the state is left untouched.
    pub fn set_custom_duration(&mut self, minutes: i64) -> Result<(), TimerError> {
        let valid = u32::try_from(minutes)
            .ok()
            .filter(|m| (1..=MAX_DURATION_MINUTES).contains(m));
        let Some(minutes_u32) = valid else {
            warn!(minutes, "Rejected invalid custom duration");
            return Err(TimerError::InvalidDuration { minutes });
        };

        let phase = self.state.phase;
        self.state.config.set_minutes_for(phase, minutes_u32);
        info!(phase = %phase, minutes = minutes_u32, "Timer duration set");
        self.emit(TimerEvent::DurationChanged {
            phase,
            minutes: minutes_u32,
        });
        self.reset();
        Ok(())
    }

    /// Replaces the configuration and restarts the cycle at a stopped work phase.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidConfig` if validation fails; the state is
    /// left untouched.
    pub fn configure(&mut self, config: TimerConfig) -> Result<(), TimerError> {
        config.validate().map_err(TimerError::InvalidConfig)?;

        let now = self.clock.now();
        self.state.config = config;
        self.state.enter_phase(TimerPhase::Work, now, false);
        self.last_reported = None;
        info!(
            work = config.work_minutes,
            pause = config.pause_minutes,
            "Timer reconfigured"
        );
        self.emit(TimerEvent::Reconfigured);
        Ok(())
    }

    /// Updates only the alert switches; the countdown is not touched.
    pub fn set_alerts(&mut self, on_work_complete: bool, on_pause_complete: bool) {
        self.state.config.alert_on_work_complete = on_work_complete;
        self.state.config.alert_on_pause_complete = on_pause_complete;
    }

    /// Recomputes the remaining time and advances the phase when it ran out.
    ///
    /// Returns the completed phase, if any. A completed phase is followed
    /// immediately by the next one, which keeps running.
    pub fn tick(&mut self) -> Option<TimerPhase> {
        if !self.state.is_running() {
            return None;
        }

        let now = self.clock.now();
        if !self.state.remaining_at(now).is_zero() {
            self.report_tick();
            return None;
        }

        let completed = self.state.phase;
        let alert = self.state.config.alert_enabled_for(completed);
        info!(phase = %completed, alert, "Phase complete");
        self.emit(TimerEvent::PhaseCompleted {
            phase: completed,
            alert,
        });

        let next = self.state.config.next_phase(completed);
        self.state.enter_phase(next, now, true);
        info!(phase = %next, "Phase started");
        self.emit(TimerEvent::PhaseStarted { phase: next });
        self.report_tick();

        Some(completed)
    }

    /// Returns a reference to the current timer state.
    pub fn get_state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.state.config
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TimerPhase {
        self.state.phase
    }

    /// Returns true while counting down.
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Remaining time of the current phase.
    pub fn remaining(&self) -> Duration {
        self.state.remaining_at(self.clock.now())
    }

    /// Remaining whole seconds, rounded up.
    pub fn remaining_seconds(&self) -> u64 {
        ceil_seconds(self.remaining())
    }

    /// Remaining time as `MM:SS`.
    pub fn formatted_time(&self) -> String {
        format_time(self.remaining_seconds())
    }

    /// Returns the clock driving this engine.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn report_tick(&mut self) {
        let remaining_seconds = self.remaining_seconds();
        if self.last_reported != Some(remaining_seconds) {
            self.last_reported = Some(remaining_seconds);
            self.emit(TimerEvent::Tick { remaining_seconds });
        }
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Timer event receiver dropped, event discarded");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
