//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Timer phases (work / pause)
//! - Timer configuration with validation
//! - Timer state anchored to an absolute end time

use std::fmt;
use std::time::{Duration, Instant};

/// Upper bound for any configured duration (one day).
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the current phase of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimerPhase {
    /// Focused work session
    #[default]
    Work,
    /// Break between work sessions
    Pause,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Work => "work",
            TimerPhase::Pause => "pause",
        }
    }

    /// Returns the opposite phase.
    pub fn other(&self) -> TimerPhase {
        match self {
            TimerPhase::Work => TimerPhase::Pause,
            TimerPhase::Pause => TimerPhase::Work,
        }
    }
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Durations and alert switches driving the timer.
///
/// A `pause_minutes` of zero disables the pause phase: the timer then
/// behaves as a single repeating work timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Work duration in minutes (1-1440)
    pub work_minutes: u32,
    /// Pause duration in minutes (0-1440, 0 disables the pause phase)
    pub pause_minutes: u32,
    /// Whether completing a work phase raises an alert
    pub alert_on_work_complete: bool,
    /// Whether completing a pause phase raises an alert
    pub alert_on_pause_complete: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            pause_minutes: 5,
            alert_on_work_complete: true,
            alert_on_pause_complete: true,
        }
    }
}

impl TimerConfig {
    /// Creates a new configuration with the specified work duration.
    pub fn with_work_minutes(mut self, minutes: u32) -> Self {
        self.work_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified pause duration.
    pub fn with_pause_minutes(mut self, minutes: u32) -> Self {
        self.pause_minutes = minutes;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.work_minutes < 1 || self.work_minutes > MAX_DURATION_MINUTES {
            return Err(format!(
                "work duration must be between 1 and {} minutes",
                MAX_DURATION_MINUTES
            ));
        }
        if self.pause_minutes > MAX_DURATION_MINUTES {
            return Err(format!(
                "pause duration must be between 0 and {} minutes",
                MAX_DURATION_MINUTES
            ));
        }
        Ok(())
    }

    /// Returns true if the cycle includes a pause phase.
    pub fn has_pause(&self) -> bool {
        self.pause_minutes > 0
    }

    /// Configured length of the given phase.
    pub fn duration_for(&self, phase: TimerPhase) -> Duration {
        let minutes = match phase {
            TimerPhase::Work => self.work_minutes,
            TimerPhase::Pause => self.pause_minutes,
        };
        Duration::from_secs(u64::from(minutes) * 60)
    }

    /// Phase entered after `completed` finishes.
    pub fn next_phase(&self, completed: TimerPhase) -> TimerPhase {
        if self.has_pause() {
            completed.other()
        } else {
            TimerPhase::Work
        }
    }

    /// Whether an alert is wanted when `phase` completes.
    pub fn alert_enabled_for(&self, phase: TimerPhase) -> bool {
        match phase {
            TimerPhase::Work => self.alert_on_work_complete,
            TimerPhase::Pause => self.alert_on_pause_complete,
        }
    }

    /// Sets the configured duration of `phase`.
    pub fn set_minutes_for(&mut self, phase: TimerPhase, minutes: u32) {
        match phase {
            TimerPhase::Work => self.work_minutes = minutes,
            TimerPhase::Pause => self.pause_minutes = minutes,
        }
    }
}

// ============================================================================
// Countdown
// ============================================================================

/// Countdown progress of the current phase.
///
/// While running only the absolute end time is stored; the remaining time is
/// always derived as `target_end - now`, so periodic ticks never accumulate
/// rounding drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Not counting; remaining time frozen
    Stopped {
        /// Remaining time captured at pause/reset
        remaining: Duration,
    },
    /// Counting down towards `target_end`
    Running {
        /// Instant at which the phase completes
        target_end: Instant,
    },
}

impl Countdown {
    /// Remaining time at `now`, clamped to zero.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        match *self {
            Countdown::Stopped { remaining } => remaining,
            Countdown::Running { target_end } => target_end.saturating_duration_since(now),
        }
    }

    /// Returns true while counting down.
    pub fn is_running(&self) -> bool {
        matches!(self, Countdown::Running { .. })
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    /// Current phase of the cycle
    pub phase: TimerPhase,
    /// Countdown progress within the phase
    pub countdown: Countdown,
    /// Timer configuration
    pub config: TimerConfig,
}

impl TimerState {
    /// Creates a new TimerState: stopped at the start of a work phase.
    pub fn new(config: TimerConfig) -> Self {
        Self {
            phase: TimerPhase::Work,
            countdown: Countdown::Stopped {
                remaining: config.duration_for(TimerPhase::Work),
            },
            config,
        }
    }

    /// Starts counting down from the frozen remaining time.
    ///
    /// Returns false if already running.
    pub fn start_at(&mut self, now: Instant) -> bool {
        match self.countdown {
            Countdown::Stopped { remaining } => {
                self.countdown = Countdown::Running {
                    target_end: now + remaining,
                };
                true
            }
            Countdown::Running { .. } => false,
        }
    }

    /// Freezes the remaining time.
    ///
    /// Returns false if not running.
    pub fn pause_at(&mut self, now: Instant) -> bool {
        match self.countdown {
            Countdown::Running { .. } => {
                self.countdown = Countdown::Stopped {
                    remaining: self.countdown.remaining_at(now),
                };
                true
            }
            Countdown::Stopped { .. } => false,
        }
    }

    /// Stops the timer with the full configured duration of the current phase.
    pub fn reset(&mut self) {
        self.countdown = Countdown::Stopped {
            remaining: self.config.duration_for(self.phase),
        };
    }

    /// Switches to `phase` with its full duration, optionally running.
    pub fn enter_phase(&mut self, phase: TimerPhase, now: Instant, running: bool) {
        self.phase = phase;
        let duration = self.config.duration_for(phase);
        self.countdown = if running {
            Countdown::Running {
                target_end: now + duration,
            }
        } else {
            Countdown::Stopped {
                remaining: duration,
            }
        };
    }

    /// Returns true if the timer is actively counting down.
    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    /// Remaining time at `now`.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.countdown.remaining_at(now)
    }
}

/// Whole seconds of `duration`, rounded up.
///
/// A countdown shows `25:00` until a full second has elapsed and reaches
/// `00:00` only when the phase is actually over.
pub fn ceil_seconds(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // TimerPhase Tests
    // ------------------------------------------------------------------------

    mod timer_phase_tests {
        use super::*;

        #[test]
        fn test_default_is_work() {
            assert_eq!(TimerPhase::default(), TimerPhase::Work);
        }

        #[test]
        fn test_as_str_and_display() {
            assert_eq!(TimerPhase::Work.as_str(), "work");
            assert_eq!(TimerPhase::Pause.as_str(), "pause");
            assert_eq!(TimerPhase::Pause.to_string(), "pause");
        }

        #[test]
        fn test_other() {
            assert_eq!(TimerPhase::Work.other(), TimerPhase::Pause);
            assert_eq!(TimerPhase::Pause.other(), TimerPhase::Work);
        }
    }

    // ------------------------------------------------------------------------
    // TimerConfig Tests
    // ------------------------------------------------------------------------

    mod timer_config_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let config = TimerConfig::default();
            assert_eq!(config.work_minutes, 25);
            assert_eq!(config.pause_minutes, 5);
            assert!(config.alert_on_work_complete);
            assert!(config.alert_on_pause_complete);
        }

        #[test]
        fn test_builder_pattern() {
            let config = TimerConfig::default()
                .with_work_minutes(50)
                .with_pause_minutes(10);
            assert_eq!(config.work_minutes, 50);
            assert_eq!(config.pause_minutes, 10);
        }

        #[test]
        fn test_validate_boundaries() {
            assert!(TimerConfig::default().with_work_minutes(1).validate().is_ok());
            assert!(TimerConfig::default()
                .with_work_minutes(MAX_DURATION_MINUTES)
                .validate()
                .is_ok());
            assert!(TimerConfig::default().with_pause_minutes(0).validate().is_ok());
        }

        #[test]
        fn test_validate_rejects_zero_work() {
            let result = TimerConfig::default().with_work_minutes(0).validate();
            assert!(result.unwrap_err().contains("work duration"));
        }

        #[test]
        fn test_validate_rejects_too_long() {
            assert!(TimerConfig::default()
                .with_work_minutes(MAX_DURATION_MINUTES + 1)
                .validate()
                .is_err());
            assert!(TimerConfig::default()
                .with_pause_minutes(MAX_DURATION_MINUTES + 1)
                .validate()
                .is_err());
        }

        #[test]
        fn test_duration_for() {
            let config = TimerConfig::default();
            assert_eq!(config.duration_for(TimerPhase::Work), Duration::from_secs(1500));
            assert_eq!(config.duration_for(TimerPhase::Pause), Duration::from_secs(300));
        }

        #[test]
        fn test_next_phase_alternates_with_pause() {
            let config = TimerConfig::default();
            assert_eq!(config.next_phase(TimerPhase::Work), TimerPhase::Pause);
            assert_eq!(config.next_phase(TimerPhase::Pause), TimerPhase::Work);
        }

        #[test]
        fn test_next_phase_without_pause_stays_on_work() {
            let config = TimerConfig::default().with_pause_minutes(0);
            assert_eq!(config.next_phase(TimerPhase::Work), TimerPhase::Work);
        }

        #[test]
        fn test_alert_enabled_for() {
            let config = TimerConfig {
                alert_on_work_complete: true,
                alert_on_pause_complete: false,
                ..TimerConfig::default()
            };
            assert!(config.alert_enabled_for(TimerPhase::Work));
            assert!(!config.alert_enabled_for(TimerPhase::Pause));
        }

        #[test]
        fn test_set_minutes_for() {
            let mut config = TimerConfig::default();
            config.set_minutes_for(TimerPhase::Pause, 7);
            config.set_minutes_for(TimerPhase::Work, 40);
            assert_eq!(config.pause_minutes, 7);
            assert_eq!(config.work_minutes, 40);
        }
    }

    // ------------------------------------------------------------------------
    // TimerState Tests
    // ------------------------------------------------------------------------

    mod timer_state_tests {
        use super::*;

        #[test]
        fn test_new_state() {
            let state = TimerState::new(TimerConfig::default());
            assert_eq!(state.phase, TimerPhase::Work);
            assert!(!state.is_running());
            assert_eq!(
                state.remaining_at(Instant::now()),
                Duration::from_secs(25 * 60)
            );
        }

        #[test]
        fn test_start_anchors_target_end() {
            let now = Instant::now();
            let mut state = TimerState::new(TimerConfig::default());

            assert!(state.start_at(now));
            assert_eq!(
                state.countdown,
                Countdown::Running {
                    target_end: now + Duration::from_secs(1500)
                }
            );
            assert_eq!(
                state.remaining_at(now + Duration::from_secs(100)),
                Duration::from_secs(1400)
            );
        }

        #[test]
        fn test_start_twice_is_rejected() {
            let now = Instant::now();
            let mut state = TimerState::new(TimerConfig::default());
            assert!(state.start_at(now));
            assert!(!state.start_at(now + Duration::from_secs(5)));
        }

        #[test]
        fn test_pause_freezes_remaining() {
            let now = Instant::now();
            let mut state = TimerState::new(TimerConfig::default());
            state.start_at(now);

            assert!(state.pause_at(now + Duration::from_millis(90_500)));
            let frozen = state.remaining_at(now + Duration::from_secs(9999));
            assert_eq!(frozen, Duration::from_millis(1_409_500));
        }

        #[test]
        fn test_pause_when_stopped_is_rejected() {
            let mut state = TimerState::new(TimerConfig::default());
            assert!(!state.pause_at(Instant::now()));
        }

        #[test]
        fn test_pause_after_end_clamps_to_zero() {
            let now = Instant::now();
            let mut state = TimerState::new(TimerConfig::default().with_work_minutes(1));
            state.start_at(now);
            state.pause_at(now + Duration::from_secs(120));
            assert_eq!(state.remaining_at(now), Duration::ZERO);
        }

        #[test]
        fn test_reset_uses_current_phase_duration() {
            let now = Instant::now();
            let mut state = TimerState::new(TimerConfig::default());
            state.enter_phase(TimerPhase::Pause, now, true);

            state.reset();

            assert!(!state.is_running());
            assert_eq!(state.phase, TimerPhase::Pause);
            assert_eq!(state.remaining_at(now), Duration::from_secs(300));
        }

        #[test]
        fn test_enter_phase_running() {
            let now = Instant::now();
            let mut state = TimerState::new(TimerConfig::default());
            state.enter_phase(TimerPhase::Pause, now, true);

            assert_eq!(state.phase, TimerPhase::Pause);
            assert!(state.is_running());
            assert_eq!(state.remaining_at(now), Duration::from_secs(300));
        }
    }

    #[test]
    fn test_ceil_seconds() {
        assert_eq!(ceil_seconds(Duration::ZERO), 0);
        assert_eq!(ceil_seconds(Duration::from_millis(1)), 1);
        assert_eq!(ceil_seconds(Duration::from_secs(60)), 60);
        assert_eq!(ceil_seconds(Duration::from_millis(59_001)), 60);
    }
}
