//! Timer error types.
//!
//! Timer errors are always reported back to the user-facing surface; none
//! of them leaves the timer in a modified state.

use thiserror::Error;

use crate::types::MAX_DURATION_MINUTES;

/// Errors that can occur when driving the timer engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// A custom duration outside the accepted range was requested.
    #[error("invalid duration: {minutes} minutes (must be between 1 and {max})", max = MAX_DURATION_MINUTES)]
    InvalidDuration {
        /// The rejected value
        minutes: i64,
    },

    /// A configuration update failed validation.
    #[error("invalid timer configuration: {0}")]
    InvalidConfig(String),

    /// `start` was called while the timer was counting down.
    #[error("timer is already running")]
    AlreadyRunning,

    /// `pause` was called while the timer was stopped.
    #[error("timer is not running")]
    NotRunning,
}

impl TimerError {
    /// Returns true if this error comes from invalid user input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidDuration { .. } | Self::InvalidConfig(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. } => "Enter a whole number of minutes greater than zero",
            Self::InvalidConfig(_) => "Check the durations in the configuration window",
            Self::AlreadyRunning => "Press 's' to pause the running timer",
            Self::NotRunning => "Press 's' to start the timer",
        }
    }
}
