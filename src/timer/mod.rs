//! Timer module for the Pomodoro Timer.
//!
//! This module contains the countdown state machine:
//! - `engine`: Timer engine with state transitions and phase advance
//! - `clock`: Time sources (system clock and a manual clock for tests)
//! - `error`: Errors reported back to the user-facing surface

pub mod clock;
pub mod engine;
pub mod error;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{TimerEngine, TimerEvent};
pub use error::TimerError;
