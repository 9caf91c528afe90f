//! Window position tracking.
//!
//! The window manager occasionally reports `(0, 0)` for a window that is
//! being torn down or not yet mapped. Those reports are ignored in favour of
//! the last valid position, so a bogus origin never reaches the settings
//! file.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Quiet period after the last move before the position is saved.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Screen position in whole pixels.
pub type Position = (i32, i32);

// ============================================================================
// WindowState
// ============================================================================

/// Position, level and focus of the timer window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    position: Position,
    always_on_top: bool,
    focused: bool,
}

impl WindowState {
    pub fn new(position: Position, always_on_top: bool) -> Self {
        Self {
            position,
            always_on_top,
            focused: false,
        }
    }

    /// Last valid position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Records a position reported by the window system.
    ///
    /// Returns true if the tracked position changed.
    pub fn observe(&mut self, reported: Position) -> bool {
        if reported == (0, 0) && self.position != (0, 0) {
            warn!(
                last_x = self.position.0,
                last_y = self.position.1,
                "Window reported position 0,0, keeping last valid position"
            );
            return false;
        }
        if reported == self.position {
            return false;
        }
        self.position = reported;
        true
    }

    /// Moves by a pixel offset and returns the new position.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> Position {
        self.position = (
            self.position.0.saturating_add(dx),
            self.position.1.saturating_add(dy),
        );
        debug!(x = self.position.0, y = self.position.1, "Window moved");
        self.position
    }

    pub fn always_on_top(&self) -> bool {
        self.always_on_top
    }

    pub fn set_always_on_top(&mut self, on: bool) {
        self.always_on_top = on;
    }

    /// Flips always-on-top and returns the new value.
    pub fn toggle_always_on_top(&mut self) -> bool {
        self.always_on_top = !self.always_on_top;
        self.always_on_top
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Records the focus state; returns true if it changed.
    pub fn set_focused(&mut self, focused: bool) -> bool {
        let changed = self.focused != focused;
        self.focused = focused;
        changed
    }
}

// ============================================================================
// PositionSaver
// ============================================================================

/// Debounces position saves while the window is being moved.
#[derive(Debug, Default)]
pub struct PositionSaver {
    pending: Option<(Position, Instant)>,
}

impl PositionSaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `position` to be saved once the window has been still for
    /// [`SAVE_DEBOUNCE`].
    pub fn moved(&mut self, position: Position, now: Instant) {
        self.pending = Some((position, now));
    }

    /// Returns the position to save if the quiet period has elapsed.
    pub fn due(&mut self, now: Instant) -> Option<Position> {
        match self.pending {
            Some((position, since)) if now.saturating_duration_since(since) >= SAVE_DEBOUNCE => {
                self.pending = None;
                Some(position)
            }
            _ => None,
        }
    }

    /// Returns any pending position regardless of the quiet period.
    pub fn flush(&mut self) -> Option<Position> {
        self.pending.take().map(|(position, _)| position)
    }

    /// Time until the pending save becomes due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, since)| SAVE_DEBOUNCE.saturating_sub(now.saturating_duration_since(since)))
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
