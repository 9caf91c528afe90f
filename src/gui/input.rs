//! Keyboard bindings of the timer window.

use eframe::egui::{Key, Modifiers};

/// Pixels moved per arrow key press.
pub const COARSE_STEP: i32 = 10;
/// Pixels moved per arrow key press with Shift held.
pub const FINE_STEP: i32 = 1;

/// Arrow direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit offset in screen coordinates (y grows downward).
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }
}

/// What a key press asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// `s`: start or pause
    ToggleTimer,
    /// `r`: reset the current phase
    Reset,
    /// `e`: ask for a custom duration
    PromptDuration,
    /// `c`: open the configuration window
    OpenConfig,
    /// `a`: toggle always-on-top
    ToggleAlwaysOnTop,
    /// Arrow keys: move the window
    Move {
        direction: Direction,
        /// Pixels per step
        step: i32,
    },
}

impl InputAction {
    /// Window displacement requested by a move action.
    pub fn displacement(&self) -> Option<(i32, i32)> {
        match *self {
            Self::Move { direction, step } => {
                let (dx, dy) = direction.offset();
                Some((dx * step, dy * step))
            }
            _ => None,
        }
    }
}

/// Maps key presses to actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyBindings;

impl KeyBindings {
    /// Resolves a key press.
    ///
    /// Letter keys ignore Shift but not Ctrl/Alt/Cmd, so system shortcuts
    /// are left alone.
    pub fn resolve(&self, key: Key, modifiers: Modifiers) -> Option<InputAction> {
        if modifiers.ctrl || modifiers.alt || modifiers.command || modifiers.mac_cmd {
            return None;
        }

        let step = if modifiers.shift {
            FINE_STEP
        } else {
            COARSE_STEP
        };
        let movement = |direction| Some(InputAction::Move { direction, step });

        match key {
            Key::S => Some(InputAction::ToggleTimer),
            Key::R => Some(InputAction::Reset),
            Key::E => Some(InputAction::PromptDuration),
            Key::C => Some(InputAction::OpenConfig),
            Key::A => Some(InputAction::ToggleAlwaysOnTop),
            Key::ArrowLeft => movement(Direction::Left),
            Key::ArrowRight => movement(Direction::Right),
            Key::ArrowUp => movement(Direction::Up),
            Key::ArrowDown => movement(Direction::Down),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift() -> Modifiers {
        Modifiers {
            shift: true,
            ..Modifiers::NONE
        }
    }

    #[test]
    fn test_letter_bindings() {
        let keys = KeyBindings;
        assert_eq!(
            keys.resolve(Key::S, Modifiers::NONE),
            Some(InputAction::ToggleTimer)
        );
        assert_eq!(keys.resolve(Key::R, Modifiers::NONE), Some(InputAction::Reset));
        assert_eq!(
            keys.resolve(Key::E, Modifiers::NONE),
            Some(InputAction::PromptDuration)
        );
        assert_eq!(
            keys.resolve(Key::C, Modifiers::NONE),
            Some(InputAction::OpenConfig)
        );
        assert_eq!(
            keys.resolve(Key::A, Modifiers::NONE),
            Some(InputAction::ToggleAlwaysOnTop)
        );
    }

    #[test]
    fn test_letters_ignore_shift() {
        assert_eq!(
            KeyBindings.resolve(Key::S, shift()),
            Some(InputAction::ToggleTimer)
        );
    }

    #[test]
    fn test_arrow_steps() {
        let keys = KeyBindings;
        assert_eq!(
            keys.resolve(Key::ArrowLeft, Modifiers::NONE)
                .and_then(|a| a.displacement()),
            Some((-10, 0))
        );
        assert_eq!(
            keys.resolve(Key::ArrowDown, Modifiers::NONE)
                .and_then(|a| a.displacement()),
            Some((0, 10))
        );
        assert_eq!(
            keys.resolve(Key::ArrowUp, shift()).and_then(|a| a.displacement()),
            Some((0, -1))
        );
        assert_eq!(
            keys.resolve(Key::ArrowRight, shift())
                .and_then(|a| a.displacement()),
            Some((1, 0))
        );
    }

    #[test]
    fn test_unbound_and_modified_keys() {
        let keys = KeyBindings;
        assert_eq!(keys.resolve(Key::Q, Modifiers::NONE), None);
        assert_eq!(keys.resolve(Key::Space, Modifiers::NONE), None);
        assert_eq!(keys.resolve(Key::S, Modifiers::CTRL), None);
        assert_eq!(keys.resolve(Key::ArrowLeft, Modifiers::ALT), None);
    }

    #[test]
    fn test_non_move_has_no_displacement() {
        assert_eq!(InputAction::Reset.displacement(), None);
    }
}
