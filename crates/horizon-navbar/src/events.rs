//! Input event payloads delivered by the host window.
//!
//! The host translates its native events into these types before calling the
//! toolbar's entry points. Positions are in window coordinates.

use horizon_navbar_render::Point;

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        control: true,
        ..Self::NONE
    };

    /// Check if any modifier is pressed.
    #[inline]
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if a modifier that turns a click into "extend selection" is held.
    #[inline]
    pub fn extends_selection(&self) -> bool {
        self.shift || self.control
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
}

/// Buttons currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerButtons {
    pub primary: bool,
    pub secondary: bool,
}

impl PointerButtons {
    pub const NONE: Self = Self {
        primary: false,
        secondary: false,
    };

    pub const PRIMARY: Self = Self {
        primary: true,
        secondary: false,
    };
}

/// The pointer's current state, as sampled from the input device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerSnapshot {
    pub position: Point,
    pub buttons: PointerButtons,
    pub modifiers: KeyboardModifiers,
}

impl PointerSnapshot {
    /// A snapshot with the primary button held at `position`.
    pub const fn held(position: Point) -> Self {
        Self {
            position,
            buttons: PointerButtons::PRIMARY,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// A snapshot with every button released at `position`.
    pub const fn released(position: Point) -> Self {
        Self {
            position,
            buttons: PointerButtons::NONE,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}

/// A button press delivered to the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: MouseButton,
    /// 1 for a single click, 2 for a double click.
    pub click_count: u8,
    pub modifiers: KeyboardModifiers,
}

impl PointerEvent {
    /// A single left click at `position`.
    pub const fn click(position: Point) -> Self {
        Self {
            position,
            button: MouseButton::Left,
            click_count: 1,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// A left double click at `position`.
    pub const fn double_click(position: Point) -> Self {
        Self {
            click_count: 2,
            ..Self::click(position)
        }
    }

    /// Set the modifier state.
    pub const fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[inline]
    pub fn is_double_click(&self) -> bool {
        self.click_count >= 2
    }
}

/// Keys the toolbar distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character produced by the keyboard layout.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
}

/// A key press delivered to the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressEvent {
    pub key: Key,
    pub modifiers: KeyboardModifiers,
}

impl KeyPressEvent {
    /// A key press without modifiers.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// A key press with Control held.
    pub const fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::CTRL,
        }
    }

    /// Set the modifier state.
    pub const fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this is Control plus `letter`, in either case, with no other
    /// modifier but Shift.
    pub fn is_shortcut(&self, letter: char) -> bool {
        let m = self.modifiers;
        m.control
            && !m.alt
            && !m.meta
            && matches!(self.key, Key::Char(ch) if ch.eq_ignore_ascii_case(&letter))
    }
}

impl From<char> for KeyPressEvent {
    fn from(ch: char) -> Self {
        Self::new(Key::Char(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_matching() {
        assert!(KeyPressEvent::ctrl(Key::Char('v')).is_shortcut('v'));
        assert!(KeyPressEvent::ctrl(Key::Char('V')).is_shortcut('v'));
        assert!(!KeyPressEvent::new(Key::Char('v')).is_shortcut('v'));
        assert!(!KeyPressEvent::ctrl(Key::Char('c')).is_shortcut('v'));

        let alt = KeyboardModifiers {
            alt: true,
            ..KeyboardModifiers::CTRL
        };
        assert!(!KeyPressEvent::new(Key::Char('v')).with_modifiers(alt).is_shortcut('v'));
    }
}
