//! UI input handling module
//!
//! Input types fed to [`UISystem`](crate::ui::UISystem) by the host. Pointer
//! movement is routed to the single topmost element under the cursor; every
//! other input is broadcast to all elements reachable through the
//! non-passive lists.

pub mod processor;

use bitflags::bitflags;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// First extra button
    X1,
    /// Second extra button
    X2,
}

impl MouseButton {
    /// Bit for this button in a [`MouseButtons`] set
    pub fn flag(self) -> MouseButtons {
        match self {
            Self::Left => MouseButtons::LEFT,
            Self::Right => MouseButtons::RIGHT,
            Self::Middle => MouseButtons::MIDDLE,
            Self::X1 => MouseButtons::X1,
            Self::X2 => MouseButtons::X2,
        }
    }
}

bitflags! {
    /// Set of mouse buttons currently held
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        /// Left mouse button
        const LEFT = 1 << 0;
        /// Right mouse button
        const RIGHT = 1 << 1;
        /// Middle mouse button
        const MIDDLE = 1 << 2;
        /// First extra button
        const X1 = 1 << 3;
        /// Second extra button
        const X2 = 1 << 4;
    }
}

/// Keyboard key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Return / Enter
    Enter,
    /// Space bar
    Space,
    /// Escape
    Escape,
    /// Tab
    Tab,
    /// Backspace
    Backspace,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Any other key, by host scancode
    Other(u32),
}

impl KeyCode {
    /// Keys that activate a focused button
    pub fn is_confirm(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Broadcast input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UIInput {
    /// Mouse button pressed
    ButtonDown(MouseButton),
    /// Mouse button released
    ButtonUp(MouseButton),
    /// Horizontal scroll delta
    HScroll(f32),
    /// Vertical scroll delta
    VScroll(f32),
    /// Key pressed
    KeyPressed(KeyCode),
    /// Key released
    KeyReleased(KeyCode),
    /// Character typed
    CharTyped(char),
}
