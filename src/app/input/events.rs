//! Device-level input identifiers

use std::fmt;

use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// A raw device signal, in the order the device delivered it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Character produced by the keyboard layout
    KeyPress(char),
    /// Cursor position in window coordinates
    MouseMove { x: i32, y: i32 },
    /// Wheel movement in notches; positive scrolls up
    MouseWheel(f32),
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    /// The window lost keyboard focus
    FocusLost,
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Middle, MouseButton::Right];
}

/// Physical key code
///
/// Keys are named by position on a US layout. Anything the client has no
/// name for arrives as [`KeyCode::Unknown`], which never matches a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    WinLeft,
    WinRight,

    // Common keys
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Pause,
    Backquote,
    Minus,
    Equal,
    Slash,

    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Numbers
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Navigation
    Left,
    Right,
    Up,
    Down,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    // Other
    Unknown,
}

impl KeyCode {
    pub fn is_shift(self) -> bool {
        matches!(self, Self::ShiftLeft | Self::ShiftRight)
    }

    pub fn is_control(self) -> bool {
        matches!(self, Self::ControlLeft | Self::ControlRight)
    }

    pub fn is_alt(self) -> bool {
        matches!(self, Self::AltLeft | Self::AltRight)
    }

    pub fn is_win(self) -> bool {
        matches!(self, Self::WinLeft | Self::WinRight)
    }
}

/// Key names as shown in chat messages ("Press F7 to disable")
impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Num0 => "0",
            Self::Num1 => "1",
            Self::Num2 => "2",
            Self::Num3 => "3",
            Self::Num4 => "4",
            Self::Num5 => "5",
            Self::Num6 => "6",
            Self::Num7 => "7",
            Self::Num8 => "8",
            Self::Num9 => "9",
            Self::Backquote => "Tilde",
            other => return write!(f, "{other:?}"),
        };
        f.write_str(name)
    }
}

/// Convert from winit key code
impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as WK;
        match key {
            WK::ShiftLeft => Self::ShiftLeft,
            WK::ShiftRight => Self::ShiftRight,
            WK::ControlLeft => Self::ControlLeft,
            WK::ControlRight => Self::ControlRight,
            WK::AltLeft => Self::AltLeft,
            WK::AltRight => Self::AltRight,
            WK::SuperLeft => Self::WinLeft,
            WK::SuperRight => Self::WinRight,

            WK::Space => Self::Space,
            WK::Enter => Self::Enter,
            WK::Escape => Self::Escape,
            WK::Backspace => Self::Backspace,
            WK::Tab => Self::Tab,
            WK::Pause => Self::Pause,
            WK::Backquote => Self::Backquote,
            WK::Minus => Self::Minus,
            WK::Equal => Self::Equal,
            WK::Slash => Self::Slash,

            WK::KeyA => Self::A,
            WK::KeyB => Self::B,
            WK::KeyC => Self::C,
            WK::KeyD => Self::D,
            WK::KeyE => Self::E,
            WK::KeyF => Self::F,
            WK::KeyG => Self::G,
            WK::KeyH => Self::H,
            WK::KeyI => Self::I,
            WK::KeyJ => Self::J,
            WK::KeyK => Self::K,
            WK::KeyL => Self::L,
            WK::KeyM => Self::M,
            WK::KeyN => Self::N,
            WK::KeyO => Self::O,
            WK::KeyP => Self::P,
            WK::KeyQ => Self::Q,
            WK::KeyR => Self::R,
            WK::KeyS => Self::S,
            WK::KeyT => Self::T,
            WK::KeyU => Self::U,
            WK::KeyV => Self::V,
            WK::KeyW => Self::W,
            WK::KeyX => Self::X,
            WK::KeyY => Self::Y,
            WK::KeyZ => Self::Z,

            WK::Digit0 => Self::Num0,
            WK::Digit1 => Self::Num1,
            WK::Digit2 => Self::Num2,
            WK::Digit3 => Self::Num3,
            WK::Digit4 => Self::Num4,
            WK::Digit5 => Self::Num5,
            WK::Digit6 => Self::Num6,
            WK::Digit7 => Self::Num7,
            WK::Digit8 => Self::Num8,
            WK::Digit9 => Self::Num9,

            WK::F1 => Self::F1,
            WK::F2 => Self::F2,
            WK::F3 => Self::F3,
            WK::F4 => Self::F4,
            WK::F5 => Self::F5,
            WK::F6 => Self::F6,
            WK::F7 => Self::F7,
            WK::F8 => Self::F8,
            WK::F9 => Self::F9,
            WK::F10 => Self::F10,
            WK::F11 => Self::F11,
            WK::F12 => Self::F12,

            WK::ArrowLeft => Self::Left,
            WK::ArrowRight => Self::Right,
            WK::ArrowUp => Self::Up,
            WK::ArrowDown => Self::Down,
            WK::Insert => Self::Insert,
            WK::Delete => Self::Delete,
            WK::Home => Self::Home,
            WK::End => Self::End,
            WK::PageUp => Self::PageUp,
            WK::PageDown => Self::PageDown,

            _ => Self::Unknown,
        }
    }
}

/// Convert from winit mouse button; extra buttons are not routed
impl TryFrom<winit::event::MouseButton> for MouseButton {
    type Error = ();

    fn try_from(button: winit::event::MouseButton) -> Result<Self, Self::Error> {
        match button {
            winit::event::MouseButton::Left => Ok(Self::Left),
            winit::event::MouseButton::Middle => Ok(Self::Middle),
            winit::event::MouseButton::Right => Ok(Self::Right),
            _ => Err(()),
        }
    }
}
