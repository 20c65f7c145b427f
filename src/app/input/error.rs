//! Errors for rejected input configuration

use thiserror::Error;

use super::events::KeyCode;
use super::hotkeys::HotkeyModifiers;
use super::keymap::LogicalAction;

/// A key binding or hotkey that cannot be loaded
///
/// Raised while building tables from configuration; the router only ever
/// sees tables that passed these checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("cannot bind {action:?} to an unknown key")]
    UnknownKey { action: LogicalAction },

    #[error("hotkey '{text}' is bound to an unknown key")]
    HotkeyWithoutKey { text: String },

    #[error("hotkey {key} ({modifiers:?}) has empty text")]
    EmptyHotkeyText {
        key: KeyCode,
        modifiers: HotkeyModifiers,
    },

    #[error("hotkey {key} ({modifiers:?}) is defined more than once")]
    DuplicateHotkey {
        key: KeyCode,
        modifiers: HotkeyModifiers,
    },

    #[error("unknown hotkey modifier '{name}'")]
    UnknownModifier { name: String },
}
