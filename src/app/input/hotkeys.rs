//! User-defined hotkeys: key plus modifiers expanding to chat text

use bitflags::bitflags;

use super::error::BindingError;
use super::events::KeyCode;
use super::state::KeyboardState;

bitflags! {
    /// Modifier keys that must be held for a hotkey to fire
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HotkeyModifiers: u8 {
        const CTRL = 1;
        const SHIFT = 2;
        const ALT = 4;
    }
}

impl HotkeyModifiers {
    /// Modifiers currently held on the keyboard
    pub fn from_keyboard(keyboard: &KeyboardState) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::CTRL, keyboard.ctrl());
        flags.set(Self::SHIFT, keyboard.shift());
        flags.set(Self::ALT, keyboard.alt());
        flags
    }

    /// Parses names such as `["ctrl", "shift"]`
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, BindingError> {
        names.iter().try_fold(Self::empty(), |flags, name| {
            let flag = match name.as_ref().to_ascii_lowercase().as_str() {
                "ctrl" | "control" => Self::CTRL,
                "shift" => Self::SHIFT,
                "alt" => Self::ALT,
                _ => {
                    return Err(BindingError::UnknownModifier {
                        name: name.as_ref().to_string(),
                    });
                }
            };
            Ok(flags | flag)
        })
    }
}

/// A key expanding to literal chat text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    pub trigger: KeyCode,
    pub modifiers: HotkeyModifiers,
    pub text: String,
    /// Open the chat input pre-filled with `text` instead of sending it
    pub more_input: bool,
}

impl Hotkey {
    pub fn new(
        trigger: KeyCode,
        modifiers: HotkeyModifiers,
        text: impl Into<String>,
        more_input: bool,
    ) -> Self {
        Self {
            trigger,
            modifiers,
            text: text.into(),
            more_input,
        }
    }

    fn validate(&self) -> Result<(), BindingError> {
        if self.trigger == KeyCode::Unknown {
            return Err(BindingError::HotkeyWithoutKey {
                text: self.text.clone(),
            });
        }
        if self.text.is_empty() {
            return Err(BindingError::EmptyHotkeyText {
                key: self.trigger,
                modifiers: self.modifiers,
            });
        }
        Ok(())
    }
}

/// All configured hotkeys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotkeyTable {
    hotkeys: Vec<Hotkey>,
}

impl HotkeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from loaded definitions, rejecting duplicates
    pub fn from_hotkeys<I>(hotkeys: I) -> Result<Self, BindingError>
    where
        I: IntoIterator<Item = Hotkey>,
    {
        let mut table = Self::new();
        for hotkey in hotkeys {
            if table.find(hotkey.trigger, hotkey.modifiers).is_some() {
                return Err(BindingError::DuplicateHotkey {
                    key: hotkey.trigger,
                    modifiers: hotkey.modifiers,
                });
            }
            table.add(hotkey)?;
        }
        Ok(table)
    }

    /// Adds a hotkey, replacing one with the same key and modifiers
    pub fn add(&mut self, hotkey: Hotkey) -> Result<(), BindingError> {
        hotkey.validate()?;
        match self
            .hotkeys
            .iter_mut()
            .find(|existing| existing.trigger == hotkey.trigger && existing.modifiers == hotkey.modifiers)
        {
            Some(existing) => *existing = hotkey,
            None => self.hotkeys.push(hotkey),
        }
        Ok(())
    }

    /// Removes a hotkey. Returns false if none matched.
    pub fn remove(&mut self, trigger: KeyCode, modifiers: HotkeyModifiers) -> bool {
        let before = self.hotkeys.len();
        self.hotkeys
            .retain(|hotkey| !(hotkey.trigger == trigger && hotkey.modifiers == modifiers));
        self.hotkeys.len() != before
    }

    /// Hotkey for `key` whose modifiers exactly equal `held`
    pub fn lookup(&self, key: KeyCode, held: HotkeyModifiers) -> Option<&Hotkey> {
        self.find(key, held)
    }

    pub fn len(&self) -> usize {
        self.hotkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotkeys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hotkey> {
        self.hotkeys.iter()
    }

    fn find(&self, key: KeyCode, modifiers: HotkeyModifiers) -> Option<&Hotkey> {
        self.hotkeys
            .iter()
            .find(|hotkey| hotkey.trigger == key && hotkey.modifiers == modifiers)
    }
}
