//! Input state owned by the router

use std::collections::HashSet;

use enum_map::EnumMap;

use super::events::{KeyCode, MouseButton};
use crate::game::EntityId;

/// Keys currently held, as reported by key down/up events
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn press(&mut self, key: KeyCode) {
        if key != KeyCode::Unknown {
            self.held.insert(key);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn shift(&self) -> bool {
        self.held.iter().any(|key| key.is_shift())
    }

    pub fn ctrl(&self) -> bool {
        self.held.iter().any(|key| key.is_control())
    }

    pub fn alt(&self) -> bool {
        self.held.iter().any(|key| key.is_alt())
    }

    pub fn win(&self) -> bool {
        self.held.iter().any(|key| key.is_win())
    }

    /// Forgets every held key, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Cursor position and raw mouse buttons held
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// Window coordinates
    pub pos: [i32; 2],
    /// Buttons held according to the device
    pub held: EnumMap<MouseButton, bool>,
}

/// Which buttons the server was last told are held
///
/// A button is true only between a press sent to the server and its
/// matching release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonPressState {
    down: EnumMap<MouseButton, bool>,
}

impl ButtonPressState {
    pub fn is_down(&self, button: MouseButton) -> bool {
        self.down[button]
    }

    pub fn set(&mut self, button: MouseButton, pressed: bool) {
        self.down[button] = pressed;
    }
}

/// Lazily resolved entity a click is addressed to
///
/// Resolving the closest entity is costly, so it is done on the first click
/// after each invalidation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickingTarget(Option<EntityId>);

impl PickingTarget {
    pub fn get(&self) -> Option<EntityId> {
        self.0
    }

    pub fn invalidate(&mut self) {
        self.0 = None;
    }

    /// Returns the cached target, resolving it first if needed
    pub fn resolve_with(&mut self, resolve: impl FnOnce() -> EntityId) -> EntityId {
        *self.0.get_or_insert_with(resolve)
    }
}
