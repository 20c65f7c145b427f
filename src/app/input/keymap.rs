//! Logical actions and their physical key bindings

use enum_map::{Enum, EnumMap, enum_map};
use serde::{Deserialize, Serialize};

use super::events::KeyCode;
use super::state::KeyboardState;

/// A bindable game command, independent of the key that triggers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum LogicalAction {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Respawn,
    SetSpawn,
    Chat,
    Inventory,
    ToggleFog,
    SendChat,
    PauseOrExit,
    PlayerList,
    Speed,
    NoClip,
    Fly,
    FlyUp,
    FlyDown,
    ExtInput,
    HideFps,
    Screenshot,
    Fullscreen,
    ThirdPerson,
    HideGui,
    AxisLines,
    ZoomScrolling,
    HalfSpeed,
    MouseLeft,
    MouseMiddle,
    MouseRight,
    Autorotate,
    HotbarSwitching,
    SmoothCamera,
    DropBlock,
    IdOverlay,
    BreakableLiquids,
}

impl LogicalAction {
    /// Key bound to this action on a fresh install
    ///
    /// The mouse-simulation actions start unbound.
    pub fn default_key(self) -> KeyCode {
        use KeyCode as K;
        match self {
            Self::Forward => K::W,
            Self::Back => K::S,
            Self::Left => K::A,
            Self::Right => K::D,
            Self::Jump => K::Space,
            Self::Respawn => K::R,
            Self::SetSpawn => K::Enter,
            Self::Chat => K::T,
            Self::Inventory => K::B,
            Self::ToggleFog => K::F,
            Self::SendChat => K::Enter,
            Self::PauseOrExit => K::Escape,
            Self::PlayerList => K::Tab,
            Self::Speed => K::ShiftLeft,
            Self::NoClip => K::X,
            Self::Fly => K::Z,
            Self::FlyUp => K::Q,
            Self::FlyDown => K::E,
            Self::ExtInput => K::AltLeft,
            Self::HideFps => K::F3,
            Self::Screenshot => K::F12,
            Self::Fullscreen => K::F11,
            Self::ThirdPerson => K::F5,
            Self::HideGui => K::F1,
            Self::AxisLines => K::F7,
            Self::ZoomScrolling => K::C,
            Self::HalfSpeed => K::AltLeft,
            Self::MouseLeft => K::Unknown,
            Self::MouseMiddle => K::Unknown,
            Self::MouseRight => K::Unknown,
            Self::Autorotate => K::F6,
            Self::HotbarSwitching => K::ControlLeft,
            Self::SmoothCamera => K::F8,
            Self::DropBlock => K::G,
            Self::IdOverlay => K::F10,
            Self::BreakableLiquids => K::F9,
        }
    }
}

/// Mapping from every logical action to one physical key
///
/// Two actions may share a key. The table does not arbitrate; the router
/// tests bindings in a fixed order so the earlier-checked action wins.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindingTable {
    keys: EnumMap<LogicalAction, KeyCode>,
}

impl KeyBindingTable {
    /// Table with every action on its default key
    pub fn new() -> Self {
        Self {
            keys: enum_map! { action => LogicalAction::default_key(action) },
        }
    }

    /// Defaults with the given overrides applied in order
    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (LogicalAction, KeyCode)>,
    {
        let mut table = Self::new();
        for (action, key) in overrides {
            table.set(action, key);
        }
        table
    }

    pub fn get(&self, action: LogicalAction) -> KeyCode {
        self.keys[action]
    }

    /// Rebinds an action; the previous key is forgotten
    pub fn set(&mut self, action: LogicalAction, key: KeyCode) {
        self.keys[action] = key;
    }

    /// Restores an action's default key
    pub fn reset(&mut self, action: LogicalAction) {
        self.keys[action] = action.default_key();
    }

    /// True if `key` triggers `action`. Unbound actions match nothing.
    pub fn is_bound_to(&self, action: LogicalAction, key: KeyCode) -> bool {
        key != KeyCode::Unknown && self.keys[action] == key
    }

    /// True if the key bound to `action` is currently held
    pub fn is_pressed(&self, action: LogicalAction, keyboard: &KeyboardState) -> bool {
        let key = self.keys[action];
        key != KeyCode::Unknown && keyboard.is_down(key)
    }

    /// Every action bound to `key`, in declaration order
    pub fn actions_for(&self, key: KeyCode) -> Vec<LogicalAction> {
        self.keys
            .iter()
            .filter(|&(_, &bound)| bound != KeyCode::Unknown && bound == key)
            .map(|(action, _)| action)
            .collect()
    }

    /// Keys bound to more than one action, with the actions sharing them
    pub fn collisions(&self) -> Vec<(KeyCode, Vec<LogicalAction>)> {
        let mut seen: Vec<KeyCode> = Vec::new();
        let mut collisions = Vec::new();
        for (_, &key) in self.keys.iter() {
            if key == KeyCode::Unknown || seen.contains(&key) {
                continue;
            }
            seen.push(key);
            let actions = self.actions_for(key);
            if actions.len() > 1 {
                collisions.push((key, actions));
            }
        }
        collisions
    }

    pub fn iter(&self) -> impl Iterator<Item = (LogicalAction, KeyCode)> + '_ {
        self.keys.iter().map(|(action, &key)| (action, key))
    }
}

impl Default for KeyBindingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<LogicalAction> for KeyBindingTable {
    type Output = KeyCode;

    fn index(&self, action: LogicalAction) -> &KeyCode {
        &self.keys[action]
    }
}

impl std::ops::IndexMut<LogicalAction> for KeyBindingTable {
    fn index_mut(&mut self, action: LogicalAction) -> &mut KeyCode {
        &mut self.keys[action]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let table = KeyBindingTable::new();
        assert_eq!(table.get(LogicalAction::Fullscreen), KeyCode::F11);
        assert_eq!(table[LogicalAction::ZoomScrolling], KeyCode::C);
        assert_eq!(table.get(LogicalAction::MouseLeft), KeyCode::Unknown);
    }

    #[test]
    fn test_last_write_wins() {
        let mut table = KeyBindingTable::new();
        table.set(LogicalAction::Screenshot, KeyCode::P);
        table[LogicalAction::Screenshot] = KeyCode::O;
        assert_eq!(table.get(LogicalAction::Screenshot), KeyCode::O);

        table.reset(LogicalAction::Screenshot);
        assert_eq!(table.get(LogicalAction::Screenshot), KeyCode::F12);
    }

    #[test]
    fn test_unbound_actions_never_match() {
        let table = KeyBindingTable::new();
        assert!(!table.is_bound_to(LogicalAction::MouseLeft, KeyCode::Unknown));
        assert!(table.actions_for(KeyCode::Unknown).is_empty());
    }

    #[test]
    fn test_collisions_are_permitted_and_reported() {
        let table = KeyBindingTable::with_overrides([(LogicalAction::DropBlock, KeyCode::F11)]);
        assert!(table.is_bound_to(LogicalAction::DropBlock, KeyCode::F11));
        assert!(table.is_bound_to(LogicalAction::Fullscreen, KeyCode::F11));

        let collisions = table.collisions();
        let f11 = collisions
            .iter()
            .find(|(key, _)| *key == KeyCode::F11)
            .map(|(_, actions)| actions.clone());
        assert_eq!(
            f11,
            Some(vec![LogicalAction::Fullscreen, LogicalAction::DropBlock])
        );
    }

    #[test]
    fn test_is_pressed_reads_keyboard_state() {
        let table = KeyBindingTable::new();
        let mut keyboard = KeyboardState::default();
        assert!(!table.is_pressed(LogicalAction::ZoomScrolling, &keyboard));
        keyboard.press(KeyCode::C);
        assert!(table.is_pressed(LogicalAction::ZoomScrolling, &keyboard));
    }
}
