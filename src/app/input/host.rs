//! Collaborator contracts the input router depends on
//!
//! The router owns input state only. Everything it consults or drives
//! (screens, camera, inventory, server connection, window) is reached
//! through these traits, implemented by the host application.

use super::events::{KeyCode, MouseButton};
use crate::game::{
    ClientSettings, EntityId, HackPermissions, Lens, PickedPos, Weather, WindowMode,
};

/// A UI surface that gets first refusal on input
///
/// Every method returns true if the input was consumed. The HUD is a screen
/// too; it is active whenever nothing else is.
pub trait Screen {
    /// Name of this screen for debugging
    fn name(&self) -> &str;

    /// True if this screen claims all input (menus, chat input)
    fn handles_all_input(&self) -> bool {
        false
    }

    fn handles_key_down(&mut self, _key: KeyCode) -> bool {
        false
    }

    fn handles_key_up(&mut self, _key: KeyCode) -> bool {
        false
    }

    fn handles_key_press(&mut self, _ch: char) -> bool {
        false
    }

    fn handles_mouse_move(&mut self, _x: i32, _y: i32) -> bool {
        false
    }

    fn handles_mouse_down(&mut self, _x: i32, _y: i32, _button: MouseButton) -> bool {
        false
    }

    fn handles_mouse_up(&mut self, _x: i32, _y: i32, _button: MouseButton) -> bool {
        false
    }

    fn handles_mouse_scroll(&mut self, _delta: f32) -> bool {
        false
    }
}

/// Screens the router may ask the GUI to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenRequest {
    Pause,
    /// Inventory, closed again by the key currently bound to it
    Inventory { close_key: KeyCode },
    /// Chat input pre-filled with text
    ChatInput(String),
    /// Overlay listing texture ids
    TextureIdsOverlay,
}

/// Reported by the GUI whenever the active screen changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenChange {
    /// Whether the screen being left claimed all input
    pub previous_handled_all_input: bool,
}

/// The GUI: active screen, overlays and the HUD hotbar
pub trait Gui {
    /// Topmost overlay, else the open screen, else the HUD
    fn active_screen(&mut self) -> &mut dyn Screen;

    /// True if a screen other than the HUD is open
    fn has_open_screen(&self) -> bool;

    /// True if the HUD is what receives input
    fn hud_is_active(&self) -> bool;

    fn overlay_count(&self) -> usize;

    fn open(&mut self, request: ScreenRequest);

    /// Forwards a wheel delta to the hotbar selection
    fn scroll_hotbar(&mut self, delta: f32) -> bool;

    /// Drains the next pending screen transition, oldest first
    fn take_screen_change(&mut self) -> Option<ScreenChange>;
}

/// The active camera
pub trait CameraControl {
    /// Zooms by scrolling; false if the camera does not zoom
    fn zoom(&mut self, delta: f32) -> bool;

    /// Switches to the next camera
    fn cycle(&mut self);
}

/// The player's hotbar inventory
pub trait Inventory {
    fn can_change_held_block(&self) -> bool;

    /// Whether the player may place or delete blocks
    fn can_pick(&self) -> bool;

    fn selected_block(&self) -> crate::game::BlockId;

    /// Empties the selected slot without moving the selection
    fn clear_selected_slot(&mut self);
}

/// Buttons involved in a picking request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickRequest {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
    /// Raised by a held button repeating, not a fresh click
    pub cooldown: bool,
}

impl PickRequest {
    pub fn any(&self) -> bool {
        self.left || self.middle || self.right
    }
}

/// Everything the router drives beyond its own state
pub trait ClientHost {
    fn gui(&mut self) -> &mut dyn Gui;

    fn camera(&mut self) -> &mut dyn CameraControl;

    fn inventory(&mut self) -> &mut dyn Inventory;

    fn settings(&mut self) -> &mut ClientSettings;

    /// Field of view state
    fn lens(&mut self) -> &mut Lens;

    fn hacks(&self) -> HackPermissions;

    fn window_mode(&self) -> WindowMode;

    fn set_window_mode(&mut self, mode: WindowMode);

    /// Sets the user view distance; true if the effective distance changed
    fn set_view_distance(&mut self, distance: u32) -> bool;

    fn weather(&self) -> Weather;

    fn set_weather(&mut self, weather: Weather);

    /// Local player movement keys (fly, noclip, respawn, ...)
    fn player_handles_key(&mut self, _key: KeyCode) -> bool {
        false
    }

    /// True when the server addresses clicks at entities/blocks
    fn uses_player_click(&self) -> bool;

    /// Entity closest to the crosshair
    fn closest_entity(&self) -> EntityId;

    /// Result of the last picking ray cast
    fn selected_pos(&self) -> PickedPos;

    /// Tells the server a button changed state
    fn send_player_click(
        &mut self,
        button: MouseButton,
        pressed: bool,
        target: EntityId,
        pos: PickedPos,
    );

    /// Places, deletes or picks blocks for the buttons in `request`
    fn pick_blocks(&mut self, request: PickRequest);

    /// Sends a chat message to the server
    fn send_chat(&mut self, text: &str);

    /// True on platforms where Win+Q quits
    fn is_macos(&self) -> bool {
        cfg!(target_os = "macos")
    }
}
