//! Input routing
//!
//! Every device event passes through [`InputRouter`], which decides who
//! gets it. Priority, highest first:
//!
//! 1. Keys bound to a mouse action are replayed as mouse buttons
//! 2. Shutdown (Alt+F4, Win+Q on macOS) and the screenshot key
//! 3. The active screen
//! 4. Core bindings (view distance, pause, inventory, ...)
//! 5. The local player
//! 6. User hotkeys
//!
//! The router never owns the game; it drives it through [`ClientHost`].

use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::events::{DeviceEvent, KeyCode, MouseButton};
use super::host::{ClientHost, PickRequest, ScreenChange, ScreenRequest};
use super::hotkeys::{HotkeyModifiers, HotkeyTable};
use super::keymap::{KeyBindingTable, LogicalAction};
use super::state::{ButtonPressState, KeyboardState, MouseState, PickingTarget};
use super::toggle::ToggleController;
use super::zoom::ZoomController;
use crate::events::NotificationBus;
use crate::game::{
    next_view_distance, previous_view_distance, EntityId, Weather, WindowMode, AIR,
};

/// Minimum time between repeated picks while a button is held
pub const PICK_COOLDOWN: Duration = Duration::from_millis(250);

/// Routes device input to screens, bindings, the player and hotkeys
#[derive(Debug)]
pub struct InputRouter {
    bindings: KeyBindingTable,
    hotkeys: HotkeyTable,
    bus: Rc<NotificationBus>,
    toggles: ToggleController,
    zoom: ZoomController,
    keyboard: KeyboardState,
    mouse: MouseState,
    buttons: ButtonPressState,
    picking: PickingTarget,
    last_click: Option<Instant>,
    /// Drop the character typed by the key that just opened chat input
    swallow_press: bool,
    screenshot_requested: bool,
    exit_requested: bool,
}

impl InputRouter {
    pub fn new(bindings: KeyBindingTable, hotkeys: HotkeyTable, bus: Rc<NotificationBus>) -> Self {
        Self {
            bindings,
            hotkeys,
            toggles: ToggleController::new(Rc::clone(&bus)),
            bus,
            zoom: ZoomController::new(),
            keyboard: KeyboardState::default(),
            mouse: MouseState::default(),
            buttons: ButtonPressState::default(),
            picking: PickingTarget::default(),
            last_click: None,
            swallow_press: false,
            screenshot_requested: false,
            exit_requested: false,
        }
    }

    pub fn bindings(&self) -> &KeyBindingTable {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindingTable {
        &mut self.bindings
    }

    pub fn hotkeys(&self) -> &HotkeyTable {
        &self.hotkeys
    }

    pub fn hotkeys_mut(&mut self) -> &mut HotkeyTable {
        &mut self.hotkeys
    }

    pub fn bus(&self) -> &Rc<NotificationBus> {
        &self.bus
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn mouse_pos(&self) -> [i32; 2] {
        self.mouse.pos
    }

    pub fn button_state(&self) -> &ButtonPressState {
        &self.buttons
    }

    pub fn picking_target(&self) -> Option<EntityId> {
        self.picking.get()
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    /// When the last click or pick happened
    pub fn last_click(&self) -> Option<Instant> {
        self.last_click
    }

    pub fn screenshot_requested(&self) -> bool {
        self.screenshot_requested
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Clears and returns the screenshot request
    pub fn take_screenshot_request(&mut self) -> bool {
        std::mem::take(&mut self.screenshot_requested)
    }

    /// Clears and returns the exit request
    pub fn take_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.exit_requested)
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keyboard.is_down(key)
    }

    /// True while the key bound to `action` is held
    pub fn is_action_pressed(&self, action: LogicalAction) -> bool {
        self.bindings.is_pressed(action, &self.keyboard)
    }

    /// True if `button` is held on the mouse or through its key binding
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse.held[button] || self.is_action_pressed(mouse_action(button))
    }

    /// Routes one device event
    pub fn dispatch(&mut self, event: DeviceEvent, host: &mut dyn ClientHost) {
        match event {
            DeviceEvent::KeyDown(key) => self.key_down(key, host),
            DeviceEvent::KeyUp(key) => self.key_up(key, host),
            DeviceEvent::KeyPress(ch) => self.key_press(ch, host),
            DeviceEvent::MouseMove { x, y } => self.mouse_move(x, y, host),
            DeviceEvent::MouseWheel(delta) => self.mouse_wheel(delta, host),
            DeviceEvent::MouseDown(button) => self.mouse_down(button, host),
            DeviceEvent::MouseUp(button) => self.mouse_up(button, host),
            DeviceEvent::FocusLost => self.focus_lost(host),
        }
    }

    pub fn key_down(&mut self, key: KeyCode, host: &mut dyn ClientHost) {
        self.swallow_press = false;
        self.keyboard.press(key);
        self.route_key_down(key, host);
        self.flush_screen_changes(host);
    }

    pub fn key_up(&mut self, key: KeyCode, host: &mut dyn ClientHost) {
        self.swallow_press = false;
        self.keyboard.release(key);
        if !self.simulate_mouse(key, false, host) {
            if self.bindings.is_bound_to(LogicalAction::ZoomScrolling, key) {
                let hacks = host.hacks();
                self.zoom.end_gesture(hacks, host.lens(), &self.bus);
            }
            host.gui().active_screen().handles_key_up(key);
        }
        self.flush_screen_changes(host);
    }

    pub fn key_press(&mut self, ch: char, host: &mut dyn ClientHost) {
        if std::mem::take(&mut self.swallow_press) {
            debug!(%ch, "Dropping character of the key that opened chat");
            return;
        }
        host.gui().active_screen().handles_key_press(ch);
        self.flush_screen_changes(host);
    }

    pub fn mouse_move(&mut self, x: i32, y: i32, host: &mut dyn ClientHost) {
        self.mouse.pos = [x, y];
        host.gui().active_screen().handles_mouse_move(x, y);
        self.flush_screen_changes(host);
    }

    pub fn mouse_wheel(&mut self, delta: f32, host: &mut dyn ClientHost) {
        self.route_wheel(delta, host);
        self.flush_screen_changes(host);
    }

    pub fn mouse_down(&mut self, button: MouseButton, host: &mut dyn ClientHost) {
        self.mouse.held[button] = true;
        self.route_mouse_down(button, host);
        self.flush_screen_changes(host);
    }

    pub fn mouse_up(&mut self, button: MouseButton, host: &mut dyn ClientHost) {
        self.mouse.held[button] = false;
        self.route_mouse_up(button, host);
        self.flush_screen_changes(host);
    }

    /// Forgets held input and pauses unless a menu already has focus
    pub fn focus_lost(&mut self, host: &mut dyn ClientHost) {
        self.end_zoom(host);
        self.keyboard.clear();
        for button in MouseButton::ALL {
            if self.mouse.held[button] {
                self.mouse.held[button] = false;
                self.route_mouse_up(button, host);
            }
        }
        if !host.gui().active_screen().handles_all_input() {
            host.gui().open(ScreenRequest::Pause);
        }
        self.flush_screen_changes(host);
    }

    /// Per-frame work: repeat picks for held buttons and keep zoom applied
    pub fn update_frame(&mut self, host: &mut dyn ClientHost) {
        let request = PickRequest {
            left: self.is_mouse_pressed(MouseButton::Left),
            middle: self.is_mouse_pressed(MouseButton::Middle),
            right: self.is_mouse_pressed(MouseButton::Right),
            cooldown: true,
        };
        if request.any() {
            self.pick_blocks(request, host);
        }

        let zoom_allowed = host.gui().hud_is_active();
        if zoom_allowed && self.is_action_pressed(LogicalAction::ZoomScrolling) {
            let hacks = host.hacks();
            self.zoom.reapply(hacks, host.lens(), &self.bus);
        }
        self.flush_screen_changes(host);
    }

    /// Reacts to the active screen changing
    ///
    /// Leaving a screen that claimed all input starts a pick cooldown so the
    /// click that closed it does not also break a block. Under the click
    /// protocol every held button is released.
    pub fn screen_changed(&mut self, change: ScreenChange, host: &mut dyn ClientHost) {
        if change.previous_handled_all_input {
            self.last_click = Some(Instant::now());
        }
        self.end_zoom(host);
        if host.uses_player_click() {
            self.picking.invalidate();
            for button in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
                self.button_state_changed(button, false, host);
            }
        }
    }

    /// Places, deletes or picks blocks, subject to the hold cooldown
    pub fn pick_blocks(&mut self, request: PickRequest, host: &mut dyn ClientHost) {
        let now = Instant::now();
        if request.cooldown
            && self
                .last_click
                .is_some_and(|last| now.duration_since(last) < PICK_COOLDOWN)
        {
            return;
        }
        self.last_click = Some(now);

        let handles_all = host.gui().active_screen().handles_all_input();
        if host.uses_player_click() && !handles_all {
            self.picking.invalidate();
            self.button_state_changed(MouseButton::Left, request.left, host);
            self.button_state_changed(MouseButton::Right, request.right, host);
            self.button_state_changed(MouseButton::Middle, request.middle, host);
        }

        if handles_all || !host.inventory().can_pick() || !request.any() {
            return;
        }
        debug!(
            left = request.left,
            middle = request.middle,
            right = request.right,
            "Picking blocks"
        );
        host.pick_blocks(request);
    }

    fn flush_screen_changes(&mut self, host: &mut dyn ClientHost) {
        while let Some(change) = host.gui().take_screen_change() {
            self.screen_changed(change, host);
        }
    }

    fn route_key_down(&mut self, key: KeyCode, host: &mut dyn ClientHost) {
        if self.simulate_mouse(key, true, host) {
            return;
        }
        if self.is_shutdown(key, host) {
            info!(%key, "Shutdown key combination pressed");
            self.exit_requested = true;
            return;
        }
        if self.bindings.is_bound_to(LogicalAction::Screenshot, key) {
            self.screenshot_requested = true;
            return;
        }
        if host.gui().active_screen().handles_key_down(key) {
            return;
        }
        if self.handle_core_key(key, host) {
            return;
        }
        if host.player_handles_key(key) {
            return;
        }
        self.handle_hotkey(key, host);
    }

    /// Replays keys bound to mouse actions as button events
    fn simulate_mouse(&mut self, key: KeyCode, pressed: bool, host: &mut dyn ClientHost) -> bool {
        let Some(button) = MouseButton::ALL
            .into_iter()
            .find(|&button| self.bindings.is_bound_to(mouse_action(button), key))
        else {
            return false;
        };

        if pressed {
            self.route_mouse_down(button, host);
        } else {
            self.route_mouse_up(button, host);
        }
        true
    }

    fn is_shutdown(&self, key: KeyCode, host: &dyn ClientHost) -> bool {
        if key == KeyCode::F4 && self.keyboard.alt() {
            return true;
        }
        host.is_macos() && key == KeyCode::Q && self.keyboard.win()
    }

    fn route_mouse_down(&mut self, button: MouseButton, host: &mut dyn ClientHost) {
        let [x, y] = self.mouse.pos;
        if host.gui().active_screen().handles_mouse_down(x, y, button) {
            self.last_click = Some(Instant::now());
            return;
        }

        let request = PickRequest {
            left: button == MouseButton::Left,
            middle: button == MouseButton::Middle,
            right: button == MouseButton::Right,
            cooldown: false,
        };
        self.pick_blocks(request, host);
    }

    fn route_mouse_up(&mut self, button: MouseButton, host: &mut dyn ClientHost) {
        let [x, y] = self.mouse.pos;
        if host.gui().active_screen().handles_mouse_up(x, y, button) {
            return;
        }
        if host.uses_player_click() {
            self.picking.invalidate();
            self.button_state_changed(button, false, host);
        }
    }

    fn route_wheel(&mut self, delta: f32, host: &mut dyn ClientHost) {
        if host.gui().active_screen().handles_mouse_scroll(delta) {
            return;
        }

        let hotbar_modifier = self.keyboard.alt() || self.keyboard.ctrl() || self.keyboard.shift();
        if !hotbar_modifier {
            if host.camera().zoom(delta) {
                return;
            }
            let hacks = host.hacks();
            let zoom_held = self.is_action_pressed(LogicalAction::ZoomScrolling);
            if self.zoom.on_scroll(delta, zoom_held, hacks, host.lens(), &self.bus) {
                return;
            }
        }

        if !host.inventory().can_change_held_block() {
            return;
        }
        if host.gui().scroll_hotbar(delta) {
            self.bus.held_block_changed.notify();
        }
    }

    /// Tells the server a button changed, once per actual change
    fn button_state_changed(&mut self, button: MouseButton, pressed: bool, host: &mut dyn ClientHost) {
        if !pressed && !self.buttons.is_down(button) {
            return;
        }

        let target = self.picking.resolve_with(|| host.closest_entity());
        let pos = host.selected_pos();
        debug!(?button, pressed, target = target.0, "Player click");
        host.send_player_click(button, pressed, target, pos);
        self.buttons.set(button, pressed);
    }

    fn handle_core_key(&mut self, key: KeyCode, host: &mut dyn ClientHost) -> bool {
        use LogicalAction as A;
        let classic = host.settings().classic_mode;

        if self.bindings.is_bound_to(A::HideFps, key) {
            let settings = host.settings();
            settings.show_fps = !settings.show_fps;
        } else if self.bindings.is_bound_to(A::Fullscreen, key) {
            let mode = host.window_mode();
            if mode != WindowMode::Maximized {
                let next = if mode == WindowMode::Fullscreen {
                    WindowMode::Normal
                } else {
                    WindowMode::Fullscreen
                };
                debug!(?mode, ?next, "Toggling fullscreen");
                host.set_window_mode(next);
            }
        } else if self.bindings.is_bound_to(A::ToggleFog, key) {
            self.cycle_view_distance(host);
        } else if (self.bindings.is_bound_to(A::PauseOrExit, key) || key == KeyCode::Pause)
            && !host.gui().active_screen().handles_all_input()
        {
            host.gui().open(ScreenRequest::Pause);
        } else if self.bindings.is_bound_to(A::Inventory, key) && host.gui().hud_is_active() {
            host.gui().open(ScreenRequest::Inventory { close_key: key });
        } else if key == KeyCode::F5 && classic {
            let next = match host.weather() {
                Weather::Sunny => Weather::Rainy,
                _ => Weather::Sunny,
            };
            host.set_weather(next);
        } else if !classic {
            return self.handle_non_classic_key(key, host);
        }
        true
    }

    fn handle_non_classic_key(&mut self, key: KeyCode, host: &mut dyn ClientHost) -> bool {
        use LogicalAction as A;

        if self.bindings.is_bound_to(A::HideGui, key) {
            let settings = host.settings();
            settings.hide_gui = !settings.hide_gui;
        } else if self.bindings.is_bound_to(A::SmoothCamera, key) {
            self.toggles.toggle(
                key,
                &mut host.settings().smooth_camera,
                "  &eSmooth camera is &aenabled",
                "  &eSmooth camera is &cdisabled",
            );
        } else if self.bindings.is_bound_to(A::AxisLines, key) {
            self.toggles.toggle(
                key,
                &mut host.settings().show_axis_lines,
                "  &eAxis lines (&4X&e, &2Y&e, &1Z&e) now show",
                "  &eAxis lines no longer show",
            );
        } else if self.bindings.is_bound_to(A::Autorotate, key) {
            self.toggles.toggle(
                key,
                &mut host.settings().auto_rotate,
                "  &eAuto rotate is &aenabled",
                "  &eAuto rotate is &cdisabled",
            );
        } else if self.bindings.is_bound_to(A::ThirdPerson, key) {
            host.camera().cycle();
        } else if self.bindings.is_bound_to(A::DropBlock, key) {
            let inventory = host.inventory();
            if inventory.can_change_held_block() && inventory.selected_block() != AIR {
                inventory.clear_selected_slot();
                self.bus.held_block_changed.notify();
            }
        } else if self.bindings.is_bound_to(A::IdOverlay, key) {
            if host.gui().overlay_count() == 0 {
                host.gui().open(ScreenRequest::TextureIdsOverlay);
            }
        } else if self.bindings.is_bound_to(A::BreakableLiquids, key) {
            self.toggles.toggle(
                key,
                &mut host.settings().breakable_liquids,
                "  &eBreakable liquids is &aenabled",
                "  &eBreakable liquids is &cdisabled",
            );
        } else {
            return false;
        }
        true
    }

    fn cycle_view_distance(&mut self, host: &mut dyn ClientHost) {
        let settings = host.settings();
        let distances = settings.view_distances();
        let current = settings.view_distance;
        let next = if self.keyboard.shift() {
            previous_view_distance(distances, current)
        } else {
            next_view_distance(distances, current)
        };

        if host.set_view_distance(next) {
            debug!(from = current, to = next, "View distance changed");
            self.bus.view_distance_changed.notify();
        }
    }

    /// Abandons a zoom gesture in progress, restoring the default field of view
    fn end_zoom(&mut self, host: &mut dyn ClientHost) {
        if self.zoom.is_zooming() {
            let hacks = host.hacks();
            self.zoom.end_gesture(hacks, host.lens(), &self.bus);
        }
    }

    fn handle_hotkey(&mut self, key: KeyCode, host: &mut dyn ClientHost) {
        let modifiers = HotkeyModifiers::from_keyboard(&self.keyboard);
        let Some(hotkey) = self.hotkeys.lookup(key, modifiers) else {
            return;
        };

        if !hotkey.more_input {
            debug!(%key, text = %hotkey.text, "Hotkey sends chat");
            host.send_chat(&hotkey.text);
        } else if !host.gui().has_open_screen() {
            host.gui().open(ScreenRequest::ChatInput(hotkey.text.clone()));
            self.swallow_press = true;
        } else {
            debug!(%key, "Hotkey ignored while a screen is open");
        }
    }
}

fn mouse_action(button: MouseButton) -> LogicalAction {
    match button {
        MouseButton::Left => LogicalAction::MouseLeft,
        MouseButton::Middle => LogicalAction::MouseMiddle,
        MouseButton::Right => LogicalAction::MouseRight,
    }
}
