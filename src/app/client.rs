//! The client: game state the input router drives

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use super::config::AppConfig;
use super::gui::GuiStack;
use super::input::{CameraControl, ClientHost, Gui, Inventory, MouseButton, PickRequest};
use crate::events::{ChatEvent, NotificationBus};
use crate::game::{
    BlockId, CameraRig, ClientSettings, EntityId, HackPermissions, Hotbar, Lens, PickedPos,
    Weather, WindowMode, AIR,
};

/// A button state change as sent to the server
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerClick {
    pub button: MouseButton,
    pub pressed: bool,
    pub target: EntityId,
    pub pos: PickedPos,
}

/// Client state behind [`ClientHost`]
///
/// Networking and world simulation are out of reach here, so outgoing
/// clicks, picks and chat are queued for whoever owns the connection.
pub struct Client {
    bus: Rc<NotificationBus>,
    settings: ClientSettings,
    hacks: HackPermissions,
    lens: Lens,
    camera: CameraRig,
    gui: GuiStack,
    window_mode: WindowMode,
    weather: Weather,
    player_click: bool,
    closest_entity: EntityId,
    selected_pos: PickedPos,
    clicks: Vec<PlayerClick>,
    picks: Vec<PickRequest>,
    outbox: Vec<String>,
    chat_log: Rc<RefCell<Vec<ChatEvent>>>,
}

impl Client {
    pub fn new(config: &AppConfig, bus: Rc<NotificationBus>) -> Self {
        let chat_log = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&chat_log);
        bus.chat_received.subscribe(move |chat: &mut ChatEvent| {
            log.borrow_mut().push(chat.clone());
            Ok(())
        });

        let mut lens = Lens::new(config.game.field_of_view);
        lens.set_far_plane(config.game.effective_view_distance() as f32);

        let window_mode = if config.window.fullscreen {
            WindowMode::Fullscreen
        } else {
            WindowMode::Normal
        };

        Self {
            bus,
            settings: config.game.clone(),
            hacks: config.hacks,
            lens,
            camera: CameraRig::new(),
            gui: GuiStack::new(Hotbar::default()),
            window_mode,
            weather: Weather::Sunny,
            player_click: config.server.player_click,
            closest_entity: EntityId::SELF,
            selected_pos: PickedPos::invalid(),
            clicks: Vec::new(),
            picks: Vec::new(),
            outbox: Vec::new(),
            chat_log,
        }
    }

    pub fn bus(&self) -> &Rc<NotificationBus> {
        &self.bus
    }

    pub fn client_settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn lens_state(&self) -> &Lens {
        &self.lens
    }

    pub fn camera_rig(&self) -> &CameraRig {
        &self.camera
    }

    pub fn gui_stack(&self) -> &GuiStack {
        &self.gui
    }

    pub fn gui_stack_mut(&mut self) -> &mut GuiStack {
        &mut self.gui
    }

    pub fn hotbar(&self) -> &Hotbar {
        self.gui.hotbar()
    }

    /// Applies permissions sent by the server
    pub fn set_hacks(&mut self, hacks: HackPermissions) {
        if self.hacks == hacks {
            return;
        }
        self.hacks = hacks;
        self.bus.hack_permissions_changed.notify();
    }

    /// Switches the button-click protocol on or off
    pub fn set_player_click(&mut self, enabled: bool) {
        self.player_click = enabled;
    }

    /// Records the result of the latest entity and block ray casts
    pub fn set_targets(&mut self, entity: EntityId, pos: PickedPos) {
        self.closest_entity = entity;
        self.selected_pos = pos;
    }

    /// Clicks sent to the server, oldest first
    pub fn clicks(&self) -> &[PlayerClick] {
        &self.clicks
    }

    /// Picking requests handed to the world, oldest first
    pub fn picks(&self) -> &[PickRequest] {
        &self.picks
    }

    /// Chat lines waiting to be sent
    pub fn outbox(&self) -> &[String] {
        &self.outbox
    }

    pub fn take_outbox(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outbox)
    }

    /// Chat messages received so far, as delivered to subscribers
    pub fn chat_log(&self) -> Vec<ChatEvent> {
        self.chat_log.borrow().clone()
    }

    /// Sends whatever the player confirmed in the chat input
    pub fn flush_chat_input(&mut self) {
        for text in self.gui.take_outgoing_chat() {
            self.send_chat(&text);
        }
    }
}

impl CameraControl for Client {
    fn zoom(&mut self, delta: f32) -> bool {
        self.camera.zoom(delta)
    }

    fn cycle(&mut self) {
        let mode = self.camera.cycle(self.hacks, self.settings.classic_mode);
        debug!(?mode, "Camera cycled");
        self.bus.projection_changed.notify();
    }
}

impl Inventory for Hotbar {
    fn can_change_held_block(&self) -> bool {
        self.can_change_held_block
    }

    fn can_pick(&self) -> bool {
        self.can_pick
    }

    fn selected_block(&self) -> BlockId {
        Hotbar::selected_block(self)
    }

    fn clear_selected_slot(&mut self) {
        self.set_selected_block(AIR);
    }
}

impl ClientHost for Client {
    fn gui(&mut self) -> &mut dyn Gui {
        &mut self.gui
    }

    fn camera(&mut self) -> &mut dyn CameraControl {
        self
    }

    fn inventory(&mut self) -> &mut dyn Inventory {
        self.gui.hotbar_mut()
    }

    fn settings(&mut self) -> &mut ClientSettings {
        &mut self.settings
    }

    fn lens(&mut self) -> &mut Lens {
        &mut self.lens
    }

    fn hacks(&self) -> HackPermissions {
        self.hacks
    }

    fn window_mode(&self) -> WindowMode {
        self.window_mode
    }

    fn set_window_mode(&mut self, mode: WindowMode) {
        self.window_mode = mode;
    }

    fn set_view_distance(&mut self, distance: u32) -> bool {
        let before = self.settings.effective_view_distance();
        self.settings.view_distance = distance;
        let after = self.settings.effective_view_distance();
        if before == after {
            return false;
        }

        self.lens.set_far_plane(after as f32);
        self.bus.projection_changed.notify();
        true
    }

    fn weather(&self) -> Weather {
        self.weather
    }

    fn set_weather(&mut self, weather: Weather) {
        debug!(?weather, "Weather changed");
        self.weather = weather;
    }

    fn uses_player_click(&self) -> bool {
        self.player_click
    }

    fn closest_entity(&self) -> EntityId {
        self.closest_entity
    }

    fn selected_pos(&self) -> PickedPos {
        self.selected_pos
    }

    fn send_player_click(
        &mut self,
        button: MouseButton,
        pressed: bool,
        target: EntityId,
        pos: PickedPos,
    ) {
        self.clicks.push(PlayerClick {
            button,
            pressed,
            target,
            pos,
        });
    }

    fn pick_blocks(&mut self, request: PickRequest) {
        self.picks.push(request);
    }

    fn send_chat(&mut self, text: &str) {
        let mut text = text.to_string();
        self.bus.raise_chat_sending(&mut text);
        if text.is_empty() {
            return;
        }
        debug!(%text, "Queued chat message");
        self.outbox.push(text);
    }
}
