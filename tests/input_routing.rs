//! End-to-end routing through the reference client

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use voxel_client::app::input::{
    ClientHost, DeviceEvent, Gui, Hotkey, HotkeyModifiers, InputCollector, InputRouter, KeyCode,
    LogicalAction, MouseButton,
};
use voxel_client::app::{AppConfig, Client, ModalKind};
use voxel_client::events::NotificationBus;
use voxel_client::game::{EntityId, PickedPos, WindowMode};
use winit::event::ElementState;

struct Session {
    client: Client,
    router: InputRouter,
}

impl Session {
    fn new() -> Self {
        Self::with_config(AppConfig::fallback("test"))
    }

    fn with_config(config: AppConfig) -> Self {
        let (bindings, hotkeys) = config.input.build().unwrap();
        let bus = NotificationBus::shared();
        Self {
            client: Client::new(&config, Rc::clone(&bus)),
            router: InputRouter::new(bindings, hotkeys, bus),
        }
    }

    fn bus(&self) -> Rc<NotificationBus> {
        Rc::clone(self.client.bus())
    }

    fn send(&mut self, events: &[DeviceEvent]) {
        for &event in events {
            self.router.dispatch(event, &mut self.client);
        }
        self.client.flush_chat_input();
    }

    fn tap(&mut self, key: KeyCode) {
        self.send(&[DeviceEvent::KeyDown(key), DeviceEvent::KeyUp(key)]);
    }
}

fn counter() -> (Rc<Cell<usize>>, impl Fn(&mut ()) -> anyhow::Result<()>) {
    let count = Rc::new(Cell::new(0));
    let handle = Rc::clone(&count);
    (count, move |_: &mut ()| {
        handle.set(handle.get() + 1);
        Ok(())
    })
}

#[test]
fn test_release_without_press_is_ignored() {
    let mut config = AppConfig::fallback("test");
    config.server.player_click = true;
    let mut session = Session::with_config(config);

    for button in MouseButton::ALL {
        session.send(&[DeviceEvent::MouseUp(button)]);
    }

    assert!(session.client.clicks().is_empty());
    assert!(session.client.picks().is_empty());
    for button in MouseButton::ALL {
        assert!(!session.router.button_state().is_down(button));
    }
}

#[test]
fn test_core_binding_beats_hotkey_on_same_key() {
    let mut session = Session::new();
    session
        .router
        .hotkeys_mut()
        .add(Hotkey::new(KeyCode::F, HotkeyModifiers::empty(), "/fog", false))
        .unwrap();
    let before = session.client.client_settings().view_distance;

    session.tap(KeyCode::F);

    assert_ne!(session.client.client_settings().view_distance, before);
    assert!(session.client.outbox().is_empty());
}

#[test]
fn test_hotkey_fires_when_key_has_no_core_binding() {
    let mut session = Session::new();
    session
        .router
        .hotkeys_mut()
        .add(Hotkey::new(KeyCode::H, HotkeyModifiers::CTRL, "/help", false))
        .unwrap();

    session.send(&[
        DeviceEvent::KeyDown(KeyCode::ControlLeft),
        DeviceEvent::KeyDown(KeyCode::H),
    ]);

    assert_eq!(session.client.outbox(), ["/help".to_string()]);
}

#[test]
fn test_more_input_hotkey_opens_chat() {
    let mut session = Session::new();
    session
        .router
        .hotkeys_mut()
        .add(Hotkey::new(
            KeyCode::T,
            HotkeyModifiers::CTRL | HotkeyModifiers::SHIFT,
            "/tp ",
            true,
        ))
        .unwrap();

    session.send(&[
        DeviceEvent::KeyDown(KeyCode::ControlLeft),
        DeviceEvent::KeyDown(KeyCode::ShiftLeft),
        DeviceEvent::KeyDown(KeyCode::T),
        DeviceEvent::KeyUp(KeyCode::T),
        DeviceEvent::KeyUp(KeyCode::ShiftLeft),
        DeviceEvent::KeyUp(KeyCode::ControlLeft),
    ]);
    assert_eq!(
        session.client.gui_stack().top_screen().map(|s| s.kind.clone()),
        Some(ModalKind::ChatInput("/tp ".to_string()))
    );
    assert!(session.client.outbox().is_empty());

    session.send(&[
        DeviceEvent::KeyPress('b'),
        DeviceEvent::KeyPress('o'),
        DeviceEvent::KeyPress('b'),
        DeviceEvent::KeyDown(KeyCode::Enter),
    ]);
    assert_eq!(session.client.outbox(), ["/tp bob".to_string()]);
    assert!(!session.client.gui_stack().has_open_screen());
}

#[test]
fn test_chat_hotkey_prefill_excludes_trigger_character() {
    let mut session = Session::new();
    session
        .router
        .hotkeys_mut()
        .add(Hotkey::new(KeyCode::J, HotkeyModifiers::empty(), "/tp ", true))
        .unwrap();

    let mut collector = InputCollector::new();
    collector.push_key(KeyCode::J, ElementState::Pressed, Some("j"));
    collector.push_key(KeyCode::J, ElementState::Released, None);
    let events: Vec<DeviceEvent> = collector.drain().collect();
    session.send(&events);

    assert_eq!(
        session.client.gui_stack().top_screen().map(|s| s.kind.clone()),
        Some(ModalKind::ChatInput("/tp ".to_string()))
    );

    collector.push_key(KeyCode::J, ElementState::Pressed, Some("j"));
    let events: Vec<DeviceEvent> = collector.drain().collect();
    session.send(&events);
    assert_eq!(
        session.client.gui_stack().top_screen().map(|s| s.kind.clone()),
        Some(ModalKind::ChatInput("/tp j".to_string()))
    );
}

#[test]
fn test_focus_loss_mid_zoom_restores_default_fov() {
    let mut session = Session::new();

    session.send(&[
        DeviceEvent::KeyDown(KeyCode::C),
        DeviceEvent::MouseWheel(4.0),
    ]);
    assert_eq!(session.client.lens_state().fov(), 50);

    session.send(&[DeviceEvent::FocusLost]);
    assert!(session.client.gui_stack().has_open_screen());
    assert_eq!(session.router.zoom().accumulator(), None);
    assert_eq!(session.client.lens_state().fov(), 70);

    session.tap(KeyCode::Escape);
    session.router.update_frame(&mut session.client);
    assert_eq!(session.router.zoom().accumulator(), None);
    assert_eq!(session.client.lens_state().fov(), 70);
}

#[test]
fn test_subscribers_run_in_order_and_see_rewrites() {
    let session = Session::new();
    let bus = session.bus();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let first = Rc::clone(&seen);
    bus.chat_received.subscribe(move |chat| {
        first.borrow_mut().push(format!("A:{}", chat.text));
        chat.text.push('!');
        Ok(())
    });
    let second = Rc::clone(&seen);
    bus.chat_received.subscribe(move |chat| {
        second.borrow_mut().push(format!("B:{}", chat.text));
        Ok(())
    });

    let mut text = "hi".to_string();
    bus.raise_chat_received(&mut text, Default::default());

    // The client subscribed first, so it logged the original text
    assert_eq!(session.client.chat_log()[0].text, "hi");
    assert_eq!(*seen.borrow(), vec!["A:hi".to_string(), "B:hi!".to_string()]);
    assert_eq!(text, "hi!");
}

#[test]
fn test_zoom_clamps_at_one() {
    let mut config = AppConfig::fallback("test");
    config.game.field_of_view = 90;
    let mut session = Session::with_config(config);

    session.send(&[DeviceEvent::KeyDown(KeyCode::C)]);
    for _ in 0..100 {
        session.send(&[DeviceEvent::MouseWheel(10.0)]);
        let accumulator = session.router.zoom().accumulator().unwrap();
        assert!((1.0..=90.0).contains(&accumulator));
    }
    assert_eq!(session.router.zoom().accumulator(), Some(1.0));
    assert_eq!(session.client.lens_state().fov(), 1);

    session.send(&[DeviceEvent::MouseWheel(-1000.0)]);
    assert_eq!(session.router.zoom().accumulator(), Some(90.0));

    session.send(&[DeviceEvent::KeyUp(KeyCode::C)]);
    assert!(!session.router.zoom().is_zooming());
    assert_eq!(session.client.lens_state().fov(), 90);
}

#[test]
fn test_zoom_denied_without_camera_hacks() {
    let mut config = AppConfig::fallback("test");
    config.hacks.can_use_third_person = false;
    let mut session = Session::with_config(config);

    session.send(&[DeviceEvent::KeyDown(KeyCode::C), DeviceEvent::MouseWheel(2.0)]);

    assert!(!session.router.zoom().is_zooming());
    assert_eq!(session.client.lens_state().fov(), 70);
    // Not consumed by zoom, so the hotbar moved instead
    assert_eq!(session.client.hotbar().selected_index(), 7);
}

#[test]
fn test_toggle_round_trip_through_router() {
    let mut session = Session::new();

    session.tap(KeyCode::F8);
    session.tap(KeyCode::F8);

    assert!(!session.client.client_settings().smooth_camera);
    let log: Vec<String> = session
        .client
        .chat_log()
        .into_iter()
        .map(|chat| chat.text)
        .collect();
    assert_eq!(
        log,
        vec![
            "  &eSmooth camera is &aenabled. &ePress &aF8 &eto disable.".to_string(),
            "  &eSmooth camera is &cdisabled. &ePress &aF8 &eto re-enable.".to_string(),
        ]
    );
}

#[test]
fn test_leaving_exclusive_screen_invalidates_picking() {
    let mut config = AppConfig::fallback("test");
    config.server.player_click = true;
    let mut session = Session::with_config(config);
    session.client.set_targets(EntityId(7), PickedPos::invalid());

    session.send(&[
        DeviceEvent::MouseDown(MouseButton::Left),
        DeviceEvent::MouseUp(MouseButton::Left),
    ]);
    assert_eq!(session.router.picking_target(), Some(EntityId(7)));
    assert_eq!(session.client.clicks().len(), 2);

    // Open and close the pause screen
    session.tap(KeyCode::Escape);
    assert!(session.client.gui_stack().has_open_screen());
    session.tap(KeyCode::Escape);
    assert!(!session.client.gui_stack().has_open_screen());

    assert_eq!(session.router.picking_target(), None);
    // All three releases were no-ops
    assert_eq!(session.client.clicks().len(), 2);
    assert!(session.router.last_click().is_some());
}

#[test]
fn test_screen_change_releases_held_button() {
    let mut config = AppConfig::fallback("test");
    config.server.player_click = true;
    let mut session = Session::with_config(config);
    session.client.set_targets(EntityId(7), PickedPos::invalid());

    session.send(&[DeviceEvent::MouseDown(MouseButton::Right)]);
    assert!(session.router.button_state().is_down(MouseButton::Right));

    session.tap(KeyCode::B);
    assert!(!session.router.button_state().is_down(MouseButton::Right));
    let last = session.client.clicks().last().copied().unwrap();
    assert_eq!(last.button, MouseButton::Right);
    assert!(!last.pressed);
    assert_eq!(last.target, EntityId(7));
}

#[test]
fn test_rebound_inventory_key_closes_inventory() {
    let mut session = Session::new();
    session
        .router
        .bindings_mut()
        .set(LogicalAction::Inventory, KeyCode::I);

    session.tap(KeyCode::I);
    assert_eq!(
        session.client.gui_stack().top_screen().map(|s| s.kind.clone()),
        Some(ModalKind::Inventory)
    );

    session.tap(KeyCode::B);
    assert!(session.client.gui_stack().has_open_screen());

    session.tap(KeyCode::I);
    assert!(!session.client.gui_stack().has_open_screen());
}

#[test]
fn test_fullscreen_toggle_raises_nothing() {
    let mut session = Session::new();
    let bus = session.bus();
    let (count, handler) = counter();
    let handler = Rc::new(handler);
    for event in [
        &bus.view_distance_changed,
        &bus.held_block_changed,
        &bus.projection_changed,
        &bus.hack_permissions_changed,
        &bus.terrain_atlas_changed,
    ] {
        let handler = Rc::clone(&handler);
        event.subscribe(move |payload| handler(payload));
    }

    assert_eq!(session.client.window_mode(), WindowMode::Normal);
    session.tap(KeyCode::F11);
    assert_eq!(session.client.window_mode(), WindowMode::Fullscreen);
    session.tap(KeyCode::F11);
    assert_eq!(session.client.window_mode(), WindowMode::Normal);

    assert_eq!(count.get(), 0);
    assert!(session.client.chat_log().is_empty());
}

#[test]
fn test_wheel_with_hotbar_modifier_skips_zoom() {
    let mut session = Session::new();
    let bus = session.bus();
    let (held_changes, handler) = counter();
    bus.held_block_changed.subscribe(handler);

    session.send(&[
        DeviceEvent::KeyDown(KeyCode::C),
        DeviceEvent::KeyDown(KeyCode::ControlLeft),
        DeviceEvent::MouseWheel(2.0),
    ]);

    assert!(session.router.is_action_pressed(LogicalAction::ZoomScrolling));
    assert!(!session.router.zoom().is_zooming());
    assert_eq!(session.client.lens_state().fov(), 70);
    assert_eq!(session.client.hotbar().selected_index(), 7);
    assert_eq!(held_changes.get(), 1);
}

#[test]
fn test_pause_screen_swallows_clicks_and_keys() {
    let mut session = Session::new();

    session.tap(KeyCode::Escape);
    let before = session.client.client_settings().view_distance;
    session.send(&[
        DeviceEvent::MouseDown(MouseButton::Left),
        DeviceEvent::MouseUp(MouseButton::Left),
        DeviceEvent::KeyDown(KeyCode::F),
        DeviceEvent::MouseWheel(3.0),
    ]);

    assert!(session.client.picks().is_empty());
    assert_eq!(session.client.client_settings().view_distance, before);
    assert_eq!(session.client.hotbar().selected_index(), 0);
}

#[test]
fn test_drop_block_respects_lock() {
    let mut session = Session::new();
    session.tap(KeyCode::G);
    assert_eq!(session.client.hotbar().selected_block(), 0);

    let mut session = Session::new();
    session.client.gui_stack_mut().hotbar_mut().can_change_held_block = false;
    session.tap(KeyCode::G);
    assert_eq!(session.client.hotbar().selected_block(), 1);
}

#[test]
fn test_unknown_key_falls_through() {
    let mut session = Session::new();
    session.tap(KeyCode::Unknown);
    assert!(session.client.picks().is_empty());
    assert!(!session.client.gui_stack().has_open_screen());
    assert!(!session.router.exit_requested());
}
