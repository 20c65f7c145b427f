//! Input router smoke test

use std::rc::Rc;

use crate::app::input::{DeviceEvent, Gui, InputRouter, KeyCode, MouseButton};
use crate::app::{AppConfig, Client};
use crate::events::NotificationBus;
use crate::health::check::{CheckResult, SystemCheck};

/// Drives a headless client through a short scripted session
pub struct RouterCheck;

impl RouterCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RouterCheck {
    fn default() -> Self {
        Self::new()
    }
}

struct Session {
    client: Client,
    router: InputRouter,
}

impl Session {
    fn send(&mut self, events: &[DeviceEvent]) {
        for &event in events {
            self.router.dispatch(event, &mut self.client);
        }
    }
}

impl SystemCheck for RouterCheck {
    fn name(&self) -> &'static str {
        "Input Router"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Routes scripted input through a headless client")
    }

    fn check(&self) -> CheckResult {
        let config = AppConfig::fallback("health");
        let (bindings, hotkeys) = match config.input.build() {
            Ok(tables) => tables,
            Err(e) => return CheckResult::fail(format!("Default input is invalid: {e}")),
        };
        let bus = NotificationBus::shared();
        let mut session = Session {
            client: Client::new(&config, Rc::clone(&bus)),
            router: InputRouter::new(bindings, hotkeys, bus),
        };

        let mut details = Vec::new();
        let mut failures = 0;
        let mut expect = |ok: bool, what: &str| {
            details.push(format!("  {} {what}", if ok { "✓" } else { "✗" }));
            if !ok {
                failures += 1;
            }
        };

        let before = session.client.client_settings().view_distance;
        session.send(&[DeviceEvent::KeyDown(KeyCode::F), DeviceEvent::KeyUp(KeyCode::F)]);
        expect(
            session.client.client_settings().view_distance != before,
            "fog key cycles the view distance",
        );

        session.send(&[DeviceEvent::KeyDown(KeyCode::Escape)]);
        expect(
            session.client.gui_stack().has_open_screen(),
            "escape opens the pause screen",
        );

        session.send(&[
            DeviceEvent::MouseDown(MouseButton::Left),
            DeviceEvent::MouseUp(MouseButton::Left),
        ]);
        expect(
            session.client.picks().is_empty(),
            "clicks on the pause screen do not pick blocks",
        );

        session.send(&[DeviceEvent::KeyDown(KeyCode::Escape)]);
        expect(
            !session.client.gui_stack().has_open_screen(),
            "escape closes the pause screen",
        );

        session.send(&[
            DeviceEvent::KeyDown(KeyCode::AltLeft),
            DeviceEvent::KeyDown(KeyCode::F4),
        ]);
        expect(
            session.router.take_exit_request(),
            "alt+f4 requests exit",
        );

        if failures > 0 {
            CheckResult::fail(format!("{failures} routing expectations failed"))
                .with_detail_lines(&details)
        } else {
            CheckResult::pass("Scripted session routed correctly").with_detail_lines(&details)
        }
    }
}
