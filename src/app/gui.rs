//! Screen stack for the client
//!
//! The HUD is always present underneath. Modal screens stack on top of it,
//! and overlays sit above everything and see input first.

use tracing::debug;

use super::input::{Gui, KeyCode, MouseButton, Screen, ScreenChange, ScreenRequest};
use crate::game::Hotbar;

/// The in-game HUD; owns the hotbar widget
#[derive(Debug, Default)]
pub struct Hud {
    pub hotbar: Hotbar,
}

impl Screen for Hud {
    fn name(&self) -> &str {
        "hud"
    }
}

/// What a modal screen is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalKind {
    Pause,
    Inventory,
    /// Chat input and the text typed so far
    ChatInput(String),
}

/// A screen that takes over all input until closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalScreen {
    pub kind: ModalKind,
    close_key: Option<KeyCode>,
    closed: bool,
    /// Text the player confirmed with Enter
    submitted: Option<String>,
}

impl ModalScreen {
    fn new(kind: ModalKind, close_key: Option<KeyCode>) -> Self {
        Self {
            kind,
            close_key,
            closed: false,
            submitted: None,
        }
    }
}

impl Screen for ModalScreen {
    fn name(&self) -> &str {
        match self.kind {
            ModalKind::Pause => "pause",
            ModalKind::Inventory => "inventory",
            ModalKind::ChatInput(_) => "chat input",
        }
    }

    fn handles_all_input(&self) -> bool {
        true
    }

    fn handles_key_down(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Escape => self.closed = true,
            _ if Some(key) == self.close_key => self.closed = true,
            KeyCode::Enter => {
                if let ModalKind::ChatInput(text) = &mut self.kind {
                    if !text.is_empty() {
                        self.submitted = Some(std::mem::take(text));
                    }
                    self.closed = true;
                }
            }
            KeyCode::Backspace => {
                if let ModalKind::ChatInput(text) = &mut self.kind {
                    text.pop();
                }
            }
            _ => {}
        }
        true
    }

    fn handles_key_up(&mut self, _key: KeyCode) -> bool {
        true
    }

    fn handles_key_press(&mut self, ch: char) -> bool {
        if let ModalKind::ChatInput(text) = &mut self.kind {
            text.push(ch);
        }
        true
    }

    fn handles_mouse_down(&mut self, _x: i32, _y: i32, _button: MouseButton) -> bool {
        true
    }

    fn handles_mouse_up(&mut self, _x: i32, _y: i32, _button: MouseButton) -> bool {
        true
    }

    fn handles_mouse_scroll(&mut self, _delta: f32) -> bool {
        true
    }
}

/// Overlay listing texture ids; dismissed by Escape or a click
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureIdsOverlay {
    closed: bool,
}

impl Screen for TextureIdsOverlay {
    fn name(&self) -> &str {
        "texture ids"
    }

    fn handles_key_down(&mut self, key: KeyCode) -> bool {
        if key == KeyCode::Escape {
            self.closed = true;
            return true;
        }
        false
    }

    fn handles_mouse_down(&mut self, _x: i32, _y: i32, _button: MouseButton) -> bool {
        self.closed = true;
        true
    }
}

/// HUD, modal screens and overlays
#[derive(Debug, Default)]
pub struct GuiStack {
    hud: Hud,
    screens: Vec<ModalScreen>,
    overlays: Vec<TextureIdsOverlay>,
    changes: Vec<ScreenChange>,
    outgoing_chat: Vec<String>,
}

impl GuiStack {
    pub fn new(hotbar: Hotbar) -> Self {
        Self {
            hud: Hud { hotbar },
            ..Self::default()
        }
    }

    pub fn hotbar(&self) -> &Hotbar {
        &self.hud.hotbar
    }

    pub fn hotbar_mut(&mut self) -> &mut Hotbar {
        &mut self.hud.hotbar
    }

    /// Topmost modal screen, if any
    pub fn top_screen(&self) -> Option<&ModalScreen> {
        self.screens.last()
    }

    /// Chat lines confirmed in the chat input since the last call
    pub fn take_outgoing_chat(&mut self) -> Vec<String> {
        self.reap();
        std::mem::take(&mut self.outgoing_chat)
    }

    fn active_handles_all_input(&self) -> bool {
        self.screens.last().is_some_and(|screen| screen.handles_all_input())
    }

    /// Removes screens and overlays that closed themselves
    fn reap(&mut self) {
        self.overlays.retain(|overlay| !overlay.closed);

        while let Some(screen) = self.screens.last_mut() {
            if let Some(text) = screen.submitted.take() {
                self.outgoing_chat.push(text);
            }
            if !screen.closed {
                break;
            }
            let previous_handled_all_input = screen.handles_all_input();
            debug!(screen = screen.name(), "Closing screen");
            self.screens.pop();
            self.changes.push(ScreenChange {
                previous_handled_all_input,
            });
        }
    }
}

impl Gui for GuiStack {
    fn active_screen(&mut self) -> &mut dyn Screen {
        if let Some(overlay) = self.overlays.last_mut() {
            return overlay;
        }
        match self.screens.last_mut() {
            Some(screen) => screen as &mut dyn Screen,
            None => &mut self.hud as &mut dyn Screen,
        }
    }

    fn has_open_screen(&self) -> bool {
        self.screens.iter().any(|screen| !screen.closed)
    }

    fn hud_is_active(&self) -> bool {
        self.overlay_count() == 0 && !self.has_open_screen()
    }

    fn overlay_count(&self) -> usize {
        self.overlays.iter().filter(|overlay| !overlay.closed).count()
    }

    fn open(&mut self, request: ScreenRequest) {
        let (kind, close_key) = match request {
            ScreenRequest::Pause => (ModalKind::Pause, None),
            ScreenRequest::Inventory { close_key } => (ModalKind::Inventory, Some(close_key)),
            ScreenRequest::ChatInput(text) => (ModalKind::ChatInput(text), None),
            ScreenRequest::TextureIdsOverlay => {
                debug!("Opening texture ids overlay");
                self.overlays.push(TextureIdsOverlay::default());
                return;
            }
        };

        let previous_handled_all_input = self.active_handles_all_input();
        let screen = ModalScreen::new(kind, close_key);
        debug!(screen = screen.name(), "Opening screen");
        self.screens.push(screen);
        self.changes.push(ScreenChange {
            previous_handled_all_input,
        });
    }

    fn scroll_hotbar(&mut self, delta: f32) -> bool {
        self.hud.hotbar.scroll(delta)
    }

    fn take_screen_change(&mut self) -> Option<ScreenChange> {
        self.reap();
        if self.changes.is_empty() {
            None
        } else {
            Some(self.changes.remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(gui: &mut GuiStack) -> Vec<ScreenChange> {
        std::iter::from_fn(|| gui.take_screen_change()).collect()
    }

    #[test]
    fn test_hud_active_by_default() {
        let mut gui = GuiStack::default();
        assert!(gui.hud_is_active());
        assert!(!gui.has_open_screen());
        assert_eq!(gui.active_screen().name(), "hud");
        assert!(!gui.active_screen().handles_all_input());
    }

    #[test]
    fn test_open_and_close_report_changes() {
        let mut gui = GuiStack::default();
        gui.open(ScreenRequest::Pause);
        assert!(gui.has_open_screen());
        assert!(gui.active_screen().handles_all_input());

        assert!(gui.active_screen().handles_key_down(KeyCode::Escape));
        assert!(!gui.has_open_screen());
        assert_eq!(
            drain(&mut gui),
            vec![
                ScreenChange {
                    previous_handled_all_input: false
                },
                ScreenChange {
                    previous_handled_all_input: true
                },
            ]
        );
        assert!(gui.hud_is_active());
    }

    #[test]
    fn test_inventory_closes_on_its_own_key() {
        let mut gui = GuiStack::default();
        gui.open(ScreenRequest::Inventory {
            close_key: KeyCode::I,
        });

        assert!(gui.active_screen().handles_key_down(KeyCode::B));
        assert!(gui.has_open_screen());
        assert!(gui.active_screen().handles_key_down(KeyCode::I));
        assert!(!gui.has_open_screen());
    }

    #[test]
    fn test_chat_input_submits_typed_text() {
        let mut gui = GuiStack::default();
        gui.open(ScreenRequest::ChatInput("/tp ".to_string()));
        for ch in "bob".chars() {
            gui.active_screen().handles_key_press(ch);
        }
        gui.active_screen().handles_key_down(KeyCode::Enter);

        assert_eq!(gui.take_outgoing_chat(), vec!["/tp bob".to_string()]);
        assert!(gui.take_outgoing_chat().is_empty());
        assert!(!gui.has_open_screen());
    }

    #[test]
    fn test_overlay_sees_input_first() {
        let mut gui = GuiStack::default();
        gui.open(ScreenRequest::TextureIdsOverlay);
        assert_eq!(gui.overlay_count(), 1);
        assert!(!gui.hud_is_active());
        assert_eq!(gui.active_screen().name(), "texture ids");

        assert!(gui.active_screen().handles_mouse_down(0, 0, MouseButton::Left));
        assert_eq!(gui.overlay_count(), 0);
        assert!(drain(&mut gui).is_empty());
        assert!(gui.hud_is_active());
    }
}
