//! Boolean option toggles announced in chat

use std::rc::Rc;

use tracing::debug;

use super::events::KeyCode;
use crate::events::{MessageType, NotificationBus};

/// Result of flipping a flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Value of the flag after the toggle
    pub enabled: bool,
    /// Chat line as delivered, after any subscriber rewrite
    pub message: String,
}

/// Flips client flags and tells the player how to flip them back
#[derive(Debug, Clone)]
pub struct ToggleController {
    bus: Rc<NotificationBus>,
}

impl ToggleController {
    pub fn new(bus: Rc<NotificationBus>) -> Self {
        Self { bus }
    }

    /// Flips `flag` and raises a chat message naming `key`
    pub fn toggle(
        &self,
        key: KeyCode,
        flag: &mut bool,
        enable_msg: &str,
        disable_msg: &str,
    ) -> ToggleOutcome {
        *flag = !*flag;
        let mut message = if *flag {
            format!("{enable_msg}. &ePress &a{key} &eto disable.")
        } else {
            format!("{disable_msg}. &ePress &a{key} &eto re-enable.")
        };
        debug!(%key, enabled = *flag, "Toggled option");

        self.bus.raise_chat_received(&mut message, MessageType::Normal);
        ToggleOutcome {
            enabled: *flag,
            message,
        }
    }
}
