//! Input routing for the client
//!
//! ```text
//! Raw Input (winit) → InputCollector → DeviceEvent
//!                                          ↓
//!                                     InputRouter
//!                      screen → core keys → player → hotkeys
//!                                          ↓
//!                                 ClientHost + NotificationBus
//! ```
//!
//! # Usage
//!
//! ```ignore
//! // In window_event()
//! collector.handle_window_event(&event);
//! for event in collector.drain() {
//!     router.dispatch(event, &mut client);
//! }
//!
//! // Each frame
//! router.update_frame(&mut client);
//! ```

mod collector;
mod error;
mod events;
mod host;
mod hotkeys;
mod keymap;
mod router;
mod state;
mod toggle;
mod zoom;

// Re-export public API
pub use collector::{InputCollector, wheel_notches};
pub use error::BindingError;
pub use events::{DeviceEvent, KeyCode, MouseButton};
pub use host::{
    CameraControl, ClientHost, Gui, Inventory, PickRequest, Screen, ScreenChange, ScreenRequest,
};
pub use hotkeys::{Hotkey, HotkeyModifiers, HotkeyTable};
pub use keymap::{KeyBindingTable, LogicalAction};
pub use router::{InputRouter, PICK_COOLDOWN};
pub use state::{ButtonPressState, KeyboardState, MouseState, PickingTarget};
pub use toggle::{ToggleController, ToggleOutcome};
pub use zoom::{set_field_of_view, ZoomController, ZOOM_SPEED};
