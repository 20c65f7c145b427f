//! Raw input collection from winit events

use std::collections::VecDeque;

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::events::{DeviceEvent, KeyCode, MouseButton};

/// Pixels a touchpad scrolls per wheel notch
const PIXELS_PER_NOTCH: f32 = 20.0;

/// Turns winit window events into device events, preserving order
#[derive(Debug, Default)]
pub struct InputCollector {
    pending: VecDeque<DeviceEvent>,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue whatever device events `event` carries
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pending.push_back(DeviceEvent::MouseMove {
                    x: position.x as i32,
                    y: position.y as i32,
                });
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let Ok(button) = MouseButton::try_from(*button) else {
                    return;
                };
                self.pending.push_back(match state {
                    ElementState::Pressed => DeviceEvent::MouseDown(button),
                    ElementState::Released => DeviceEvent::MouseUp(button),
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let notches = wheel_notches(*delta);
                if notches != 0.0 {
                    self.pending.push_back(DeviceEvent::MouseWheel(notches));
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = match event.physical_key {
                    PhysicalKey::Code(code) => KeyCode::from(code),
                    PhysicalKey::Unidentified(_) => KeyCode::Unknown,
                };
                let text = match event.state {
                    ElementState::Pressed => event.text.as_deref(),
                    ElementState::Released => None,
                };
                self.push_key(key, event.state, text);
            }

            WindowEvent::Focused(false) => self.pending.push_back(DeviceEvent::FocusLost),

            _ => {}
        }
    }

    /// Queue a key transition plus the characters it typed
    pub fn push_key(&mut self, key: KeyCode, state: ElementState, text: Option<&str>) {
        self.pending.push_back(match state {
            ElementState::Pressed => DeviceEvent::KeyDown(key),
            ElementState::Released => DeviceEvent::KeyUp(key),
        });
        for ch in text.unwrap_or_default().chars().filter(|ch| !ch.is_control()) {
            self.pending.push_back(DeviceEvent::KeyPress(ch));
        }
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = DeviceEvent> + '_ {
        self.pending.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Vertical scroll in wheel notches; positive scrolls up
pub fn wheel_notches(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_NOTCH,
    }
}
