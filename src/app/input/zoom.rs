//! Field of view zoom driven by the scroll wheel

use tracing::debug;

use crate::events::NotificationBus;
use crate::game::{HackPermissions, Lens};

/// Degrees of field of view per wheel notch
pub const ZOOM_SPEED: f32 = 5.0;

/// Changes the live field of view
///
/// Returns false without touching anything when `value` is already the live
/// field of view, and only then checks camera-hack permission. On success
/// the projection is recomputed and `projection_changed` raised.
pub fn set_field_of_view(
    value: i32,
    set_zoom: bool,
    hacks: HackPermissions,
    lens: &mut Lens,
    bus: &NotificationBus,
) -> bool {
    if lens.fov() == value {
        return false;
    }
    if !hacks.allows_camera_hacks() {
        return false;
    }

    lens.set_fov(value, set_zoom);
    bus.projection_changed.notify();
    true
}

/// In-progress zoom gesture
#[derive(Debug, Clone, Default)]
pub struct ZoomController {
    /// Unrounded field of view while a gesture is active
    accumulator: Option<f32>,
}

impl ZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulator(&self) -> Option<f32> {
        self.accumulator
    }

    pub fn is_zooming(&self) -> bool {
        self.accumulator.is_some()
    }

    /// Zooms by `delta` wheel notches
    ///
    /// Engages only while the zoom modifier is held and camera hacks are
    /// permitted; otherwise returns false so the wheel falls through. Once
    /// engaged the scroll is consumed even if the clamped value is unchanged.
    pub fn on_scroll(
        &mut self,
        delta: f32,
        modifier_held: bool,
        hacks: HackPermissions,
        lens: &mut Lens,
        bus: &NotificationBus,
    ) -> bool {
        if !modifier_held || !hacks.allows_camera_hacks() {
            return false;
        }

        let current = *self.accumulator.get_or_insert(lens.fov() as f32);
        let next = (current - delta * ZOOM_SPEED).clamp(1.0, lens.default_fov() as f32);
        self.accumulator = Some(next);

        let applied = set_field_of_view(next.round() as i32, true, hacks, lens, bus);
        debug!(fov = next, applied, "Zoom scroll");
        true
    }

    /// Ends the gesture and restores the default field of view
    pub fn end_gesture(
        &mut self,
        hacks: HackPermissions,
        lens: &mut Lens,
        bus: &NotificationBus,
    ) -> bool {
        self.accumulator = None;
        let default_fov = lens.default_fov();
        set_field_of_view(default_fov, false, hacks, lens, bus)
    }

    /// Re-applies the last zoom level while the modifier stays held
    pub fn reapply(&self, hacks: HackPermissions, lens: &mut Lens, bus: &NotificationBus) -> bool {
        let zoom_fov = lens.zoom_fov();
        set_field_of_view(zoom_fov, false, hacks, lens, bus)
    }
}
