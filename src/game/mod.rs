//! Client game state
//!
//! The pieces of shared client state that input routing reads and mutates:
//! user toggles, hack permissions, window mode, view distance, the camera
//! lens and rig, and the hotbar. World simulation itself lives elsewhere.

pub mod camera;
pub mod inventory;

use serde::{Deserialize, Serialize};

pub use camera::{CameraMode, CameraRig, Lens};
pub use inventory::{BlockId, Hotbar, AIR, HOTBAR_SLOTS};

/// Network id of an entity; the local player is [`EntityId::SELF`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EntityId(pub u8);

impl EntityId {
    pub const SELF: EntityId = EntityId(255);
}

/// Face of a block hit by the picking ray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Face {
    XMin,
    XMax,
    YMin,
    #[default]
    YMax,
    ZMin,
    ZMax,
}

/// Result of the last block-picking ray cast
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PickedPos {
    /// Block the ray hit
    pub block: glam::IVec3,
    /// Adjacent position a placed block would occupy
    pub translated: glam::IVec3,
    pub face: Face,
    pub valid: bool,
}

impl PickedPos {
    pub fn invalid() -> Self {
        Self::default()
    }
}

/// What the server allows the local player to do with hacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HackPermissions {
    /// The user has hacks switched on
    pub enabled: bool,
    /// The server permits any hacks at all
    pub can_any_hacks: bool,
    /// The server permits third person cameras (and field of view zoom)
    pub can_use_third_person: bool,
}

impl HackPermissions {
    /// Third person cameras and zoom require all three
    pub fn allows_camera_hacks(&self) -> bool {
        self.enabled && self.can_any_hacks && self.can_use_third_person
    }
}

impl Default for HackPermissions {
    fn default() -> Self {
        Self {
            enabled: true,
            can_any_hacks: true,
            can_use_third_person: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    #[default]
    Normal,
    Minimized,
    Maximized,
    Fullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weather {
    #[default]
    Sunny,
    Rainy,
    Snowy,
}

/// View distances cycled by the fog key
pub const VIEW_DISTANCES: [u32; 10] = [8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096];
/// View distances cycled when classic options are enabled
pub const CLASSIC_VIEW_DISTANCES: [u32; 4] = [8, 32, 128, 512];

/// User-facing client toggles and options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Restricts the client to the original classic feature set
    pub classic_mode: bool,
    /// Uses the short classic view distance list
    pub classic_options: bool,
    pub hide_gui: bool,
    pub show_fps: bool,
    pub smooth_camera: bool,
    pub show_axis_lines: bool,
    pub auto_rotate: bool,
    pub breakable_liquids: bool,
    /// View distance chosen by the user
    pub view_distance: u32,
    /// Upper bound imposed by the server
    pub max_view_distance: u32,
    /// Default field of view, in degrees (1..=150)
    pub field_of_view: i32,
}

impl ClientSettings {
    /// View distance list the fog key cycles through
    pub fn view_distances(&self) -> &'static [u32] {
        if self.classic_options {
            &CLASSIC_VIEW_DISTANCES
        } else {
            &VIEW_DISTANCES
        }
    }

    /// View distance actually used for rendering
    pub fn effective_view_distance(&self) -> u32 {
        self.view_distance.min(self.max_view_distance)
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            classic_mode: false,
            classic_options: false,
            hide_gui: false,
            show_fps: true,
            smooth_camera: false,
            show_axis_lines: false,
            auto_rotate: true,
            breakable_liquids: false,
            view_distance: 512,
            max_view_distance: 32768,
            field_of_view: 70,
        }
    }
}

/// Next distance strictly greater than `current`, wrapping to the first
pub fn next_view_distance(distances: &[u32], current: u32) -> u32 {
    distances
        .iter()
        .copied()
        .find(|&dist| dist > current)
        .unwrap_or(distances[0])
}

/// Previous distance strictly less than `current`, wrapping to the last
pub fn previous_view_distance(distances: &[u32], current: u32) -> u32 {
    distances
        .iter()
        .rev()
        .copied()
        .find(|&dist| dist < current)
        .unwrap_or(distances[distances.len() - 1])
}
