//! Camera lens (field of view, projection) and camera rig (view modes)

use glam::Mat4;

use super::HackPermissions;

/// Lowest field of view a lens accepts
pub const MIN_FOV: i32 = 1;
/// Highest configurable default field of view
pub const MAX_FOV: i32 = 150;

const NEAR_PLANE: f32 = 0.1;

/// Field of view state and the projection derived from it
#[derive(Debug, Clone)]
pub struct Lens {
    /// Live field of view in degrees
    fov: i32,
    /// Field of view when not zooming
    default_fov: i32,
    /// Last field of view reached by a zoom gesture
    zoom_fov: i32,
    aspect: f32,
    far_plane: f32,
    projection: Mat4,
}

impl Lens {
    /// Creates a lens at `default_fov`, clamped to `MIN_FOV..=MAX_FOV`
    pub fn new(default_fov: i32) -> Self {
        let default_fov = default_fov.clamp(MIN_FOV, MAX_FOV);
        let mut lens = Self {
            fov: default_fov,
            default_fov,
            zoom_fov: default_fov,
            aspect: 16.0 / 9.0,
            far_plane: 512.0,
            projection: Mat4::IDENTITY,
        };
        lens.update_projection();
        lens
    }

    pub fn fov(&self) -> i32 {
        self.fov
    }

    pub fn default_fov(&self) -> i32 {
        self.default_fov
    }

    pub fn zoom_fov(&self) -> i32 {
        self.zoom_fov
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Sets the live field of view and recomputes the projection
    ///
    /// With `set_zoom` the value also becomes the zoom baseline.
    pub fn set_fov(&mut self, fov: i32, set_zoom: bool) {
        self.fov = fov;
        if set_zoom {
            self.zoom_fov = fov;
        }
        self.update_projection();
    }

    /// Updates the aspect ratio from a surface size
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_projection();
    }

    /// Far plane follows the view distance
    pub fn set_far_plane(&mut self, distance: f32) {
        self.far_plane = distance.max(NEAR_PLANE * 2.0);
        self.update_projection();
    }

    fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            (self.fov as f32).to_radians(),
            self.aspect,
            NEAR_PLANE,
            self.far_plane,
        );
    }
}

/// Which camera is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    FirstPerson,
    /// Behind the player
    ThirdPerson,
    /// In front of the player, looking back
    ThirdPersonForward,
}

impl CameraMode {
    fn next(self) -> Self {
        match self {
            Self::FirstPerson => Self::ThirdPerson,
            Self::ThirdPerson => Self::ThirdPersonForward,
            Self::ThirdPersonForward => Self::FirstPerson,
        }
    }

    pub fn is_third_person(self) -> bool {
        !matches!(self, Self::FirstPerson)
    }
}

/// Closest a third person camera may get to the player
pub const MIN_THIRD_PERSON_DISTANCE: f32 = 2.0;

/// The set of cameras and the one currently in use
#[derive(Debug, Clone)]
pub struct CameraRig {
    mode: CameraMode,
    /// Distance from the player for the behind camera
    behind_distance: f32,
    /// Distance from the player for the forward camera
    forward_distance: f32,
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            mode: CameraMode::FirstPerson,
            behind_distance: 3.0,
            forward_distance: 3.0,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Distance of the active third person camera from the player
    pub fn distance(&self) -> Option<f32> {
        match self.mode {
            CameraMode::FirstPerson => None,
            CameraMode::ThirdPerson => Some(self.behind_distance),
            CameraMode::ThirdPersonForward => Some(self.forward_distance),
        }
    }

    /// Moves a third person camera closer by `amount`
    ///
    /// Returns false in first person, where scrolling is not a zoom.
    pub fn zoom(&mut self, amount: f32) -> bool {
        let distance = match self.mode {
            CameraMode::FirstPerson => return false,
            CameraMode::ThirdPerson => &mut self.behind_distance,
            CameraMode::ThirdPersonForward => &mut self.forward_distance,
        };
        *distance = (*distance - amount).max(MIN_THIRD_PERSON_DISTANCE);
        true
    }

    /// Switches to the next camera
    ///
    /// Classic mode never leaves first person; without third person
    /// permission the cycle falls back to first person.
    pub fn cycle(&mut self, hacks: HackPermissions, classic_mode: bool) -> CameraMode {
        if classic_mode {
            return self.mode;
        }
        let mut next = self.mode.next();
        if !hacks.can_use_third_person || !hacks.enabled {
            next = CameraMode::FirstPerson;
        }
        self.mode = next;
        next
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lens_clamps_default_fov() {
        assert_eq!(Lens::new(0).default_fov(), MIN_FOV);
        assert_eq!(Lens::new(500).default_fov(), MAX_FOV);
        let lens = Lens::new(70);
        assert_eq!(lens.fov(), 70);
        assert_eq!(lens.zoom_fov(), 70);
    }

    #[test]
    fn test_lens_set_fov_updates_projection() {
        let mut lens = Lens::new(70);
        let before = lens.projection();
        lens.set_fov(30, false);
        assert_eq!(lens.fov(), 30);
        assert_eq!(lens.zoom_fov(), 70);
        assert_ne!(lens.projection(), before);

        lens.set_fov(20, true);
        assert_eq!(lens.zoom_fov(), 20);
    }

    #[test]
    fn test_lens_ignores_empty_viewport() {
        let mut lens = Lens::new(70);
        let before = lens.projection();
        lens.set_viewport(0, 600);
        assert_eq!(lens.projection(), before);
    }

    #[test]
    fn test_rig_zoom_only_in_third_person() {
        let mut rig = CameraRig::new();
        assert!(!rig.zoom(1.0));

        rig.cycle(HackPermissions::default(), false);
        assert_eq!(rig.mode(), CameraMode::ThirdPerson);
        assert!(rig.zoom(0.5));
        assert_eq!(rig.distance(), Some(2.5));
        assert!(rig.zoom(10.0));
        assert_eq!(rig.distance(), Some(MIN_THIRD_PERSON_DISTANCE));
    }

    #[test]
    fn test_rig_cycle_wraps() {
        let mut rig = CameraRig::new();
        let hacks = HackPermissions::default();
        assert_eq!(rig.cycle(hacks, false), CameraMode::ThirdPerson);
        assert_eq!(rig.cycle(hacks, false), CameraMode::ThirdPersonForward);
        assert_eq!(rig.cycle(hacks, false), CameraMode::FirstPerson);
    }

    #[test]
    fn test_rig_cycle_respects_permissions_and_classic_mode() {
        let mut rig = CameraRig::new();
        let denied = HackPermissions {
            can_use_third_person: false,
            ..HackPermissions::default()
        };
        assert_eq!(rig.cycle(denied, false), CameraMode::FirstPerson);
        assert_eq!(rig.cycle(HackPermissions::default(), true), CameraMode::FirstPerson);
    }
}
