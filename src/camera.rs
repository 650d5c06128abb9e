//! Orbit camera that always looks at the origin.
//!
//! The camera is positioned on a sphere around the origin from a distance and
//! two angles in degrees. Picking reads the camera's transform at click time,
//! so every setter recomputes the cached position immediately.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::CameraError;

/// Default distance from the origin.
pub const DEFAULT_CAMERA_DISTANCE: f32 = 50.0;

/// Orbit camera for viewing the explosion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrbitCamera {
    /// Distance from the origin.
    pub distance: f32,
    /// Rotation about the Y axis, in degrees.
    pub horizontal_rotation: f32,
    /// Elevation above the horizontal plane, in degrees.
    pub vertical_rotation: f32,
    /// Vertical field of view, in degrees.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    #[serde(skip)]
    position: Vec3,
}

impl OrbitCamera {
    /// Create a camera 50 units down +Z, looking at the origin.
    pub fn new() -> Self {
        let mut camera = Self {
            distance: DEFAULT_CAMERA_DISTANCE,
            horizontal_rotation: 0.0,
            vertical_rotation: 0.0,
            fov_y: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::ZERO,
        };
        camera.update_camera_position();
        camera
    }

    /// Recompute the world position from distance and angles.
    ///
    /// With `vertical_rotation = 0` the camera lies in the horizontal plane.
    pub fn update_camera_position(&mut self) {
        let h = self.horizontal_rotation.to_radians();
        let v = self.vertical_rotation.to_radians();
        self.position = Vec3::new(
            self.distance * v.cos() * h.sin(),
            self.distance * v.sin(),
            self.distance * v.cos() * h.cos(),
        );
    }

    /// The camera's world position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
        self.update_camera_position();
    }

    pub fn set_horizontal_rotation(&mut self, degrees: f32) {
        self.horizontal_rotation = degrees;
        self.update_camera_position();
    }

    pub fn set_vertical_rotation(&mut self, degrees: f32) {
        self.vertical_rotation = degrees;
        self.update_camera_position();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Back to distance 50 and zero rotation. Lens settings are kept.
    pub fn reset(&mut self) {
        self.distance = DEFAULT_CAMERA_DISTANCE;
        self.horizontal_rotation = 0.0;
        self.vertical_rotation = 0.0;
        self.update_camera_position();
    }

    /// Check that the camera yields a well-defined view and projection.
    ///
    /// Setters accept any value; configurations are checked on load.
    pub fn validate(&self) -> Result<(), CameraError> {
        let settings = [
            ("distance", self.distance),
            ("horizontalRotation", self.horizontal_rotation),
            ("verticalRotation", self.vertical_rotation),
            ("fovY", self.fov_y),
            ("aspect", self.aspect),
            ("near", self.near),
            ("far", self.far),
        ];
        if let Some((name, value)) = settings.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(CameraError::NotFinite { name, value });
        }
        if self.distance <= 0.0 {
            return Err(CameraError::Distance(self.distance));
        }
        if self.near <= 0.0 {
            return Err(CameraError::Near(self.near));
        }
        if self.far <= self.near {
            return Err(CameraError::Far {
                near: self.near,
                far: self.far,
            });
        }
        if self.fov_y <= 0.0 || self.fov_y >= 180.0 {
            return Err(CameraError::FieldOfView(self.fov_y));
        }
        Ok(())
    }

    /// Up vector for `look_at`. Switches away from +Y when looking straight
    /// down or up so the view matrix stays well-defined.
    fn up(&self) -> Vec3 {
        let forward = (-self.position).normalize_or_zero();
        if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::NEG_Z * forward.y.signum()
        } else {
            Vec3::Y
        }
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, self.up())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Restore the cached position after deserializing.
    pub(crate) fn refreshed(mut self) -> Self {
        self.update_camera_position();
        self
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
