//! Ray casting from a 2D pointer into the scene.
//!
//! A click arrives as normalized device coordinates (both axes in [-1, 1],
//! +Y up). The ray starts at the camera and passes through the unprojected
//! far-plane point under the pointer; the target's box is hit-tested with a
//! slab test.

use glam::{Vec2, Vec3};

use crate::camera::OrbitCamera;
use crate::scene::SceneObject;

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray. `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// The ray from the camera through `ndc`.
    pub fn from_ndc(ndc: Vec2, camera: &OrbitCamera) -> Self {
        let inverse = camera.view_projection().inverse();
        // wgpu clip space: depth 0 at the near plane, 1 at the far plane
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Self::new(near, far - near)
    }

    /// Finite origin and a non-zero finite direction.
    pub fn is_valid(&self) -> bool {
        self.origin.is_finite() && self.direction.is_finite() && self.direction != Vec3::ZERO
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Outcome of a pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickResult {
    /// The ray hit the target this far from the near plane.
    Hit { distance: f32 },
    Miss,
}

impl PickResult {
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, PickResult::Hit { .. })
    }
}

/// Maps pointer positions to hits on the scene object. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickingService;

impl PickingService {
    pub fn new() -> Self {
        Self
    }

    /// Cast a ray through `ndc` and test it against `target`.
    ///
    /// Coordinates outside the viewport never hit.
    pub fn pick(&self, ndc: Vec2, camera: &OrbitCamera, target: &SceneObject) -> PickResult {
        if !ndc.is_finite() || ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            return PickResult::Miss;
        }

        let ray = Ray::from_ndc(ndc, camera);
        if !ray.is_valid() {
            log::debug!("pick ignored: degenerate camera ray {:?}", ray);
            return PickResult::Miss;
        }
        match target.bounds().intersect_ray(&ray) {
            Some(distance) => PickResult::Hit { distance },
            None => PickResult::Miss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_origin() {
        let camera = OrbitCamera::new();
        let ray = Ray::from_ndc(Vec2::ZERO, &camera);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        assert!(ray.origin.x.abs() < 1e-3 && ray.origin.y.abs() < 1e-3);
    }

    #[test]
    fn test_pick_center_hits() {
        let picker = PickingService::new();
        let result = picker.pick(Vec2::ZERO, &OrbitCamera::new(), &SceneObject::default());
        match result {
            PickResult::Hit { distance } => assert!(distance > 0.0),
            PickResult::Miss => panic!("expected a hit"),
        }
    }

    #[test]
    fn test_pick_corner_misses() {
        let picker = PickingService::new();
        let result = picker.pick(Vec2::new(0.9, 0.9), &OrbitCamera::new(), &SceneObject::default());
        assert_eq!(result, PickResult::Miss);
    }

    #[test]
    fn test_pick_outside_viewport_misses() {
        let picker = PickingService::new();
        let camera = OrbitCamera::new();
        let object = SceneObject::default();
        assert!(!picker.pick(Vec2::new(1.5, 0.0), &camera, &object).is_hit());
        assert!(!picker.pick(Vec2::new(f32::NAN, 0.0), &camera, &object).is_hit());
    }

    #[test]
    fn test_collapsed_camera_never_hits() {
        let picker = PickingService::new();
        let mut camera = OrbitCamera::new();
        camera.set_distance(0.0);

        let ray = Ray::from_ndc(Vec2::new(0.99, -0.99), &camera);
        assert!(!ray.is_valid());
        for ndc in [Vec2::ZERO, Vec2::new(0.99, -0.99), Vec2::new(-0.5, 0.5)] {
            assert_eq!(picker.pick(ndc, &camera, &SceneObject::cube(0.001)), PickResult::Miss);
            assert_eq!(picker.pick(ndc, &camera, &SceneObject::default()), PickResult::Miss);
        }
    }

    #[test]
    fn test_pick_follows_rotated_camera() {
        let picker = PickingService::new();
        let mut camera = OrbitCamera::new();
        // Object moved off to +X; only visible at the center once the camera
        // orbits to look along -X
        let object = SceneObject::new(Vec3::new(20.0, 0.0, 0.0), Vec3::splat(3.0));
        assert!(!picker.pick(Vec2::ZERO, &camera, &object).is_hit());

        camera.set_horizontal_rotation(90.0);
        assert!(picker.pick(Vec2::ZERO, &camera, &object).is_hit());
    }

    #[test]
    fn test_pick_edge_of_cube() {
        // Cube half-edge 1.5 at distance 50 with fov 75: the face spans roughly
        // 1.5 / (48.5 * tan(37.5°)) ≈ 0.04 in NDC
        let picker = PickingService::new();
        let camera = OrbitCamera::new();
        let object = SceneObject::default();
        assert!(picker.pick(Vec2::new(0.03, 0.0), &camera, &object).is_hit());
        assert!(!picker.pick(Vec2::new(0.06, 0.0), &camera, &object).is_hit());
    }
}
