//! The intact object that gets blown up.

use glam::Vec3;

use crate::picking::Ray;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box of the given full size centered on `center`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive containment test with a small tolerance.
    pub fn contains(&self, point: Vec3) -> bool {
        const EPS: f32 = 1e-5;
        point.cmpge(self.min - EPS).all() && point.cmple(self.max + EPS).all()
    }

    /// Slab test. Returns the distance along the ray to the entry point, or
    /// to the exit point when the ray starts inside the box.
    ///
    /// A ray with a non-finite origin or no direction never hits.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        if !ray.is_valid() {
            return None;
        }

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if dir.abs() < f32::EPSILON {
                // Parallel to this slab: must already be between its planes
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            None
        } else if t_min >= 0.0 {
            Some(t_min)
        } else {
            Some(t_max)
        }
    }
}

/// The pre-explosion solid: a box with a position and full extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub position: Vec3,
    pub extent: Vec3,
}

impl SceneObject {
    /// A box of the given extent at `position`.
    pub fn new(position: Vec3, extent: Vec3) -> Self {
        Self { position, extent }
    }

    /// A cube of edge length `edge` at the origin.
    pub fn cube(edge: f32) -> Self {
        Self::new(Vec3::ZERO, Vec3::splat(edge))
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.extent)
    }
}

impl Default for SceneObject {
    fn default() -> Self {
        Self::cube(3.0)
    }
}
