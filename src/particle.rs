//! Particle records.
//!
//! Each field stores a single `Vec` of records, so position, velocity and
//! color for particle `i` always live together at index `i`. Render buffers
//! built from a field keep the same ordering.

use glam::Vec3;

/// A debris fragment: kinematics only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Particle {
    #[inline]
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
        }
    }
}

/// A point sprite with its own RGB color. Opacity is shared per field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColoredParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Vec3,
}
