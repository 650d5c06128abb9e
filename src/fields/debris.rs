//! Rigid debris fragments.

use glam::Vec3;

use super::{FieldKind, ParticleField, StepContext};
use crate::particle::Particle;
use crate::scene::SceneObject;

/// Gravitational acceleration per unit mass.
pub const GRAVITY: f32 = 9.8;

/// Scale of the explosive impulse before the strength and falloff terms.
const IMPULSE_SCALE: f32 = 100.0;

/// Base of the exponential strength term.
const STRENGTH_BASE: f32 = 1.5;

/// Upper bound on fragments per explosion. Finer grids are coarsened.
pub const MAX_FRAGMENTS: usize = 1 << 20;

/// Debris from a shattered box.
///
/// Particle positions are stored relative to the object's center; the radial
/// impulse pushes away from that center.
#[derive(Debug, Clone)]
pub struct DebrisField {
    particles: Vec<Particle>,
    center: Vec3,
    fragment_size: f32,
}

impl DebrisField {
    /// Fill `object`'s box with a grid of `fragment_size` cubes at rest.
    ///
    /// Each axis gets `ceil(extent / fragment_size)` fragments, at least one,
    /// so a zero-size object still yields a single fragment. The grid uses a
    /// step of `fragment_size` and is centered on the object.
    ///
    /// When the grid would exceed [`MAX_FRAGMENTS`], the fragment size is
    /// enlarged until it fits; [`fragment_size`](Self::fragment_size) then
    /// reports the size actually used.
    pub fn seed(object: &SceneObject, fragment_size: f32) -> Self {
        let (counts, fragment_size) = fit_grid(object.extent, fragment_size);
        let start = -(counts.as_vec3() - Vec3::ONE) * fragment_size * 0.5;

        let mut particles = Vec::with_capacity(fragment_count(counts).unwrap_or(MAX_FRAGMENTS));
        for i in 0..counts.x {
            for j in 0..counts.y {
                for k in 0..counts.z {
                    let offset = Vec3::new(i as f32, j as f32, k as f32) * fragment_size;
                    particles.push(Particle::at_rest(start + offset));
                }
            }
        }

        log::debug!(
            "seeded {} debris fragments ({}x{}x{}, size {})",
            particles.len(),
            counts.x,
            counts.y,
            counts.z,
            fragment_size
        );

        Self {
            particles,
            center: object.position,
            fragment_size,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// World-space center the positions are relative to.
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// World-space position of fragment `index`.
    pub fn world_position(&self, index: usize) -> Option<Vec3> {
        self.particles.get(index).map(|p| self.center + p.position)
    }

    /// Edge length of each fragment, fixed at seed time.
    #[inline]
    pub fn fragment_size(&self) -> f32 {
        self.fragment_size
    }
}

impl ParticleField for DebrisField {
    fn kind(&self) -> FieldKind {
        FieldKind::Debris
    }

    fn len(&self) -> usize {
        self.particles.len()
    }

    /// Debris is opaque for its whole life.
    fn opacity(&self) -> f32 {
        1.0
    }

    fn advance(&mut self, step: &StepContext<'_>) {
        let params = step.params;
        let gravity = Vec3::new(0.0, -GRAVITY * params.particle_mass, 0.0);
        let impulse_active = step.elapsed < params.explosive_force_duration;
        let strength = IMPULSE_SCALE * STRENGTH_BASE.powf(params.explosion_strength);

        for p in &mut self.particles {
            let mut force = gravity;
            if impulse_active {
                force += explosive_impulse(p.position, strength, params.falloff_distance);
            }

            // Semi-implicit Euler: force from the old position, then move
            // with the new velocity
            p.velocity += force * step.delta;
            p.position += p.velocity * step.delta;
        }
    }
}

/// Fragments per axis, each at least one.
fn grid_counts(extent: Vec3, fragment_size: f32) -> glam::UVec3 {
    let per_axis = |len: f32| -> u32 {
        let n = (len / fragment_size).ceil();
        if n.is_finite() && n >= 1.0 {
            n as u32
        } else {
            1
        }
    };
    glam::UVec3::new(per_axis(extent.x), per_axis(extent.y), per_axis(extent.z))
}

fn fragment_count(counts: glam::UVec3) -> Option<usize> {
    (counts.x as usize)
        .checked_mul(counts.y as usize)?
        .checked_mul(counts.z as usize)
}

/// Grid counts and fragment size, coarsened to stay within [`MAX_FRAGMENTS`].
fn fit_grid(extent: Vec3, fragment_size: f32) -> (glam::UVec3, f32) {
    let mut size = fragment_size;
    let mut coarsened = false;
    loop {
        let counts = grid_counts(extent, size);
        match fragment_count(counts) {
            Some(n) if n <= MAX_FRAGMENTS => {
                if coarsened {
                    log::warn!(
                        "fragment size {} needs too many fragments, using {} ({} fragments)",
                        fragment_size,
                        size,
                        n
                    );
                }
                return (counts, size);
            }
            _ => {
                let total = counts.as_dvec3().element_product();
                let ratio = (total / MAX_FRAGMENTS as f64).cbrt().max(1.01);
                size *= ratio as f32;
                coarsened = true;
            }
        }
    }
}

/// Inverse-square radial push with exponential falloff.
///
/// Zero at the exact center, where the direction is undefined.
fn explosive_impulse(position: Vec3, strength: f32, falloff_distance: f32) -> Vec3 {
    let distance = position.length();
    if distance <= 0.0 {
        return Vec3::ZERO;
    }
    let direction = position / distance;
    let magnitude = strength * (-distance / falloff_distance).exp() / (distance * distance);
    direction * magnitude
}
