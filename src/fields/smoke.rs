//! Buoyant smoke.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use super::{FieldKind, ParticleField, StepContext};
use crate::params::Parameters;
use crate::particle::ColoredParticle;

/// Smoke particles per unit of explosion strength.
pub const PARTICLES_PER_STRENGTH: f32 = 500.0;

/// Upper bound of the random outward and upward speed, per unit strength.
const MAX_SPEED_PER_STRENGTH: f32 = 2.5;

/// Constant upward acceleration. Independent of every parameter.
pub const BUOYANCY: f32 = 0.05;

/// Opacity lost per second.
pub const FADE_PER_SECOND: f32 = 0.02;

/// Opacity right after seeding.
pub const INITIAL_OPACITY: f32 = 0.2;

/// A slow, rising grey cloud that fades out linearly.
#[derive(Debug, Clone)]
pub struct SmokeField {
    particles: Vec<ColoredParticle>,
    opacity: f32,
    strength: f32,
}

impl SmokeField {
    /// Seed `strength * 500` particles at the origin.
    ///
    /// Each gets a random heading in the XZ plane, outward and upward speeds
    /// in [0, 2.5 * strength), and a grey level in [0.4, 0.5).
    pub fn seed<R: Rng + ?Sized>(params: &Parameters, rng: &mut R) -> Self {
        let strength = params.explosion_strength;
        let count = particle_count(strength);

        let particles = (0..count)
            .map(|_| {
                let angle = rng.gen_range(0.0..TAU);
                let outward = rng.gen_range(0.0..MAX_SPEED_PER_STRENGTH) * strength;
                let upward = rng.gen_range(0.0..MAX_SPEED_PER_STRENGTH) * strength;
                let grey = rng.gen_range(0.4..0.5);
                ColoredParticle {
                    position: Vec3::ZERO,
                    velocity: Vec3::new(outward * angle.cos(), upward, outward * angle.sin()),
                    color: Vec3::splat(grey),
                }
            })
            .collect::<Vec<_>>();

        log::debug!("seeded {} smoke particles", particles.len());

        Self {
            particles,
            opacity: INITIAL_OPACITY,
            strength,
        }
    }

    pub fn particles(&self) -> &[ColoredParticle] {
        &self.particles
    }

    /// Explosion strength at seeding time. Sprite size scales with it.
    pub fn strength(&self) -> f32 {
        self.strength
    }
}

impl ParticleField for SmokeField {
    fn kind(&self) -> FieldKind {
        FieldKind::Smoke
    }

    fn len(&self) -> usize {
        self.particles.len()
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn advance(&mut self, step: &StepContext<'_>) {
        for p in &mut self.particles {
            p.velocity.y += BUOYANCY * step.delta;
            p.position += p.velocity * step.delta;
        }

        // Stateful: accumulates across ticks and stays at zero once reached
        self.opacity = (self.opacity - step.delta * FADE_PER_SECOND).max(0.0);
    }
}

fn particle_count(strength: f32) -> usize {
    let n = (strength * PARTICLES_PER_STRENGTH).round();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}
