//! The radial fireball.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{FieldKind, ParticleField, StepContext};
use crate::params::Parameters;
use crate::particle::ColoredParticle;

/// Fireball particles per unit of explosion strength.
pub const PARTICLES_PER_STRENGTH: f32 = 10_000.0;

/// Initial speed per unit of explosion strength.
const SPEED_PER_STRENGTH: f32 = 20.0;

/// Seconds over which the color cools from white-hot to orange.
const COOL_DOWN_SECS: f32 = 0.2;

/// Exponential opacity fade rate, per second.
const FADE_RATE: f32 = 4.0;

/// How the per-tick color cool-down is written.
///
/// The explosion this crate reproduces wrote the cooled channels through a
/// flat RGB buffer indexed with the particle index instead of three times
/// it, so only the first third of the buffer was touched and channels of
/// neighbouring particles overlapped. Which behaviour was intended is not
/// known; [`PerParticle`](Self::PerParticle) is the default and
/// [`FlatBufferStride`](Self::FlatBufferStride) reproduces the overlapping
/// writes exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireballColorMode {
    /// Every particle's green and blue channels follow the cool-down curve.
    #[default]
    PerParticle,
    /// Write flat-buffer slots `i + 1` and `i + 2` for each particle `i`.
    FlatBufferStride,
}

/// Point sprites that burst from the origin, slow down and fade out.
#[derive(Debug, Clone)]
pub struct FireballField {
    particles: Vec<ColoredParticle>,
    opacity: f32,
    color_mode: FireballColorMode,
}

impl FireballField {
    /// Seed `strength * 10000` particles at the origin.
    ///
    /// Directions use uniform spherical angles (theta in [0, 2π), phi in
    /// [0, π]), which clusters particles toward the poles. Speed is
    /// `strength * 20`. Color starts at (1, [0, 0.5), 0).
    pub fn seed<R: Rng + ?Sized>(params: &Parameters, rng: &mut R) -> Self {
        let count = particle_count(params.explosion_strength);
        let speed = params.explosion_strength * SPEED_PER_STRENGTH;

        let particles = (0..count)
            .map(|_| {
                let theta = rng.gen_range(0.0..TAU);
                let phi = rng.gen_range(0.0..=PI);
                let velocity = Vec3::new(
                    phi.sin() * theta.cos(),
                    phi.sin() * theta.sin(),
                    phi.cos(),
                ) * speed;
                ColoredParticle {
                    position: Vec3::ZERO,
                    velocity,
                    color: Vec3::new(1.0, rng.gen_range(0.0..0.5), 0.0),
                }
            })
            .collect::<Vec<_>>();

        log::debug!("seeded {} fireball particles at speed {}", particles.len(), speed);

        Self {
            particles,
            opacity: 1.0,
            color_mode: FireballColorMode::default(),
        }
    }

    /// Choose how the color cool-down is applied.
    pub fn with_color_mode(mut self, mode: FireballColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    pub fn color_mode(&self) -> FireballColorMode {
        self.color_mode
    }

    pub fn particles(&self) -> &[ColoredParticle] {
        &self.particles
    }

    /// Opacity for a given time since trigger: `exp(-4 * elapsed)`.
    ///
    /// Kept strictly positive: once the exponential underflows `f32` the
    /// smallest positive normal value is returned.
    pub fn opacity_at(elapsed: f32) -> f32 {
        (-elapsed * FADE_RATE).exp().max(f32::MIN_POSITIVE)
    }

    /// Cooled (green, blue) channel values after `elapsed` seconds.
    pub fn cooled_channels(elapsed: f32) -> (f32, f32) {
        let t = (elapsed / COOL_DOWN_SECS).min(1.0);
        ((1.0 - t) + 0.5 * t, 1.0 - t)
    }

    fn apply_color(&mut self, elapsed: f32) {
        let (green, blue) = Self::cooled_channels(elapsed);
        match self.color_mode {
            FireballColorMode::PerParticle => {
                for p in &mut self.particles {
                    p.color.y = green;
                    p.color.z = blue;
                }
            }
            FireballColorMode::FlatBufferStride => {
                let len = self.particles.len() * 3;
                let mut write = |slot: usize, value: f32| {
                    if slot < len {
                        self.particles[slot / 3].color[slot % 3] = value;
                    }
                };
                for i in 0..len / 3 {
                    write(i + 1, green);
                    write(i + 2, blue);
                }
            }
        }
    }
}

impl ParticleField for FireballField {
    fn kind(&self) -> FieldKind {
        FieldKind::Fireball
    }

    fn len(&self) -> usize {
        self.particles.len()
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn advance(&mut self, step: &StepContext<'_>) {
        let decay = (1.0 - step.params.fireball_decay_rate * step.delta).max(0.0);

        for p in &mut self.particles {
            p.velocity *= decay;
            p.position += p.velocity * step.delta;
        }

        self.apply_color(step.elapsed);
        self.opacity = Self::opacity_at(step.elapsed);
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn small_params() -> Parameters {
        Parameters {
            explosion_strength: 0.01,
            ..Parameters::default()
        }
    }

    #[test]
    fn test_seed_count_and_initial_state() {
        let mut rng = SmallRng::seed_from_u64(7);
        let field = FireballField::seed(&Parameters::default(), &mut rng);
        assert_eq!(field.len(), 50_000);
        assert_eq!(field.opacity(), 1.0);

        for p in field.particles() {
            assert_eq!(p.position, Vec3::ZERO);
            assert!((p.velocity.length() - 100.0).abs() < 1e-2);
            assert_eq!(p.color.x, 1.0);
            assert!((0.0..0.5).contains(&p.color.y));
            assert_eq!(p.color.z, 0.0);
        }
    }

    #[test]
    fn test_directions_span_both_poles() {
        let mut rng = SmallRng::seed_from_u64(11);
        let params = Parameters {
            explosion_strength: 0.1,
            ..Parameters::default()
        };
        let field = FireballField::seed(&params, &mut rng);
        let speed = params.explosion_strength * SPEED_PER_STRENGTH;

        let polar: Vec<f32> = field
            .particles()
            .iter()
            .map(|p| (p.velocity.z / speed).clamp(-1.0, 1.0).acos())
            .collect();
        assert!(polar.iter().all(|phi| (0.0..=PI).contains(phi)));
        assert!(polar.iter().any(|phi| *phi < 0.1 * PI));
        assert!(polar.iter().any(|phi| *phi > 0.9 * PI));
    }

    #[test]
    fn test_decay_and_move() {
        let mut rng = SmallRng::seed_from_u64(1);
        let params = small_params();
        let mut field = FireballField::seed(&params, &mut rng);
        let v0: Vec<Vec3> = field.particles().iter().map(|p| p.velocity).collect();

        field.advance(&StepContext {
            delta: 0.1,
            elapsed: 0.1,
            params: &params,
        });

        // decay = 1 - 4 * 0.1 = 0.6
        for (p, v) in field.particles().iter().zip(v0) {
            assert!((p.velocity - v * 0.6).length() < 1e-4);
            assert!((p.position - v * 0.06).length() < 1e-4);
        }
    }

    #[test]
    fn test_decay_factor_floors_at_zero() {
        let mut rng = SmallRng::seed_from_u64(2);
        let params = Parameters {
            fireball_decay_rate: 50.0,
            ..small_params()
        };
        let mut field = FireballField::seed(&params, &mut rng);
        field.advance(&StepContext {
            delta: 0.1,
            elapsed: 0.1,
            params: &params,
        });
        assert!(field.particles().iter().all(|p| p.velocity == Vec3::ZERO));
    }

    #[test]
    fn test_zero_decay_rate_keeps_speed() {
        let mut rng = SmallRng::seed_from_u64(3);
        let params = Parameters {
            fireball_decay_rate: 0.0,
            ..small_params()
        };
        let mut field = FireballField::seed(&params, &mut rng);
        let v0: Vec<Vec3> = field.particles().iter().map(|p| p.velocity).collect();
        field.advance(&StepContext {
            delta: 0.5,
            elapsed: 0.5,
            params: &params,
        });
        for (p, v) in field.particles().iter().zip(v0) {
            assert_eq!(p.velocity, v);
        }
    }

    #[test]
    fn test_opacity_curve() {
        assert_eq!(FireballField::opacity_at(0.0), 1.0);
        assert!((FireballField::opacity_at(1.0) - (-4.0f32).exp()).abs() < 1e-7);

        let mut last = 1.0;
        for i in 1..400 {
            let o = FireballField::opacity_at(i as f32 * 0.25);
            assert!(o <= last);
            assert!(o > 0.0);
            last = o;
        }
    }

    #[test]
    fn test_cooled_channels() {
        assert_eq!(FireballField::cooled_channels(0.0), (1.0, 1.0));
        let (g, b) = FireballField::cooled_channels(0.1);
        assert!((g - 0.75).abs() < 1e-6);
        assert!((b - 0.5).abs() < 1e-6);
        assert_eq!(FireballField::cooled_channels(3.0), (0.5, 0.0));
    }

    #[test]
    fn test_per_particle_color_update() {
        let mut rng = SmallRng::seed_from_u64(4);
        let params = small_params();
        let mut field = FireballField::seed(&params, &mut rng);
        field.advance(&StepContext {
            delta: 0.3,
            elapsed: 0.3,
            params: &params,
        });
        for p in field.particles() {
            assert_eq!(p.color, Vec3::new(1.0, 0.5, 0.0));
        }
    }

    #[test]
    fn test_flat_buffer_stride_color_update() {
        let mut rng = SmallRng::seed_from_u64(5);
        let params = Parameters {
            explosion_strength: 0.0006,
            ..Parameters::default()
        };
        let mut field = FireballField::seed(&params, &mut rng)
            .with_color_mode(FireballColorMode::FlatBufferStride);
        assert_eq!(field.len(), 6);
        let original: Vec<Vec3> = field.particles().iter().map(|p| p.color).collect();

        field.advance(&StepContext {
            delta: 0.1,
            elapsed: 0.1,
            params: &params,
        });

        // Flat slots 1..=6 end up green (0.75), slot 7 blue (0.5), the rest
        // are untouched
        let flat: Vec<f32> = field
            .particles()
            .iter()
            .flat_map(|p| p.color.to_array())
            .collect();
        assert_eq!(flat[0], 1.0);
        for slot in 1..=6 {
            assert!((flat[slot] - 0.75).abs() < 1e-6, "slot {slot}");
        }
        assert!((flat[7] - 0.5).abs() < 1e-6);
        for (i, color) in original.iter().enumerate().skip(3) {
            assert_eq!(field.particles()[i].color, *color);
        }
    }
}
