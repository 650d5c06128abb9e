//! The three particle populations of an explosion.
//!
//! | Field | Seeded from | Advanced by |
//! |-------|-------------|-------------|
//! | [`DebrisField`] | a grid over the object's box | gravity + radial impulse, semi-implicit Euler |
//! | [`FireballField`] | the origin, random spherical angles | exponential velocity decay, exponential fade |
//! | [`SmokeField`] | the origin, random outward + upward | constant buoyancy, linear fade |
//!
//! Every field implements [`ParticleField`] so the controller can advance
//! them through one interface, in a fixed order.

mod debris;
mod fireball;
mod smoke;

pub use debris::{DebrisField, GRAVITY};
pub use fireball::{FireballColorMode, FireballField};
pub use smoke::SmokeField;

use crate::params::Parameters;

/// Which population a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Debris,
    Fireball,
    Smoke,
}

/// Inputs to one advancement step.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Seconds since the previous tick, never negative.
    pub delta: f32,
    /// Seconds since trigger, already including `delta`.
    pub elapsed: f32,
    /// Live parameter values, read fresh every tick.
    pub params: &'a Parameters,
}

/// A particle population with a single advancement rule and a field-level
/// opacity.
pub trait ParticleField {
    fn kind(&self) -> FieldKind;

    /// Number of particles.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Field-level opacity in [0, 1].
    fn opacity(&self) -> f32;

    /// Advance every particle by `step.delta` seconds.
    fn advance(&mut self, step: &StepContext<'_>);
}
