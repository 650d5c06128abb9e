//! The intact ↔ exploding state machine.
//!
//! ```text
//!            trigger(Hit)                tick(now)
//!   ┌──────┐ ───────────▶ ┌───────────┐ ◀──────┐
//!   │ Idle │              │ Exploding │ ───────┘
//!   └──────┘ ◀─────────── └───────────┘
//!               reset()
//! ```
//!
//! While idle the scene object is shown and no fields exist. A successful
//! pick removes the object, seeds all three fields from the parameter
//! snapshot and starts the shared clock. Every tick advances debris,
//! fireball and smoke, in that order. The controller stays exploding until
//! an explicit reset; faded fields are not cleaned up automatically.
//!
//! Calls that do not fit the current state (`trigger` while exploding,
//! `tick` or `reset` while idle, `trigger` with a miss) are ignored.
//!
//! # Example
//!
//! ```
//! use shatter::controller::ExplosionController;
//! use shatter::params::ParameterStore;
//! use shatter::picking::PickResult;
//! use shatter::scene::SceneObject;
//! use shatter::time::Timestamp;
//!
//! let params = ParameterStore::new();
//! let mut controller = ExplosionController::with_seed(SceneObject::default(), 42);
//!
//! let hit = PickResult::Hit { distance: 48.5 };
//! assert!(controller.trigger(hit, params.get(), Timestamp::from_secs(0.0)));
//!
//! let report = controller.tick(params.get(), Timestamp::from_secs(0.1)).unwrap();
//! assert!((report.elapsed - 0.1).abs() < 1e-6);
//!
//! assert!(controller.reset());
//! assert!(controller.object_visible());
//! ```

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::fields::{
    DebrisField, FireballColorMode, FireballField, ParticleField, SmokeField, StepContext,
};
use crate::params::Parameters;
use crate::picking::PickResult;
use crate::scene::SceneObject;
use crate::time::{ExplosionClock, Timestamp};

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionState {
    /// Object present, no fields.
    Idle,
    /// Object removed, all three fields advancing.
    Exploding,
}

/// Summary of an effective tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Seconds advanced this tick, never negative.
    pub delta: f32,
    /// Seconds since trigger.
    pub elapsed: f32,
    /// Ticks since trigger, including this one.
    pub frame: u64,
    /// Whether debris received the explosive impulse this tick.
    pub impulse_active: bool,
}

/// Particle counts per field. All zero while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldCounts {
    pub debris: usize,
    pub fireball: usize,
    pub smoke: usize,
}

impl FieldCounts {
    pub fn total(&self) -> usize {
        self.debris + self.fireball + self.smoke
    }
}

/// A running explosion: the shared clock and the three fields.
#[derive(Debug, Clone)]
pub struct Explosion {
    clock: ExplosionClock,
    debris: DebrisField,
    fireball: FireballField,
    smoke: SmokeField,
}

impl Explosion {
    fn seed(
        object: &SceneObject,
        params: &Parameters,
        rng: &mut SmallRng,
        color_mode: FireballColorMode,
        now: Timestamp,
    ) -> Self {
        Self {
            clock: ExplosionClock::start(now),
            debris: DebrisField::seed(object, params.particle_size),
            fireball: FireballField::seed(params, rng).with_color_mode(color_mode),
            smoke: SmokeField::seed(params, rng),
        }
    }

    fn advance(&mut self, params: &Parameters, now: Timestamp) -> TickReport {
        let delta = self.clock.advance(now);
        let step = StepContext {
            delta,
            elapsed: self.clock.elapsed(),
            params,
        };

        self.debris.advance(&step);
        self.fireball.advance(&step);
        self.smoke.advance(&step);

        TickReport {
            delta,
            elapsed: step.elapsed,
            frame: self.clock.frame(),
            impulse_active: step.elapsed < params.explosive_force_duration,
        }
    }

    pub fn clock(&self) -> &ExplosionClock {
        &self.clock
    }

    pub fn debris(&self) -> &DebrisField {
        &self.debris
    }

    pub fn fireball(&self) -> &FireballField {
        &self.fireball
    }

    pub fn smoke(&self) -> &SmokeField {
        &self.smoke
    }

    /// All three fields, in advancement order.
    pub fn fields(&self) -> [&dyn ParticleField; 3] {
        [&self.debris, &self.fireball, &self.smoke]
    }
}

/// Gates the transition from intact object to particle fields.
#[derive(Debug, Clone)]
pub struct ExplosionController {
    object: SceneObject,
    explosion: Option<Explosion>,
    rng: SmallRng,
    color_mode: FireballColorMode,
}

impl ExplosionController {
    /// Create an idle controller with a randomly seeded generator.
    pub fn new(object: SceneObject) -> Self {
        Self::from_rng(object, SmallRng::from_entropy())
    }

    /// Create an idle controller whose particle seeding is reproducible.
    pub fn with_seed(object: SceneObject, seed: u64) -> Self {
        Self::from_rng(object, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(object: SceneObject, rng: SmallRng) -> Self {
        Self {
            object,
            explosion: None,
            rng,
            color_mode: FireballColorMode::default(),
        }
    }

    /// Choose how future fireballs apply their color cool-down.
    pub fn with_fireball_color_mode(mut self, mode: FireballColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    pub fn state(&self) -> ExplosionState {
        if self.explosion.is_some() {
            ExplosionState::Exploding
        } else {
            ExplosionState::Idle
        }
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.explosion.is_some()
    }

    /// The object that explodes. Also the picking target.
    pub fn object(&self) -> &SceneObject {
        &self.object
    }

    /// Whether the object is currently part of the scene.
    #[inline]
    pub fn object_visible(&self) -> bool {
        self.explosion.is_none()
    }

    /// The running explosion, if any.
    pub fn explosion(&self) -> Option<&Explosion> {
        self.explosion.as_ref()
    }

    /// Seconds since trigger, if exploding.
    pub fn elapsed(&self) -> Option<f32> {
        self.explosion.as_ref().map(|e| e.clock.elapsed())
    }

    pub fn field_counts(&self) -> FieldCounts {
        self.explosion
            .as_ref()
            .map(|e| FieldCounts {
                debris: e.debris.len(),
                fireball: e.fireball.len(),
                smoke: e.smoke.len(),
            })
            .unwrap_or_default()
    }

    /// Start an explosion if idle and `pick` is a hit.
    ///
    /// Fields are seeded from `params` as they are now. Returns whether the
    /// explosion started.
    pub fn trigger(&mut self, pick: PickResult, params: &Parameters, now: Timestamp) -> bool {
        if self.is_exploding() {
            log::debug!("trigger ignored: already exploding");
            return false;
        }
        let PickResult::Hit { distance } = pick else {
            log::debug!("trigger ignored: pick missed");
            return false;
        };

        let explosion = Explosion::seed(&self.object, params, &mut self.rng, self.color_mode, now);
        log::info!(
            "explosion triggered (hit at {:.2}): {} debris, {} fireball, {} smoke particles",
            distance,
            explosion.debris.len(),
            explosion.fireball.len(),
            explosion.smoke.len()
        );
        self.explosion = Some(explosion);
        true
    }

    /// Advance the running explosion to `now`.
    ///
    /// Gravity, decay and impulse terms read `params` live. Returns `None`
    /// while idle.
    pub fn tick(&mut self, params: &Parameters, now: Timestamp) -> Option<TickReport> {
        let Some(explosion) = self.explosion.as_mut() else {
            log::trace!("tick ignored: idle");
            return None;
        };

        let report = explosion.advance(params, now);
        log::trace!(
            "tick {}: dt={:.4}s elapsed={:.3}s impulse={}",
            report.frame,
            report.delta,
            report.elapsed,
            report.impulse_active
        );
        Some(report)
    }

    /// Dispose every field and restore the object. Returns whether anything
    /// changed; a second reset in a row is a no-op.
    pub fn reset(&mut self) -> bool {
        match self.explosion.take() {
            Some(explosion) => {
                log::info!(
                    "explosion reset after {:.2}s ({} ticks)",
                    explosion.clock.elapsed(),
                    explosion.clock.frame()
                );
                true
            }
            None => {
                log::debug!("reset ignored: idle");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const HIT: PickResult = PickResult::Hit { distance: 48.5 };

    fn small_params() -> Parameters {
        Parameters {
            explosion_strength: 0.1,
            particle_size: 1.0,
            ..Parameters::default()
        }
    }

    fn secs(s: f64) -> Timestamp {
        Timestamp::from_secs(s)
    }

    #[test]
    fn test_starts_idle() {
        let controller = ExplosionController::with_seed(SceneObject::default(), 0);
        assert_eq!(controller.state(), ExplosionState::Idle);
        assert!(controller.object_visible());
        assert_eq!(controller.field_counts(), FieldCounts::default());
        assert!(controller.elapsed().is_none());
    }

    #[test]
    fn test_miss_does_not_trigger() {
        let mut controller = ExplosionController::with_seed(SceneObject::default(), 0);
        assert!(!controller.trigger(PickResult::Miss, &small_params(), secs(0.0)));
        assert_eq!(controller.state(), ExplosionState::Idle);
    }

    #[test]
    fn test_trigger_seeds_fields() {
        let params = small_params();
        let mut controller = ExplosionController::with_seed(SceneObject::default(), 0);
        assert!(controller.trigger(HIT, &params, secs(3.0)));

        assert_eq!(controller.state(), ExplosionState::Exploding);
        assert!(!controller.object_visible());
        assert_eq!(
            controller.field_counts(),
            FieldCounts {
                debris: 27,
                fireball: 1000,
                smoke: 50
            }
        );
        assert_eq!(controller.elapsed(), Some(0.0));
    }

    #[test]
    fn test_trigger_while_exploding_is_ignored() {
        let params = small_params();
        let mut controller = ExplosionController::with_seed(SceneObject::default(), 0);
        controller.trigger(HIT, &params, secs(0.0));
        controller.tick(&params, secs(0.5));

        let bigger = Parameters {
            explosion_strength: 0.2,
            ..params
        };
        assert!(!controller.trigger(HIT, &bigger, secs(0.6)));
        assert_eq!(controller.field_counts().fireball, 1000);
        assert!((controller.elapsed().unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_tick_while_idle_is_ignored() {
        let mut controller = ExplosionController::with_seed(SceneObject::default(), 0);
        assert!(controller.tick(&small_params(), secs(1.0)).is_none());
        assert_eq!(controller.state(), ExplosionState::Idle);
    }

    #[test]
    fn test_tick_reports() {
        let params = small_params();
        let mut controller = ExplosionController::with_seed(SceneObject::default(), 0);
        controller.trigger(HIT, &params, secs(10.0));

        let r1 = controller.tick(&params, secs(10.25)).unwrap();
        assert!((r1.delta - 0.25).abs() < 1e-6);
        assert_eq!(r1.frame, 1);
        assert!(r1.impulse_active);

        let r2 = controller.tick(&params, secs(11.5)).unwrap();
        assert!((r2.elapsed - 1.5).abs() < 1e-6);
        assert!(!r2.impulse_active);
    }

    #[test]
    fn test_backwards_timestamp_does_not_move_particles() {
        let params = small_params();
        let mut controller = ExplosionController::with_seed(SceneObject::default(), 0);
        controller.trigger(HIT, &params, secs(5.0));
        controller.tick(&params, secs(5.1));

        let before = controller.explosion().unwrap().clone();
        let report = controller.tick(&params, secs(4.0)).unwrap();
        assert_eq!(report.delta, 0.0);

        let after = controller.explosion().unwrap();
        assert_eq!(before.debris().particles(), after.debris().particles());
        assert_eq!(before.smoke().opacity(), after.smoke().opacity());
    }

    #[test]
    fn test_reset() {
        let params = small_params();
        let mut controller = ExplosionController::with_seed(SceneObject::default(), 0);
        controller.trigger(HIT, &params, secs(0.0));
        controller.tick(&params, secs(0.1));

        assert!(controller.reset());
        assert_eq!(controller.state(), ExplosionState::Idle);
        assert!(controller.object_visible());
        assert_eq!(controller.field_counts().total(), 0);

        assert!(!controller.reset());
        assert_eq!(controller.state(), ExplosionState::Idle);
    }

    #[test]
    fn test_reset_before_first_tick() {
        let mut controller = ExplosionController::with_seed(SceneObject::default(), 0);
        controller.trigger(HIT, &small_params(), secs(0.0));
        assert!(controller.reset());
        assert!(controller.object_visible());
    }

    #[test]
    fn test_retrigger_after_reset_starts_fresh_clock() {
        let params = small_params();
        let mut controller = ExplosionController::with_seed(SceneObject::default(), 0);
        controller.trigger(HIT, &params, secs(0.0));
        controller.tick(&params, secs(2.0));
        controller.reset();

        assert!(controller.trigger(HIT, &params, secs(7.0)));
        assert_eq!(controller.elapsed(), Some(0.0));
        let report = controller.tick(&params, secs(7.1)).unwrap();
        assert!((report.elapsed - 0.1).abs() < 1e-6);
        assert!(controller
            .explosion()
            .unwrap()
            .debris()
            .particles()
            .iter()
            .all(|p| p.position.length() < 10.0));
    }

    #[test]
    fn test_same_seed_same_explosion() {
        let params = small_params();
        let mut a = ExplosionController::with_seed(SceneObject::default(), 99);
        let mut b = ExplosionController::with_seed(SceneObject::default(), 99);
        a.trigger(HIT, &params, secs(0.0));
        b.trigger(HIT, &params, secs(0.0));
        a.tick(&params, secs(0.3));
        b.tick(&params, secs(0.3));

        let fa = a.explosion().unwrap().fireball().particles();
        let fb = b.explosion().unwrap().fireball().particles();
        assert_eq!(fa, fb);
    }

    #[test]
    fn test_fields_in_advancement_order() {
        use crate::fields::FieldKind;

        let mut controller = ExplosionController::with_seed(SceneObject::default(), 0);
        controller.trigger(HIT, &small_params(), secs(0.0));
        let explosion = controller.explosion().unwrap();

        let kinds = explosion.fields().map(|f| f.kind());
        assert_eq!(kinds, [FieldKind::Debris, FieldKind::Fireball, FieldKind::Smoke]);
        let total: usize = explosion.fields().iter().map(|f| f.len()).sum();
        assert_eq!(total, controller.field_counts().total());
        assert_eq!(explosion.fields()[0].opacity(), 1.0);
    }

    #[test]
    fn test_debris_is_centered_on_object() {
        let object = SceneObject::new(Vec3::new(4.0, 1.0, 0.0), Vec3::splat(3.0));
        let mut controller = ExplosionController::with_seed(object, 0);
        controller.trigger(HIT, &small_params(), secs(0.0));
        let debris = controller.explosion().unwrap().debris();
        assert_eq!(debris.center(), Vec3::new(4.0, 1.0, 0.0));
        assert_eq!(debris.world_position(13), Some(Vec3::new(4.0, 1.0, 0.0)));
    }
}
