//! Tunable explosion parameters.
//!
//! The [`ParameterStore`] is the only place the GUI writes to. The explosion
//! core reads it: seeding snapshots the values at trigger time, while gravity
//! and fireball decay are re-read from the live store on every tick, so a
//! slider moved mid-flight takes effect immediately.
//!
//! # Example
//!
//! ```
//! use shatter::params::{ParamName, ParameterStore};
//!
//! let mut store = ParameterStore::new();
//! store.set(ParamName::ExplosionStrength, 8.0).unwrap();
//! store.set_by_name("particleMass", 2.0).unwrap();
//!
//! assert_eq!(store.get().explosion_strength, 8.0);
//! assert!(store.set(ParamName::ParticleSize, 0.0).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Default debris fragment mass.
pub const DEFAULT_PARTICLE_MASS: f32 = 5.0;
/// Default debris fragment edge length.
pub const DEFAULT_PARTICLE_SIZE: f32 = 0.25;
/// Default explosion strength.
pub const DEFAULT_EXPLOSION_STRENGTH: f32 = 5.0;
/// Default radial falloff distance.
pub const DEFAULT_FALLOFF_DISTANCE: f32 = 2.0;
/// Default fireball velocity decay rate (per second).
pub const DEFAULT_FIREBALL_DECAY_RATE: f32 = 4.0;
/// Default window during which debris receives the explosive impulse.
pub const DEFAULT_EXPLOSIVE_FORCE_DURATION: f32 = 1.0;

/// The six tunable scalars of an explosion.
///
/// All values are strictly positive except `fireball_decay_rate`, which may
/// be zero (no decay). Serialized names match the GUI slider names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameters {
    /// Mass of each debris fragment. Scales gravity.
    pub particle_mass: f32,
    /// Edge length of each debris fragment.
    pub particle_size: f32,
    /// Drives particle counts, initial speeds and the impulse magnitude.
    pub explosion_strength: f32,
    /// Distance scale of the exponential impulse falloff.
    pub falloff_distance: f32,
    /// Fireball velocity decay per second.
    pub fireball_decay_rate: f32,
    /// Seconds after trigger during which debris receives the impulse.
    pub explosive_force_duration: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            particle_mass: DEFAULT_PARTICLE_MASS,
            particle_size: DEFAULT_PARTICLE_SIZE,
            explosion_strength: DEFAULT_EXPLOSION_STRENGTH,
            falloff_distance: DEFAULT_FALLOFF_DISTANCE,
            fireball_decay_rate: DEFAULT_FIREBALL_DECAY_RATE,
            explosive_force_duration: DEFAULT_EXPLOSIVE_FORCE_DURATION,
        }
    }
}

impl Parameters {
    /// Read a parameter by name.
    pub fn get(&self, name: ParamName) -> f32 {
        match name {
            ParamName::ParticleMass => self.particle_mass,
            ParamName::ParticleSize => self.particle_size,
            ParamName::ExplosionStrength => self.explosion_strength,
            ParamName::FalloffDistance => self.falloff_distance,
            ParamName::FireballDecayRate => self.fireball_decay_rate,
            ParamName::ExplosiveForceDuration => self.explosive_force_duration,
        }
    }

    fn slot(&mut self, name: ParamName) -> &mut f32 {
        match name {
            ParamName::ParticleMass => &mut self.particle_mass,
            ParamName::ParticleSize => &mut self.particle_size,
            ParamName::ExplosionStrength => &mut self.explosion_strength,
            ParamName::FalloffDistance => &mut self.falloff_distance,
            ParamName::FireballDecayRate => &mut self.fireball_decay_rate,
            ParamName::ExplosiveForceDuration => &mut self.explosive_force_duration,
        }
    }

    /// Check every value against its range.
    pub fn validate(&self) -> Result<(), ParamError> {
        ParamName::ALL
            .iter()
            .try_for_each(|&name| name.check(self.get(name)))
    }
}

/// Names of the tunable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamName {
    ParticleMass,
    ParticleSize,
    ExplosionStrength,
    FalloffDistance,
    FireballDecayRate,
    ExplosiveForceDuration,
}

impl ParamName {
    /// Every parameter, in GUI order.
    pub const ALL: [ParamName; 6] = [
        ParamName::ParticleMass,
        ParamName::ParticleSize,
        ParamName::ExplosionStrength,
        ParamName::FalloffDistance,
        ParamName::FireballDecayRate,
        ParamName::ExplosiveForceDuration,
    ];

    /// The GUI-facing camelCase name.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamName::ParticleMass => "particleMass",
            ParamName::ParticleSize => "particleSize",
            ParamName::ExplosionStrength => "explosionStrength",
            ParamName::FalloffDistance => "falloffDistance",
            ParamName::FireballDecayRate => "fireballDecayRate",
            ParamName::ExplosiveForceDuration => "explosiveForceDuration",
        }
    }

    /// Whether zero is an accepted value.
    pub fn allows_zero(self) -> bool {
        matches!(self, ParamName::FireballDecayRate)
    }

    fn check(self, value: f32) -> Result<(), ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NotFinite { name: self, value });
        }
        if self.allows_zero() {
            if value < 0.0 {
                return Err(ParamError::Negative { name: self, value });
            }
        } else if value <= 0.0 {
            return Err(ParamError::NonPositive { name: self, value });
        }
        Ok(())
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamName {
    type Err = ParamError;

    /// Accepts the camelCase GUI name or its snake_case form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .chars()
            .filter(|c| *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        ParamName::ALL
            .into_iter()
            .find(|name| name.as_str().to_ascii_lowercase() == normalized)
            .ok_or_else(|| ParamError::UnknownName(s.to_string()))
    }
}

/// Holds the current parameter values. Mutated only by the GUI adapter.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    current: Parameters,
}

impl ParameterStore {
    /// Create a store holding the construction defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from explicit values, validating them first.
    pub fn with_parameters(parameters: Parameters) -> Result<Self, ParamError> {
        parameters.validate()?;
        Ok(Self {
            current: parameters,
        })
    }

    /// Live view of the current values.
    #[inline]
    pub fn get(&self) -> &Parameters {
        &self.current
    }

    /// Copy of the current values, taken when an explosion is seeded.
    #[inline]
    pub fn snapshot(&self) -> Parameters {
        self.current
    }

    /// Set a parameter. Rejected values leave the store unchanged.
    pub fn set(&mut self, name: ParamName, value: f32) -> Result<(), ParamError> {
        name.check(value)?;
        *self.current.slot(name) = value;
        log::debug!("parameter {} set to {}", name, value);
        Ok(())
    }

    /// Set a parameter by its GUI name.
    pub fn set_by_name(&mut self, name: &str, value: f32) -> Result<(), ParamError> {
        self.set(name.parse()?, value)
    }

    pub fn set_particle_mass(&mut self, value: f32) -> Result<(), ParamError> {
        self.set(ParamName::ParticleMass, value)
    }

    pub fn set_particle_size(&mut self, value: f32) -> Result<(), ParamError> {
        self.set(ParamName::ParticleSize, value)
    }

    pub fn set_explosion_strength(&mut self, value: f32) -> Result<(), ParamError> {
        self.set(ParamName::ExplosionStrength, value)
    }

    pub fn set_falloff_distance(&mut self, value: f32) -> Result<(), ParamError> {
        self.set(ParamName::FalloffDistance, value)
    }

    pub fn set_fireball_decay_rate(&mut self, value: f32) -> Result<(), ParamError> {
        self.set(ParamName::FireballDecayRate, value)
    }

    pub fn set_explosive_force_duration(&mut self, value: f32) -> Result<(), ParamError> {
        self.set(ParamName::ExplosiveForceDuration, value)
    }

    /// Restore the construction defaults.
    pub fn reset_to_defaults(&mut self) {
        self.current = Parameters::default();
        log::info!("parameters reset to defaults");
    }
}
