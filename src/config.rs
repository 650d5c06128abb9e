//! Scene configuration files.
//!
//! A scene is described by a JSON document. Every key is optional; missing
//! keys fall back to the construction defaults:
//!
//! ```json
//! {
//!   "parameters": { "explosionStrength": 2.0, "particleSize": 0.5 },
//!   "camera": { "distance": 30.0, "verticalRotation": 20.0 },
//!   "objectExtent": [3.0, 3.0, 3.0],
//!   "seed": 7,
//!   "window": { "title": "shatter", "width": 1280, "height": 720 }
//! }
//! ```

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::OrbitCamera;
use crate::controller::ExplosionController;
use crate::error::ConfigError;
use crate::fields::FireballColorMode;
use crate::params::{ParameterStore, Parameters};
use crate::scene::SceneObject;

/// Window settings for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "shatter".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Everything needed to set up an explosion scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneConfig {
    pub parameters: Parameters,
    pub camera: OrbitCamera,
    pub object_position: [f32; 3],
    pub object_extent: [f32; 3],
    /// Fixed RNG seed. Random when absent.
    pub seed: Option<u64>,
    pub fireball_color_mode: FireballColorMode,
    pub window: WindowConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let object = SceneObject::default();
        Self {
            parameters: Parameters::default(),
            camera: OrbitCamera::default(),
            object_position: object.position.to_array(),
            object_extent: object.extent.to_array(),
            seed: None,
            fireball_color_mode: FireballColorMode::default(),
            window: WindowConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.camera = config.camera.refreshed();
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parameters.validate()?;
        self.camera.validate()?;
        let valid = |v: &[f32; 3], allow_negative: bool| {
            v.iter().all(|c| c.is_finite() && (allow_negative || *c >= 0.0))
        };
        if !valid(&self.object_extent, false) {
            return Err(ConfigError::Extent(self.object_extent));
        }
        if !valid(&self.object_position, true) {
            return Err(ConfigError::Position(self.object_position));
        }
        Ok(())
    }

    pub fn parameter_store(&self) -> Result<ParameterStore, ConfigError> {
        Ok(ParameterStore::with_parameters(self.parameters)?)
    }

    pub fn scene_object(&self) -> SceneObject {
        SceneObject::new(
            Vec3::from_array(self.object_position),
            Vec3::from_array(self.object_extent),
        )
    }

    /// An idle controller for the configured object and seed.
    pub fn controller(&self) -> ExplosionController {
        let object = self.scene_object();
        let controller = match self.seed {
            Some(seed) => ExplosionController::with_seed(object, seed),
            None => ExplosionController::new(object),
        };
        controller.with_fireball_color_mode(self.fireball_color_mode)
    }
}
