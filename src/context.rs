//! The application root.
//!
//! [`ExplosionContext`] owns the parameter store, the camera, the controller
//! and the picking service, and wires user intents (click, reset buttons,
//! per-frame tick) through them. Nothing here is global; hosts create one
//! context and pass it around by reference.

use glam::Vec2;

use crate::camera::OrbitCamera;
use crate::config::SceneConfig;
use crate::controller::{ExplosionController, TickReport};
use crate::error::ConfigError;
use crate::input::CanvasRect;
use crate::params::ParameterStore;
use crate::picking::{PickResult, PickingService};
use crate::render::RenderFrame;
use crate::scene::SceneObject;
use crate::time::Timestamp;

#[derive(Debug, Clone)]
pub struct ExplosionContext {
    params: ParameterStore,
    camera: OrbitCamera,
    controller: ExplosionController,
    picker: PickingService,
}

impl ExplosionContext {
    /// Default parameters and camera, random seeding.
    pub fn new(object: SceneObject) -> Self {
        Self::from_parts(
            ParameterStore::new(),
            OrbitCamera::new(),
            ExplosionController::new(object),
        )
    }

    pub fn from_parts(
        params: ParameterStore,
        camera: OrbitCamera,
        controller: ExplosionController,
    ) -> Self {
        Self {
            params,
            camera,
            controller,
            picker: PickingService::new(),
        }
    }

    pub fn from_config(config: &SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config.parameter_store()?, config.camera, config.controller()))
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    /// Writable store for the GUI adapter.
    pub fn params_mut(&mut self) -> &mut ParameterStore {
        &mut self.params
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn controller(&self) -> &ExplosionController {
        &self.controller
    }

    /// Pick at `ndc` and trigger the explosion on a hit.
    ///
    /// Picking only runs while the object is present. Returns whether an
    /// explosion started.
    pub fn click(&mut self, ndc: Vec2, now: Timestamp) -> bool {
        if self.controller.is_exploding() {
            log::debug!("click ignored: already exploding");
            return false;
        }
        let pick = self.picker.pick(ndc, &self.camera, self.controller.object());
        if let PickResult::Hit { distance } = pick {
            log::debug!("pick hit at distance {:.2}", distance);
        }
        self.controller.trigger(pick, &self.params.snapshot(), now)
    }

    /// [`click`](Self::click) from pointer coordinates on `canvas`.
    pub fn click_at(
        &mut self,
        canvas: &CanvasRect,
        client_x: f32,
        client_y: f32,
        now: Timestamp,
    ) -> bool {
        match canvas.to_ndc(client_x, client_y) {
            Some(ndc) => self.click(ndc, now),
            None => false,
        }
    }

    /// Per-frame update. Reads the live parameters.
    pub fn tick(&mut self, now: Timestamp) -> Option<TickReport> {
        self.controller.tick(self.params.get(), now)
    }

    /// The "reset explosion" action.
    pub fn reset_explosion(&mut self) -> bool {
        self.controller.reset()
    }

    /// The "reset parameters" action.
    pub fn reset_parameters(&mut self) {
        self.params.reset_to_defaults();
    }

    /// The "reset camera" action.
    pub fn reset_camera(&mut self) {
        self.camera.reset();
        log::info!("camera reset");
    }

    /// Fill `frame` with the current scene.
    pub fn capture(&self, frame: &mut RenderFrame) {
        frame.capture(&self.controller);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamName;

    fn context() -> ExplosionContext {
        let mut params = ParameterStore::new();
        params.set_explosion_strength(0.02).unwrap();
        ExplosionContext::from_parts(
            params,
            OrbitCamera::new(),
            ExplosionController::with_seed(SceneObject::default(), 1),
        )
    }

    #[test]
    fn test_click_center_triggers() {
        let mut ctx = context();
        assert!(ctx.click(Vec2::ZERO, Timestamp::from_secs(0.0)));
        assert!(ctx.controller().is_exploding());
        assert_eq!(ctx.controller().field_counts().fireball, 200);
    }

    #[test]
    fn test_click_miss_stays_idle() {
        let mut ctx = context();
        assert!(!ctx.click(Vec2::new(0.9, 0.9), Timestamp::from_secs(0.0)));
        assert!(ctx.controller().object_visible());
    }

    #[test]
    fn test_click_at_canvas_center() {
        let mut ctx = context();
        let canvas = CanvasRect::new(10.0, 20.0, 640.0, 480.0);
        assert!(ctx.click_at(&canvas, 330.0, 260.0, Timestamp::from_secs(0.0)));
    }

    #[test]
    fn test_click_on_empty_canvas_is_ignored() {
        let mut ctx = context();
        let canvas = CanvasRect::from_size(0.0, 0.0);
        assert!(!ctx.click_at(&canvas, 0.0, 0.0, Timestamp::from_secs(0.0)));
    }

    #[test]
    fn test_second_click_is_ignored() {
        let mut ctx = context();
        ctx.click(Vec2::ZERO, Timestamp::from_secs(0.0));
        ctx.tick(Timestamp::from_secs(0.2));
        assert!(!ctx.click(Vec2::ZERO, Timestamp::from_secs(0.3)));
        assert!((ctx.controller().elapsed().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_tick_reads_live_parameters() {
        let mut ctx = context();
        ctx.click(Vec2::ZERO, Timestamp::from_secs(0.0));
        ctx.params_mut().set(ParamName::ExplosiveForceDuration, 0.1).unwrap();

        let report = ctx.tick(Timestamp::from_secs(0.5)).unwrap();
        assert!(!report.impulse_active);
    }

    #[test]
    fn test_seeding_uses_values_at_click_time() {
        let mut ctx = context();
        ctx.click(Vec2::ZERO, Timestamp::from_secs(0.0));
        ctx.params_mut().set_explosion_strength(1.0).unwrap();
        ctx.tick(Timestamp::from_secs(0.1));
        assert_eq!(ctx.controller().field_counts().fireball, 200);
    }

    #[test]
    fn test_resets() {
        let mut ctx = context();
        ctx.click(Vec2::ZERO, Timestamp::from_secs(0.0));
        ctx.camera_mut().set_distance(10.0);

        assert!(ctx.reset_explosion());
        assert!(!ctx.reset_explosion());

        ctx.reset_parameters();
        assert_eq!(ctx.params().get().explosion_strength, 5.0);

        ctx.reset_camera();
        assert_eq!(ctx.camera().distance, 50.0);
    }

    #[test]
    fn test_rotated_camera_still_hits_centered_object() {
        let mut ctx = context();
        ctx.camera_mut().set_horizontal_rotation(90.0);
        ctx.camera_mut().set_vertical_rotation(30.0);
        assert!(ctx.click(Vec2::ZERO, Timestamp::from_secs(0.0)));
    }

    #[test]
    fn test_from_config() {
        let json = r#"{ "seed": 4, "camera": { "distance": 20.0 } }"#;
        let config = SceneConfig::from_json(json).unwrap();
        let mut ctx = ExplosionContext::from_config(&config).unwrap();
        assert_eq!(ctx.camera().distance, 20.0);

        let mut frame = RenderFrame::new();
        ctx.capture(&mut frame);
        assert_eq!(frame.boxes.len(), 1);

        assert!(ctx.click(Vec2::ZERO, Timestamp::from_secs(0.0)));
        ctx.capture(&mut frame);
        // 3.0 / 0.25 fragments per axis
        assert_eq!(frame.boxes.len(), 12 * 12 * 12);
    }
}
