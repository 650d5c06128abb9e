//! GPU-ready geometry for the rendering collaborator.
//!
//! [`RenderFrame::capture`] reads the controller after a tick and fills
//! reusable instance buffers: one box instance for the intact object or one
//! per debris fragment, plus one point per fireball and smoke particle.
//! Instance `i` of each buffer is particle `i` of its field. All buffers are
//! in world space; field positions are relative to the object's center.
//!
//! The uniform and mesh records the WGSL in [`shaders`](crate::shaders)
//! expects live here too.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::camera::OrbitCamera;
use crate::controller::ExplosionController;
use crate::fields::ParticleField;
use crate::particle::ColoredParticle;

/// An axis-aligned box drawn from a unit cube mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BoxInstance {
    pub position: [f32; 3],
    pub scale: [f32; 3],
}

/// A colored point sprite.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Fireball sprite edge length in world units.
pub const FIREBALL_SPRITE_SIZE: f32 = 5.0;

/// Smoke sprite edge length per unit of explosion strength.
pub const SMOKE_SPRITE_SIZE_PER_STRENGTH: f32 = 3.0;

/// A vertex of the unit cube mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Camera uniform shared by every pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &OrbitCamera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
        }
    }
}

/// Per-field sprite settings for the point pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointStyle {
    pub opacity: f32,
    pub half_size: f32,
    /// Projection scale on x and y, so sprites keep a world-space size.
    pub proj_scale: [f32; 2],
}

impl PointStyle {
    pub fn new(opacity: f32, sprite_size: f32, camera: &OrbitCamera) -> Self {
        let proj = camera.projection_matrix();
        Self {
            opacity,
            half_size: sprite_size * 0.5,
            proj_scale: [proj.x_axis.x, proj.y_axis.y],
        }
    }
}

/// An axis-aligned cube of edge 1 centered on the origin, with outward
/// normals and counter-clockwise front faces. 24 vertices, 36 indices.
pub fn unit_cube() -> (Vec<MeshVertex>, Vec<u16>) {
    // (normal, u, v) with u × v = normal
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];
    const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in FACES {
        let base = vertices.len() as u16;
        for (a, b) in CORNERS {
            vertices.push(MeshVertex {
                position: ((normal + u * a + v * b) * 0.5).to_array(),
                normal: normal.to_array(),
            });
        }
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    /// Intact object while idle, debris fragments while exploding.
    pub boxes: Vec<BoxInstance>,
    pub fireball: Vec<PointInstance>,
    pub smoke: Vec<PointInstance>,
    pub fireball_opacity: f32,
    pub smoke_opacity: f32,
    pub smoke_sprite_size: f32,
    /// Seconds since trigger, zero while idle.
    pub elapsed: f32,
}

impl RenderFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refill the buffers from the controller's current state.
    pub fn capture(&mut self, controller: &ExplosionController) {
        self.boxes.clear();
        self.fireball.clear();
        self.smoke.clear();

        let object = controller.object();
        let Some(explosion) = controller.explosion() else {
            self.boxes.push(BoxInstance {
                position: object.position.to_array(),
                scale: object.extent.to_array(),
            });
            self.fireball_opacity = 0.0;
            self.smoke_opacity = 0.0;
            self.smoke_sprite_size = 0.0;
            self.elapsed = 0.0;
            return;
        };

        let debris = explosion.debris();
        let scale = Vec3::splat(debris.fragment_size()).to_array();
        self.boxes.extend(debris.particles().iter().map(|p| BoxInstance {
            position: (debris.center() + p.position).to_array(),
            scale,
        }));

        let origin = object.position;
        extend_points(&mut self.fireball, explosion.fireball().particles(), origin);
        extend_points(&mut self.smoke, explosion.smoke().particles(), origin);

        self.fireball_opacity = explosion.fireball().opacity();
        self.smoke_opacity = explosion.smoke().opacity();
        self.smoke_sprite_size = explosion.smoke().strength() * SMOKE_SPRITE_SIZE_PER_STRENGTH;
        self.elapsed = explosion.clock().elapsed();
    }

    pub fn box_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.boxes)
    }

    pub fn fireball_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.fireball)
    }

    pub fn smoke_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.smoke)
    }
}

fn extend_points(out: &mut Vec<PointInstance>, particles: &[ColoredParticle], origin: Vec3) {
    out.extend(particles.iter().map(|p| PointInstance {
        position: (origin + p.position).to_array(),
        color: p.color.to_array(),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Parameters;
    use crate::picking::PickResult;
    use crate::scene::SceneObject;
    use crate::time::Timestamp;

    fn params() -> Parameters {
        Parameters {
            explosion_strength: 0.05,
            particle_size: 1.0,
            ..Parameters::default()
        }
    }

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<BoxInstance>(), 24);
        assert_eq!(std::mem::size_of::<PointInstance>(), 24);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 24);
        // uniform structs must match the WGSL layouts
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
        assert_eq!(std::mem::size_of::<PointStyle>(), 16);
    }

    #[test]
    fn test_unit_cube_faces_point_outward() {
        let (vertices, indices) = unit_cube();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);

        for v in &vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.abs() - Vec3::splat(0.5)).length() < 1e-6);
            // every corner lies on the face its normal points out of
            assert!((p.dot(Vec3::from_array(v.normal)) - 0.5).abs() < 1e-6);
        }

        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(vertices[i as usize].position));
            let normal = Vec3::from_array(vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(normal) > 0.0);
        }
    }

    #[test]
    fn test_point_style_uses_projection_scale() {
        let camera = OrbitCamera::new();
        let style = PointStyle::new(0.5, FIREBALL_SPRITE_SIZE, &camera);
        assert_eq!(style.half_size, 2.5);
        let f = 1.0 / (37.5_f32.to_radians()).tan();
        assert!((style.proj_scale[1] - f).abs() < 1e-4);
        assert!((style.proj_scale[0] - f).abs() < 1e-4);
    }

    #[test]
    fn test_idle_frame_shows_object() {
        let object = SceneObject::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(3.0, 2.0, 1.0));
        let controller = ExplosionController::with_seed(object, 0);
        let mut frame = RenderFrame::new();
        frame.capture(&controller);

        assert_eq!(
            frame.boxes,
            vec![BoxInstance {
                position: [1.0, 2.0, 3.0],
                scale: [3.0, 2.0, 1.0],
            }]
        );
        assert!(frame.fireball.is_empty());
        assert!(frame.smoke.is_empty());
    }

    #[test]
    fn test_exploding_frame_is_index_aligned() {
        let params = params();
        let mut controller = ExplosionController::with_seed(SceneObject::default(), 3);
        controller.trigger(PickResult::Hit { distance: 1.0 }, &params, Timestamp::from_secs(0.0));
        controller.tick(&params, Timestamp::from_secs(0.05));

        let mut frame = RenderFrame::new();
        frame.capture(&controller);
        let explosion = controller.explosion().unwrap();

        assert_eq!(frame.boxes.len(), 27);
        assert_eq!(frame.fireball.len(), explosion.fireball().len());
        assert_eq!(frame.smoke.len(), explosion.smoke().len());

        for (instance, particle) in frame.fireball.iter().zip(explosion.fireball().particles()) {
            assert_eq!(instance.position, particle.position.to_array());
            assert_eq!(instance.color, particle.color.to_array());
        }
        assert_eq!(frame.fireball_opacity, explosion.fireball().opacity());
        assert_eq!(frame.smoke_opacity, explosion.smoke().opacity());
        assert!((frame.smoke_sprite_size - 0.15).abs() < 1e-6);
        assert_eq!(frame.box_bytes().len(), 27 * 24);
    }

    #[test]
    fn test_capture_after_reset_clears_fields() {
        let params = params();
        let mut controller = ExplosionController::with_seed(SceneObject::default(), 3);
        controller.trigger(PickResult::Hit { distance: 1.0 }, &params, Timestamp::from_secs(0.0));

        let mut frame = RenderFrame::new();
        frame.capture(&controller);
        assert!(!frame.fireball.is_empty());

        controller.reset();
        frame.capture(&controller);
        assert_eq!(frame.boxes.len(), 1);
        assert!(frame.fireball.is_empty());
        assert!(frame.smoke.is_empty());
        assert_eq!(frame.fireball_opacity, 0.0);
    }
}
