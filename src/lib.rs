//! # shatter
//!
//! An interactive explosion effect: click a solid box and it breaks into
//! three particle populations that evolve over time.
//!
//! - **Debris**: a grid of small cubes carved from the box, pushed outward by
//!   a short radial impulse and pulled down by gravity.
//! - **Fireball**: thousands of point sprites bursting from the origin,
//!   slowing down, cooling from white-hot to orange and fading out.
//! - **Smoke**: a slow, rising grey cloud that fades linearly.
//!
//! The crate is the simulation core. Rendering is left to a host through
//! plain instance buffers ([`render::RenderFrame`]); the optional `viewer`
//! feature ships a winit + wgpu window that drives everything.
//!
//! ## Quick Start
//!
//! ```
//! use shatter::prelude::*;
//!
//! let mut ctx = ExplosionContext::new(SceneObject::cube(3.0));
//! ctx.params_mut().set_explosion_strength(0.5).unwrap();
//!
//! // a click in the middle of the viewport hits the cube
//! assert!(ctx.click(Vec2::ZERO, Timestamp::from_secs(0.0)));
//!
//! let mut frame = RenderFrame::new();
//! for i in 1..=10 {
//!     ctx.tick(Timestamp::from_secs(i as f64 / 60.0));
//!     ctx.capture(&mut frame);
//! }
//! assert_eq!(frame.fireball.len(), 5000);
//! ```
//!
//! ## Core Concepts
//!
//! ### Parameters
//!
//! Six tunable scalars live in a [`params::ParameterStore`]. Particle counts
//! and initial velocities are fixed when an explosion is seeded; gravity,
//! fireball decay and the debris impulse read the live values every tick.
//!
//! ### State machine
//!
//! [`controller::ExplosionController`] is either idle (object shown) or
//! exploding (object hidden, fields advancing). Only a picking hit starts an
//! explosion and only an explicit reset ends one.
//!
//! ### Time
//!
//! Ticks carry a [`time::Timestamp`]; the shared
//! [`time::ExplosionClock`] turns it into a non-negative delta so clock
//! jitter never moves particles backwards.
//!
//! ## Feature Overview
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`params`] | [`ParameterStore`], [`Parameters`], [`ParamName`] |
//! | [`camera`] | [`OrbitCamera`] |
//! | [`picking`] | [`PickingService`], [`Ray`] |
//! | [`fields`] | [`DebrisField`], [`FireballField`], [`SmokeField`] |
//! | [`render`] | [`RenderFrame`], GPU instance records |
//! | [`config`] | JSON [`SceneConfig`] |

pub mod camera;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod fields;
pub mod input;
pub mod params;
pub mod particle;
pub mod picking;
pub mod render;
pub mod scene;
pub mod shaders;
pub mod time;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use bytemuck;
pub use camera::OrbitCamera;
pub use config::{SceneConfig, WindowConfig};
pub use context::ExplosionContext;
pub use controller::{ExplosionController, ExplosionState, FieldCounts, TickReport};
pub use error::{CameraError, ConfigError, ParamError};
pub use fields::{DebrisField, FireballColorMode, FireballField, ParticleField, SmokeField};
pub use glam::{Vec2, Vec3};
pub use input::CanvasRect;
pub use params::{ParamName, ParameterStore, Parameters};
pub use picking::{PickResult, PickingService, Ray};
pub use render::{BoxInstance, PointInstance, RenderFrame};
pub use scene::{Aabb, SceneObject};
pub use time::{ExplosionClock, Timestamp};

/// Convenient re-exports for common usage.
///
/// ```
/// use shatter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::OrbitCamera;
    pub use crate::config::SceneConfig;
    pub use crate::context::ExplosionContext;
    pub use crate::controller::{ExplosionController, ExplosionState, TickReport};
    pub use crate::fields::{FireballColorMode, ParticleField};
    pub use crate::input::CanvasRect;
    pub use crate::params::{ParamName, ParameterStore, Parameters};
    pub use crate::picking::{PickResult, PickingService};
    pub use crate::render::RenderFrame;
    pub use crate::scene::SceneObject;
    pub use crate::time::Timestamp;
    pub use crate::{Vec2, Vec3};
}
