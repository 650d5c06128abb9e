//! Windowed viewer.
//!
//! Opens a winit window, renders the scene with wgpu and maps input to the
//! explosion context:
//!
//! | Input | Action |
//! |-------|--------|
//! | Left click | Pick; explode on a hit |
//! | `R` | Reset explosion |
//! | `P` | Reset parameters |
//! | `C` | Reset camera |
//! | Arrow keys | Orbit the camera |
//! | `+` / `-` | Move the camera closer / farther |
//! | `1`..`6` | Select a parameter |
//! | `[` / `]` | Decrease / increase the selected parameter |
//! | `Esc` | Quit |

mod gpu;

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::SceneConfig;
use crate::context::ExplosionContext;
use crate::error::ViewerError;
use crate::input::{Input, KeyCode, MouseButton};
use crate::params::ParamName;
use crate::render::RenderFrame;
use crate::time::Timestamp;

use gpu::GpuState;

/// Degrees per arrow-key press.
const ORBIT_STEP: f32 = 5.0;
/// Distance change per `+` / `-` press.
const ZOOM_STEP: f32 = 5.0;
const MIN_DISTANCE: f32 = 5.0;
/// Multiplicative nudge for `[` / `]`.
const NUDGE_FACTOR: f32 = 1.1;

/// Open the viewer and block until the window closes.
pub fn run(config: SceneConfig) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    config: SceneConfig,
    context: ExplosionContext,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    input: Input,
    frame: RenderFrame,
    origin: Instant,
    selected: ParamName,
    error: Option<ViewerError>,
}

impl App {
    fn new(config: SceneConfig) -> Result<Self, ViewerError> {
        let context = ExplosionContext::from_config(&config)?;
        Ok(Self {
            config,
            context,
            window: None,
            gpu_state: None,
            input: Input::new(),
            frame: RenderFrame::new(),
            origin: Instant::now(),
            selected: ParamName::ExplosionStrength,
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        let gpu_state = pollster::block_on(GpuState::new(window.clone()))?;

        self.on_resize(size.width, size.height);
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        self.update_title();
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.input.set_window_size(width, height);
        if height > 0 {
            self.context.camera_mut().set_aspect(width as f32 / height as f32);
        }
    }

    fn update_title(&self) {
        if let Some(window) = &self.window {
            let value = self.context.params().get().get(self.selected);
            let title = &self.config.window.title;
            window.set_title(&format!("{} - {} = {:.3}", title, self.selected, value));
        }
    }

    /// Apply this frame's input, then advance the explosion.
    fn update(&mut self) {
        let now = Timestamp::since(self.origin, Instant::now());

        if self.input.mouse_pressed(MouseButton::Left) {
            if let Some(ndc) = self.input.mouse_ndc() {
                self.context.click(ndc, now);
            }
        }

        if self.input.key_pressed(KeyCode::R) {
            self.context.reset_explosion();
        }
        if self.input.key_pressed(KeyCode::P) {
            self.context.reset_parameters();
            self.update_title();
        }
        if self.input.key_pressed(KeyCode::C) {
            self.context.reset_camera();
        }

        self.handle_camera_keys();
        self.handle_parameter_keys();

        self.context.tick(now);
        self.context.capture(&mut self.frame);
        self.input.end_frame();
    }

    fn handle_camera_keys(&mut self) {
        let input = &self.input;
        let camera = self.context.camera_mut();

        let mut horizontal = 0.0;
        let mut vertical = 0.0;
        if input.key_pressed(KeyCode::Left) {
            horizontal -= ORBIT_STEP;
        }
        if input.key_pressed(KeyCode::Right) {
            horizontal += ORBIT_STEP;
        }
        if input.key_pressed(KeyCode::Up) {
            vertical += ORBIT_STEP;
        }
        if input.key_pressed(KeyCode::Down) {
            vertical -= ORBIT_STEP;
        }
        if horizontal != 0.0 {
            camera.set_horizontal_rotation(camera.horizontal_rotation + horizontal);
        }
        if vertical != 0.0 {
            camera.set_vertical_rotation(camera.vertical_rotation + vertical);
        }

        if input.key_pressed(KeyCode::Plus) {
            camera.set_distance((camera.distance - ZOOM_STEP).max(MIN_DISTANCE));
        }
        if input.key_pressed(KeyCode::Minus) {
            camera.set_distance(camera.distance + ZOOM_STEP);
        }
    }

    fn handle_parameter_keys(&mut self) {
        const SELECT: [(KeyCode, usize); 6] = [
            (KeyCode::Key1, 0),
            (KeyCode::Key2, 1),
            (KeyCode::Key3, 2),
            (KeyCode::Key4, 3),
            (KeyCode::Key5, 4),
            (KeyCode::Key6, 5),
        ];
        for (key, index) in SELECT {
            if self.input.key_pressed(key) {
                self.selected = ParamName::ALL[index];
                self.update_title();
            }
        }

        let up = self.input.key_pressed(KeyCode::BracketRight);
        let down = self.input.key_pressed(KeyCode::BracketLeft);
        if up == down {
            return;
        }

        let current = self.context.params().get().get(self.selected);
        let value = match (up, current == 0.0) {
            // Lets a zero decay rate climb back up
            (true, true) => 0.1,
            (true, false) => current * NUDGE_FACTOR,
            (false, _) => current / NUDGE_FACTOR,
        };
        match self.context.params_mut().set(self.selected, value) {
            Ok(()) => self.update_title(),
            Err(err) => log::warn!("{}", err),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.create_window(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.on_resize(physical_size.width, physical_size.height);
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.input.key_pressed(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }

                self.update();

                if let Some(gpu_state) = &mut self.gpu_state {
                    match gpu_state.render(&self.frame, self.context.camera()) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => gpu_state.reconfigure(),
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => log::warn!("render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
