//! Pointer input for picking.
//!
//! [`CanvasRect`] turns raw pointer coordinates into normalized device
//! coordinates against the on-screen rectangle of the drawing surface. With
//! the `viewer` feature, [`Input`] additionally tracks winit keyboard and
//! mouse events frame by frame.

use glam::Vec2;

/// The drawing surface's rectangle in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A surface that starts at the pointer origin, e.g. a window's client area.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Map a pointer position to normalized device coordinates.
    ///
    /// X runs -1 (left edge) to 1 (right edge); Y runs 1 (top) to -1 (bottom).
    /// Returns `None` for an empty rectangle.
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> Option<Vec2> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        Some(Vec2::new(
            (client_x - self.left) / self.width * 2.0 - 1.0,
            -((client_y - self.top) / self.height) * 2.0 + 1.0,
        ))
    }
}

#[cfg(feature = "viewer")]
pub use tracker::{Input, KeyCode, MouseButton};

#[cfg(feature = "viewer")]
mod tracker {
    use std::collections::HashSet;

    use glam::Vec2;
    use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
    use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

    use super::CanvasRect;

    /// Mouse button identifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum MouseButton {
        Left,
        Right,
        Middle,
    }

    impl From<WinitMouseButton> for MouseButton {
        fn from(btn: WinitMouseButton) -> Self {
            match btn {
                WinitMouseButton::Right => MouseButton::Right,
                WinitMouseButton::Middle => MouseButton::Middle,
                _ => MouseButton::Left,
            }
        }
    }

    /// Keys the viewer reacts to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum KeyCode {
        R,
        P,
        C,
        Key1, Key2, Key3, Key4, Key5, Key6,
        BracketLeft, BracketRight,
        Up, Down, Left, Right,
        Plus, Minus,
        Escape,
        Other,
    }

    impl From<WinitKeyCode> for KeyCode {
        fn from(key: WinitKeyCode) -> Self {
            match key {
                WinitKeyCode::KeyR => KeyCode::R,
                WinitKeyCode::KeyP => KeyCode::P,
                WinitKeyCode::KeyC => KeyCode::C,
                WinitKeyCode::Digit1 => KeyCode::Key1,
                WinitKeyCode::Digit2 => KeyCode::Key2,
                WinitKeyCode::Digit3 => KeyCode::Key3,
                WinitKeyCode::Digit4 => KeyCode::Key4,
                WinitKeyCode::Digit5 => KeyCode::Key5,
                WinitKeyCode::Digit6 => KeyCode::Key6,
                WinitKeyCode::BracketLeft => KeyCode::BracketLeft,
                WinitKeyCode::BracketRight => KeyCode::BracketRight,
                WinitKeyCode::ArrowUp => KeyCode::Up,
                WinitKeyCode::ArrowDown => KeyCode::Down,
                WinitKeyCode::ArrowLeft => KeyCode::Left,
                WinitKeyCode::ArrowRight => KeyCode::Right,
                WinitKeyCode::Equal | WinitKeyCode::NumpadAdd => KeyCode::Plus,
                WinitKeyCode::Minus | WinitKeyCode::NumpadSubtract => KeyCode::Minus,
                WinitKeyCode::Escape => KeyCode::Escape,
                _ => KeyCode::Other,
            }
        }
    }

    /// Input state tracking for keyboard and mouse.
    ///
    /// Tracks both instantaneous events (pressed this frame) and continuous
    /// state (currently held).
    #[derive(Debug, Default)]
    pub struct Input {
        keys_held: HashSet<KeyCode>,
        keys_pressed: HashSet<KeyCode>,
        mouse_held: HashSet<MouseButton>,
        mouse_pressed: HashSet<MouseButton>,
        mouse_position: Vec2,
        canvas: Option<CanvasRect>,
    }

    impl Input {
        pub fn new() -> Self {
            Self::default()
        }

        /// Check if a key was pressed this frame (just went down).
        pub fn key_pressed(&self, key: KeyCode) -> bool {
            self.keys_pressed.contains(&key)
        }

        /// Check if a key is currently held down.
        pub fn key_held(&self, key: KeyCode) -> bool {
            self.keys_held.contains(&key)
        }

        /// Check if a mouse button was pressed this frame.
        pub fn mouse_pressed(&self, button: MouseButton) -> bool {
            self.mouse_pressed.contains(&button)
        }

        /// Check if a mouse button is currently held down.
        pub fn mouse_held(&self, button: MouseButton) -> bool {
            self.mouse_held.contains(&button)
        }

        /// Cursor position in window pixels.
        pub fn mouse_position(&self) -> Vec2 {
            self.mouse_position
        }

        /// Cursor position in normalized device coordinates.
        pub fn mouse_ndc(&self) -> Option<Vec2> {
            self.canvas
                .and_then(|c| c.to_ndc(self.mouse_position.x, self.mouse_position.y))
        }

        /// Clear per-frame state. Call once the frame's events are consumed.
        pub fn end_frame(&mut self) {
            self.keys_pressed.clear();
            self.mouse_pressed.clear();
        }

        pub fn set_window_size(&mut self, width: u32, height: u32) {
            self.canvas = Some(CanvasRect::from_size(width as f32, height as f32));
        }

        /// Process a winit window event.
        pub fn handle_event(&mut self, event: &WindowEvent) {
            match event {
                WindowEvent::KeyboardInput { event, .. } => {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        let key = KeyCode::from(code);
                        match event.state {
                            ElementState::Pressed => {
                                // No key-repeat presses
                                if self.keys_held.insert(key) {
                                    self.keys_pressed.insert(key);
                                }
                            }
                            ElementState::Released => {
                                self.keys_held.remove(&key);
                            }
                        }
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    let btn = MouseButton::from(*button);
                    match state {
                        ElementState::Pressed => {
                            self.mouse_pressed.insert(btn);
                            self.mouse_held.insert(btn);
                        }
                        ElementState::Released => {
                            self.mouse_held.remove(&btn);
                        }
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    self.mouse_position = Vec2::new(position.x as f32, position.y as f32);
                }
                WindowEvent::Resized(size) => {
                    self.set_window_size(size.width, size.height);
                }
                _ => {}
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_pressed_clears_but_held_remains() {
            let mut input = Input::new();
            input.keys_pressed.insert(KeyCode::R);
            input.keys_held.insert(KeyCode::R);

            input.end_frame();
            assert!(input.key_held(KeyCode::R));
            assert!(!input.key_pressed(KeyCode::R));
        }

        #[test]
        fn test_mouse_press_clears_but_hold_remains() {
            let mut input = Input::new();
            input.mouse_pressed.insert(MouseButton::Left);
            input.mouse_held.insert(MouseButton::Left);

            input.end_frame();
            assert!(input.mouse_held(MouseButton::Left));
            assert!(!input.mouse_pressed(MouseButton::Left));
            assert!(!input.mouse_held(MouseButton::Right));
        }

        #[test]
        fn test_mouse_ndc_needs_window_size() {
            let mut input = Input::new();
            input.mouse_position = Vec2::new(400.0, 300.0);
            assert!(input.mouse_ndc().is_none());

            input.set_window_size(800, 600);
            let ndc = input.mouse_ndc().unwrap();
            assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_maps_to_origin() {
        let rect = CanvasRect::new(100.0, 50.0, 800.0, 800.0);
        let ndc = rect.to_ndc(500.0, 450.0).unwrap();
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
    }

    #[test]
    fn test_corners() {
        let rect = CanvasRect::new(100.0, 50.0, 800.0, 400.0);
        assert_eq!(rect.to_ndc(100.0, 50.0), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(rect.to_ndc(900.0, 450.0), Some(Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn test_outside_canvas_exceeds_unit_range() {
        let rect = CanvasRect::from_size(200.0, 200.0);
        let ndc = rect.to_ndc(-100.0, 300.0).unwrap();
        assert_eq!(ndc, Vec2::new(-2.0, -2.0));
    }

    #[test]
    fn test_empty_rect() {
        assert!(CanvasRect::from_size(0.0, 100.0).to_ndc(0.0, 0.0).is_none());
        assert!(CanvasRect::from_size(100.0, f32::NAN).to_ndc(0.0, 0.0).is_none());
    }
}
