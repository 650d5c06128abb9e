//! Error types for shatter.
//!
//! The explosion state machine itself never fails: invalid transitions are
//! ignored and reported as "no effect". Errors only arise at the edges, when
//! a parameter value is rejected, when a scene configuration cannot be
//! loaded, or when the optional viewer cannot bring up a window and GPU.

use thiserror::Error;

use crate::params::ParamName;

/// A rejected parameter write.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// The parameter must be strictly positive.
    #[error("{name} must be greater than zero (got {value})")]
    NonPositive { name: ParamName, value: f32 },
    /// The parameter may be zero but not negative.
    #[error("{name} must not be negative (got {value})")]
    Negative { name: ParamName, value: f32 },
    /// NaN or infinity.
    #[error("{name} must be a finite number (got {value})")]
    NotFinite { name: ParamName, value: f32 },
    /// The GUI asked for a parameter that does not exist.
    #[error("unknown parameter name \"{0}\"")]
    UnknownName(String),
}

/// Camera settings that cannot produce a usable view.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    /// A setting is NaN or infinite.
    #[error("camera {name} must be a finite number (got {value})")]
    NotFinite { name: &'static str, value: f32 },
    /// The camera sits on the point it orbits.
    #[error("camera distance must be greater than zero (got {0})")]
    Distance(f32),
    #[error("camera near plane must be greater than zero (got {0})")]
    Near(f32),
    #[error("camera far plane ({far}) must lie beyond the near plane ({near})")]
    Far { near: f32, far: f32 },
    /// Vertical field of view outside (0, 180) degrees.
    #[error("camera field of view must be between 0 and 180 degrees (got {0})")]
    FieldOfView(f32),
}

/// Errors that can occur while loading a scene configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON for a scene configuration.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    /// A parameter in the file violates its range.
    #[error("invalid parameter in config: {0}")]
    Param(#[from] ParamError),
    /// The camera settings are unusable.
    #[error("invalid camera in config: {0}")]
    Camera(#[from] CameraError),
    /// The object extent has a negative or non-finite axis.
    #[error("object extent must be finite and non-negative (got {0:?})")]
    Extent([f32; 3]),
    /// The object position has a non-finite axis.
    #[error("object position must be finite (got {0:?})")]
    Position([f32; 3]),
}

/// Errors that can occur while starting the viewer.
#[cfg(feature = "viewer")]
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Failed to create event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    /// The scene configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_error_names_the_parameter() {
        let err = ParamError::NonPositive {
            name: ParamName::ParticleSize,
            value: 0.0,
        };
        assert_eq!(err.to_string(), "particleSize must be greater than zero (got 0)");
    }

    #[test]
    fn test_config_error_wraps_camera_error() {
        let err: ConfigError = CameraError::Distance(0.0).into();
        assert_eq!(
            err.to_string(),
            "invalid camera in config: camera distance must be greater than zero (got 0)"
        );
    }

    #[test]
    fn test_config_error_wraps_param_error() {
        let err: ConfigError = ParamError::UnknownName("gravity".into()).into();
        assert!(err.to_string().contains("unknown parameter name \"gravity\""));
    }
}
