//! Error types for hueflow.
//!
//! This module provides error types for color validation, preset lookup,
//! GPU initialization, shader compilation, and running the playground.

use std::fmt;

/// Errors raised while validating color input at the host boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// A color string was not `#RRGGBB` / `#RGB` hex.
    InvalidHex(String),
    /// The color list did not contain exactly the expected number of entries.
    WrongCount {
        /// Number of colors every effect requires.
        expected: usize,
        /// Number of colors supplied.
        found: usize,
    },
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidHex(s) => write!(f, "Invalid hex color '{}': expected #RRGGBB", s),
            ColorError::WrongCount { expected, found } => write!(
                f,
                "Expected exactly {} colors, got {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for ColorError {}

/// Errors raised when resolving a preset by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    /// No preset is registered under this name.
    Unknown(String),
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::Unknown(name) => write!(f, "Unknown preset '{}'", name),
        }
    }
}

impl std::error::Error for PresetError {}

/// A shader that failed to parse, validate, or compile.
///
/// Fatal to the effect that owns it only: the host logs it and renders a
/// blank frame instead of the effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderError {
    /// Display name of the effect whose shader failed.
    pub effect: &'static str,
    /// Formatted diagnostic.
    pub message: String,
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shader error: {}", self.effect, self.message)
    }
}

impl std::error::Error for ShaderError {}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reported no texture formats for the chosen adapter.
    NoSurfaceFormat,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::NoSurfaceFormat => {
                write!(f, "The window surface supports no texture formats on this adapter")
            }
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter | GpuError::NoSurfaceFormat => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the playground.
#[derive(Debug)]
pub enum PlaygroundError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// Rejected color input.
    Color(ColorError),
}

impl fmt::Display for PlaygroundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaygroundError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            PlaygroundError::Window(e) => write!(f, "Failed to create window: {}", e),
            PlaygroundError::Gpu(e) => write!(f, "GPU error: {}", e),
            PlaygroundError::Color(e) => write!(f, "Color error: {}", e),
        }
    }
}

impl std::error::Error for PlaygroundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlaygroundError::EventLoop(e) => Some(e),
            PlaygroundError::Window(e) => Some(e),
            PlaygroundError::Gpu(e) => Some(e),
            PlaygroundError::Color(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for PlaygroundError {
    fn from(e: winit::error::EventLoopError) -> Self {
        PlaygroundError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for PlaygroundError {
    fn from(e: winit::error::OsError) -> Self {
        PlaygroundError::Window(e)
    }
}

impl From<GpuError> for PlaygroundError {
    fn from(e: GpuError) -> Self {
        PlaygroundError::Gpu(e)
    }
}

impl From<ColorError> for PlaygroundError {
    fn from(e: ColorError) -> Self {
        PlaygroundError::Color(e)
    }
}
