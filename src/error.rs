//! Error types
//!
//! Only construction can fail. Gameplay events such as a ball leaving the
//! playfield are handled by the scene machine and never surface as errors.

use thiserror::Error;

/// Invalid geometry or speeds, caught before any scene runs
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{what} must have positive dimensions, got {width}x{height}")]
    NonPositiveSize {
        what: &'static str,
        width: f32,
        height: f32,
    },
    #[error("{what} velocity must be positive, got {velocity}")]
    NonPositiveVelocity { what: &'static str, velocity: f32 },
    #[error("target fps must be at least 1")]
    ZeroFps,
    #[error("playfield {width}x{height} cannot hold a {what} of {size}")]
    PlayfieldTooSmall {
        what: &'static str,
        width: f32,
        height: f32,
        size: f32,
    },
    #[error("failed to read settings file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// WebGPU setup failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
