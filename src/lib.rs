//! Scene Pong - two paddles, one ball, three scenes
//!
//! Core modules:
//! - `sim`: Paddle/ball physics and the rally step (pure, no rendering)
//! - `scene`: Title/Playing/Paused state machine that owns the live rally
//! - `driver`: Frame loop tying input, scenes, rendering and pacing together
//! - `platform`: Capability traits for surface, clock, input and randomness
//! - `renderer`: Quad batching, bitmap font and the WebGPU pipeline
//! - `settings`: Data-driven playfield and speed configuration

pub mod driver;
pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, RenderError};
pub use scene::{SceneKind, SceneMachine};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the frame pacer
    pub const FPS: u32 = 120;
    /// Maximum frames run per display callback when catching up
    pub const MAX_CATCH_UP_FRAMES: u32 = 4;

    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 1000.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;

    /// Ball defaults - the ball is square, BALL_WIDTH on each side
    pub const BALL_WIDTH: f32 = 10.0;
    /// Horizontal ball speed per tick (paddles share it by default)
    pub const BALL_VELOCITY: f32 = 5.0;

    /// Deflection angle drawn on paddle contact, inclusive on both ends
    pub const DEFLECTION_MIN: i32 = -10;
    pub const DEFLECTION_MAX: i32 = 10;

    /// Menu button size
    pub const BUTTON_WIDTH: f32 = 100.0;
    pub const BUTTON_HEIGHT: f32 = 50.0;

    /// Where the FPS label is blitted
    pub const FPS_LABEL_POS: (f32, f32) = (10.0, 10.0);
    /// Menu headings sit at this fraction of the playfield height
    pub const HEADING_HEIGHT_FRACTION: f32 = 0.20;
}

/// RGBA color in 0-1 floats
pub type Color = [f32; 4];

/// Palette shared by all scenes
pub mod colors {
    use super::Color;

    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
}
