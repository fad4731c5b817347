//! Platform abstraction layer
//!
//! The core consumes the outside world only through these capabilities:
//! - `Surface`: drawing
//! - `Clock`: frame pacing and FPS measurement
//! - `InputSource`: held keys and discrete events
//! - `RandomSource`: deflection angles
//!
//! Native implementations live in the submodules; the browser build supplies
//! its own clock and feeds DOM events into an `EventQueue`.

pub mod clock;
pub mod events;
pub mod random;

pub use clock::{FpsCounter, FramePacer, ManualClock};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;
pub use events::{EventQueue, ScriptedInput};
pub use random::{PcgRandom, SequenceRandom};

use glam::Vec2;

use crate::Color;
use crate::input::{HeldKeys, InputEvent};
use crate::renderer::font::{Font, Image};
use crate::sim::Rect;

/// Something scenes can draw on
pub trait Surface {
    /// Clear everything to one color
    fn fill(&mut self, color: Color);

    fn draw_rect(&mut self, rect: &Rect, color: Color);

    /// Rasterize text with the given font; blit the result to show it
    fn draw_text(&mut self, text: &str, font: &Font, color: Color) -> Image {
        font.render(text, color)
    }

    /// Draw an image with its top-left corner at `pos`
    fn blit(&mut self, image: &Image, pos: Vec2);

    /// Hand the finished frame to the display
    fn present(&mut self) {}
}

/// Frame pacer
pub trait Clock {
    /// Block until the next frame boundary at `target_fps`
    fn tick(&mut self, target_fps: u32);

    /// Recently measured frames per second
    fn measured_fps(&self) -> u32;
}

/// Keyboard/mouse/window input
pub trait InputSource {
    /// Keys held right now
    fn held_keys(&mut self) -> HeldKeys;

    /// Drain events since the last poll
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

/// Integer randomness
pub trait RandomSource {
    /// Uniform integer in `lo..=hi`
    fn int_in_range(&mut self, lo: i32, hi: i32) -> i32;
}
