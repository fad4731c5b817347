//! Gameplay simulation
//!
//! Paddles, balls and the rules between them. This module must stay pure:
//! - One step per frame, no wall-clock time
//! - Randomness only through an injected `RandomSource`
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{WallContact, apply_paddle_rule, apply_wall_rule};
pub use rect::{Rect, overlaps};
pub use state::{Ball, Paddle, Playfield, Rally};
pub use tick::{RallyOutcome, tick};
