//! Collision response: playfield walls and paddles
//!
//! Both rules act on the ball only. The ball never checks its own bounds;
//! the rally step applies these after every advance.

use super::state::{Ball, Paddle, Playfield};
use crate::consts::{DEFLECTION_MAX, DEFLECTION_MIN};
use crate::platform::RandomSource;

/// Result of checking a ball against the playfield edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallContact {
    /// Still inside
    Clear,
    /// Hit the top or bottom edge, vertical speed flipped
    Bounced,
    /// Left through the left or right edge
    Out,
}

/// Apply the wall rule to one ball
///
/// Horizontal exit wins over a vertical bounce. Any ball past the top or
/// bottom edge has its vertical speed negated.
pub fn apply_wall_rule(ball: &mut Ball, field: &Playfield) -> WallContact {
    let x = ball.rect.x();
    if x > field.width || x < 0.0 {
        return WallContact::Out;
    }

    let y = ball.rect.y();
    let floor = field.height - ball.rect.height();
    if y < 0.0 || y > floor {
        ball.angle = -ball.angle;
        WallContact::Bounced
    } else {
        WallContact::Clear
    }
}

/// Apply the paddle rule to one ball, returning the number of hits
///
/// Every overlapping paddle reverses the horizontal speed and draws a fresh
/// deflection angle, independent of the old one.
pub fn apply_paddle_rule(ball: &mut Ball, paddles: &[Paddle], rng: &mut dyn RandomSource) -> usize {
    let mut hits = 0;
    for paddle in paddles {
        if ball.rect.overlaps(&paddle.rect) {
            ball.velocity = -ball.velocity;
            ball.angle = rng.int_in_range(DEFLECTION_MIN, DEFLECTION_MAX) as f32;
            hits += 1;
        }
    }
    hits
}
