//! One gameplay step for a rally
//!
//! Order per tick: paddles move, balls advance, wall rule, paddle rule.

use super::collision::{WallContact, apply_paddle_rule, apply_wall_rule};
use super::state::{Playfield, Rally};
use crate::input::HeldKeys;
use crate::platform::RandomSource;

/// What the step means for the scene that owns the rally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RallyOutcome {
    InPlay,
    /// A ball left through the left or right edge
    BallOut,
}

/// Advance the rally by one tick
pub fn tick(
    rally: &mut Rally,
    held: &HeldKeys,
    field: &Playfield,
    rng: &mut dyn RandomSource,
) -> RallyOutcome {
    for paddle in &mut rally.paddles {
        paddle.move_paddle(1, held, field.height);
    }

    let mut outcome = RallyOutcome::InPlay;
    for ball in &mut rally.balls {
        ball.advance();
        match apply_wall_rule(ball, field) {
            WallContact::Out => {
                log::debug!("Ball out at x={:.1}", ball.rect.x());
                outcome = RallyOutcome::BallOut;
            }
            WallContact::Bounced => log::debug!("Wall bounce, angle now {}", ball.angle),
            WallContact::Clear => {}
        }
    }

    for ball in &mut rally.balls {
        let hits = apply_paddle_rule(ball, &rally.paddles, rng);
        if hits > 0 {
            log::debug!("Paddle hit, velocity {} angle {}", ball.velocity, ball.angle);
        }
    }

    outcome
}
