//! Paddle, ball and rally state
//!
//! A `Rally` is the live entity set of one game. It is created when a game
//! starts, survives a pause untouched and is dropped on return to the title.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::error::ConfigError;
use crate::input::{HeldKeys, Key};
use crate::settings::Settings;

fn check_size(what: &'static str, rect: &Rect) -> Result<(), ConfigError> {
    if rect.width() > 0.0 && rect.height() > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveSize {
            what,
            width: rect.width(),
            height: rect.height(),
        })
    }
}

fn check_velocity(what: &'static str, velocity: f32) -> Result<(), ConfigError> {
    if velocity > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveVelocity { what, velocity })
    }
}

/// The rectangular area the rally plays out in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl From<&Settings> for Playfield {
    fn from(settings: &Settings) -> Self {
        Self::new(settings.playfield_width, settings.playfield_height)
    }
}

/// A player paddle, moved vertically by two keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Travel per tick while a key is held
    pub velocity: f32,
    pub up_key: Key,
    pub down_key: Key,
}

impl Paddle {
    pub fn new(rect: Rect, velocity: f32, up_key: Key, down_key: Key) -> Result<Self, ConfigError> {
        check_size("paddle", &rect)?;
        check_velocity("paddle", velocity)?;
        Ok(Self {
            rect,
            velocity,
            up_key,
            down_key,
        })
    }

    /// Move for `ticks` ticks with the given keys held, clamped to the playfield
    ///
    /// Up is applied before down, so holding both ends each tick on the
    /// down clamp.
    pub fn move_paddle(&mut self, ticks: u32, held: &HeldKeys, playfield_height: f32) {
        let floor = (playfield_height - self.rect.height()).max(0.0);
        for _ in 0..ticks {
            if held.is_held(self.up_key) {
                self.rect.pos.y = (self.rect.pos.y - self.velocity).max(0.0);
            }
            if held.is_held(self.down_key) {
                self.rect.pos.y = (self.rect.pos.y + self.velocity).min(floor);
            }
        }
    }
}

/// The ball: horizontal speed plus a vertical "angle" speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Signed horizontal speed per tick
    pub velocity: f32,
    /// Signed vertical speed per tick
    pub angle: f32,
}

impl Ball {
    pub fn new(rect: Rect, velocity: f32) -> Result<Self, ConfigError> {
        check_size("ball", &rect)?;
        check_velocity("ball", velocity)?;
        Ok(Self {
            rect,
            velocity,
            angle: 0.0,
        })
    }

    /// One tick of straight-line travel. Bounds are the scene's business.
    pub fn advance(&mut self) {
        self.rect.pos.x += self.velocity;
        self.rect.pos.y += self.angle;
    }
}

/// Live paddles and balls of one game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rally {
    pub paddles: Vec<Paddle>,
    pub balls: Vec<Ball>,
}

impl Rally {
    /// The standard table: W/S paddle on the left, Up/Down on the right,
    /// ball centered
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let field = Playfield::from(settings);
        let center = field.center();
        let paddle_y = center.y - settings.paddle_height / 2.0;

        let left = Paddle::new(
            Rect::new(0.0, paddle_y, settings.paddle_width, settings.paddle_height),
            settings.paddle_velocity,
            Key::W,
            Key::S,
        )?;
        let right = Paddle::new(
            Rect::new(
                field.width - settings.paddle_width,
                paddle_y,
                settings.paddle_width,
                settings.paddle_height,
            ),
            settings.paddle_velocity,
            Key::Up,
            Key::Down,
        )?;

        // Both offsets use the ball width, the ball is square
        let ball = Ball::new(
            Rect::new(
                center.x - settings.ball_width / 2.0,
                center.y - settings.ball_width / 2.0,
                settings.ball_width,
                settings.ball_width,
            ),
            settings.ball_velocity,
        )?;

        Ok(Self {
            paddles: vec![left, right],
            balls: vec![ball],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paddle_at(y: f32) -> Paddle {
        Paddle::new(Rect::new(0.0, y, 10.0, 100.0), 5.0, Key::W, Key::S).unwrap()
    }

    #[test]
    fn test_paddle_moves_and_clamps_top() {
        let mut paddle = paddle_at(7.0);
        let held: HeldKeys = [Key::W].into_iter().collect();
        paddle.move_paddle(1, &held, 600.0);
        assert_eq!(paddle.rect.y(), 2.0);
        paddle.move_paddle(1, &held, 600.0);
        assert_eq!(paddle.rect.y(), 0.0);
        paddle.move_paddle(3, &held, 600.0);
        assert_eq!(paddle.rect.y(), 0.0);
    }

    #[test]
    fn test_paddle_clamps_bottom() {
        let mut paddle = paddle_at(497.0);
        let held: HeldKeys = [Key::S].into_iter().collect();
        paddle.move_paddle(1, &held, 600.0);
        assert_eq!(paddle.rect.y(), 500.0);
        paddle.move_paddle(10, &held, 600.0);
        assert_eq!(paddle.rect.y(), 500.0);
    }

    #[test]
    fn test_paddle_ignores_other_keys() {
        let mut paddle = paddle_at(250.0);
        let held: HeldKeys = [Key::Up, Key::Down].into_iter().collect();
        paddle.move_paddle(5, &held, 600.0);
        assert_eq!(paddle.rect.y(), 250.0);
    }

    #[test]
    fn test_both_keys_up_then_down() {
        // At the top, up clamps to 0 and down then moves off it
        let mut paddle = paddle_at(0.0);
        let held: HeldKeys = [Key::W, Key::S].into_iter().collect();
        paddle.move_paddle(1, &held, 600.0);
        assert_eq!(paddle.rect.y(), 5.0);

        // At the bottom, up moves first and down clamps back
        let mut paddle = paddle_at(500.0);
        paddle.move_paddle(1, &held, 600.0);
        assert_eq!(paddle.rect.y(), 500.0);
    }

    #[test]
    fn test_constructors_reject_bad_values() {
        assert!(Paddle::new(Rect::new(0.0, 0.0, 10.0, 100.0), 0.0, Key::W, Key::S).is_err());
        assert!(Paddle::new(Rect::new(0.0, 0.0, 0.0, 100.0), 5.0, Key::W, Key::S).is_err());
        assert!(Ball::new(Rect::new(0.0, 0.0, 10.0, 10.0), -1.0).is_err());
        assert!(Ball::new(Rect::new(0.0, 0.0, 10.0, -10.0), 5.0).is_err());
    }

    #[test]
    fn test_ball_advance() {
        let mut ball = Ball::new(Rect::new(100.0, 100.0, 10.0, 10.0), 5.0).unwrap();
        ball.angle = -3.0;
        ball.advance();
        assert_eq!(ball.rect.pos, Vec2::new(105.0, 97.0));
    }

    #[test]
    fn test_rally_layout() {
        let settings = Settings::default();
        let rally = Rally::new(&settings).unwrap();
        assert_eq!(rally.paddles.len(), 2);
        assert_eq!(rally.balls.len(), 1);

        assert_eq!(rally.paddles[0].rect.pos, Vec2::new(0.0, 250.0));
        assert_eq!(rally.paddles[1].rect.pos, Vec2::new(990.0, 250.0));
        assert_eq!(rally.paddles[1].up_key, Key::Up);

        let ball = &rally.balls[0];
        assert_eq!(ball.rect.pos, Vec2::new(495.0, 295.0));
        assert_eq!(ball.velocity, 5.0);
        assert_eq!(ball.angle, 0.0);
    }

    #[test]
    fn test_rally_rejects_invalid_settings() {
        let settings = Settings {
            ball_velocity: 0.0,
            ..Default::default()
        };
        assert!(Rally::new(&settings).is_err());
    }

    #[test]
    fn test_paddle_serde_round_trip_same_trajectory() {
        let mut original = paddle_at(123.0);
        let json = serde_json::to_string(&original).unwrap();
        let mut restored: Paddle = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);

        let script = [
            vec![Key::W],
            vec![Key::S],
            vec![Key::S, Key::W],
            vec![],
            vec![Key::S],
        ];
        for keys in script.iter().cycle().take(200) {
            let held: HeldKeys = keys.iter().copied().collect();
            original.move_paddle(1, &held, 600.0);
            restored.move_paddle(1, &held, 600.0);
            assert_eq!(original.rect, restored.rect);
        }
    }

    fn key_script() -> impl Strategy<Value = Vec<(bool, bool)>> {
        prop::collection::vec((any::<bool>(), any::<bool>()), 0..400)
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_playfield(
            start in 0.0f32..500.0,
            velocity in 0.5f32..80.0,
            height in 300.0f32..1200.0,
            script in key_script(),
        ) {
            let mut paddle = Paddle::new(
                Rect::new(0.0, start.min(height - 100.0), 10.0, 100.0),
                velocity,
                Key::Up,
                Key::Down,
            ).unwrap();
            for (up, down) in script {
                let mut held = HeldKeys::new();
                if up { held.press(Key::Up); }
                if down { held.press(Key::Down); }
                paddle.move_paddle(1, &held, height);
                prop_assert!(paddle.rect.y() >= 0.0);
                prop_assert!(paddle.rect.y() <= height - paddle.rect.height());
            }
        }

        #[test]
        fn prop_restored_paddle_replays_identically(
            y in 0.0f32..500.0,
            velocity in 0.5f32..40.0,
            script in key_script(),
        ) {
            let mut a = Paddle::new(Rect::new(990.0, y, 10.0, 100.0), velocity, Key::Up, Key::Down).unwrap();
            let mut b: Paddle = serde_json::from_str(&serde_json::to_string(&a).unwrap()).unwrap();
            for (up, down) in script {
                let mut held = HeldKeys::new();
                if up { held.press(Key::Up); }
                if down { held.press(Key::Down); }
                a.move_paddle(1, &held, 600.0);
                b.move_paddle(1, &held, 600.0);
                prop_assert_eq!(a.rect, b.rect);
            }
        }
    }
}
