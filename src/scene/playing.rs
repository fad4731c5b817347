//! The rally itself

use super::{SceneAction, SceneView};
use crate::colors::{BLACK, WHITE};
use crate::input::{HeldKeys, InputEvent, Key};
use crate::platform::{RandomSource, Surface};
use crate::sim::{Playfield, Rally, RallyOutcome, Rect, tick};

pub fn handle_input(event: &InputEvent) -> Option<SceneAction> {
    match event {
        InputEvent::KeyDown(Key::Escape) => Some(SceneAction::Pause),
        _ => None,
    }
}

pub fn update(
    rally: &mut Rally,
    held: &HeldKeys,
    field: &Playfield,
    rng: &mut dyn RandomSource,
) -> Option<SceneAction> {
    match tick(rally, held, field, rng) {
        RallyOutcome::InPlay => None,
        RallyOutcome::BallOut => Some(SceneAction::BallOut),
    }
}

/// 1px net down the middle
pub fn net(field: &Playfield) -> Rect {
    Rect::new(field.width / 2.0, 0.0, 1.0, field.height)
}

pub fn render(surface: &mut dyn Surface, view: &SceneView, rally: &Rally) {
    surface.fill(BLACK);
    view.draw_fps(surface);
    surface.draw_rect(&net(&Playfield::from(view.settings)), WHITE);

    for paddle in &rally.paddles {
        surface.draw_rect(&paddle.rect, WHITE);
    }
    for ball in &rally.balls {
        surface.draw_rect(&ball.rect, WHITE);
    }
}
