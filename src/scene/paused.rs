//! Pause menu. The rally waits in the machine, untouched, until RESUME.

use super::layout::{MenuButton, MenuLayout};
use super::{SceneAction, SceneView};
use crate::colors::BLACK;
use crate::input::{InputEvent, Key};
use crate::platform::Surface;

pub const HEADING: &str = "PAUSED";

pub fn handle_input(event: &InputEvent, layout: &MenuLayout) -> Option<SceneAction> {
    match event {
        InputEvent::KeyDown(Key::Escape) => Some(SceneAction::Resume),
        InputEvent::MouseDown(pos) => match layout.hit(*pos)? {
            MenuButton::Primary => Some(SceneAction::Resume),
            MenuButton::Exit => Some(SceneAction::Exit),
        },
        _ => None,
    }
}

pub fn render(surface: &mut dyn Surface, view: &SceneView) {
    surface.fill(BLACK);
    view.draw_fps(surface);
    view.draw_menu(surface, HEADING, "RESUME");
}
