//! Title screen: heading, NEW GAME and EXIT

use super::layout::{MenuButton, MenuLayout};
use super::{SceneAction, SceneView};
use crate::colors::BLACK;
use crate::input::InputEvent;
use crate::platform::Surface;

pub const HEADING: &str = "PONG";

pub fn handle_input(event: &InputEvent, layout: &MenuLayout) -> Option<SceneAction> {
    match event {
        InputEvent::MouseDown(pos) => match layout.hit(*pos)? {
            MenuButton::Primary => Some(SceneAction::NewGame),
            MenuButton::Exit => Some(SceneAction::Exit),
        },
        _ => None,
    }
}

pub fn render(surface: &mut dyn Surface, view: &SceneView) {
    surface.fill(BLACK);
    view.draw_fps(surface);
    view.draw_menu(surface, HEADING, "NEW GAME");
}
