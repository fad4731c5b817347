//! Menu layout
//!
//! Button rectangles are a pure function of the playfield and button size.
//! Rendering draws them and input handling hit-tests them from the same
//! values, so neither depends on the other having run first.

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::Rect;

/// The two buttons every menu has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    /// NEW GAME on the title, RESUME when paused
    Primary,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuLayout {
    pub primary: Rect,
    pub exit: Rect,
    /// Top edge of the heading
    pub heading_y: f32,
}

impl MenuLayout {
    pub fn new(
        playfield_width: f32,
        playfield_height: f32,
        button_width: f32,
        button_height: f32,
    ) -> Self {
        let x = playfield_width / 2.0 - button_width / 2.0;
        // Vertical offsets are measured in button widths
        let primary_y = playfield_height - (button_width + button_width * 0.75);
        let exit_y = playfield_height - button_width;

        Self {
            primary: Rect::new(x, primary_y, button_width, button_height),
            exit: Rect::new(x, exit_y, button_width, button_height),
            heading_y: playfield_height * crate::consts::HEADING_HEIGHT_FRACTION,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.playfield_width,
            settings.playfield_height,
            settings.button_width,
            settings.button_height,
        )
    }

    /// Which button, if any, covers `point`
    pub fn hit(&self, point: Vec2) -> Option<MenuButton> {
        if self.primary.contains_point(point) {
            Some(MenuButton::Primary)
        } else if self.exit.contains_point(point) {
            Some(MenuButton::Exit)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = MenuLayout::from_settings(&Settings::default());
        assert_eq!(layout.primary, Rect::new(450.0, 425.0, 100.0, 50.0));
        assert_eq!(layout.exit, Rect::new(450.0, 500.0, 100.0, 50.0));
        assert_eq!(layout.heading_y, 120.0);
    }

    #[test]
    fn test_hit() {
        let layout = MenuLayout::from_settings(&Settings::default());
        assert_eq!(layout.hit(Vec2::new(500.0, 450.0)), Some(MenuButton::Primary));
        assert_eq!(layout.hit(Vec2::new(451.0, 549.0)), Some(MenuButton::Exit));
        assert_eq!(layout.hit(Vec2::new(500.0, 490.0)), None);
        assert_eq!(layout.hit(Vec2::new(10.0, 10.0)), None);
    }
}
