//! Scene state machine
//!
//! Exactly one of Title, Playing or Paused is active. Scenes never switch
//! themselves: they request an action, the transition table decides where it
//! leads, and the driver commits the result at the end of the frame. The
//! machine owns the live `Rally` so a pause can hand it back untouched.

pub mod layout;
pub mod paused;
pub mod playing;
pub mod title;

pub use layout::{MenuButton, MenuLayout};

use glam::Vec2;

use crate::colors::{GREEN, RED, WHITE};
use crate::consts::FPS_LABEL_POS;
use crate::error::ConfigError;
use crate::input::{HeldKeys, InputEvent};
use crate::platform::{RandomSource, Surface};
use crate::renderer::font::Fonts;
use crate::settings::Settings;
use crate::sim::{Playfield, Rally};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Title,
    Playing,
    Paused,
}

/// Things that can move the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneAction {
    /// NEW GAME clicked on the title
    NewGame,
    /// A ball left through a side edge
    BallOut,
    Pause,
    Resume,
    /// EXIT clicked on a menu
    Exit,
    /// Window close request
    CloseWindow,
}

/// Outcome waiting to be committed at frame end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Switch(SceneKind),
    Quit,
}

impl SceneKind {
    /// The transition table. `None` means the action means nothing here.
    pub fn next(self, action: SceneAction) -> Option<Transition> {
        use SceneAction::*;
        use SceneKind::*;

        match (self, action) {
            (_, CloseWindow) => Some(Transition::Quit),
            (Title, NewGame) => Some(Transition::Switch(Playing)),
            (Title, Exit) => Some(Transition::Quit),
            (Playing, BallOut) => Some(Transition::Switch(Title)),
            (Playing, Pause) => Some(Transition::Switch(Paused)),
            (Paused, Resume) => Some(Transition::Switch(Playing)),
            (Paused, Exit) => Some(Transition::Quit),
            _ => None,
        }
    }

    pub fn can_transition(self, action: SceneAction) -> bool {
        self.next(action).is_some()
    }
}

/// Read-only inputs for drawing a scene
pub struct SceneView<'a> {
    pub settings: &'a Settings,
    pub layout: &'a MenuLayout,
    pub fonts: &'a Fonts,
    pub fps: u32,
}

impl SceneView<'_> {
    pub(crate) fn draw_fps(&self, surface: &mut dyn Surface) {
        if !self.settings.show_fps {
            return;
        }
        let label = surface.draw_text(&format!("FPS: {}", self.fps), &self.fonts.small, WHITE);
        surface.blit(&label, Vec2::new(FPS_LABEL_POS.0, FPS_LABEL_POS.1));
    }

    /// Heading plus a green primary and a red exit button
    pub(crate) fn draw_menu(&self, surface: &mut dyn Surface, heading: &str, primary: &str) {
        let image = surface.draw_text(heading, &self.fonts.large, WHITE);
        let pos = image.centered_x(self.settings.playfield_width, self.layout.heading_y);
        surface.blit(&image, pos);

        for (rect, color, caption) in [
            (&self.layout.primary, GREEN, primary),
            (&self.layout.exit, RED, "EXIT"),
        ] {
            surface.draw_rect(rect, color);
            let text = surface.draw_text(caption, &self.fonts.small, WHITE);
            surface.blit(&text, text.centered_in(rect));
        }
    }
}

/// Owns the active scene, the pending transition and the live rally
#[derive(Debug)]
pub struct SceneMachine {
    active: Option<SceneKind>,
    pending: Transition,
    rally: Option<Rally>,
    held: HeldKeys,
    fps: u32,
    settings: Settings,
    playfield: Playfield,
    layout: MenuLayout,
    fonts: Fonts,
}

impl SceneMachine {
    /// Start on the title screen. Fails if the settings can't build a table.
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        Self::with_fonts(settings, Fonts::default())
    }

    pub fn with_fonts(settings: Settings, fonts: Fonts) -> Result<Self, ConfigError> {
        // Build one table up front so a bad config fails here, not at NEW GAME
        Rally::new(&settings)?;

        Ok(Self {
            active: Some(SceneKind::Title),
            pending: Transition::Stay,
            rally: None,
            held: HeldKeys::new(),
            fps: 0,
            playfield: Playfield::from(&settings),
            layout: MenuLayout::from_settings(&settings),
            settings,
            fonts,
        })
    }

    pub fn active(&self) -> Option<SceneKind> {
        self.active
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn pending(&self) -> Transition {
        self.pending
    }

    pub fn rally(&self) -> Option<&Rally> {
        self.rally.as_ref()
    }

    pub fn rally_mut(&mut self) -> Option<&mut Rally> {
        self.rally.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    /// Ask for a transition; it takes effect on `commit`
    ///
    /// Actions the active scene has no row for are ignored. A pending quit
    /// is never overridden.
    pub fn request(&mut self, action: SceneAction) {
        let Some(active) = self.active else {
            return;
        };
        if self.pending == Transition::Quit {
            return;
        }
        match active.next(action) {
            Some(transition) => self.pending = transition,
            None => log::debug!("Ignoring {:?} in {:?}", action, active),
        }
    }

    pub fn terminate(&mut self) {
        self.pending = Transition::Quit;
    }

    /// Route this frame's events to the active scene
    pub fn handle_input(&mut self, events: &[InputEvent], held: &HeldKeys) {
        self.held = held.clone();

        let Some(active) = self.active else {
            return;
        };
        for event in events {
            let action = match (active, event) {
                (_, InputEvent::Quit) => Some(SceneAction::CloseWindow),
                (SceneKind::Title, event) => title::handle_input(event, &self.layout),
                (SceneKind::Playing, event) => playing::handle_input(event),
                (SceneKind::Paused, event) => paused::handle_input(event, &self.layout),
            };
            if let Some(action) = action {
                self.request(action);
            }
        }
    }

    /// Advance the active scene by one frame
    pub fn update(&mut self, fps: u32, rng: &mut dyn RandomSource) {
        self.fps = fps;

        if self.active != Some(SceneKind::Playing) {
            return;
        }
        let Some(rally) = self.rally.as_mut() else {
            return;
        };
        if let Some(action) = playing::update(rally, &self.held, &self.playfield, rng) {
            self.request(action);
        }
    }

    /// Draw the active scene. Takes `&self`: drawing never touches gameplay.
    pub fn render(&self, surface: &mut dyn Surface) {
        let view = SceneView {
            settings: &self.settings,
            layout: &self.layout,
            fonts: &self.fonts,
            fps: self.fps,
        };
        match self.active {
            Some(SceneKind::Title) => title::render(surface, &view),
            Some(SceneKind::Playing) => {
                playing::render(surface, &view, self.rally.as_ref().unwrap_or(&Rally::default()))
            }
            Some(SceneKind::Paused) => paused::render(surface, &view),
            None => {}
        }
    }

    /// Adopt the pending transition. Returns whether a scene is still active.
    pub fn commit(&mut self) -> bool {
        let pending = std::mem::replace(&mut self.pending, Transition::Stay);
        let Some(from) = self.active else {
            return false;
        };

        match pending {
            Transition::Stay => {}
            Transition::Quit => {
                log::info!("Leaving from {:?}", from);
                self.active = None;
                self.rally = None;
            }
            Transition::Switch(to) => {
                match (from, to) {
                    (SceneKind::Title, SceneKind::Playing) => match Rally::new(&self.settings) {
                        Ok(rally) => self.rally = Some(rally),
                        Err(e) => {
                            log::error!("Cannot start a rally: {}", e);
                            self.active = None;
                            return false;
                        }
                    },
                    (_, SceneKind::Title) => self.rally = None,
                    // Pause and resume hand the rally over as is
                    _ => {}
                }
                log::info!("Scene {:?} -> {:?}", from, to);
                self.active = Some(to);
            }
        }

        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::platform::{PcgRandom, SequenceRandom};
    use crate::renderer::QuadBatch;

    fn machine() -> SceneMachine {
        SceneMachine::new(Settings::default()).unwrap()
    }

    fn click(m: &mut SceneMachine, at: Vec2) {
        m.handle_input(&[InputEvent::MouseDown(at)], &HeldKeys::new());
    }

    fn key(m: &mut SceneMachine, key: Key) {
        m.handle_input(&[InputEvent::KeyDown(key)], &HeldKeys::new());
    }

    fn start_game(m: &mut SceneMachine) {
        let button = m.layout().primary.center();
        click(m, button);
        assert!(m.commit());
        assert_eq!(m.active(), Some(SceneKind::Playing));
    }

    #[test]
    fn test_transition_table() {
        use SceneAction::*;
        use SceneKind::*;

        assert_eq!(Title.next(NewGame), Some(Transition::Switch(Playing)));
        assert_eq!(Title.next(Exit), Some(Transition::Quit));
        assert_eq!(Playing.next(BallOut), Some(Transition::Switch(Title)));
        assert_eq!(Playing.next(Pause), Some(Transition::Switch(Paused)));
        assert_eq!(Paused.next(Resume), Some(Transition::Switch(Playing)));
        assert_eq!(Paused.next(Exit), Some(Transition::Quit));
        for scene in [Title, Playing, Paused] {
            assert_eq!(scene.next(CloseWindow), Some(Transition::Quit));
        }

        assert!(!Title.can_transition(Pause));
        assert!(!Title.can_transition(BallOut));
        assert!(!Playing.can_transition(NewGame));
        assert!(!Playing.can_transition(Exit));
        assert!(!Paused.can_transition(BallOut));
        assert!(!Paused.can_transition(Pause));
    }

    #[test]
    fn test_starts_on_title_without_rally() {
        let m = machine();
        assert_eq!(m.active(), Some(SceneKind::Title));
        assert!(m.rally().is_none());
        assert_eq!(m.pending(), Transition::Stay);
    }

    #[test]
    fn test_invalid_settings_fail_fast() {
        let settings = Settings {
            paddle_height: -1.0,
            ..Default::default()
        };
        assert!(SceneMachine::new(settings).is_err());
    }

    #[test]
    fn test_new_game_builds_fresh_rally() {
        let mut m = machine();
        start_game(&mut m);
        let rally = m.rally().unwrap();
        assert_eq!(rally.balls.len(), 1);
        assert_eq!(rally.balls[0].rect.pos, Vec2::new(495.0, 295.0));
        assert_eq!(rally.paddles.len(), 2);
    }

    #[test]
    fn test_transition_waits_for_commit() {
        let mut m = machine();
        let button = m.layout().primary.center();
        click(&mut m, button);
        assert_eq!(m.active(), Some(SceneKind::Title));
        assert_eq!(m.pending(), Transition::Switch(SceneKind::Playing));

        // Render still sees the title
        let mut batch = QuadBatch::new();
        m.render(&mut batch);
        assert!(batch.contains(&m.layout().primary, GREEN));

        m.commit();
        assert_eq!(m.active(), Some(SceneKind::Playing));
        assert_eq!(m.pending(), Transition::Stay);
    }

    #[test]
    fn test_pause_and_resume_keep_the_rally() {
        let mut m = machine();
        let mut rng = PcgRandom::new(3);
        start_game(&mut m);

        let held: HeldKeys = [Key::S, Key::Up].into_iter().collect();
        for _ in 0..20 {
            m.handle_input(&[], &held);
            m.update(120, &mut rng);
            m.commit();
        }
        let before = m.rally().unwrap().clone();
        assert_eq!(before.balls[0].rect.pos, Vec2::new(595.0, 295.0));

        key(&mut m, Key::Escape);
        m.commit();
        assert_eq!(m.active(), Some(SceneKind::Paused));
        assert_eq!(m.rally(), Some(&before));

        // Time in the pause menu doesn't move anything
        for _ in 0..10 {
            m.handle_input(&[], &held);
            m.update(120, &mut rng);
            m.commit();
        }
        assert_eq!(m.rally(), Some(&before));

        key(&mut m, Key::Escape);
        m.commit();
        assert_eq!(m.active(), Some(SceneKind::Playing));
        assert_eq!(m.rally(), Some(&before));
    }

    #[test]
    fn test_resume_button() {
        let mut m = machine();
        start_game(&mut m);
        key(&mut m, Key::Escape);
        m.commit();

        let resume = m.layout().primary.center();
        click(&mut m, resume);
        m.commit();
        assert_eq!(m.active(), Some(SceneKind::Playing));
    }

    #[test]
    fn test_ball_out_returns_to_title_and_drops_rally() {
        let mut m = machine();
        let mut rng = SequenceRandom::new(vec![0]);
        start_game(&mut m);

        let width = m.settings().playfield_width;
        m.rally_mut().unwrap().balls[0].rect.pos.x = width - 2.0;
        m.handle_input(&[], &HeldKeys::new());
        m.update(120, &mut rng);
        assert_eq!(m.pending(), Transition::Switch(SceneKind::Title));
        assert!(m.rally().is_some());

        assert!(m.commit());
        assert_eq!(m.active(), Some(SceneKind::Title));
        assert!(m.rally().is_none());

        // A new game starts from scratch
        start_game(&mut m);
        assert_eq!(m.rally().unwrap().balls[0].rect.pos, Vec2::new(495.0, 295.0));
    }

    #[test]
    fn test_exit_buttons_quit() {
        let mut m = machine();
        let exit = m.layout().exit.center();
        click(&mut m, exit);
        assert!(!m.commit());
        assert_eq!(m.active(), None);

        let mut m = machine();
        start_game(&mut m);
        key(&mut m, Key::Escape);
        m.commit();
        click(&mut m, exit);
        assert!(!m.commit());
        assert!(m.rally().is_none());
    }

    #[test]
    fn test_exit_button_ignored_while_playing() {
        let mut m = machine();
        start_game(&mut m);
        let exit = m.layout().exit.center();
        click(&mut m, exit);
        assert!(m.commit());
        assert_eq!(m.active(), Some(SceneKind::Playing));
    }

    #[test]
    fn test_quit_is_sticky() {
        let mut m = machine();
        m.terminate();
        let button = m.layout().primary.center();
        click(&mut m, button);
        m.request(SceneAction::NewGame);
        assert_eq!(m.pending(), Transition::Quit);
        assert!(!m.commit());

        // Nothing revives a stopped machine
        m.request(SceneAction::NewGame);
        assert!(!m.commit());
    }

    #[test]
    fn test_close_event_quits_from_any_scene() {
        let mut m = machine();
        start_game(&mut m);
        m.handle_input(&[InputEvent::Quit], &HeldKeys::new());
        assert!(!m.commit());
    }

    #[test]
    fn test_render_does_not_touch_gameplay() {
        let mut m = machine();
        start_game(&mut m);
        let before = m.rally().unwrap().clone();
        let mut batch = QuadBatch::new();
        for _ in 0..3 {
            m.render(&mut batch);
        }
        assert_eq!(m.rally(), Some(&before));
        assert_eq!(m.pending(), Transition::Stay);
    }

    #[test]
    fn test_input_works_before_first_render() {
        // Hitboxes come from the layout, not from a previous draw
        let mut m = machine();
        click(&mut m, Vec2::new(500.0, 450.0));
        assert_eq!(m.pending(), Transition::Switch(SceneKind::Playing));
    }
}
