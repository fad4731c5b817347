//! Input sources: a live event queue and a scripted one for headless runs

use std::collections::VecDeque;

use glam::Vec2;

use super::InputSource;
use crate::input::{HeldKeys, InputEvent, Key};

/// Collects platform callbacks between frames
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    held: HeldKeys,
    pending: Vec<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.press(key);
        self.pending.push(InputEvent::KeyDown(key));
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.release(key);
    }

    pub fn mouse_down(&mut self, pos: Vec2) {
        self.pending.push(InputEvent::MouseDown(pos));
    }

    pub fn quit(&mut self) {
        self.pending.push(InputEvent::Quit);
    }

    /// Forget held keys (focus lost, key-up events will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl InputSource for EventQueue {
    fn held_keys(&mut self) -> HeldKeys {
        self.held.clone()
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }
}

/// Input for one scripted frame
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrame {
    pub held: HeldKeys,
    pub events: Vec<InputEvent>,
}

/// Replays a fixed list of frames, then asks to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<ScriptedFrame>,
    current: ScriptedFrame,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` frames holding `keys` with no events
    pub fn hold(mut self, keys: &[Key], count: usize) -> Self {
        let held: HeldKeys = keys.iter().copied().collect();
        for _ in 0..count {
            self.frames.push_back(ScriptedFrame {
                held: held.clone(),
                events: Vec::new(),
            });
        }
        self
    }

    /// Append one frame delivering `event`
    pub fn event(mut self, event: InputEvent) -> Self {
        self.frames.push_back(ScriptedFrame {
            held: HeldKeys::new(),
            events: vec![event],
        });
        self
    }

    /// Append `count` empty frames
    pub fn idle(self, count: usize) -> Self {
        self.hold(&[], count)
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    // Called first each frame, so it advances the script
    fn held_keys(&mut self) -> HeldKeys {
        self.current = self.frames.pop_front().unwrap_or_else(|| ScriptedFrame {
            held: HeldKeys::new(),
            events: vec![InputEvent::Quit],
        });
        self.current.held.clone()
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.current.events)
    }
}
