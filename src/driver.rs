//! Frame loop
//!
//! One frame: read held keys, drain events (close requests become a
//! termination request and are not passed on), input, update, render,
//! commit the pending transition, present. `run` repeats that and paces
//! with the clock until no scene is left.

use crate::input::InputEvent;
use crate::platform::{Clock, InputSource, RandomSource, Surface};
use crate::scene::SceneMachine;

/// Run a single frame. Returns whether a scene is still active.
pub fn frame(
    machine: &mut SceneMachine,
    input: &mut dyn InputSource,
    surface: &mut dyn Surface,
    measured_fps: u32,
    rng: &mut dyn RandomSource,
) -> bool {
    let held = input.held_keys();
    let mut events = input.poll_events();

    let before = events.len();
    events.retain(|e| *e != InputEvent::Quit);
    if events.len() != before {
        log::info!("Window close requested");
        machine.terminate();
    }

    machine.handle_input(&events, &held);
    machine.update(measured_fps, rng);
    machine.render(surface);
    let running = machine.commit();
    surface.present();
    running
}

/// Loop until the machine stops. Returns the number of frames run.
pub fn run(
    machine: &mut SceneMachine,
    input: &mut dyn InputSource,
    surface: &mut dyn Surface,
    clock: &mut dyn Clock,
    rng: &mut dyn RandomSource,
) -> u64 {
    let target_fps = machine.settings().target_fps;
    let mut frames = 0;

    while machine.is_running() {
        frame(machine, input, surface, clock.measured_fps(), rng);
        clock.tick(target_fps);
        frames += 1;
    }

    log::info!("Stopped after {} frames", frames);
    frames
}
