//! Scene Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use scene_pong::driver;
    use scene_pong::input::Key;
    use scene_pong::platform::{EventQueue, FpsCounter, FramePacer, PcgRandom};
    use scene_pong::renderer::{QuadBatch, RenderState};
    use scene_pong::{RenderError, SceneMachine, Settings};

    /// Game instance holding all state
    struct Game {
        machine: SceneMachine,
        input: EventQueue,
        batch: QuadBatch,
        rng: PcgRandom,
        render_state: Option<RenderState>,
        fps: FpsCounter,
        pacer: FramePacer,
    }

    impl Game {
        fn new(machine: SceneMachine, seed: u64) -> Self {
            let pacer = FramePacer::new(machine.settings().target_fps);
            Self {
                machine,
                input: EventQueue::new(),
                batch: QuadBatch::new(),
                rng: PcgRandom::new(seed),
                render_state: None,
                fps: FpsCounter::new(),
                pacer,
            }
        }

        /// Canvas-relative CSS pixels to playfield coordinates
        fn to_playfield(&self, canvas: &HtmlCanvasElement, x: f32, y: f32) -> Vec2 {
            let settings = self.machine.settings();
            let w = canvas.client_width().max(1) as f32;
            let h = canvas.client_height().max(1) as f32;
            Vec2::new(
                x / w * settings.playfield_width,
                y / h * settings.playfield_height,
            )
        }

        /// Run every frame due at `time` (ms). Returns whether the game is still running.
        fn step(&mut self, time: f64) -> bool {
            // rAF fires at the display rate; catch up to the target rate
            let due = self.pacer.due_frames(time / 1000.0);
            if due == 0 {
                return true;
            }

            let mut running = true;
            for _ in 0..due {
                self.fps.record(time / 1000.0);
                running = driver::frame(
                    &mut self.machine,
                    &mut self.input,
                    &mut self.batch,
                    self.fps.fps(),
                    &mut self.rng,
                );
                if !running {
                    break;
                }
            }
            self.render();
            running
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    async fn create_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        playfield: (f32, f32),
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, playfield).await
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
        }

        log::info!("Scene Pong starting...");

        let settings = match Settings::load() {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Invalid settings, falling back to defaults: {}", e);
                Settings::default()
            }
        };
        // Leave an editable copy behind
        settings.save();

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let playfield = (settings.playfield_width, settings.playfield_height);
        let machine =
            SceneMachine::new(settings).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new(machine, seed)));
        log::info!("Game initialized with seed: {}", seed);

        let render_state = create_renderer(&canvas, width, height, playfield)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;
        request_animation_frame(game);

        log::info!("Scene Pong running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom_key(&event.key()) else {
                    return;
                };
                // Arrows would scroll the page
                event.prevent_default();
                if !event.repeat() {
                    game.borrow_mut().input.key_down(key);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Menu clicks
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_playfield(
                    &canvas_clone,
                    event.offset_x() as f32,
                    event.offset_y() as f32,
                );
                g.input.mouse_down(pos);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key-up events never arrive once focus is gone
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.release_all();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = game.borrow_mut().step(time);
        if running {
            request_animation_frame(game);
        } else {
            log::info!("Scene Pong stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use scene_pong::{SceneMachine, Settings, driver};

    env_logger::init();
    log::info!("Scene Pong (native) starting...");
    log::info!("Native mode runs a scripted headless session - run with `trunk serve` to play");

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            eprintln!("scene-pong: {}", e);
            std::process::exit(1);
        }
    };

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut machine = match SceneMachine::new(settings) {
        Ok(machine) => machine,
        Err(e) => {
            log::error!("Cannot build the table: {}", e);
            eprintln!("scene-pong: {}", e);
            std::process::exit(1);
        }
    };

    let mut input = demo_script(&machine);
    let mut surface = scene_pong::renderer::QuadBatch::new();
    let mut clock = scene_pong::platform::SystemClock::new();
    let mut rng = scene_pong::platform::PcgRandom::new(seed);

    let frames = driver::run(&mut machine, &mut input, &mut surface, &mut clock, &mut rng);
    println!(
        "Headless session finished: {} frames, {} presented, seed {}",
        frames,
        surface.frames_presented(),
        seed
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Start a game, rally for a while, pause, resume, pause again and exit
#[cfg(not(target_arch = "wasm32"))]
fn demo_script(machine: &scene_pong::SceneMachine) -> scene_pong::platform::ScriptedInput {
    use scene_pong::input::{InputEvent, Key};

    let layout = machine.layout();
    scene_pong::platform::ScriptedInput::new()
        .idle(30)
        .event(InputEvent::MouseDown(layout.primary.center()))
        .hold(&[Key::W, Key::Down], 60)
        .hold(&[Key::S, Key::Up], 60)
        .event(InputEvent::KeyDown(Key::Escape))
        .idle(30)
        .event(InputEvent::KeyDown(Key::Escape))
        .idle(60)
        .event(InputEvent::KeyDown(Key::Escape))
        .event(InputEvent::MouseDown(layout.exit.center()))
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
