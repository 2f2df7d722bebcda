//! Shape Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use shape_catch::cli::Args;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent};

    use shape_catch::Settings;
    use shape_catch::platform::FrameClock;
    use shape_catch::renderer::{CanvasPainter, Scene};
    use shape_catch::sim::{Difficulty, GameMode, GameState, click, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        painter: CanvasPainter,
        clock: FrameClock,
        /// Tab hidden: stop ticking until visible again
        suspended: bool,
        last_mode: GameMode,
    }

    impl Game {
        fn start(&mut self, difficulty: Difficulty) {
            let seed = js_sys::Date::now() as u64;
            match self.state.start(difficulty, seed) {
                Ok(()) => {
                    self.clock.reset();
                    if self.settings.difficulty != difficulty {
                        self.settings.difficulty = difficulty;
                        self.settings.save();
                    }
                }
                Err(e) => log::error!("Cannot start session: {}", e),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, time: f64) {
            let steps = self.clock.advance_to(time);
            if self.suspended {
                return;
            }
            for _ in 0..steps {
                let report = tick(&mut self.state);
                if report.game_over() {
                    break;
                }
            }
        }

        /// Render the current frame
        fn render(&self, scene: &Scene) {
            if let Err(e) = self.painter.draw(scene) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Update HUD and screens in DOM
        fn update_hud(&mut self, document: &Document, scene: &Scene) {
            set_text(document, "score", &scene.hud.score.to_string());
            set_text(document, "lives", &scene.hud.lives.to_string());
            set_text(document, "speed", &scene.hud.speed);
            set_hidden(document, "speed-item", !self.settings.show_speed);

            let mode = self.state.mode;
            if mode == self.last_mode {
                return;
            }
            self.last_mode = mode;
            set_hidden(document, "menu-screen", mode != GameMode::Menu);
            set_hidden(document, "game-over-screen", mode != GameMode::GameOver);
            if mode == GameMode::GameOver {
                set_text(document, "final-score", &self.state.score.to_string());
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Shape Catch starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let mut settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let state = match settings.new_session(seed) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Bad stored settings ({}), using defaults", e);
                settings = Settings::default();
                settings
                    .new_session(seed)
                    .expect("default settings are valid")
            }
        };

        canvas.set_width(state.playfield.width as u32);
        canvas.set_height(state.playfield.height as u32);
        let painter = CanvasPainter::new(canvas.clone()).expect("no 2d context");

        let game = Rc::new(RefCell::new(Game {
            state,
            settings,
            painter,
            clock: FrameClock::default(),
            suspended: false,
            last_mode: GameMode::GameOver,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_menu_buttons(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Shape Catch running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click - hit test
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let (x, y) = g
                    .painter
                    .to_playfield(event.client_x() as f64, event.client_y() as f64);
                click(&mut g.state, x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "Escape" => g.state.return_to_menu(),
                    "Enter" | " " if g.state.mode != GameMode::Playing => {
                        let tier = g.settings.difficulty;
                        g.start(tier);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            let scene = Scene::capture(&g.state);
            g.render(&scene);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document, &scene);
            }
        }

        request_animation_frame(game);
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        for difficulty in Difficulty::ALL {
            let game = game.clone();
            let id = format!("start-{}", difficulty.as_str());
            on_click(&document, &id, move |_| game.borrow_mut().start(difficulty));
        }

        {
            let game = game.clone();
            on_click(&document, "restart-btn", move |_| {
                let mut g = game.borrow_mut();
                let tier = g.state.difficulty;
                g.start(tier);
            });
        }

        on_click(&document, "menu-btn", move |_| {
            game.borrow_mut().state.return_to_menu();
        });
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                let mut g = game.borrow_mut();
                g.suspended = hidden;
                g.clock.reset();
                if hidden && g.state.mode == GameMode::Playing {
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window focus regained after blur: don't replay the stall
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().clock.reset();
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shape Catch (native) starting...");
    log::info!("Native mode runs a headless autoplay session - run with `trunk serve` for the web version");

    let args = Args::parse();
    let seed = args.seed_or_now();
    let settings = match args.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match autoplay::run(&settings, seed) {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use shape_catch::consts::SIM_DT;
    use shape_catch::renderer::format_speed;
    use shape_catch::sim::{GameEvent, GameMode, click, tick};
    use shape_catch::{Settings, SettingsError};

    /// Ticks between bot clicks (slow enough to eventually lose)
    const REACTION_TICKS: u64 = 20;
    /// Hard stop: ten minutes of play
    const MAX_TICKS: u64 = 60 * 60 * 10;

    pub fn run(settings: &Settings, seed: u64) -> Result<String, SettingsError> {
        let mut state = settings.new_session(seed)?;
        state.start(settings.difficulty, seed)?;

        let mut hits = 0u32;
        let mut misses = 0u32;
        while state.mode == GameMode::Playing && state.time_ticks < MAX_TICKS {
            let report = tick(&mut state);
            for event in &report.events {
                if let GameEvent::ShapeMissed { .. } = event {
                    misses += 1;
                }
            }

            if state.time_ticks % REACTION_TICKS == 0 {
                // Aim for the shape closest to the floor
                let target = state
                    .shapes
                    .iter()
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                    .map(|s| s.pos);
                if let Some(pos) = target {
                    if click(&mut state, pos.x, pos.y).is_some() {
                        hits += 1;
                    }
                }
            }

            if state.time_ticks % 600 == 0 {
                log::info!(
                    "t={:.0}s score={} lives={} speed={}",
                    state.time_ticks as f32 * SIM_DT,
                    state.score,
                    state.lives,
                    format_speed(state.speed_multiplier)
                );
            }
        }

        Ok(format!(
            "seed={} tier={} score={} hits={} misses={} survived={:.1}s",
            seed,
            state.difficulty.as_str(),
            state.score,
            hits,
            misses,
            state.time_ticks as f32 * SIM_DT
        ))
    }
}
